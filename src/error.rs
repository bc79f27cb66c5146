use thiserror::Error;
use uuid::Uuid;

/// Errors the engine surfaces to callers. Placement shortfalls, rejected
/// answers, and forced losses are handled locally and never appear here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The retry budget ran out without placing a single word. Callers
    /// should offer a different theme or grid size, not crash.
    #[error("puzzle generation exhausted after {retries} attempts with no words placed")]
    GenerationExhausted { retries: u32 },

    /// No saved session exists for the requested id.
    #[error("no saved session found for id {0}")]
    SessionNotFound(Uuid),

    /// The operation needs a session in the Playing state.
    #[error("session is not in a playable state")]
    NotPlaying,

    /// A storage or catalog collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
