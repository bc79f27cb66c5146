//! Puzzle-generation and game-session engine for a word-search game.
//!
//! [`game::PuzzleBuilder`] hides theme words in a letter grid along the
//! eight compass headings; [`session::SessionEngine`] drives one play
//! session through its lifecycle (generate or load, play, finish),
//! verifying selections and enforcing the per-mode timing rules.
//! Word catalogs and persistence are collaborators behind the
//! [`catalog::WordCatalog`] and [`storage::GameDataStore`] traits.

pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod session;
pub mod storage;
pub mod utils;

pub use config::{Config, GameConfig, Preferences};
pub use error::EngineError;
pub use models::{
    AnswerLine, AnswerResult, Difficulty, GameData, GameMode, GameState, Puzzle, UsedWord,
};
pub use session::SessionEngine;
