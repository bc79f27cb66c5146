use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::GameData;

/// Persistence collaborator for sessions. The engine saves on creation,
/// pause, and finish, and loads when resuming; everything else about
/// storage (schema, retention, delete-after-finish) lives behind this
/// trait.
#[async_trait]
pub trait GameDataStore: Send + Sync {
    async fn save(&self, data: &GameData) -> Result<()>;
    async fn load(&self, id: Uuid) -> Result<Option<GameData>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// In-memory store keeping sessions as opaque JSON records, keyed by id.
#[derive(Default)]
pub struct MemoryStore {
    games: DashMap<Uuid, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[async_trait]
impl GameDataStore for MemoryStore {
    async fn save(&self, data: &GameData) -> Result<()> {
        let record = serde_json::to_value(data).context("failed to serialize game data")?;
        self.games.insert(data.id, record);
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Option<GameData>> {
        match self.games.get(&id) {
            Some(record) => {
                let data = serde_json::from_value(record.clone())
                    .context("failed to deserialize game data")?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.games.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, GameMode, LetterGrid};
    use chrono::Utc;

    fn sample_game() -> GameData {
        GameData {
            id: Uuid::new_v4(),
            theme_name: "Farm".into(),
            grid: LetterGrid::new(5, 5),
            used_words: Vec::new(),
            game_mode: GameMode::Normal,
            difficulty: Difficulty::Medium,
            max_duration: 0,
            elapsed_duration: 42,
            is_game_over: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let store = MemoryStore::new();
        let game = sample_game();

        store.save(&game).await.unwrap();
        assert_eq!(store.len(), 1);

        let loaded = store.load(game.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, game.id);
        assert_eq!(loaded.theme_name, "Farm");
        assert_eq!(loaded.elapsed_duration, 42);

        store.delete(game.id).await.unwrap();
        assert!(store.load(game.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
    }
}
