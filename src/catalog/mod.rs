use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::utils::letters::normalize;

/// A word theme as delivered by the catalog collaborator.
#[derive(Debug, Clone)]
pub struct Theme {
    pub id: i64,
    pub name: String,
}

/// One candidate word inside a theme.
#[derive(Debug, Clone)]
pub struct ThemeWord {
    pub id: i64,
    pub theme_id: i64,
    pub text: String,
}

/// Aggregate counts used to decide whether a theme/grid-size combination
/// is even worth attempting before generation runs.
#[derive(Debug, Clone, Copy)]
pub struct ThemeStats {
    pub word_count: usize,
    pub min_word_length: usize,
    pub max_word_length: usize,
}

impl ThemeStats {
    /// A theme is viable for a grid when it can supply the minimum puzzle
    /// size and its shortest word fits along the longer axis.
    pub fn supports_grid(&self, row_count: usize, col_count: usize) -> bool {
        self.word_count >= 3 && self.min_word_length <= row_count.max(col_count)
    }
}

/// Word-catalog collaborator. The engine only reads from it; import and
/// storage of themes are somebody else's problem.
#[async_trait]
pub trait WordCatalog: Send + Sync {
    async fn themes(&self) -> Result<Vec<Theme>>;

    /// Words of a theme no longer than `max_length` characters.
    async fn words(&self, theme_id: i64, max_length: usize) -> Result<Vec<ThemeWord>>;

    async fn stats(&self, theme_id: i64) -> Result<ThemeStats>;
}

/// Catalog backed by plain vectors, for the demo binary and tests.
#[derive(Default)]
pub struct InMemoryCatalog {
    themes: Vec<Theme>,
    words: HashMap<i64, Vec<ThemeWord>>,
    next_word_id: i64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_theme(&mut self, id: i64, name: &str, words: &[&str]) {
        self.themes.push(Theme {
            id,
            name: name.to_string(),
        });
        let entries = words
            .iter()
            .map(|text| {
                self.next_word_id += 1;
                ThemeWord {
                    id: self.next_word_id,
                    theme_id: id,
                    text: normalize(text),
                }
            })
            .collect();
        self.words.insert(id, entries);
    }
}

#[async_trait]
impl WordCatalog for InMemoryCatalog {
    async fn themes(&self) -> Result<Vec<Theme>> {
        Ok(self.themes.clone())
    }

    async fn words(&self, theme_id: i64, max_length: usize) -> Result<Vec<ThemeWord>> {
        let words = self
            .words
            .get(&theme_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|w| w.text.chars().count() <= max_length)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(words)
    }

    async fn stats(&self, theme_id: i64) -> Result<ThemeStats> {
        let entries = self.words.get(&theme_id).cloned().unwrap_or_default();
        let lengths: Vec<usize> = entries.iter().map(|w| w.text.chars().count()).collect();
        Ok(ThemeStats {
            word_count: entries.len(),
            min_word_length: lengths.iter().copied().min().unwrap_or(0),
            max_word_length: lengths.iter().copied().max().unwrap_or(0),
        })
    }
}
