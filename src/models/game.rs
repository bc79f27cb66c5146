use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::puzzle::{LetterGrid, PlacedWord};

/// Game mode, each variant carrying only the data its clock discipline
/// needs. A zero duration means "derive from difficulty at session start".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GameMode {
    /// Free-running stopwatch.
    Normal,
    /// Stopwatch; unanswered words are rendered masked by the consumer.
    Hidden,
    /// Whole-session countdown; reaching zero is a forced loss.
    CountDown { max_duration: u32 },
    /// Per-word countdown; an expired word is missed and the session
    /// advances to the next one.
    Marathon { per_word_duration: u32 },
}

impl GameMode {
    pub fn is_count_down(&self) -> bool {
        matches!(self, GameMode::CountDown { .. })
    }

    pub fn is_marathon(&self) -> bool {
        matches!(self, GameMode::Marathon { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// CountDown budget per placed word, in seconds.
    pub fn seconds_per_word(&self) -> u32 {
        match self {
            Difficulty::Easy => 25,
            Difficulty::Medium => 16,
            Difficulty::Hard => 10,
        }
    }

    /// Marathon budget for a single word, in seconds.
    pub fn marathon_word_duration(&self) -> u32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 10,
            Difficulty::Hard => 5,
        }
    }

    /// Fraction of the word-count cap actually requested from the builder.
    /// Easier games hide more words in the same grid.
    pub fn word_count_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 0.75,
            Difficulty::Hard => 0.5,
        }
    }
}

/// Endpoints of a player's drag selection, always a straight line on the
/// grid. Produced by the selection collaborator, stored once accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLine {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl AnswerLine {
    /// True when this selection covers the placed word's span, in either
    /// drag orientation.
    pub fn matches(&self, placed: &PlacedWord) -> bool {
        let start = (placed.start_row, placed.start_col);
        let end = (placed.end_row(), placed.end_col());
        let line_start = (self.start_row, self.start_col);
        let line_end = (self.end_row, self.end_col);
        (line_start == start && line_end == end) || (line_start == end && line_end == start)
    }
}

/// Runtime wrapper over a placed word: answer bookkeeping plus the
/// Marathon per-word budget. Owned exclusively by its `GameData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedWord {
    pub id: usize,
    pub placed: PlacedWord,
    pub is_answered: bool,
    pub answer_line: Option<AnswerLine>,
    pub max_duration_for_word: Option<u32>,
}

impl UsedWord {
    pub fn new(id: usize, placed: PlacedWord) -> Self {
        Self {
            id,
            placed,
            is_answered: false,
            answer_line: None,
            max_duration_for_word: None,
        }
    }

    pub fn word(&self) -> &str {
        &self.placed.word
    }

    /// Answered without a stored line: a Marathon word that timed out.
    pub fn is_missed(&self) -> bool {
        self.is_answered && self.answer_line.is_none()
    }

    pub fn is_correctly_answered(&self) -> bool {
        self.is_answered && self.answer_line.is_some()
    }

    /// What the consumer should render for this word: Hidden mode masks
    /// unanswered words with one dot per letter.
    pub fn display_text(&self, mode: &GameMode) -> String {
        if matches!(mode, GameMode::Hidden) && !self.is_answered {
            "\u{2022}".repeat(self.placed.word.chars().count())
        } else {
            self.placed.word.clone()
        }
    }
}

/// Aggregate root for one play session. Mutated only by the session
/// engine; the storage collaborator persists it opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub id: Uuid,
    pub theme_name: String,
    pub grid: LetterGrid,
    pub used_words: Vec<UsedWord>,
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
    /// Whole-session budget in seconds; 0 = unbounded.
    pub max_duration: u32,
    pub elapsed_duration: u32,
    /// True only for a forced-stop loss, never for a normal win.
    pub is_game_over: bool,
    pub created_at: DateTime<Utc>,
}

impl GameData {
    /// Correctly answered words; Marathon misses do not count.
    pub fn answered_words_count(&self) -> usize {
        self.used_words
            .iter()
            .filter(|w| w.is_correctly_answered())
            .count()
    }

    /// First unanswered word in order, the "current" Marathon target.
    pub fn current_word(&self) -> Option<&UsedWord> {
        self.used_words.iter().find(|w| !w.is_answered)
    }

    pub fn all_words_answered(&self) -> bool {
        self.used_words.iter().all(|w| w.is_answered)
    }
}

/// Session lifecycle snapshot. Transitions are one-directional except the
/// internal Playing mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameState {
    Generating { row_count: usize, col_count: usize },
    Loading,
    Playing(GameData),
    Finished { game_data: GameData, win: bool },
}

impl GameState {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameState::Finished { .. })
    }
}

/// Outcome of one `answer_word` call, returned as a value so the engine
/// stays free of rendering concerns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    pub correct: bool,
    pub used_word: Option<UsedWord>,
}
