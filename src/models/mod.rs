pub mod game;
pub mod puzzle;

pub use game::{
    // Session aggregate and its parts
    AnswerLine, AnswerResult, Difficulty, GameData, GameMode, GameState, UsedWord,
};
pub use puzzle::{
    // Grid types
    Direction, LetterGrid, PlacedWord, Puzzle, EMPTY_CELL,
};
