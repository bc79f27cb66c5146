use rand::Rng;

use crate::{
    config::GameConfig,
    models::{Direction, LetterGrid, PlacedWord, EMPTY_CELL},
    utils::letters::normalize,
};

/// Hides words in a grid by bounded random search.
///
/// Words are tried longest-first so the hardest fits claim space before
/// short words fragment it. Each word gets a budget of random
/// (direction, origin) trials; a trial succeeds when every cell on the
/// path is empty or already holds the letter the word needs there, which
/// lets words cross without ever overwriting an earlier placement.
pub struct WordPlacer {
    max_trials: u32,
    allow_crossing: bool,
}

impl WordPlacer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            max_trials: config.max_placement_trials,
            allow_crossing: config.allow_crossing,
        }
    }

    /// Place as many of `words` as the trial budget allows. Words that do
    /// not fit are skipped, never an error.
    pub fn place(
        &self,
        words: &[String],
        grid: &mut LetterGrid,
        rng: &mut impl Rng,
    ) -> Vec<PlacedWord> {
        let mut candidates: Vec<String> = words.iter().map(|w| normalize(w)).collect();
        candidates.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let mut placed = Vec::new();
        for word in candidates {
            if word.is_empty() {
                continue;
            }
            match self.try_place(&word, grid, rng) {
                Some(p) => placed.push(p),
                None => {
                    tracing::debug!("no placement found for '{}', skipping", word);
                }
            }
        }
        placed
    }

    fn try_place(
        &self,
        word: &str,
        grid: &mut LetterGrid,
        rng: &mut impl Rng,
    ) -> Option<PlacedWord> {
        let letters: Vec<char> = word.chars().collect();
        // A word longer than both grid axes cannot fit in any direction.
        if letters.len() > grid.row_count().max(grid.col_count()) {
            return None;
        }

        for _ in 0..self.max_trials {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let Some((start_row, start_col)) =
                Self::random_origin(letters.len(), direction, grid, rng)
            else {
                continue;
            };

            if self.fits(&letters, start_row, start_col, direction, grid) {
                let placed = PlacedWord {
                    word: word.to_string(),
                    start_row,
                    start_col,
                    direction,
                    length: letters.len(),
                };
                for ((row, col), letter) in placed.path().into_iter().zip(&letters) {
                    grid.set(row, col, *letter);
                }
                return Some(placed);
            }
        }
        None
    }

    /// Pick a random origin whose full path stays in bounds for the given
    /// direction, or `None` when the word cannot fit along that heading.
    fn random_origin(
        length: usize,
        direction: Direction,
        grid: &LetterGrid,
        rng: &mut impl Rng,
    ) -> Option<(usize, usize)> {
        let span = length as isize - 1;
        let (dr, dc) = direction.delta();
        let row_range = Self::axis_range(dr, span, grid.row_count())?;
        let col_range = Self::axis_range(dc, span, grid.col_count())?;
        let row = rng.random_range(row_range.0..=row_range.1);
        let col = rng.random_range(col_range.0..=col_range.1);
        Some((row, col))
    }

    /// Valid start positions along one axis for a word spanning `span`
    /// extra cells in delta direction `d`.
    fn axis_range(d: isize, span: isize, size: usize) -> Option<(usize, usize)> {
        let size = size as isize;
        let (lo, hi) = match d {
            1 => (0, size - 1 - span),
            -1 => (span, size - 1),
            _ => (0, size - 1),
        };
        if lo > hi {
            None
        } else {
            Some((lo as usize, hi as usize))
        }
    }

    fn fits(
        &self,
        letters: &[char],
        start_row: usize,
        start_col: usize,
        direction: Direction,
        grid: &LetterGrid,
    ) -> bool {
        let (dr, dc) = direction.delta();
        letters.iter().enumerate().all(|(i, letter)| {
            let row = (start_row as isize + dr * i as isize) as usize;
            let col = (start_col as isize + dc * i as isize) as usize;
            match grid.at(row, col) {
                Some(cell) => cell == EMPTY_CELL || (self.allow_crossing && cell == *letter),
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn placer(allow_crossing: bool) -> WordPlacer {
        WordPlacer::new(&GameConfig {
            allow_crossing,
            ..GameConfig::default()
        })
    }

    fn assert_paths_legal(grid: &LetterGrid, placed: &[PlacedWord]) {
        for word in placed {
            let letters: Vec<char> = word.word.chars().collect();
            for ((row, col), letter) in word.path().into_iter().zip(letters) {
                assert_eq!(
                    grid.at(row, col),
                    Some(letter),
                    "cell ({}, {}) disagrees with '{}'",
                    row,
                    col,
                    word.word
                );
            }
        }
    }

    #[test]
    fn test_placed_paths_match_their_words() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = LetterGrid::new(10, 10);
        let words: Vec<String> = ["penguin", "walrus", "otter", "seal", "orca"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        let placed = placer(true).place(&words, &mut grid, &mut rng);

        assert!(!placed.is_empty());
        assert!(placed.len() <= words.len());
        assert_paths_legal(&grid, &placed);
    }

    #[test]
    fn test_oversized_word_is_skipped_not_fatal() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = LetterGrid::new(4, 4);
        let words = vec!["hippopotamus".to_string(), "cat".to_string()];

        let placed = placer(true).place(&words, &mut grid, &mut rng);

        assert!(placed.iter().all(|p| p.word != "HIPPOPOTAMUS"));
        assert!(placed.iter().any(|p| p.word == "CAT"));
    }

    #[test]
    fn test_placement_is_non_destructive() {
        // Saturate a small grid with many words; whatever ends up placed
        // must still read back intact, crossings included.
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = LetterGrid::new(6, 6);
        let words: Vec<String> = ["stream", "meters", "tensor", "roster", "crest", "reset"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        let placed = placer(true).place(&words, &mut grid, &mut rng);
        assert_paths_legal(&grid, &placed);
    }

    #[test]
    fn test_crossing_disabled_keeps_paths_disjoint() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = LetterGrid::new(8, 8);
        let words: Vec<String> = ["magnet", "nature", "tundra", "garden"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        let placed = placer(false).place(&words, &mut grid, &mut rng);

        let mut seen = std::collections::HashSet::new();
        for word in &placed {
            for cell in word.path() {
                assert!(seen.insert(cell), "cell {:?} used by two words", cell);
            }
        }
        assert_paths_legal(&grid, &placed);
    }
}
