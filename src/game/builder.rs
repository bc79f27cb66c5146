use rand::{seq::SliceRandom, Rng};

use crate::{
    config::GameConfig,
    error::EngineError,
    game::{grid::GridAllocator, placer::WordPlacer},
    models::{Difficulty, Puzzle},
};

/// Orchestrates placement into a finished puzzle.
///
/// The word count follows the product rule of 3 to (grid dimension - 1)
/// words per puzzle, scaled down for harder difficulties. A build whose
/// placement falls short of the acceptance fraction is retried wholesale
/// with a fresh shuffle and grid; the best shortfall is kept as a
/// fallback so generation only fails when nothing placed at all.
pub struct PuzzleBuilder {
    config: GameConfig,
}

impl PuzzleBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn build(
        &self,
        candidate_words: &[String],
        row_count: usize,
        col_count: usize,
        difficulty: Difficulty,
        rng: &mut impl Rng,
    ) -> Result<Puzzle, EngineError> {
        let requested = Self::requested_word_count(
            candidate_words.len(),
            row_count,
            col_count,
            difficulty,
        );
        let accept_at = ((requested as f32) * self.config.min_placed_fraction).ceil() as usize;
        let placer = WordPlacer::new(&self.config);

        let mut pool = candidate_words.to_vec();
        let mut best: Option<Puzzle> = None;

        for attempt in 1..=self.config.max_build_retries {
            pool.shuffle(rng);
            let picked = &pool[..requested.min(pool.len())];

            let mut grid = GridAllocator::allocate(row_count, col_count);
            let placed_words = placer.place(picked, &mut grid, rng);

            tracing::debug!(
                "build attempt {}/{}: placed {}/{} words",
                attempt,
                self.config.max_build_retries,
                placed_words.len(),
                picked.len()
            );

            let candidate = Puzzle { grid, placed_words };
            if candidate.placed_words.len() >= accept_at && !candidate.placed_words.is_empty() {
                return Ok(Self::finalize(candidate, rng));
            }
            let best_len = best.as_ref().map_or(0, |p| p.placed_words.len());
            if candidate.placed_words.len() > best_len {
                best = Some(candidate);
            }
        }

        match best {
            Some(puzzle) => {
                tracing::warn!(
                    "accepting short build with {}/{} words after {} attempts",
                    puzzle.placed_words.len(),
                    requested,
                    self.config.max_build_retries
                );
                Ok(Self::finalize(puzzle, rng))
            }
            None => Err(EngineError::GenerationExhausted {
                retries: self.config.max_build_retries,
            }),
        }
    }

    fn finalize(mut puzzle: Puzzle, rng: &mut impl Rng) -> Puzzle {
        GridAllocator::fill_empty(&mut puzzle.grid, rng);
        puzzle
    }

    /// 3 to (smaller grid dimension - 1) words, capped by the pool and
    /// scaled by difficulty.
    fn requested_word_count(
        pool_len: usize,
        row_count: usize,
        col_count: usize,
        difficulty: Difficulty,
    ) -> usize {
        let dimension = row_count.min(col_count);
        let cap = 3.max(pool_len.min(dimension.saturating_sub(1)));
        let scaled = ((cap as f32) * difficulty.word_count_scale()).round() as usize;
        scaled.clamp(3.min(cap), cap)
    }
}
