use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub preferences: Preferences,
}

/// Tuning knobs for puzzle generation. Budgets are tunable parameters,
/// not contracts.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Random (direction, origin) trials per word before it is skipped.
    pub max_placement_trials: u32,
    /// Whole-build retries when too few words were placed.
    pub max_build_retries: u32,
    /// Minimum placed/requested ratio for a build to be accepted.
    pub min_placed_fraction: f32,
    /// Allow words to cross where their letters already match.
    pub allow_crossing: bool,
}

/// Player preference flags the engine reads as plain values. Everything
/// else about preferences lives with the UI collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct Preferences {
    /// Accept a word selected back-to-front as a valid answer.
    pub reverse_matching: bool,
    /// Scale the rendered grid to the available space; the engine only
    /// stores and hands this back to the display collaborator.
    pub auto_scale_grid: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let game = GameConfig {
            max_placement_trials: env::var("MAX_PLACEMENT_TRIALS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .context("MAX_PLACEMENT_TRIALS must be a number")?,
            max_build_retries: env::var("MAX_BUILD_RETRIES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("MAX_BUILD_RETRIES must be a number")?,
            min_placed_fraction: env::var("MIN_PLACED_FRACTION")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()
                .context("MIN_PLACED_FRACTION must be a number between 0 and 1")?,
            allow_crossing: env::var("ALLOW_CROSSING")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("ALLOW_CROSSING must be true or false")?,
        };

        let preferences = Preferences {
            reverse_matching: env::var("REVERSE_MATCHING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("REVERSE_MATCHING must be true or false")?,
            auto_scale_grid: env::var("AUTO_SCALE_GRID")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("AUTO_SCALE_GRID must be true or false")?,
        };

        Ok(Config { game, preferences })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_placement_trials: 100,
            max_build_retries: 5,
            min_placed_fraction: 0.5,
            allow_crossing: true,
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            reverse_matching: false,
            auto_scale_grid: true,
        }
    }
}
