use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordsearch_engine::{
    catalog::{InMemoryCatalog, WordCatalog},
    storage::{GameDataStore, MemoryStore},
    utils::duration::format_seconds,
    Config, Difficulty, GameMode, GameState, SessionEngine,
};

/// Generates a puzzle from a demo catalog, plays it to completion by
/// answering every placed word, and prints what the UI collaborator
/// would render along the way.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordsearch_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let mut catalog = InMemoryCatalog::new();
    catalog.add_theme(
        1,
        "Animals",
        &[
            "cat", "dog", "horse", "rabbit", "donkey", "pigeon", "weasel", "badger", "ferret",
            "otter",
        ],
    );

    let (row_count, col_count) = (10, 10);
    let stats = catalog.stats(1).await?;
    if !stats.supports_grid(row_count, col_count) {
        anyhow::bail!("theme cannot fill a {}x{} grid", row_count, col_count);
    }

    let words = catalog.words(1, row_count.max(col_count)).await?;
    let pool: Vec<String> = words.into_iter().map(|w| w.text).collect();

    let store: Arc<dyn GameDataStore> = Arc::new(MemoryStore::new());
    let engine = SessionEngine::new(config.game.clone(), store);
    let mut state_rx = engine.subscribe_state();

    engine
        .generate_new_session(
            row_count,
            col_count,
            "Animals",
            pool,
            GameMode::Normal,
            Difficulty::Easy,
        )
        .await??;

    let game = match state_rx.borrow_and_update().clone() {
        Some(GameState::Playing(game)) => game,
        other => anyhow::bail!("expected a playing session, got {:?}", other),
    };

    println!("Theme: {} ({} hidden words)\n", game.theme_name, game.used_words.len());
    for row in 0..game.grid.row_count() {
        let line: String = (0..game.grid.col_count())
            .filter_map(|col| game.grid.at(row, col))
            .flat_map(|c| [c, ' '])
            .collect();
        println!("  {}", line.trim_end());
    }
    println!();

    for word in &game.used_words {
        let placed = &word.placed;
        println!(
            "  {:<10} ({}, {}) -> ({}, {})",
            placed.word,
            placed.start_row,
            placed.start_col,
            placed.end_row(),
            placed.end_col()
        );
        let line = wordsearch_engine::AnswerLine {
            start_row: placed.start_row,
            start_col: placed.start_col,
            end_row: placed.end_row(),
            end_col: placed.end_col(),
        };
        let result = engine.answer_word(word.word(), line, config.preferences.reverse_matching);
        assert!(result.correct);
    }

    loop {
        if let Some(GameState::Finished { game_data, win }) = state_rx.borrow_and_update().clone()
        {
            println!(
                "\nFinished: win={}, {} words in {}",
                win,
                game_data.answered_words_count(),
                format_seconds(game_data.elapsed_duration)
            );
            break;
        }
        state_rx.changed().await?;
    }

    engine.stop_game();
    Ok(())
}
