use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use chrono::Utc;
use tokio::{sync::watch, task::AbortHandle, time};
use uuid::Uuid;

use crate::{
    config::GameConfig,
    error::EngineError,
    game::PuzzleBuilder,
    models::{
        AnswerLine, AnswerResult, Difficulty, GameData, GameMode, GameState, Puzzle, UsedWord,
    },
    session::clock::{ClockTick, ModeClock},
    storage::GameDataStore,
    utils::letters::normalize,
};

/// One play session: owns the state machine, the clock task, and the
/// answer-verification protocol.
///
/// Generation runs on a blocking worker and reports completion through the
/// returned join handle; consumers observe progress through watch
/// channels. Clock ticks and `answer_word` calls serialize on a single
/// mutex scoped to this session, which is never held across an await.
pub struct SessionEngine {
    shared: Arc<Shared>,
}

struct Shared {
    config: GameConfig,
    store: Arc<dyn GameDataStore>,
    inner: Mutex<Inner>,
    paused: AtomicBool,
    streams: Streams,
}

#[derive(Default)]
struct Inner {
    game: Option<GameData>,
    clock: Option<ModeClock>,
    playing: bool,
    generation: Option<AbortHandle>,
    ticker: Option<AbortHandle>,
}

/// Watch channels mirroring the observable surface the UI consumes:
/// state snapshots, elapsed/remaining timers, the last answer outcome,
/// and the current Marathon word with its remaining time.
struct Streams {
    state_tx: watch::Sender<Option<GameState>>,
    timer_tx: watch::Sender<u32>,
    count_down_tx: watch::Sender<u32>,
    answer_tx: watch::Sender<Option<AnswerResult>>,
    current_word_tx: watch::Sender<Option<UsedWord>>,
    word_count_down_tx: watch::Sender<u32>,
}

impl Default for Streams {
    fn default() -> Self {
        Self {
            state_tx: watch::channel(None).0,
            timer_tx: watch::channel(0).0,
            count_down_tx: watch::channel(0).0,
            answer_tx: watch::channel(None).0,
            current_word_tx: watch::channel(None).0,
            word_count_down_tx: watch::channel(0).0,
        }
    }
}

impl SessionEngine {
    pub fn new(config: GameConfig, store: Arc<dyn GameDataStore>) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                store,
                inner: Mutex::new(Inner::default()),
                paused: AtomicBool::new(false),
                streams: Streams::default(),
            }),
        }
    }

    pub fn subscribe_state(&self) -> watch::Receiver<Option<GameState>> {
        self.shared.streams.state_tx.subscribe()
    }

    /// Elapsed seconds of play.
    pub fn subscribe_timer(&self) -> watch::Receiver<u32> {
        self.shared.streams.timer_tx.subscribe()
    }

    /// Seconds left on the session countdown (CountDown mode).
    pub fn subscribe_count_down(&self) -> watch::Receiver<u32> {
        self.shared.streams.count_down_tx.subscribe()
    }

    pub fn subscribe_answer_result(&self) -> watch::Receiver<Option<AnswerResult>> {
        self.shared.streams.answer_tx.subscribe()
    }

    /// The current Marathon word, updated whenever it changes hands.
    pub fn subscribe_current_word(&self) -> watch::Receiver<Option<UsedWord>> {
        self.shared.streams.current_word_tx.subscribe()
    }

    /// Seconds left on the current Marathon word.
    pub fn subscribe_word_count_down(&self) -> watch::Receiver<u32> {
        self.shared.streams.word_count_down_tx.subscribe()
    }

    /// Start a new session: enter Generating, build the puzzle on a
    /// blocking worker, then construct the game data and enter Playing.
    ///
    /// Never blocks the caller; the returned handle reports generation
    /// completion or a [EngineError::GenerationExhausted] failure.
    pub fn generate_new_session(
        &self,
        row_count: usize,
        col_count: usize,
        theme_name: &str,
        theme_words: Vec<String>,
        game_mode: GameMode,
        difficulty: Difficulty,
    ) -> tokio::task::JoinHandle<Result<(), EngineError>> {
        self.shared
            .streams
            .state_tx
            .send_replace(Some(GameState::Generating {
                row_count,
                col_count,
            }));
        tracing::info!(
            "generating {}x{} puzzle for theme '{}' ({} candidates)",
            row_count,
            col_count,
            theme_name,
            theme_words.len()
        );

        let shared = self.shared.clone();
        let theme_name = theme_name.to_string();
        let handle = tokio::spawn(async move {
            let config = shared.config.clone();
            let build = tokio::task::spawn_blocking(move || {
                let mut rng = rand::rng();
                PuzzleBuilder::new(config).build(
                    &theme_words,
                    row_count,
                    col_count,
                    difficulty,
                    &mut rng,
                )
            })
            .await
            .map_err(|e| EngineError::Collaborator(e.into()))?;

            let puzzle = match build {
                Ok(puzzle) => puzzle,
                Err(e) => {
                    tracing::warn!("puzzle generation failed: {}", e);
                    return Err(e);
                }
            };

            let game = assemble_game(puzzle, &theme_name, game_mode, difficulty);
            tracing::info!(
                "session {} ready with {} words",
                game.id,
                game.used_words.len()
            );
            if let Err(e) = shared.store.save(&game).await {
                tracing::warn!("failed to persist new session: {:#}", e);
            }
            shared.start_playing(game);
            Ok(())
        });

        self.shared.inner.lock().unwrap().generation = Some(handle.abort_handle());
        handle
    }

    /// Resume a saved session: enter Loading, fetch the record, rebuild
    /// the in-memory state and enter Playing. A missing record is a
    /// terminal error.
    pub async fn load_session(&self, id: Uuid) -> Result<(), EngineError> {
        self.shared
            .streams
            .state_tx
            .send_replace(Some(GameState::Loading));

        let game = self
            .shared
            .store
            .load(id)
            .await?
            .ok_or(EngineError::SessionNotFound(id))?;

        tracing::info!(
            "loaded session {}: {}/{} answered, {}s elapsed",
            id,
            game.answered_words_count(),
            game.used_words.len(),
            game.elapsed_duration
        );

        if game.is_game_over || game.all_words_answered() {
            let win = !game.is_game_over && game.all_words_answered();
            self.shared
                .streams
                .state_tx
                .send_replace(Some(GameState::Finished {
                    game_data: game,
                    win,
                }));
        } else {
            self.shared.start_playing(game);
        }
        Ok(())
    }

    /// Verify one selection against the unanswered words. Wrong answers
    /// leave the session untouched; the last unanswered word flips the
    /// session to Finished(win).
    pub fn answer_word(
        &self,
        candidate: &str,
        answer_line: AnswerLine,
        reverse_matching_allowed: bool,
    ) -> AnswerResult {
        let shared = &self.shared;
        let mut finished: Option<GameData> = None;
        let mut snapshot: Option<GameData> = None;
        let mut new_current: Option<(Option<UsedWord>, u32)> = None;

        let result = {
            let mut inner = shared.inner.lock().unwrap();
            if !inner.playing {
                return AnswerResult {
                    correct: false,
                    used_word: None,
                };
            }

            let (answered, is_marathon, previous_current, difficulty) = {
                let game = inner.game.as_mut().expect("playing session has game data");
                let wanted = normalize(candidate);
                let reversed: String = wanted.chars().rev().collect();
                let previous_current = game.current_word().map(|w| w.id);

                let hit = game.used_words.iter_mut().find(|w| {
                    !w.is_answered
                        && (w.word() == wanted
                            || (reverse_matching_allowed && w.word() == reversed))
                        && answer_line.matches(&w.placed)
                });
                let answered = hit.map(|word| {
                    word.is_answered = true;
                    word.answer_line = Some(answer_line);
                    word.clone()
                });
                (
                    answered,
                    game.game_mode.is_marathon(),
                    previous_current,
                    game.difficulty,
                )
            };

            match answered {
                Some(word) => {
                    let all_answered = inner
                        .game
                        .as_ref()
                        .is_some_and(|game| game.all_words_answered());
                    if all_answered {
                        finished = Some(finish_locked(&mut inner));
                    } else {
                        if is_marathon {
                            let current = inner
                                .game
                                .as_ref()
                                .and_then(|game| game.current_word().cloned());
                            if current.as_ref().map(|w| w.id) != previous_current {
                                let budget = word_budget(current.as_ref(), difficulty);
                                if let Some(clock) = inner.clock.as_mut() {
                                    clock.reset_word(budget);
                                }
                                new_current = Some((current, budget));
                            }
                        }
                        snapshot = inner.game.clone();
                    }

                    AnswerResult {
                        correct: true,
                        used_word: Some(word),
                    }
                }
                None => AnswerResult {
                    correct: false,
                    used_word: None,
                },
            }
        };

        shared.streams.answer_tx.send_replace(Some(result.clone()));
        if let Some((word, budget)) = new_current {
            shared.streams.word_count_down_tx.send_replace(budget);
            shared.streams.current_word_tx.send_replace(word);
        }
        if let Some(game) = snapshot {
            shared.streams.state_tx.send_replace(Some(GameState::Playing(game)));
        }
        if let Some(game) = finished {
            shared.emit_finished(game, true);
        }
        result
    }

    /// Unfreeze the clock after a pause.
    pub fn resume_game(&self) {
        self.shared.paused.store(false, Ordering::Relaxed);
    }

    /// Freeze the clock without losing elapsed/remaining values and
    /// persist current progress.
    pub async fn pause_game(&self) -> Result<(), EngineError> {
        let snapshot = {
            let inner = self.shared.inner.lock().unwrap();
            if !inner.playing {
                return Err(EngineError::NotPlaying);
            }
            inner.game.clone()
        };
        self.shared.paused.store(true, Ordering::Relaxed);
        if let Some(game) = snapshot {
            tracing::debug!("pausing session {} at {}s", game.id, game.elapsed_duration);
            self.shared.store.save(&game).await?;
        }
        Ok(())
    }

    /// Tear the session down: cancel any in-flight generation and the
    /// tick task. The only cancellation path there is.
    pub fn stop_game(&self) {
        let mut inner = self.shared.inner.lock().unwrap();
        if let Some(generation) = inner.generation.take() {
            generation.abort();
        }
        if let Some(ticker) = inner.ticker.take() {
            ticker.abort();
        }
        inner.playing = false;
        inner.clock = None;
        tracing::debug!("session stopped");
    }
}

impl Drop for SessionEngine {
    fn drop(&mut self) {
        self.stop_game();
    }
}

impl Shared {
    /// Transition into Playing: install the clock, publish the first
    /// snapshots and spawn the per-second tick task.
    fn start_playing(self: &Arc<Self>, game: GameData) {
        let clock = clock_for(&game).resume_from(game.elapsed_duration);
        let current = game.current_word().cloned();
        let word_budget_left = clock.word_remaining().unwrap_or(0);
        let session_remaining = clock.session_remaining().unwrap_or(0);
        let elapsed = clock.elapsed();

        {
            let mut inner = self.inner.lock().unwrap();
            inner.game = Some(game.clone());
            inner.clock = Some(clock);
            inner.playing = true;
            inner.generation = None;
        }
        self.paused.store(false, Ordering::Relaxed);

        self.streams.timer_tx.send_replace(elapsed);
        self.streams.count_down_tx.send_replace(session_remaining);
        if game.game_mode.is_marathon() {
            self.streams.word_count_down_tx.send_replace(word_budget_left);
            self.streams.current_word_tx.send_replace(current);
        }
        self.streams
            .state_tx
            .send_replace(Some(GameState::Playing(game)));

        let shared = self.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if shared.paused.load(Ordering::Relaxed) {
                    continue;
                }
                if shared.on_tick().await {
                    break;
                }
            }
        });
        self.inner.lock().unwrap().ticker = Some(handle.abort_handle());
    }

    /// One second of play. Returns true when the session finished and
    /// the tick task should end.
    async fn on_tick(&self) -> bool {
        let mut finished: Option<GameData> = None;
        let mut snapshot: Option<GameData> = None;
        let mut new_current: Option<(Option<UsedWord>, u32)> = None;
        let timer;
        let mut count_down: Option<u32> = None;
        let mut word_count_down: Option<u32> = None;

        {
            let mut inner = self.inner.lock().unwrap();
            if !inner.playing {
                return true;
            }
            let Some(clock) = inner.clock.as_mut() else {
                return true;
            };
            let tick = clock.tick();
            let elapsed = clock.elapsed();
            timer = elapsed;

            if let Some(game) = inner.game.as_mut() {
                game.elapsed_duration = elapsed;
            }

            match tick {
                ClockTick::Elapsed { .. } => {}
                ClockTick::Remaining { remaining, .. } => {
                    count_down = Some(remaining);
                }
                ClockTick::SessionExpired { .. } => {
                    count_down = Some(0);
                    if let Some(game) = inner.game.as_mut() {
                        game.is_game_over = true;
                        tracing::info!("session {} ran out of time", game.id);
                    }
                    finished = Some(finish_locked(&mut inner));
                }
                ClockTick::WordRemaining { remaining, .. } => {
                    word_count_down = Some(remaining);
                }
                ClockTick::WordExpired { .. } => {
                    word_count_down = Some(0);
                    // Miss the current word: answered with no line, so it
                    // leaves the pool without counting as a find.
                    let (exhausted, difficulty) = {
                        let game = inner.game.as_mut().expect("playing session has game data");
                        if let Some(missed) = game.used_words.iter_mut().find(|w| !w.is_answered)
                        {
                            missed.is_answered = true;
                            tracing::debug!("marathon word '{}' missed", missed.word());
                        }
                        (game.all_words_answered(), game.difficulty)
                    };
                    if exhausted {
                        if let Some(game) = inner.game.as_mut() {
                            game.is_game_over = true;
                        }
                        finished = Some(finish_locked(&mut inner));
                    } else {
                        let current = inner
                            .game
                            .as_ref()
                            .and_then(|game| game.current_word().cloned());
                        let budget = word_budget(current.as_ref(), difficulty);
                        if let Some(clock) = inner.clock.as_mut() {
                            clock.reset_word(budget);
                        }
                        snapshot = inner.game.clone();
                        new_current = Some((current, budget));
                        word_count_down = Some(budget);
                    }
                }
            }
        }

        self.streams.timer_tx.send_replace(timer);
        if let Some(remaining) = count_down {
            self.streams.count_down_tx.send_replace(remaining);
        }
        if let Some(remaining) = word_count_down {
            self.streams.word_count_down_tx.send_replace(remaining);
        }
        if let Some((word, _)) = new_current {
            self.streams.current_word_tx.send_replace(word);
        }
        if let Some(game) = snapshot {
            self.streams
                .state_tx
                .send_replace(Some(GameState::Playing(game)));
        }
        if let Some(game) = finished {
            self.emit_finished(game, false);
            return true;
        }
        false
    }

    /// Publish the terminal state and persist the final record. `win`
    /// only applies when the pool was cleared by answers; forced stops
    /// carry `is_game_over` and lose.
    fn emit_finished(&self, game: GameData, win: bool) {
        let win = win && !game.is_game_over;
        tracing::info!(
            "session {} finished: win={}, {}/{} words",
            game.id,
            win,
            game.answered_words_count(),
            game.used_words.len()
        );
        self.streams
            .state_tx
            .send_replace(Some(GameState::Finished {
                game_data: game.clone(),
                win,
            }));

        let store = self.store.clone();
        tokio::spawn(async move {
            if let Err(e) = store.save(&game).await {
                tracing::warn!("failed to persist finished session: {:#}", e);
            }
        });
    }
}

/// Mark the session over and detach its clock machinery. Caller emits
/// the Finished state once the lock is released.
fn finish_locked(inner: &mut Inner) -> GameData {
    inner.playing = false;
    inner.clock = None;
    if let Some(ticker) = inner.ticker.take() {
        ticker.abort();
    }
    inner.game.clone().expect("finishing session has game data")
}

fn clock_for(game: &GameData) -> ModeClock {
    match game.game_mode {
        GameMode::Normal | GameMode::Hidden => ModeClock::stopwatch(),
        GameMode::CountDown { .. } => ModeClock::countdown(game.max_duration),
        GameMode::Marathon { .. } => {
            ModeClock::per_word(word_budget(game.current_word(), game.difficulty))
        }
    }
}

fn word_budget(word: Option<&UsedWord>, difficulty: Difficulty) -> u32 {
    word.and_then(|w| w.max_duration_for_word)
        .unwrap_or_else(|| difficulty.marathon_word_duration())
}

/// Turn a built puzzle into a fresh session aggregate, resolving
/// difficulty-derived durations for the timed modes.
fn assemble_game(
    puzzle: Puzzle,
    theme_name: &str,
    game_mode: GameMode,
    difficulty: Difficulty,
) -> GameData {
    let word_count = puzzle.placed_words.len() as u32;
    let game_mode = match game_mode {
        GameMode::CountDown { max_duration: 0 } => GameMode::CountDown {
            max_duration: difficulty.seconds_per_word() * word_count,
        },
        GameMode::Marathon {
            per_word_duration: 0,
        } => GameMode::Marathon {
            per_word_duration: difficulty.marathon_word_duration(),
        },
        other => other,
    };
    let max_duration = match game_mode {
        GameMode::CountDown { max_duration } => max_duration,
        _ => 0,
    };
    let per_word = match game_mode {
        GameMode::Marathon { per_word_duration } => Some(per_word_duration),
        _ => None,
    };

    let used_words = puzzle
        .placed_words
        .into_iter()
        .enumerate()
        .map(|(id, placed)| {
            let mut word = UsedWord::new(id, placed);
            word.max_duration_for_word = per_word;
            word
        })
        .collect();

    GameData {
        id: Uuid::new_v4(),
        theme_name: theme_name.to_string(),
        grid: puzzle.grid,
        used_words,
        game_mode,
        difficulty,
        max_duration,
        elapsed_duration: 0,
        is_game_over: false,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn engine() -> SessionEngine {
        SessionEngine::new(GameConfig::default(), Arc::new(MemoryStore::new()))
    }

    fn pool() -> Vec<String> {
        ["cat", "dog", "emu"].iter().map(|w| w.to_string()).collect()
    }

    async fn start(engine: &SessionEngine, mode: GameMode) -> GameData {
        engine
            .generate_new_session(8, 8, "Pets", pool(), mode, Difficulty::Easy)
            .await
            .unwrap()
            .unwrap();
        let state = engine.subscribe_state().borrow().clone();
        match state {
            Some(GameState::Playing(game)) => game,
            other => panic!("expected Playing, got {:?}", other),
        }
    }

    fn line_for(word: &UsedWord) -> AnswerLine {
        AnswerLine {
            start_row: word.placed.start_row,
            start_col: word.placed.start_col,
            end_row: word.placed.end_row(),
            end_col: word.placed.end_col(),
        }
    }

    fn reversed_line_for(word: &UsedWord) -> AnswerLine {
        AnswerLine {
            start_row: word.placed.end_row(),
            start_col: word.placed.end_col(),
            end_row: word.placed.start_row,
            end_col: word.placed.start_col,
        }
    }

    async fn wait_for_finished(engine: &SessionEngine) -> (GameData, bool) {
        let mut rx = engine.subscribe_state();
        loop {
            if let Some(GameState::Finished { game_data, win }) = rx.borrow_and_update().clone() {
                return (game_data, win);
            }
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_generation_reaches_playing() {
        let engine = engine();
        let game = start(&engine, GameMode::Normal).await;
        assert!(!game.used_words.is_empty());
        assert!(game.used_words.len() <= 3);
        assert_eq!(game.elapsed_duration, 0);
        engine.stop_game();
    }

    #[tokio::test]
    async fn test_answer_word_accepts_and_is_idempotent() {
        let engine = engine();
        let game = start(&engine, GameMode::Normal).await;
        let word = game.used_words[0].clone();

        let first = engine.answer_word(word.word(), line_for(&word), false);
        assert!(first.correct);
        assert_eq!(first.used_word.as_ref().map(|w| w.id), Some(word.id));

        // A second correct submission for the same word must not double
        // count.
        let second = engine.answer_word(word.word(), line_for(&word), false);
        assert!(!second.correct);

        let state = engine.subscribe_state().borrow().clone();
        if game.used_words.len() > 1 {
            match state {
                Some(GameState::Playing(data)) => {
                    assert_eq!(data.answered_words_count(), 1)
                }
                other => panic!("expected Playing, got {:?}", other),
            }
        }
        engine.stop_game();
    }

    #[tokio::test]
    async fn test_wrong_selection_is_rejected_without_state_change() {
        let engine = engine();
        let game = start(&engine, GameMode::Normal).await;
        let word = game.used_words[0].clone();

        let mut wrong_line = line_for(&word);
        wrong_line.end_row = (wrong_line.end_row + 1) % game.grid.row_count();
        let result = engine.answer_word(word.word(), wrong_line, false);
        assert!(!result.correct);

        let result = engine.answer_word("NOTAWORD", line_for(&word), false);
        assert!(!result.correct);

        match engine.subscribe_state().borrow().clone() {
            Some(GameState::Playing(data)) => assert_eq!(data.answered_words_count(), 0),
            other => panic!("expected Playing, got {:?}", other),
        }
        engine.stop_game();
    }

    #[tokio::test]
    async fn test_reverse_matching_gate() {
        let engine = engine();
        let game = start(&engine, GameMode::Normal).await;
        let word = game.used_words[0].clone();
        let backwards: String = word.word().chars().rev().collect();

        let rejected = engine.answer_word(&backwards, reversed_line_for(&word), false);
        assert!(!rejected.correct);

        let accepted = engine.answer_word(&backwards, reversed_line_for(&word), true);
        assert!(accepted.correct);
        engine.stop_game();
    }

    #[tokio::test(start_paused = true)]
    async fn test_answering_everything_wins_and_stops_the_clock() {
        let engine = engine();
        let game = start(&engine, GameMode::Normal).await;

        for word in &game.used_words {
            assert!(engine.answer_word(word.word(), line_for(word), false).correct);
        }

        let (final_data, win) = wait_for_finished(&engine).await;
        assert!(win);
        assert!(!final_data.is_game_over);
        assert_eq!(final_data.answered_words_count(), game.used_words.len());

        // Stopwatch holds its last observed value once finished.
        let frozen = *engine.subscribe_timer().borrow();
        time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert_eq!(*engine.subscribe_timer().borrow(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_down_forces_loss_exactly_at_max_duration() {
        let engine = engine();
        let game = start(&engine, GameMode::CountDown { max_duration: 10 }).await;
        assert_eq!(game.max_duration, 10);

        let (final_data, win) = wait_for_finished(&engine).await;
        assert!(!win);
        assert!(final_data.is_game_over);
        assert_eq!(final_data.elapsed_duration, 10);
        assert_eq!(final_data.answered_words_count(), 0);
        assert_eq!(*engine.subscribe_count_down().borrow(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_marathon_miss_advances_to_next_word() {
        let engine = engine();
        let game = start(
            &engine,
            GameMode::Marathon {
                per_word_duration: 5,
            },
        )
        .await;
        let first_id = game.current_word().unwrap().id;

        let mut current_rx = engine.subscribe_current_word();
        current_rx.mark_unchanged();
        current_rx.changed().await.unwrap();

        let now_current = current_rx.borrow().clone();
        match engine.subscribe_state().borrow().clone() {
            Some(GameState::Playing(data)) => {
                let missed = &data.used_words[first_id];
                assert!(missed.is_missed());
                assert_eq!(data.elapsed_duration, 5);
                assert_ne!(now_current.map(|w| w.id), Some(first_id));
            }
            other => panic!("expected Playing after first miss, got {:?}", other),
        }

        // Left alone, every word expires and the session is a loss.
        let (final_data, win) = wait_for_finished(&engine).await;
        assert!(!win);
        assert!(final_data.is_game_over);
        assert!(final_data.used_words.iter().all(|w| w.is_missed()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_the_clock() {
        let engine = engine();
        start(&engine, GameMode::Normal).await;

        let mut timer_rx = engine.subscribe_timer();
        timer_rx.changed().await.unwrap();
        let before = *timer_rx.borrow_and_update();

        engine.pause_game().await.unwrap();
        time::advance(Duration::from_secs(20)).await;
        tokio::task::yield_now().await;
        assert_eq!(*engine.subscribe_timer().borrow(), before);

        engine.resume_game();
        timer_rx.changed().await.unwrap();
        assert!(*timer_rx.borrow() > before);
        engine.stop_game();
    }

    #[tokio::test]
    async fn test_load_unknown_session_is_terminal_error() {
        let engine = engine();
        let missing = Uuid::new_v4();
        let err = engine.load_session(missing).await.unwrap_err();
        assert!(matches!(err, EngineError::SessionNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_pause_persists_and_session_resumes() {
        let store = Arc::new(MemoryStore::new());
        let engine = SessionEngine::new(GameConfig::default(), store.clone());
        engine
            .generate_new_session(8, 8, "Pets", pool(), GameMode::Normal, Difficulty::Easy)
            .await
            .unwrap()
            .unwrap();
        let game = match engine.subscribe_state().borrow().clone() {
            Some(GameState::Playing(game)) => game,
            other => panic!("expected Playing, got {:?}", other),
        };
        let word = game.used_words[0].clone();
        assert!(engine.answer_word(word.word(), line_for(&word), false).correct);
        engine.pause_game().await.unwrap();
        engine.stop_game();
        assert!(matches!(
            engine.pause_game().await.unwrap_err(),
            EngineError::NotPlaying
        ));

        // A second engine picks the session back up from storage with
        // the answered flags and stored line intact.
        let resumed_engine = SessionEngine::new(GameConfig::default(), store);
        resumed_engine.load_session(game.id).await.unwrap();
        match resumed_engine.subscribe_state().borrow().clone() {
            Some(GameState::Playing(data)) => {
                assert_eq!(data.id, game.id);
                assert_eq!(data.answered_words_count(), 1);
                assert_eq!(data.used_words[word.id].answer_line, Some(line_for(&word)));
            }
            other => panic!("expected Playing after load, got {:?}", other),
        }
        resumed_engine.stop_game();
    }
}
