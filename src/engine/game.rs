//! The game engine: owns the session and drives every transition.
//!
//! ## Driving the engine
//!
//! Hosts forward clicks with `select_card` and call `run_due` whenever
//! time may have passed (an animation frame, a timer set to
//! `next_due_ms`). Nothing happens between calls; the engine never
//! spawns threads or timers of its own. `select_card` fires whatever is
//! already due before it looks at the click, so a late poll never turns
//! away a click the player made after the pair resolved.
//!
//! ```
//! use memory_match::core::{GameConfig, ManualClock};
//! use memory_match::engine::{GameEngine, GamePhase};
//!
//! let clock = ManualClock::new();
//! let mut engine = GameEngine::builder(GameConfig::new().with_seed(1))
//!     .build(clock.clone())
//!     .unwrap();
//!
//! // Ids are board positions; partners are found by symbol.
//! let first = engine.session().cards()[0].clone();
//! let partner = engine
//!     .session()
//!     .cards()
//!     .iter()
//!     .find(|card| card.pairs_with(&first))
//!     .map(|card| card.id)
//!     .unwrap();
//!
//! engine.select_card(first.id);
//! engine.select_card(partner);
//! assert_eq!(engine.session().moves(), 1);
//!
//! clock.advance(1000);
//! engine.run_due();
//! assert_eq!(engine.session().matched_pairs(), 1);
//! assert_eq!(engine.phase(), GamePhase::InProgress);
//! ```

use tracing::{debug, info, instrument, trace};

use super::scheduler::{Scheduler, TaskKind};
use super::scoring::minimum_moves;
use super::session::{GamePhase, GameSession, SelectOutcome};
use super::view::BoardView;
use crate::cards::{Catalog, CardId, DeckBuilder};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::rng::GameRng;
use crate::events::{CompletionRecord, CompletionSink, NullSink};

/// Builder for creating a `GameEngine`.
pub struct GameEngineBuilder {
    config: GameConfig,
    catalog: Catalog,
    sink: Box<dyn CompletionSink>,
}

impl GameEngineBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            catalog: Catalog::ww2(),
            sink: Box::new(NullSink),
        }
    }

    /// Deal from a custom catalog instead of the built-in one.
    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Channel that receives the completion record.
    #[must_use]
    pub fn sink(mut self, sink: impl CompletionSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Validate the configuration and deal the first game.
    ///
    /// Fails if the configuration is invalid or the catalog is too small
    /// for the difficulty.
    pub fn build<C: Clock>(self, clock: C) -> Result<GameEngine<C>> {
        self.config.validate()?;
        let builder = DeckBuilder::new(&self.catalog, self.config.difficulty)?;
        let mut rng = GameRng::from_seed(self.config.seed);
        let session = GameSession::new(0, builder.difficulty(), builder.deal(&mut rng));

        info!(
            title = %self.config.title,
            difficulty = %self.config.difficulty,
            seed = rng.seed(),
            "Game engine ready"
        );

        Ok(GameEngine {
            config: self.config,
            builder,
            rng,
            clock,
            scheduler: Scheduler::new(),
            session,
            sink: self.sink,
            completion: None,
        })
    }
}

/// Matching-pairs state machine.
///
/// Owns the only mutable game state. Single-threaded: every transition
/// happens inside `select_card`, `run_due` or `restart`.
pub struct GameEngine<C: Clock = SystemClock> {
    config: GameConfig,
    builder: DeckBuilder,
    rng: GameRng,
    clock: C,
    scheduler: Scheduler,
    session: GameSession,
    sink: Box<dyn CompletionSink>,
    /// Record emitted for the current session; doubles as the once-only latch.
    completion: Option<CompletionRecord>,
}

impl GameEngine<SystemClock> {
    /// Create an engine on the system clock with the built-in catalog.
    pub fn new(config: GameConfig) -> Result<Self> {
        GameEngineBuilder::new(config).build(SystemClock::new())
    }

    /// Start building an engine. The clock is chosen at `build`.
    #[must_use]
    pub fn builder(config: GameConfig) -> GameEngineBuilder {
        GameEngineBuilder::new(config)
    }
}

impl<C: Clock> GameEngine<C> {
    // === Reads ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    /// Final score, once won.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        self.session.score()
    }

    /// Completion record emitted for the current session.
    #[must_use]
    pub fn completion(&self) -> Option<&CompletionRecord> {
        self.completion.as_ref()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn is_revealed(&self, id: CardId) -> bool {
        self.session.is_revealed(id)
    }

    #[must_use]
    pub fn is_selectable(&self, id: CardId) -> bool {
        self.session.is_selectable(id)
    }

    /// Snapshot for the renderer.
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView::new(&self.config.title, &self.session)
    }

    /// When the host should next call `run_due`.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Deferred tasks that will still take effect.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_for(self.session.generation())
    }

    // === Operations ===

    /// Replace the completion channel.
    pub fn set_sink(&mut self, sink: impl CompletionSink + 'static) {
        self.sink = Box::new(sink);
    }

    /// Handle a click on a card.
    ///
    /// Due tasks run first. The click is then ignored without any state
    /// change if a pair is pending, the card is already selected, or the
    /// card is already matched. Returns whether the selection was
    /// accepted; callers don't need to look at it.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn select_card(&mut self, id: CardId) -> bool {
        self.run_due();

        let now = self.clock.now_ms();
        let was_started = self.session.is_started();

        let outcome = self.session.select(id, now);
        if !was_started && self.session.is_started() {
            info!(started_at_ms = now, "Game started");
            self.schedule(
                now.saturating_add(self.config.timing.sample_interval_ms),
                TaskKind::SampleElapsed,
            );
        }

        match outcome {
            SelectOutcome::Ignored(reason) => {
                debug!(card = %id, ?reason, "Selection ignored");
                false
            }
            SelectOutcome::Revealed => {
                debug!(card = %id, "Card revealed");
                true
            }
            SelectOutcome::PairCompleted {
                first,
                second,
                matched,
            } => {
                let delay = self.config.timing.resolution_delay(matched);
                debug!(
                    %first,
                    %second,
                    matched,
                    moves = self.session.moves(),
                    delay_ms = delay,
                    "Pair selected"
                );
                self.schedule(
                    now.saturating_add(delay),
                    TaskKind::ResolvePair {
                        first,
                        second,
                        matched,
                    },
                );
                true
            }
        }
    }

    /// Fire every deferred task that is due, in order.
    ///
    /// Tasks scheduled by an earlier session are dropped without effect.
    /// Returns how many tasks took effect.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn run_due(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut applied = 0;

        while let Some(task) = self.scheduler.pop_due(now) {
            if task.generation != self.session.generation() {
                trace!(task_generation = task.generation, kind = ?task.kind, "Discarding stale task");
                continue;
            }
            applied += 1;

            match task.kind {
                TaskKind::ResolvePair {
                    first,
                    second,
                    matched,
                } => {
                    let won = self.session.resolve_pair(first, second, matched, now);
                    debug!(
                        %first,
                        %second,
                        matched,
                        matched_pairs = self.session.matched_pairs(),
                        "Pair resolved"
                    );
                    if won {
                        self.complete();
                    }
                }
                TaskKind::SampleElapsed => {
                    if self.session.sample(now) {
                        trace!(elapsed_ms = self.session.elapsed_ms(), "Sampled elapsed time");
                        let due = now.saturating_add(self.config.timing.sample_interval_ms);
                        // A tick due now would refire inside this loop forever.
                        if due > now {
                            self.schedule(due, TaskKind::SampleElapsed);
                        }
                    }
                }
            }
        }

        applied
    }

    /// Throw the current game away and deal a new one.
    ///
    /// Always succeeds. Tasks still queued for the old game become inert.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn restart(&mut self) {
        let generation = self.session.generation() + 1;
        let deck = self.builder.deal(&mut self.rng);
        self.session = GameSession::new(generation, self.builder.difficulty(), deck);
        self.completion = None;
        info!(new_generation = generation, "Game restarted");
    }

    fn schedule(&mut self, due_ms: u64, kind: TaskKind) {
        self.scheduler.schedule(due_ms, self.session.generation(), kind);
    }

    /// Emit the completion record, at most once per session.
    fn complete(&mut self) {
        if self.completion.is_some() {
            return;
        }

        let difficulty = self.session.difficulty();
        let record =
            CompletionRecord::new(self.session.moves(), self.session.elapsed_ms(), difficulty);
        info!(
            moves = record.data.moves,
            minimum_moves = minimum_moves(difficulty),
            score = record.score,
            time_spent_ms = record.time_spent,
            "Game won"
        );
        self.sink.deliver(&record);
        self.completion = Some(record);
    }
}

impl<C: Clock + std::fmt::Debug> std::fmt::Debug for GameEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("session", &self.session)
            .field("queued_tasks", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}
