//! # memory-match
//!
//! A matching-pairs memory game engine, embeddable in a host page.
//!
//! ## Design Principles
//!
//! 1. **One owner**: All mutable state lives in a `GameSession` owned by a
//!    `GameEngine`. Renderers read snapshots and send clicks back.
//!
//! 2. **Explicit time**: The engine reads a `Clock` and fires deferred
//!    tasks only when the host calls `run_due`. No threads, no hidden timers.
//!
//! 3. **Generation-tagged tasks**: Resolutions and samples carry the
//!    session generation that scheduled them. A restart bumps the
//!    generation, so leftovers from the old game have no effect.
//!
//! 4. **Fire-and-forget completion**: A won game emits exactly one
//!    `CompletionRecord` to a `CompletionSink` and never hears back.
//!
//! ## Modules
//!
//! - `core`: Configuration, RNG, clocks, errors
//! - `cards`: Catalog, cards, deck building
//! - `engine`: Session, scheduler, scoring, state machine, board view
//! - `events`: Completion record and outbound sinks

pub mod core;
pub mod cards;
pub mod engine;
pub mod events;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, SystemClock,
    Difficulty, GameConfig, TimingConfig,
    GameError, GameRng, Result,
};

pub use crate::cards::{Card, CardId, Catalog, DeckBuilder, Item};

pub use crate::engine::{
    BoardView, CardView,
    GameEngine, GameEngineBuilder, GamePhase, GameSession,
    score_for, format_elapsed,
};

pub use crate::events::{
    CompletionData, CompletionRecord, CompletionSink,
    BroadcastSink, CallbackSink, JsonLineSink, NullSink, RecordingSink,
};
