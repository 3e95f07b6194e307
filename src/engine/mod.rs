//! Game engine: session state, deferred tasks, scoring, and the state machine.
//!
//! ## Key Types
//!
//! - `GameEngine`: Owns the session and processes selections and timers
//! - `GameSession`: Aggregate mutable state of one game
//! - `Scheduler`: Ordered queue of deferred resolutions and samples
//! - `BoardView`: Read-only snapshot for renderers

pub mod game;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod view;

pub use game::{GameEngine, GameEngineBuilder};
pub use scheduler::{DeferredTask, Scheduler, TaskKind};
pub use scoring::{format_elapsed, minimum_moves, score_for, MAX_SCORE, MIN_SCORE, MOVE_PENALTY};
pub use session::{GamePhase, GameSession, RejectReason, SelectOutcome, Selection, SELECTION_LIMIT};
pub use view::{BoardView, CardView};
