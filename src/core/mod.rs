//! Core types: configuration, RNG, time sources, errors.
//!
//! Nothing in here knows about cards or the state machine. The engine
//! consumes these at construction time.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Difficulty, GameConfig, TimingConfig, DEFAULT_TITLE, MAX_TIMING_MS};
pub use error::{GameError, Result};
pub use rng::GameRng;
