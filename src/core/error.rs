//! Error types for game construction.
//!
//! Only building a game can fail. Once an engine exists, every operation
//! on it is infallible; rejected card selections are silent no-ops.

use thiserror::Error;

/// Result type alias using `GameError`.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that can occur while configuring or constructing a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("catalog has {available} items but {required} pairs are required")]
    CatalogTooSmall { required: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
