//! Scoring and time formatting helpers.

use crate::core::config::Difficulty;

/// Score for a game cleared without any move.
pub const MAX_SCORE: u32 = 1000;

/// Points lost per move.
pub const MOVE_PENALTY: u32 = 10;

/// Floor for very long games.
pub const MIN_SCORE: u32 = 100;

/// Score for a game won in `moves` moves: `max(1000 - 10 * moves, 100)`.
///
/// ```
/// use memory_match::engine::scoring::score_for;
///
/// assert_eq!(score_for(8), 920);
/// assert_eq!(score_for(1000), 100);
/// ```
#[must_use]
pub fn score_for(moves: u32) -> u32 {
    MAX_SCORE
        .saturating_sub(moves.saturating_mul(MOVE_PENALTY))
        .max(MIN_SCORE)
}

/// Fewest moves that can clear a board: one per pair.
#[must_use]
pub fn minimum_moves(difficulty: Difficulty) -> u32 {
    difficulty.total_pairs() as u32
}

/// Render elapsed milliseconds as `m:ss`.
///
/// ```
/// use memory_match::engine::scoring::format_elapsed;
///
/// assert_eq!(format_elapsed(65_400), "1:05");
/// ```
#[must_use]
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let total_seconds = elapsed_ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
