//! The completion record sent to the hosting page.
//!
//! This is the one wire-relevant contract of the crate. It serializes to:
//!
//! ```json
//! {
//!   "type": "BLOCK_COMPLETION",
//!   "blockId": "ww2-memory-game",
//!   "completed": true,
//!   "score": 920,
//!   "maxScore": 1000,
//!   "timeSpent": 41250,
//!   "data": { "moves": 8, "timeElapsed": 41250, "difficulty": "medium" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::config::Difficulty;
use crate::engine::scoring::{score_for, MAX_SCORE};

/// Fixed type tag of every completion record.
pub const COMPLETION_TYPE: &str = "BLOCK_COMPLETION";

/// Fixed identifier of this game block.
pub const BLOCK_ID: &str = "ww2-memory-game";

/// Game-specific payload of a completion record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionData {
    pub moves: u32,
    pub time_elapsed: u64,
    pub difficulty: Difficulty,
}

/// One-shot message announcing a won game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub block_id: String,
    pub completed: bool,
    pub score: u32,
    pub max_score: u32,
    pub time_spent: u64,
    pub data: CompletionData,
}

impl CompletionRecord {
    /// Build the record for a game won in `moves` moves after `elapsed_ms`.
    #[must_use]
    pub fn new(moves: u32, elapsed_ms: u64, difficulty: Difficulty) -> Self {
        Self {
            kind: COMPLETION_TYPE.to_string(),
            block_id: BLOCK_ID.to_string(),
            completed: true,
            score: score_for(moves),
            max_score: MAX_SCORE,
            time_spent: elapsed_ms,
            data: CompletionData {
                moves,
                time_elapsed: elapsed_ms,
                difficulty,
            },
        }
    }

    /// Serialize to the wire format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
