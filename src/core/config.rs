//! Game configuration types.
//!
//! The host page configures a game at startup by providing:
//! - `Difficulty`: How many pairs are dealt and how wide the grid is
//! - `TimingConfig`: Resolution delays and the elapsed-time sampling rate
//! - `GameConfig`: Combines all configuration with the display title
//!
//! Every field has a default, so a host may pass `{}` or omit the
//! configuration entirely.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Title shown when the host does not supply one.
pub const DEFAULT_TITLE: &str = "WWII Memory Match";

/// Upper bound for every timing value.
pub const MAX_TIMING_MS: u64 = 60_000;

/// Difficulty tier.
///
/// `Easy` and `Medium` currently deal the same board: 8 pairs on a
/// 4-column grid. `Hard` deals 12 pairs on a 6-column grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, lowest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Number of pairs dealt for this tier.
    #[must_use]
    pub const fn total_pairs(self) -> usize {
        match self {
            Difficulty::Easy | Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    /// Grid width the renderer should lay cards out in.
    #[must_use]
    pub const fn columns(self) -> usize {
        match self {
            Difficulty::Easy | Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Number of cards on the board.
    #[must_use]
    pub const fn deck_size(self) -> usize {
        self.total_pairs() * 2
    }

    /// Lowercase name, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Timing parameters for deferred transitions, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before a matching pair is marked matched.
    pub match_delay_ms: u64,

    /// Delay before a mismatched pair is turned face-down again.
    ///
    /// Longer than the match delay so the player can memorize the pair.
    pub mismatch_delay_ms: u64,

    /// Interval between elapsed-time samples while a game is in progress.
    pub sample_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            match_delay_ms: 1000,
            mismatch_delay_ms: 1500,
            sample_interval_ms: 100,
        }
    }
}

impl TimingConfig {
    /// Resolution delay for a completed pair.
    #[must_use]
    pub const fn resolution_delay(&self, matched: bool) -> u64 {
        if matched {
            self.match_delay_ms
        } else {
            self.mismatch_delay_ms
        }
    }

    /// Check that the delays are bounded and the mismatch delay is the longer one.
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "sample_interval_ms must be positive".into(),
            ));
        }
        for (name, value) in [
            ("match_delay_ms", self.match_delay_ms),
            ("mismatch_delay_ms", self.mismatch_delay_ms),
            ("sample_interval_ms", self.sample_interval_ms),
        ] {
            if value > MAX_TIMING_MS {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be at most {MAX_TIMING_MS}, got {value}"
                )));
            }
        }
        if self.mismatch_delay_ms <= self.match_delay_ms {
            return Err(GameError::InvalidConfig(format!(
                "mismatch_delay_ms ({}) must be longer than match_delay_ms ({})",
                self.mismatch_delay_ms, self.match_delay_ms
            )));
        }
        Ok(())
    }
}

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use memory_match::core::{Difficulty, GameConfig};
///
/// let config = GameConfig::from_json(r#"{"difficulty": "hard"}"#).unwrap();
/// assert_eq!(config.difficulty, Difficulty::Hard);
/// assert_eq!(config.timing.match_delay_ms, 1000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display title.
    pub title: String,

    /// Difficulty tier.
    pub difficulty: Difficulty,

    /// Resolution and sampling timing.
    pub timing: TimingConfig,

    /// Shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            difficulty: Difficulty::default(),
            timing: TimingConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate host-supplied initialization parameters.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the difficulty tier.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the timing parameters.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Fix the shuffle seed for reproducible decks.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is inside its domain.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GameError::InvalidConfig("title must not be empty".into()));
        }
        self.timing.validate()
    }
}
