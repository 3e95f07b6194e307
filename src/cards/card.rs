//! Card instances - runtime card state.
//!
//! A `Card` is one face of a pair on the board. It carries a copy of its
//! item's symbol and name plus two flags the state machine mutates:
//! - `flipped`: set by a selection, cleared by either resolution
//! - `matched`: set once by a match resolution, never cleared

use serde::{Deserialize, Serialize};

use super::catalog::Item;

/// Unique identifier for a card within one game.
///
/// Stable for the lifetime of the game; two cards of a pair have
/// different ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id for this card.
    pub id: CardId,

    /// Symbol copied from the item.
    pub symbol: String,

    /// Display name copied from the item.
    pub name: String,

    /// Part of a resolved pair.
    pub matched: bool,

    /// Face up because the player selected it.
    pub flipped: bool,
}

impl Card {
    /// Deal a face-down, unmatched card for an item.
    #[must_use]
    pub fn new(id: CardId, item: &Item) -> Self {
        Self {
            id,
            symbol: item.symbol.clone(),
            name: item.name.clone(),
            matched: false,
            flipped: false,
        }
    }

    /// Check if two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }

    /// Turn face up.
    pub(crate) fn flip_up(&mut self) {
        self.flipped = true;
    }

    /// Turn face down without touching `matched`.
    pub(crate) fn flip_down(&mut self) {
        self.flipped = false;
    }

    /// Lock in as part of a resolved pair.
    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
        self.flipped = false;
    }
}
