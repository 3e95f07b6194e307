//! Card system: catalog, card instances, and deck building.
//!
//! ## Key Types
//!
//! - `Item`: Static matchable category (symbol + name)
//! - `Catalog`: Ordered item list a deck is dealt from
//! - `CardId`: Identifier for a card within one game
//! - `Card`: Runtime card state (`flipped`, `matched`)
//! - `DeckBuilder`: Deals shuffled, paired decks

pub mod card;
pub mod catalog;
pub mod deck;

pub use card::{Card, CardId};
pub use catalog::{Catalog, Item};
pub use deck::DeckBuilder;
