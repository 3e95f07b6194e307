//! Item catalog - static matchable categories.
//!
//! An `Item` is the immutable part of a card: its symbol and display name.
//! Two cards are a pair exactly when they were dealt from the same item.
//!
//! The catalog is ordered. A game uses the first `total_pairs` entries, so
//! the order decides which items appear on smaller boards.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Symbol shown on the card face. Pairs are compared by symbol.
    pub symbol: String,

    /// Human-readable name shown under the symbol.
    pub name: String,
}

impl Item {
    /// Create a new item.
    #[must_use]
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Built-in WWII catalog, large enough for the hardest tier.
const WW2_ITEMS: [(&str, &str); 12] = [
    ("✈️", "Fighter Plane"),
    ("🚢", "Battleship"),
    ("🪖", "Helmet"),
    ("📻", "Field Radio"),
    ("🗺️", "Battle Map"),
    ("🎖️", "Medal of Honor"),
    ("💣", "Bomb"),
    ("⚓", "Naval Anchor"),
    ("🔭", "Binoculars"),
    ("📜", "Treaty"),
    ("🚂", "Supply Train"),
    ("🧭", "Compass"),
];

/// Ordered list of items a deck is dealt from.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{Catalog, Item};
///
/// let catalog = Catalog::new(vec![Item::new("A", "Alpha"), Item::new("B", "Bravo")]);
/// assert_eq!(catalog.len(), 2);
/// assert!(catalog.first(3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Create a catalog from items in the order they should be used.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The built-in WWII catalog.
    #[must_use]
    pub fn ww2() -> Self {
        Self::new(
            WW2_ITEMS
                .iter()
                .map(|&(symbol, name)| Item::new(symbol, name))
                .collect(),
        )
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// The first `count` items.
    ///
    /// Fails with `CatalogTooSmall` when fewer than `count` items exist.
    pub fn first(&self, count: usize) -> Result<&[Item]> {
        self.items.get(..count).ok_or(GameError::CatalogTooSmall {
            required: count,
            available: self.items.len(),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::ww2()
    }
}
