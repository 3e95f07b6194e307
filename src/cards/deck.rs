//! Deck building.
//!
//! `DeckBuilder` is validated once against a catalog and difficulty, then
//! deals any number of fresh, shuffled decks. Validation is the only step
//! that can fail, so dealing on restart is infallible.

use tracing::debug;

use super::card::{Card, CardId};
use super::catalog::{Catalog, Item};
use crate::core::config::Difficulty;
use crate::core::error::Result;
use crate::core::rng::GameRng;

/// Deals shuffled, paired decks for one difficulty.
///
/// ## Guarantees
///
/// Every dealt deck has `2 * total_pairs` cards, every symbol appears on
/// exactly two cards, and card ids are unique.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{Catalog, DeckBuilder};
/// use memory_match::core::{Difficulty, GameRng};
///
/// let builder = DeckBuilder::new(&Catalog::ww2(), Difficulty::Hard).unwrap();
/// let deck = builder.deal(&mut GameRng::new(42));
/// assert_eq!(deck.len(), 24);
/// ```
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    items: Vec<Item>,
    difficulty: Difficulty,
}

impl DeckBuilder {
    /// Select the items for a difficulty.
    ///
    /// Fails with `CatalogTooSmall` if the catalog can't supply enough pairs.
    pub fn new(catalog: &Catalog, difficulty: Difficulty) -> Result<Self> {
        let items = catalog.first(difficulty.total_pairs())?.to_vec();
        Ok(Self { items, difficulty })
    }

    /// The difficulty this builder deals for.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of pairs per deck.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.items.len()
    }

    /// Deal a new shuffled deck.
    ///
    /// Faces are shuffled first and ids are handed out by board position
    /// afterwards, so an id says nothing about which card it pairs with.
    pub fn deal(&self, rng: &mut GameRng) -> Vec<Card> {
        let mut faces: Vec<&Item> = self.items.iter().flat_map(|item| [item, item]).collect();
        rng.shuffle(&mut faces);

        let deck: Vec<Card> = faces
            .into_iter()
            .zip(0u32..)
            .map(|(item, position)| Card::new(CardId::new(position), item))
            .collect();

        debug!(cards = deck.len(), difficulty = %self.difficulty, "Dealt deck");
        deck
    }
}
