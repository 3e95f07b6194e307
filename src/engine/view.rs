//! Read-only board view for renderers.
//!
//! Renderers never touch a `GameSession`. They get a serializable
//! `BoardView` snapshot and forward clicks back as `select_card` calls.

use serde::Serialize;

use super::scoring::format_elapsed;
use super::session::GameSession;
use crate::cards::CardId;
use crate::core::config::Difficulty;

/// How one card should be drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: CardId,
    pub symbol: String,
    pub name: String,
    pub matched: bool,
    pub flipped: bool,
    /// Face up: flipped, selected or matched.
    pub revealed: bool,
    /// Clicks on this card would be accepted.
    pub selectable: bool,
}

/// Everything a renderer needs to draw the board and status bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub title: String,
    pub difficulty: Difficulty,
    pub columns: usize,
    pub total_pairs: usize,
    pub matched_pairs: usize,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub elapsed_display: String,
    pub started: bool,
    pub won: bool,
    pub score: Option<u32>,
    pub cards: Vec<CardView>,
}

impl BoardView {
    /// Snapshot a session.
    #[must_use]
    pub fn new(title: &str, session: &GameSession) -> Self {
        let cards = session
            .cards()
            .iter()
            .map(|card| CardView {
                id: card.id,
                symbol: card.symbol.clone(),
                name: card.name.clone(),
                matched: card.matched,
                flipped: card.flipped,
                revealed: session.is_revealed(card.id),
                selectable: session.is_selectable(card.id),
            })
            .collect();

        Self {
            title: title.to_string(),
            difficulty: session.difficulty(),
            columns: session.difficulty().columns(),
            total_pairs: session.total_pairs(),
            matched_pairs: session.matched_pairs(),
            moves: session.moves(),
            elapsed_ms: session.elapsed_ms(),
            elapsed_display: format_elapsed(session.elapsed_ms()),
            started: session.is_started(),
            won: session.is_won(),
            score: session.score(),
            cards,
        }
    }

    /// Number of grid rows at this board's width.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cards.len().div_ceil(self.columns.max(1))
    }
}
