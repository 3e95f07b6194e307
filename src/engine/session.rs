//! Game session: the aggregate mutable state of one game.
//!
//! ## Lifecycle
//!
//! `NotStarted` → `InProgress` on the first accepted selection,
//! `InProgress` → `Won` when the last pair resolves. A restart replaces
//! the whole session with a new generation.
//!
//! ## Invariants
//!
//! - The selection holds 0, 1 or 2 distinct, unmatched card ids
//! - `matched` never goes back to false
//! - `moves` counts completed two-card selections
//!
//! Only the engine mutates a session; everything public here is a read.
//! Cards live in an `im::Vector`, so cloning a session for inspection is
//! O(1).

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId};
use crate::core::config::Difficulty;
use crate::engine::scoring::score_for;

/// Maximum number of face-up, unresolved cards.
pub const SELECTION_LIMIT: usize = 2;

/// Ids of face-up, unresolved cards in selection order.
pub type Selection = SmallVec<[CardId; SELECTION_LIMIT]>;

/// State machine phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    InProgress,
    Won,
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Two cards are already waiting for resolution.
    PendingPair,
    /// The card is already in the selection.
    AlreadySelected,
    /// The card belongs to a resolved pair.
    AlreadyMatched,
    /// No card with this id is on the board.
    UnknownCard,
}

/// Result of applying a selection to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored(RejectReason),
    /// The card was turned up and waits for a partner.
    Revealed,
    /// The card completed a pair; a resolution must be scheduled.
    PairCompleted {
        first: CardId,
        second: CardId,
        matched: bool,
    },
}

/// One game's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSession {
    generation: u64,
    difficulty: Difficulty,
    cards: Vector<Card>,
    #[serde(skip)]
    index: FxHashMap<CardId, usize>,
    selection: Selection,
    matched_pairs: usize,
    moves: u32,
    phase: GamePhase,
    started_at_ms: Option<u64>,
    elapsed_ms: u64,
    score: Option<u32>,
}

impl GameSession {
    /// Create a fresh session around a dealt deck.
    #[must_use]
    pub fn new(generation: u64, difficulty: Difficulty, deck: Vec<Card>) -> Self {
        let index = deck
            .iter()
            .enumerate()
            .map(|(position, card)| (card.id, position))
            .collect();

        Self {
            generation,
            difficulty,
            cards: Vector::from(deck),
            index,
            selection: Selection::new(),
            matched_pairs: 0,
            moves: 0,
            phase: GamePhase::NotStarted,
            started_at_ms: None,
            elapsed_ms: 0,
            score: None,
        }
    }

    // === Reads ===

    /// Restart counter identifying this session.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cards in board order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).and_then(|&position| self.cards.get(position))
    }

    /// Face-up, unresolved card ids.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// Check if two cards are waiting for resolution.
    #[must_use]
    pub fn has_pending_pair(&self) -> bool {
        self.selection.len() == SELECTION_LIMIT
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Check if the first selection has happened.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Clock time of the first selection.
    #[must_use]
    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    /// Last sampled elapsed time; final once won.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Final score, set at the winning transition.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Check if a card is face up for rendering purposes.
    ///
    /// The `flipped` flag and selection membership are both treated as
    /// reveal signals, since they can disagree while a pair is pending.
    #[must_use]
    pub fn is_revealed(&self, id: CardId) -> bool {
        self.selection.contains(&id)
            || self.card(id).is_some_and(|card| card.flipped || card.matched)
    }

    /// Check if the renderer should accept a click on a card.
    #[must_use]
    pub fn is_selectable(&self, id: CardId) -> bool {
        self.card(id).is_some()
            && !self.is_won()
            && !self.has_pending_pair()
            && !self.is_revealed(id)
    }

    // === Transitions ===

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let position = *self.index.get(&id)?;
        self.cards.get_mut(position)
    }

    fn check_selectable(&self, id: CardId) -> Result<(), RejectReason> {
        if self.has_pending_pair() {
            return Err(RejectReason::PendingPair);
        }
        if self.selection.contains(&id) {
            return Err(RejectReason::AlreadySelected);
        }
        match self.card(id) {
            None => Err(RejectReason::UnknownCard),
            Some(card) if card.matched => Err(RejectReason::AlreadyMatched),
            Some(_) => Ok(()),
        }
    }

    /// Apply a card selection at clock time `now_ms`.
    pub(crate) fn select(&mut self, id: CardId, now_ms: u64) -> SelectOutcome {
        if let Err(reason) = self.check_selectable(id) {
            return SelectOutcome::Ignored(reason);
        }

        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::InProgress;
            self.started_at_ms = Some(now_ms);
        }

        if let Some(card) = self.card_mut(id) {
            card.flip_up();
        }
        self.selection.push(id);

        if !self.has_pending_pair() {
            return SelectOutcome::Revealed;
        }

        self.moves += 1;
        let (first, second) = (self.selection[0], self.selection[1]);
        let matched = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };
        SelectOutcome::PairCompleted {
            first,
            second,
            matched,
        }
    }

    /// Settle a pending pair at clock time `now_ms`.
    ///
    /// Returns `true` if this resolution won the game.
    pub(crate) fn resolve_pair(
        &mut self,
        first: CardId,
        second: CardId,
        matched: bool,
        now_ms: u64,
    ) -> bool {
        for id in [first, second] {
            if let Some(card) = self.card_mut(id) {
                if matched {
                    card.mark_matched();
                } else {
                    card.flip_down();
                }
            }
        }
        self.selection.clear();

        if !matched {
            return false;
        }

        self.matched_pairs += 1;
        if self.matched_pairs < self.total_pairs() {
            return false;
        }

        self.sample(now_ms);
        self.phase = GamePhase::Won;
        self.score = Some(score_for(self.moves));
        true
    }

    /// Recompute elapsed time. Returns `true` while sampling should go on.
    pub(crate) fn sample(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::InProgress {
            return false;
        }
        if let Some(start) = self.started_at_ms {
            self.elapsed_ms = now_ms.saturating_sub(start);
        }
        true
    }
}
