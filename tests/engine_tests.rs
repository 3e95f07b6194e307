//! Game engine integration tests.
//!
//! These tests play whole games on a `ManualClock`:
//! - Selection admission rules
//! - Match and mismatch resolution timing
//! - Move counting and scoring
//! - Restart in every phase

use memory_match::cards::CardId;
use memory_match::core::{Clock, Difficulty, GameConfig, ManualClock, TimingConfig};
use memory_match::engine::{GameEngine, GamePhase};
use memory_match::events::RecordingSink;

fn new_game(difficulty: Difficulty, seed: u64) -> (GameEngine<ManualClock>, ManualClock, RecordingSink) {
    let clock = ManualClock::starting_at(10_000);
    let sink = RecordingSink::new();
    let config = GameConfig::new().with_difficulty(difficulty).with_seed(seed);
    let engine = GameEngine::builder(config)
        .sink(sink.clone())
        .build(clock.clone())
        .unwrap();
    (engine, clock, sink)
}

/// The other card with the same symbol.
fn partner(engine: &GameEngine<ManualClock>, id: CardId) -> CardId {
    let card = engine.session().card(id).unwrap();
    engine
        .session()
        .cards()
        .iter()
        .find(|other| other.pairs_with(card))
        .map(|other| other.id)
        .unwrap()
}

/// A card that does not pair with `id` and isn't matched.
fn stranger(engine: &GameEngine<ManualClock>, id: CardId) -> CardId {
    let card = engine.session().card(id).unwrap();
    engine
        .session()
        .cards()
        .iter()
        .find(|other| other.symbol != card.symbol && !other.matched)
        .map(|other| other.id)
        .unwrap()
}

/// Unmatched card ids in board order.
fn unmatched(engine: &GameEngine<ManualClock>) -> Vec<CardId> {
    engine
        .session()
        .cards()
        .iter()
        .filter(|card| !card.matched)
        .map(|card| card.id)
        .collect()
}

/// Select a correct pair and let it resolve.
fn play_match(engine: &mut GameEngine<ManualClock>, clock: &ManualClock) {
    let first = unmatched(engine)[0];
    let second = partner(engine, first);
    assert!(engine.select_card(first));
    assert!(engine.select_card(second));
    clock.advance(1000);
    engine.run_due();
}

/// Select a wrong pair and let it resolve.
fn play_mismatch(engine: &mut GameEngine<ManualClock>, clock: &ManualClock) {
    let first = unmatched(engine)[0];
    let second = stranger(engine, first);
    assert!(engine.select_card(first));
    assert!(engine.select_card(second));
    clock.advance(1500);
    engine.run_due();
}

// =============================================================================
// Scenarios
// =============================================================================

/// Medium, eight perfect pairs: moves 8, score 920.
#[test]
fn test_perfect_medium_game() {
    let (mut engine, clock, sink) = new_game(Difficulty::Medium, 1);

    for _ in 0..8 {
        play_match(&mut engine, &clock);
    }

    let session = engine.session();
    assert_eq!(session.moves(), 8);
    assert_eq!(session.matched_pairs(), 8);
    assert_eq!(engine.phase(), GamePhase::Won);
    assert_eq!(engine.score(), Some(920));
    assert_eq!(sink.len(), 1);
}

/// Restart with one card up clears everything.
#[test]
fn test_restart_mid_game() {
    let (mut engine, clock, sink) = new_game(Difficulty::Medium, 2);
    play_match(&mut engine, &clock);
    play_mismatch(&mut engine, &clock);

    let lone = unmatched(&engine)[0];
    engine.select_card(lone);
    clock.advance(300);
    engine.run_due();
    assert!(engine.session().elapsed_ms() > 0);

    engine.restart();

    let session = engine.session();
    assert_eq!(session.phase(), GamePhase::NotStarted);
    assert_eq!(session.moves(), 0);
    assert_eq!(session.matched_pairs(), 0);
    assert_eq!(session.elapsed_ms(), 0);
    assert!(session.selection().is_empty());
    assert!(session.cards().iter().all(|c| !c.flipped && !c.matched));
    assert_eq!(sink.len(), 0);
}

/// A third click during a pending pair is ignored; the pair still resolves on time.
#[test]
fn test_third_card_ignored_while_pending() {
    let (mut engine, clock, _) = new_game(Difficulty::Medium, 3);
    let first = unmatched(&engine)[0];
    let second = stranger(&engine, first);
    let third = unmatched(&engine)
        .into_iter()
        .find(|&id| id != first && id != second)
        .unwrap();

    engine.select_card(first);
    engine.select_card(second);

    clock.advance(700);
    let before = engine.session().clone();
    assert!(!engine.select_card(third));
    assert_eq!(engine.session(), &before);
    assert!(!engine.is_revealed(third));

    clock.advance(800);
    engine.run_due();
    assert!(engine.session().selection().is_empty());
    assert!(!engine.session().card(first).unwrap().flipped);
    assert!(!engine.session().card(second).unwrap().flipped);
    assert_eq!(engine.session().moves(), 1);
}

// =============================================================================
// Selection Rules
// =============================================================================

/// Selecting a matched card changes nothing.
#[test]
fn test_select_matched_card_is_noop() {
    let (mut engine, clock, _) = new_game(Difficulty::Medium, 4);
    play_match(&mut engine, &clock);

    let matched = engine
        .session()
        .cards()
        .iter()
        .find(|card| card.matched)
        .map(|card| card.id)
        .unwrap();

    let before = engine.session().clone();
    assert!(!engine.select_card(matched));
    assert!(!engine.select_card(matched));
    assert_eq!(engine.session(), &before);
}

/// Clicking the same card twice does not make a pair.
#[test]
fn test_double_click_same_card() {
    let (mut engine, _, _) = new_game(Difficulty::Medium, 5);
    let id = unmatched(&engine)[0];

    assert!(engine.select_card(id));
    assert!(!engine.select_card(id));
    assert_eq!(engine.session().selection(), &[id]);
    assert_eq!(engine.session().moves(), 0);
}

/// Unknown ids are ignored and don't start the game.
#[test]
fn test_unknown_card_ignored() {
    let (mut engine, _, _) = new_game(Difficulty::Medium, 6);
    assert!(!engine.select_card(CardId::new(500)));
    assert_eq!(engine.phase(), GamePhase::NotStarted);
    assert_eq!(engine.next_due_ms(), None);
}

/// Moves only count completed pairs.
#[test]
fn test_moves_count_pairs_only() {
    let (mut engine, clock, _) = new_game(Difficulty::Medium, 7);

    engine.select_card(unmatched(&engine)[0]);
    assert_eq!(engine.session().moves(), 0);

    let first = engine.session().selection()[0];
    engine.select_card(stranger(&engine, first));
    assert_eq!(engine.session().moves(), 1);

    clock.advance(1500);
    engine.run_due();
    play_match(&mut engine, &clock);
    assert_eq!(engine.session().moves(), 2);
}

// =============================================================================
// Resolution
// =============================================================================

/// After a mismatch both cards are face down and unmatched.
#[test]
fn test_mismatch_resolution_state() {
    let (mut engine, clock, _) = new_game(Difficulty::Hard, 8);
    let first = unmatched(&engine)[0];
    let second = stranger(&engine, first);

    engine.select_card(first);
    engine.select_card(second);
    assert!(engine.is_revealed(first) && engine.is_revealed(second));

    clock.advance(1499);
    engine.run_due();
    assert!(engine.session().has_pending_pair());

    clock.advance(1);
    engine.run_due();
    for id in [first, second] {
        let card = engine.session().card(id).unwrap();
        assert!(!card.flipped);
        assert!(!card.matched);
        assert!(!engine.is_revealed(id));
        assert!(engine.is_selectable(id));
    }
    assert!(engine.session().selection().is_empty());
}

/// After a match both cards stay revealed as matched and the count goes up by one.
#[test]
fn test_match_resolution_state() {
    let (mut engine, clock, _) = new_game(Difficulty::Hard, 9);
    let first = unmatched(&engine)[0];
    let second = partner(&engine, first);

    engine.select_card(first);
    engine.select_card(second);
    clock.advance(1000);
    engine.run_due();

    assert_eq!(engine.session().matched_pairs(), 1);
    for id in [first, second] {
        let card = engine.session().card(id).unwrap();
        assert!(card.matched);
        assert!(!card.flipped);
        assert!(engine.is_revealed(id));
        assert!(!engine.is_selectable(id));
    }
}

/// Custom timing is honored.
#[test]
fn test_custom_timing() {
    let clock = ManualClock::new();
    let config = GameConfig::new().with_seed(10).with_timing(TimingConfig {
        match_delay_ms: 200,
        mismatch_delay_ms: 300,
        sample_interval_ms: 50,
    });
    let mut engine = GameEngine::builder(config).build(clock.clone()).unwrap();

    let first = unmatched(&engine)[0];
    engine.select_card(first);
    assert_eq!(engine.next_due_ms(), Some(50));
    engine.select_card(partner(&engine, first));

    clock.advance(200);
    engine.run_due();
    assert_eq!(engine.session().matched_pairs(), 1);
}

// =============================================================================
// Timing
// =============================================================================

/// Elapsed time is sampled while in progress and frozen at the win.
#[test]
fn test_elapsed_sampling_stops_at_win() {
    let (mut engine, clock, sink) = new_game(Difficulty::Medium, 11);

    for _ in 0..3 {
        play_mismatch(&mut engine, &clock);
    }
    assert_eq!(engine.session().elapsed_ms(), 4500);

    for _ in 0..8 {
        play_match(&mut engine, &clock);
    }
    assert_eq!(engine.phase(), GamePhase::Won);
    assert_eq!(engine.session().elapsed_ms(), 12_500);

    clock.advance(60_000);
    engine.run_due();
    assert_eq!(engine.session().elapsed_ms(), 12_500);
    assert_eq!(engine.view().elapsed_display, "0:12");

    let record = sink.last().unwrap();
    assert_eq!(record.time_spent, 12_500);
    assert_eq!(record.data.moves, 11);
    assert_eq!(record.score, 890);
}

/// The host learns when to poll next.
#[test]
fn test_next_due_tracks_queue() {
    let (mut engine, clock, _) = new_game(Difficulty::Medium, 12);
    assert_eq!(engine.next_due_ms(), None);

    let first = unmatched(&engine)[0];
    engine.select_card(first);
    assert_eq!(engine.next_due_ms(), Some(10_100));

    clock.advance(100);
    engine.run_due();
    assert_eq!(engine.next_due_ms(), Some(10_200));
}

// =============================================================================
// Restart
// =============================================================================

/// Restart during a pending match: the old resolution never lands.
#[test]
fn test_restart_with_pending_match() {
    let (mut engine, clock, _) = new_game(Difficulty::Medium, 13);
    let first = unmatched(&engine)[0];
    let second = partner(&engine, first);
    engine.select_card(first);
    engine.select_card(second);

    engine.restart();
    clock.advance(2_000);
    assert_eq!(engine.run_due(), 0);

    let session = engine.session();
    assert_eq!(session.matched_pairs(), 0);
    assert!(session.cards().iter().all(|c| !c.matched && !c.flipped));
    assert_eq!(session.phase(), GamePhase::NotStarted);
}

/// Restart, then start again before old tasks fire: only new tasks apply.
#[test]
fn test_restart_then_replay_ignores_old_sampler() {
    let (mut engine, clock, _) = new_game(Difficulty::Medium, 14);
    engine.select_card(unmatched(&engine)[0]);

    clock.advance(50);
    engine.restart();
    engine.select_card(unmatched(&engine)[0]);
    let started = engine.session().started_at_ms().unwrap();

    clock.advance(100);
    engine.run_due();
    assert_eq!(engine.session().elapsed_ms(), clock.now_ms() - started);
    assert_eq!(engine.pending_tasks(), 1);
}

/// Restart after a win re-arms completion for the next game.
#[test]
fn test_restart_after_win() {
    let (mut engine, clock, sink) = new_game(Difficulty::Easy, 15);
    for _ in 0..8 {
        play_match(&mut engine, &clock);
    }
    assert!(engine.completion().is_some());

    engine.restart();
    assert_eq!(engine.phase(), GamePhase::NotStarted);
    assert!(engine.completion().is_none());
    assert_eq!(engine.score(), None);

    for _ in 0..8 {
        play_match(&mut engine, &clock);
    }
    assert_eq!(sink.len(), 2);
}

/// Restarts deal a different board.
#[test]
fn test_restart_reshuffles() {
    let (mut engine, _, _) = new_game(Difficulty::Hard, 16);
    let before: Vec<_> = engine.session().cards().iter().map(|c| c.symbol.clone()).collect();
    engine.restart();
    let after: Vec<_> = engine.session().cards().iter().map(|c| c.symbol.clone()).collect();
    assert_ne!(before, after);
}

/// Two engines with the same seed deal the same boards across restarts.
#[test]
fn test_restart_sequence_is_reproducible() {
    let boards = |seed| {
        let (mut engine, _, _) = new_game(Difficulty::Hard, seed);
        let mut boards = Vec::new();
        for _ in 0..3 {
            boards.push(engine.session().cards().clone());
            engine.restart();
        }
        boards
    };
    assert_eq!(boards(19), boards(19));
    assert_ne!(boards(19), boards(20));
}

// =============================================================================
// View
// =============================================================================

/// Card ids in the view are board positions and carry no pairing.
#[test]
fn test_view_ids_are_positions() {
    let mut partners = std::collections::HashSet::new();
    for seed in 30..40 {
        let (engine, _, _) = new_game(Difficulty::Medium, seed);
        let view = engine.view();
        for (position, card) in view.cards.iter().enumerate() {
            assert_eq!(card.id, CardId::new(position as u32));
        }
        partners.insert(partner(&engine, CardId::new(0)));
    }
    assert!(partners.len() > 1);
}

/// A click that lands after the pending pair came due is accepted.
#[test]
fn test_click_before_poll_is_not_dropped() {
    let (mut engine, clock, _) = new_game(Difficulty::Medium, 18);
    let first = unmatched(&engine)[0];
    let second = partner(&engine, first);
    engine.select_card(first);
    engine.select_card(second);

    clock.advance(1000);
    let next = unmatched(&engine)
        .into_iter()
        .find(|&id| id != first && id != second)
        .unwrap();
    assert!(engine.select_card(next));
    assert_eq!(engine.session().matched_pairs(), 1);
    assert_eq!(engine.session().selection(), &[next]);
}

/// The board view mirrors the session.
#[test]
fn test_view_mirrors_session() {
    let (mut engine, clock, _) = new_game(Difficulty::Hard, 17);
    play_match(&mut engine, &clock);

    let first = unmatched(&engine)[0];
    engine.select_card(first);

    let view = engine.view();
    assert_eq!(view.title, "WWII Memory Match");
    assert_eq!(view.columns, 6);
    assert_eq!(view.total_pairs, 12);
    assert_eq!(view.matched_pairs, 1);
    assert_eq!(view.moves, 1);
    assert!(view.started);
    assert!(!view.won);

    let shown = view.cards.iter().find(|c| c.id == first).unwrap();
    assert!(shown.revealed && shown.flipped && !shown.selectable);
    assert_eq!(view.cards.iter().filter(|c| c.matched).count(), 2);
}
