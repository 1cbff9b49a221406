//! End-to-end game flow scenarios driven by a manual clock
//!
//! These walk whole games through the public API: deal, flip pairs, let the
//! staged resolutions fire, and check the score/move/status bookkeeping and
//! the cue order a front-end would observe.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use colorspeak::engine::{
    GameEngine, ManualClock, MATCH_REVEAL_DELAY, MATCH_REWARD, MATCH_SETTLE_DELAY,
    MISMATCH_PENALTY, MISMATCH_REVEAL_DELAY, MISMATCH_SETTLE_DELAY, WIN_DELAY,
};
use colorspeak::{
    default_palette, ClickOutcome, Cues, Difficulty, DifficultySet, EffectKind, GameStatus,
};

/// Cue log shared with the engine under test
#[derive(Default)]
struct CueLog {
    events: Mutex<Vec<String>>,
}

impl CueLog {
    fn new() -> Arc<Self> {
        Arc::new(CueLog::default())
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn count(&self, event: &str) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }
}

impl Cues for CueLog {
    fn effect(&self, kind: EffectKind) {
        self.events.lock().push(format!("effect:{:?}", kind));
    }

    fn speak(&self, color_name: &str) {
        self.events.lock().push(format!("speak:{}", color_name));
    }

    fn preload(&self, color_names: &[String]) {
        let mut names: Vec<String> = color_names.to_vec();
        names.sort();
        self.events.lock().push(format!("preload:{}", names.join(",")));
    }
}

fn new_game(difficulty: Difficulty) -> (GameEngine, Arc<CueLog>, Arc<ManualClock>) {
    let cues = CueLog::new();
    let clock = Arc::new(ManualClock::new());
    let mut engine = GameEngine::new(
        default_palette(),
        DifficultySet::default(),
        cues.clone(),
        clock.clone(),
    );
    engine.start_game(difficulty).unwrap();
    (engine, cues, clock)
}

/// Ids of an unmatched pair sharing a color
fn find_match(engine: &GameEngine) -> (String, String) {
    let tiles = engine.session().tiles();
    for (i, a) in tiles.iter().enumerate() {
        if a.is_matched {
            continue;
        }
        for b in &tiles[i + 1..] {
            if !b.is_matched && a.color_id == b.color_id {
                return (a.id.clone(), b.id.clone());
            }
        }
    }
    panic!("no unmatched pair left");
}

/// Ids of two unmatched tiles with different colors
fn find_mismatch(engine: &GameEngine) -> (String, String) {
    let tiles = engine.session().tiles();
    let a = tiles.iter().find(|t| !t.is_matched).unwrap();
    let b = tiles
        .iter()
        .find(|t| !t.is_matched && t.color_id != a.color_id)
        .expect("board still has two colors");
    (a.id.clone(), b.id.clone())
}

/// Advance time in small steps until nothing is scheduled
fn settle(engine: &mut GameEngine, clock: &ManualClock) {
    for _ in 0..20 {
        clock.advance(Duration::from_millis(200));
        engine.tick();
        if !engine.is_settling() {
            break;
        }
    }
    assert!(!engine.is_settling(), "resolution never settled");
}

#[test]
fn easy_scenario_mismatch_then_match() {
    // Easy board: 3 pairs, a mismatch at the score floor, then a match.
    let (mut engine, cues, clock) = new_game(Difficulty::Easy);
    assert_eq!(engine.session().tiles().len(), 6);

    let (a, b) = find_mismatch(&engine);
    assert_eq!(engine.handle_tile_click(&a), ClickOutcome::FirstFlipped);
    assert_eq!(engine.handle_tile_click(&b), ClickOutcome::PairFlipped);
    settle(&mut engine, &clock);

    assert_eq!(engine.session().score(), 0, "penalty clamps at zero");
    assert_eq!(engine.session().moves(), 1);
    assert!(engine
        .session()
        .tiles()
        .iter()
        .all(|t| !t.is_selected && !t.is_matched));

    let (a, b) = find_match(&engine);
    engine.handle_tile_click(&a);
    engine.handle_tile_click(&b);
    settle(&mut engine, &clock);

    assert_eq!(engine.session().score(), MATCH_REWARD);
    assert_eq!(engine.session().moves(), 2);
    assert!(engine.session().tile(&a).unwrap().is_matched);
    assert!(engine.session().tile(&b).unwrap().is_matched);

    assert_eq!(cues.count("effect:Mismatch"), 1);
    assert_eq!(cues.count("effect:Match"), 1);
    assert_eq!(cues.count("effect:Click"), 4);
}

#[test]
fn cue_and_state_ordering_within_a_match() {
    let (mut engine, cues, clock) = new_game(Difficulty::Easy);
    let (a, b) = find_match(&engine);
    engine.handle_tile_click(&a);
    engine.handle_tile_click(&b);

    // Stage 1 window: both tiles revealed, no cue beyond the clicks yet.
    clock.advance(MATCH_REVEAL_DELAY - Duration::from_millis(1));
    engine.tick();
    assert_eq!(cues.count("effect:Match"), 0);
    assert_eq!(engine.session().score(), 0);

    // Cue and score land together, before the board updates.
    clock.advance(Duration::from_millis(1));
    engine.tick();
    assert_eq!(cues.count("effect:Match"), 1);
    assert_eq!(engine.session().score(), MATCH_REWARD);
    assert!(!engine.session().tile(&a).unwrap().is_matched);
    assert!(engine.session().is_processing());

    // Finalize only after the settle delay.
    clock.advance(MATCH_SETTLE_DELAY);
    engine.tick();
    assert!(engine.session().tile(&a).unwrap().is_matched);
    assert!(!engine.session().is_processing());
}

#[test]
fn processing_gate_holds_for_the_whole_resolution() {
    let (mut engine, _, clock) = new_game(Difficulty::Medium);
    let (a, b) = find_mismatch(&engine);
    engine.handle_tile_click(&a);
    engine.handle_tile_click(&b);

    let third = engine
        .session()
        .tiles()
        .iter()
        .find(|t| !t.is_selected)
        .unwrap()
        .id
        .clone();

    // Mid-reveal and mid-settle, clicks stay blocked.
    clock.advance(MISMATCH_REVEAL_DELAY);
    engine.tick();
    assert_eq!(engine.handle_tile_click(&third), ClickOutcome::Ignored);

    clock.advance(MISMATCH_SETTLE_DELAY - Duration::from_millis(1));
    engine.tick();
    assert_eq!(engine.handle_tile_click(&third), ClickOutcome::Ignored);
    assert_eq!(engine.session().moves(), 1);

    // Released after finalize.
    clock.advance(Duration::from_millis(1));
    engine.tick();
    assert_eq!(engine.handle_tile_click(&third), ClickOutcome::FirstFlipped);
}

#[test]
fn repeated_mismatches_keep_score_at_zero() {
    let (mut engine, _, clock) = new_game(Difficulty::Medium);
    for _ in 0..5 {
        let (a, b) = find_mismatch(&engine);
        engine.handle_tile_click(&a);
        engine.handle_tile_click(&b);
        settle(&mut engine, &clock);
        assert_eq!(engine.session().score(), 0);
    }
    assert_eq!(engine.session().moves(), 5);
}

#[test]
fn full_game_wins_exactly_once() {
    let (mut engine, cues, clock) = new_game(Difficulty::Easy);
    for _ in 0..3 {
        let (a, b) = find_match(&engine);
        engine.handle_tile_click(&a);
        engine.handle_tile_click(&b);
        settle(&mut engine, &clock);
    }

    assert_eq!(engine.session().status(), GameStatus::Won);
    assert_eq!(engine.session().score(), 3 * MATCH_REWARD);
    assert_eq!(engine.session().moves(), 3);
    assert_eq!(cues.count("effect:Win"), 1);

    // The win is terminal until restart.
    let id = engine.session().tiles()[0].id.clone();
    assert_eq!(engine.handle_tile_click(&id), ClickOutcome::Ignored);
    clock.advance(WIN_DELAY);
    engine.tick();
    assert_eq!(cues.count("effect:Win"), 1);
}

#[test]
fn win_delay_keeps_the_board_playing_briefly() {
    let (mut engine, _, clock) = new_game(Difficulty::Easy);
    for _ in 0..3 {
        let (a, b) = find_match(&engine);
        engine.handle_tile_click(&a);
        engine.handle_tile_click(&b);
        clock.advance(MATCH_REVEAL_DELAY);
        engine.tick();
        clock.advance(MATCH_SETTLE_DELAY);
        engine.tick();
    }

    // All tiles matched, but the win transition waits out its delay.
    assert!(engine.session().all_matched());
    assert_eq!(engine.session().status(), GameStatus::Playing);
    clock.advance(WIN_DELAY);
    engine.tick();
    assert_eq!(engine.session().status(), GameStatus::Won);
}

#[test]
fn restart_during_resolution_leaves_no_stray_mutation() {
    let (mut engine, _, clock) = new_game(Difficulty::Hard);
    let (a, b) = find_match(&engine);
    engine.handle_tile_click(&a);
    engine.handle_tile_click(&b);
    assert!(engine.is_settling());

    engine.start_game(Difficulty::Easy).unwrap();
    settle(&mut engine, &clock);

    let session = engine.session();
    assert_eq!(session.tiles().len(), 6, "board matches the new difficulty");
    assert_eq!(session.score(), 0);
    assert_eq!(session.moves(), 0);
    assert_eq!(session.status(), GameStatus::Playing);
    assert!(session
        .tiles()
        .iter()
        .all(|t| !t.is_matched && !t.is_selected));
}

#[test]
fn restart_after_win_deals_a_fresh_board() {
    let (mut engine, cues, clock) = new_game(Difficulty::Easy);
    for _ in 0..3 {
        let (a, b) = find_match(&engine);
        engine.handle_tile_click(&a);
        engine.handle_tile_click(&b);
        settle(&mut engine, &clock);
    }
    assert_eq!(engine.session().status(), GameStatus::Won);

    engine.start_game(Difficulty::Easy).unwrap();
    assert_eq!(engine.session().status(), GameStatus::Playing);
    assert_eq!(engine.session().score(), 0);
    assert!(engine.session().tiles().iter().all(|t| !t.is_matched));
    // Both deals preloaded their color sets.
    assert_eq!(
        cues.events()
            .iter()
            .filter(|e| e.starts_with("preload:"))
            .count(),
        2
    );
}

#[test]
fn spoken_name_matches_the_matched_color() {
    let (mut engine, cues, clock) = new_game(Difficulty::Easy);
    let (a, b) = find_match(&engine);
    let color_id = engine.session().tile(&a).unwrap().color_id.clone();
    let expected = default_palette()
        .into_iter()
        .find(|c| c.id == color_id)
        .unwrap()
        .name;

    engine.handle_tile_click(&a);
    engine.handle_tile_click(&b);
    settle(&mut engine, &clock);

    assert!(cues.events().contains(&format!("speak:{}", expected)));
}
