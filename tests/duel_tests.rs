use arena_reader::duel::error::DuelError;
use arena_reader::duel::navigator::{DuelNavigator, PLAYABLE_MARKER, SUBMIT_PROMPT, TARGET_MARKER};
use arena_reader::host::fake::{ClickRecord, FakeInput, FakeNode, FakeSceneGraph, SharedScene, SpeechLog};

mod common;
use crate::common::announcer;

fn duel_scene() -> SharedScene {
    SharedScene::new(FakeSceneGraph::with_nodes(vec![
        FakeNode::new("PlayerHand"),
        FakeNode::new("HandCard1")
            .under("PlayerHand")
            .text("Llanowar Elves")
            .text("Creature — Elf Druid"),
        FakeNode::new("HandCard2")
            .under("PlayerHand")
            .text("Giant Growth")
            .text("Instant"),
        FakeNode::new("PlayerBattlefield"),
        FakeNode::new("FieldCard1")
            .under("PlayerBattlefield")
            .text("Forest")
            .text("Basic Land — Forest"),
        FakeNode::new("OpponentBattlefield"),
        FakeNode::new("OppCard1")
            .under("OpponentBattlefield")
            .text("Grizzly Bears")
            .text("Creature — Bear"),
        FakeNode::new("TheStack"),
    ]))
}

// =========================================================================
// Zone and card navigation
// =========================================================================

#[test]
fn zones_cycle_in_fixed_order_with_summaries() {
    let scene = duel_scene();
    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.next_zone(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "Battlefield, 1 card, 1 land");

    duel.next_zone(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "Opponent's battlefield, 1 card, 1 creature");

    duel.previous_zone(&scene, &mut a);
    duel.previous_zone(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "Hand, 2 cards");

    duel.previous_zone(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "Start of list", "Zone list clamps");
}

#[test]
fn battlefield_summaries_break_down_card_types() {
    let scene = duel_scene();
    scene.0.borrow_mut().add(
        FakeNode::new("FieldCard2")
            .under("PlayerBattlefield")
            .text("Llanowar Elves")
            .text("Creature — Elf Druid"),
    );

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.next_zone(&scene, &mut a);
    assert_eq!(
        log.last().unwrap(),
        "Battlefield, 2 cards, 1 creature, 1 land",
        "Type lines drive the breakdown; hands and stacks stay plain counts"
    );
}

#[test]
fn absent_zone_roots_drop_out_of_the_cycle() {
    let scene = duel_scene();
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    // Hand, player battlefield, opponent battlefield, stack; no graveyards
    // or exiles exist in this layout
    assert_eq!(duel.zones().len(), 4);
}

#[test]
fn card_movement_clamps_and_reads_type_lines() {
    let scene = duel_scene();
    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.next_card(&mut a);
    assert_eq!(log.last().unwrap(), "2 of 2: Giant Growth, Instant");

    duel.next_card(&mut a);
    assert_eq!(log.last().unwrap(), "End of list");

    duel.previous_card(&mut a);
    assert_eq!(log.last().unwrap(), "1 of 2: Llanowar Elves, Creature — Elf Druid");
}

// =========================================================================
// Highlight cycling
// =========================================================================

#[test]
fn highlight_cycling_skips_unplayable_cards_and_wraps() {
    let scene = duel_scene();
    scene.0.borrow_mut().set_marker("HandCard2", PLAYABLE_MARKER, true);
    scene.0.borrow_mut().set_marker("FieldCard1", PLAYABLE_MARKER, true);

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.cycle_highlight(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "2 of 2: Giant Growth, Instant");

    duel.cycle_highlight(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "Battlefield: Forest", "Crossing zones folds the zone in");

    duel.cycle_highlight(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "Hand: Giant Growth", "Wraps past the end");
}

#[test]
fn nothing_playable_is_reported_not_silent() {
    let scene = duel_scene();
    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.cycle_highlight(&scene, &mut a);
    assert_eq!(log.last().unwrap(), "Nothing playable");
}

// =========================================================================
// Card play gesture
// =========================================================================

#[test]
fn default_gesture_clicks_twice_then_confirms_at_center() {
    let scene = duel_scene();
    let mut input = FakeInput::new(scene.clone());
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    let card = scene.0.borrow().id_of("HandCard1").unwrap();
    duel.play_current_card(&scene, &mut input).unwrap();

    assert_eq!(
        input.clicks,
        vec![
            ClickRecord::Node(card),
            ClickRecord::Node(card),
            ClickRecord::At(960.0, 540.0),
        ],
        "Select, pick up, confirm at viewport center"
    );
}

// =========================================================================
// Target selection sessions
// =========================================================================

#[test]
fn prompt_after_a_play_opens_a_target_session() {
    let scene = duel_scene();
    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut input = FakeInput::new(scene.clone());
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.play_current_card(&scene, &mut input).unwrap();

    // Host reacts: prompt appears, two valid targets light up
    scene.0.borrow_mut().add(FakeNode::new(SUBMIT_PROMPT));
    scene.0.borrow_mut().set_marker("FieldCard1", TARGET_MARKER, true);
    scene.0.borrow_mut().set_marker("OppCard1", TARGET_MARKER, true);

    duel.poll(&scene, &mut a);
    assert!(duel.in_target_session());
    assert_eq!(log.last().unwrap(), "Choose a target. 1 of 2: Forest");
}

#[test]
fn target_cycling_wraps_unlike_ordinary_lists() {
    let scene = duel_scene();
    scene.0.borrow_mut().add(FakeNode::new(SUBMIT_PROMPT));
    scene.0.borrow_mut().set_marker("FieldCard1", TARGET_MARKER, true);
    scene.0.borrow_mut().set_marker("OppCard1", TARGET_MARKER, true);

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);
    duel.begin_target_session(&scene, &mut a).unwrap();

    duel.cycle_target(&mut a);
    assert_eq!(log.last().unwrap(), "2 of 2: Grizzly Bears");
    duel.cycle_target(&mut a);
    assert_eq!(log.last().unwrap(), "1 of 2: Forest", "Session cycling wraps around");
}

#[test]
fn starting_a_second_session_is_an_error() {
    let scene = duel_scene();
    scene.0.borrow_mut().set_marker("OppCard1", TARGET_MARKER, true);

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.begin_target_session(&scene, &mut a).unwrap();
    assert!(matches!(
        duel.begin_target_session(&scene, &mut a),
        Err(DuelError::SessionAlreadyActive)
    ));
}

#[test]
fn no_valid_targets_is_spoken_and_no_session_opens() {
    let scene = duel_scene();
    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);

    duel.begin_target_session(&scene, &mut a).unwrap();
    assert!(!duel.in_target_session());
    assert_eq!(log.last().unwrap(), "No valid targets");
}

#[test]
fn cancelling_a_session_speaks_once() {
    let scene = duel_scene();
    scene.0.borrow_mut().set_marker("OppCard1", TARGET_MARKER, true);

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);
    duel.begin_target_session(&scene, &mut a).unwrap();

    duel.cancel_session(&mut a);
    assert!(!duel.in_target_session());
    assert_eq!(log.last().unwrap(), "Target selection cancelled");
}

#[test]
fn prompt_disappearance_ends_the_session_silently() {
    let scene = duel_scene();
    scene.0.borrow_mut().add(FakeNode::new(SUBMIT_PROMPT));
    scene.0.borrow_mut().set_marker("OppCard1", TARGET_MARKER, true);

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);
    duel.begin_target_session(&scene, &mut a).unwrap();

    scene.0.borrow_mut().remove(SUBMIT_PROMPT);
    let spoken_before = log.lines().len();
    duel.poll(&scene, &mut a);

    assert!(!duel.in_target_session());
    assert_eq!(log.lines().len(), spoken_before, "Teardown says nothing about targets");
}

#[test]
fn choosing_a_target_clicks_it_and_closes_the_session() {
    let scene = duel_scene();
    scene.0.borrow_mut().set_marker("OppCard1", TARGET_MARKER, true);

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut input = FakeInput::new(scene.clone());
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);
    duel.begin_target_session(&scene, &mut a).unwrap();

    let target = scene.0.borrow().id_of("OppCard1").unwrap();
    duel.choose_target(&mut input, &mut a).unwrap();

    assert_eq!(input.clicks, vec![ClickRecord::Node(target)]);
    assert!(!duel.in_target_session());
    assert_eq!(log.last().unwrap(), "Grizzly Bears");
}

// =========================================================================
// Stack resolution by count diffing
// =========================================================================

#[test]
fn shrinking_stack_reads_as_spell_resolved() {
    let scene = duel_scene();
    scene.0.borrow_mut().add(
        FakeNode::new("StackCard1")
            .under("TheStack")
            .text("Giant Growth")
            .text("Instant"),
    );

    let log = SpeechLog::new();
    let mut a = announcer(&log);
    let mut duel = DuelNavigator::new();
    duel.rebuild_zones(&scene);
    duel.poll(&scene, &mut a); // records the one-card stack

    scene.0.borrow_mut().remove("StackCard1");
    duel.rebuild_zones(&scene);
    duel.poll(&scene, &mut a);

    assert_eq!(log.last().unwrap(), "Spell resolved");
}
