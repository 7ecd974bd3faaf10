use arena_reader::engine::{NavCommand, WAIT_TICKS};
use arena_reader::host::fake::FakeNode;

mod common;
use crate::common::harness;

fn home_nodes() -> Vec<FakeNode> {
    vec![
        FakeNode::new("PlayButton").under("MainMenu").text("Play"),
        FakeNode::new("DeckTile").under("MainMenu").text("Deck A"),
        FakeNode::new("DeckTile2").under("MainMenu").text("Deck B"),
    ]
}

// =========================================================================
// Activation, wait state, position restore
// =========================================================================

#[test]
fn activation_waits_for_the_host_then_restores_the_group() {
    let mut h = harness(home_nodes(), "HomeScene");
    assert_eq!(h.log.last().unwrap(), "1 of 1: Play", "Standalone Play opens collapsed");

    h.engine.tick(Some(NavCommand::NextElement));
    assert_eq!(h.log.last().unwrap(), "2 of 2: Content, 2 items");
    h.engine.tick(Some(NavCommand::Activate));
    assert_eq!(h.log.last().unwrap(), "1 of 2: Deck A");

    // Activating the deck rebuilds the screen with a filter bar pushed in
    // ahead of the deck list
    h.scene.0.borrow_mut().on_click_replace(
        "DeckTile",
        vec![
            FakeNode::new("SortButton").under("DeckView").text("Sort"),
            FakeNode::new("DeckTile").under("DeckView").text("Deck A"),
            FakeNode::new("DeckTile2").under("DeckView").text("Deck B"),
        ],
    );
    h.engine.tick(Some(NavCommand::Activate));

    // The click landed; the next tick notices the changed scene and the
    // cursor comes back inside Content despite the new group in front
    h.engine.tick(None);
    assert_eq!(h.log.last().unwrap(), "1 of 2: Deck A");
    assert_eq!(h.engine.menu().nav.cursor().group, 1, "Filters now sits ahead of Content");
}

#[test]
fn unresponsive_click_reports_no_effect_after_the_wait_window() {
    let mut h = harness(home_nodes(), "HomeScene");

    h.engine.tick(Some(NavCommand::NextElement));
    h.engine.tick(Some(NavCommand::Activate)); // into Content
    h.engine.tick(Some(NavCommand::Activate)); // click Deck A, no host reaction

    for _ in 0..WAIT_TICKS - 1 {
        h.engine.tick(None);
        assert_ne!(h.log.last().unwrap(), "No effect", "Still inside the wait window");
    }
    h.engine.tick(None);
    assert_eq!(h.log.last().unwrap(), "No effect");

    let count = h.log.lines().iter().filter(|t| t.as_str() == "No effect").count();
    assert_eq!(count, 1, "Spoken once per timed-out click");
}

#[test]
fn commands_are_suppressed_while_waiting() {
    let mut h = harness(home_nodes(), "HomeScene");

    h.engine.tick(Some(NavCommand::NextElement));
    h.engine.tick(Some(NavCommand::Activate));
    h.engine.tick(Some(NavCommand::Activate)); // click, wait armed

    let spoken = h.log.lines().len();
    h.engine.tick(Some(NavCommand::NextElement));
    h.engine.tick(Some(NavCommand::PreviousElement));
    assert_eq!(h.log.lines().len(), spoken, "Input is ignored until the host settles");
}

// =========================================================================
// Back chain
// =========================================================================

#[test]
fn back_at_the_top_level_is_never_silent() {
    let mut h = harness(home_nodes(), "HomeScene");

    h.engine.tick(Some(NavCommand::Back)); // standalone Play -> group list
    h.engine.tick(Some(NavCommand::Back)); // nothing left to exit
    assert_eq!(h.log.last().unwrap(), "Back");
}

#[test]
fn back_closes_the_active_overlay_through_its_close_control() {
    let mut h = harness(
        vec![
            FakeNode::new("PopupContainer"),
            FakeNode::new("ConfirmButton").under("PopupContainer").text("Confirm"),
            FakeNode::new("CloseButton").under("PopupContainer").text("Close"),
        ],
        "HomeScene",
    );
    assert_eq!(h.log.last().unwrap(), "1 of 2: Confirm", "Popup is the whole navigable set");

    h.scene
        .0
        .borrow_mut()
        .on_click_replace("CloseButton", home_nodes());

    h.engine.tick(Some(NavCommand::Back)); // element level -> group list
    h.engine.tick(Some(NavCommand::Back)); // bubbles, clicks the close control
    h.engine.tick(None); // scene settles

    assert_eq!(h.log.last().unwrap(), "1 of 1: Play", "Back out of the popup lands on the menu");
}

#[test]
fn overlay_swap_without_a_presence_gap_still_rescans() {
    let mut h = harness(
        vec![
            FakeNode::new("PopupContainer"),
            FakeNode::new("ConfirmButton").under("PopupContainer").text("Confirm"),
        ],
        "HomeScene",
    );
    assert_eq!(h.log.last().unwrap(), "1 of 1: Confirm");

    // The popup closes and the settings panel opens between two ticks, so
    // overlay presence never gaps. The old element set is dead either way.
    h.scene.0.borrow_mut().replace_all(vec![
        FakeNode::new("SettingsPanel"),
        FakeNode::new("VsyncToggle").under("SettingsPanel").text("Vsync"),
        FakeNode::new("VolumeSlider").under("SettingsPanel").text("Volume"),
    ]);

    h.engine.tick(None);
    assert_eq!(h.log.last().unwrap(), "1 of 2: Vsync", "The new overlay owns navigation");

    h.engine.tick(Some(NavCommand::ReadCurrent));
    assert_eq!(
        h.log.last().unwrap(),
        "1 of 2: Vsync",
        "Read current reflects the live overlay, not the replaced one"
    );
}

#[test]
fn opening_an_overlay_with_tabs_lands_on_the_tab_strip() {
    let mut h = harness(home_nodes(), "HomeScene");

    {
        let mut scene = h.scene.0.borrow_mut();
        scene.add(FakeNode::new("SettingsPanel"));
        scene.add(
            FakeNode::new("GeneralTabButton")
                .under("SettingsPanel")
                .under_role("TabRow", "tabs")
                .text("General"),
        );
        scene.add(
            FakeNode::new("GraphicsTabButton")
                .under("SettingsPanel")
                .under_role("TabRow", "tabs")
                .text("Graphics"),
        );
        scene.add(FakeNode::new("VsyncToggle").under("SettingsPanel").text("Vsync"));
    }

    h.engine.tick(None);
    assert_eq!(
        h.log.last().unwrap(),
        "1 of 2: General",
        "A tabbed overlay opens on its tab strip, not the group list"
    );
}

// =========================================================================
// Read current
// =========================================================================

#[test]
fn read_current_bypasses_duplicate_suppression() {
    let mut h = harness(home_nodes(), "HomeScene");

    h.engine.tick(Some(NavCommand::ReadCurrent));
    h.engine.tick(Some(NavCommand::ReadCurrent));

    let count = h.log.lines().iter().filter(|t| t.as_str() == "1 of 1: Play").count();
    assert_eq!(count, 3, "Initial announcement plus two explicit re-reads");
}

// =========================================================================
// Duel routing
// =========================================================================

#[test]
fn duel_scenes_route_zone_commands_to_the_duel_navigator() {
    let mut h = harness(
        vec![
            FakeNode::new("PlayerHand"),
            FakeNode::new("HandCard1")
                .under("PlayerHand")
                .text("Llanowar Elves")
                .text("Creature — Elf Druid"),
            FakeNode::new("PlayerBattlefield"),
        ],
        "DuelScene",
    );
    assert!(h.engine.duel().is_some());

    h.engine.tick(Some(NavCommand::NextZone));
    assert_eq!(h.log.last().unwrap(), "Battlefield, 0 cards");

    h.engine.tick(Some(NavCommand::PreviousZone));
    assert_eq!(h.log.last().unwrap(), "Hand, 1 card");
}

#[test]
fn overlays_on_a_duel_scene_navigate_like_menus() {
    let mut h = harness(
        vec![
            FakeNode::new("PlayerHand"),
            FakeNode::new("HandCard1").under("PlayerHand").text("Forest").text("Basic Land"),
        ],
        "DuelScene",
    );

    // Settings opens mid-duel
    h.scene.0.borrow_mut().add(FakeNode::new("SettingsPanel"));
    h.scene.0.borrow_mut().add(
        FakeNode::new("VsyncToggle").under("SettingsPanel").text("Vsync"),
    );

    h.engine.tick(None);
    assert_eq!(
        h.log.last().unwrap(),
        "1 of 1: Vsync",
        "The overlay is announced and owns navigation even in a duel"
    );

    h.engine.tick(Some(NavCommand::NextElement));
    assert_eq!(h.log.last().unwrap(), "End of list", "Element keys stay inside the overlay");
}
