use crate::duel::error::DuelError;
use crate::duel::gesture::{PlayGesture, TwoStepCenterGesture};
use crate::duel::zone_model::{is_creature, is_land, CardRef, Zone, ZoneKind, ZONE_ORDER};
use crate::host::error::HostError;
use crate::host::graph::SceneGraph;
use crate::host::input::InputChannel;
use crate::host::speech::Priority;
use crate::speech::announcer::Announcer;

/// Marker child the host activates on a card that can currently be played.
pub const PLAYABLE_MARKER: &str = "PlayableHighlight";

/// Marker child the host activates on a currently-valid target.
pub const TARGET_MARKER: &str = "TargetHighlight";

/// Prompt roots whose presence means the host is waiting on a target.
pub const SUBMIT_PROMPT: &str = "SubmitPrompt";
pub const CANCEL_PROMPT: &str = "CancelPrompt";

#[derive(Debug, Clone)]
pub struct TargetSession {
    pub targets: Vec<CardRef>,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub enum DuelMode {
    Browsing,
    TargetSelection(TargetSession),
}

/// Zone/target/highlight navigation for an active duel. Everything here is
/// inferred by polling visual markers and prompts; the engine has no access
/// to authoritative game state and does not reason about rules.
pub struct DuelNavigator {
    zones: Vec<Zone>,
    zone_index: usize,
    card_index: usize,
    mode: DuelMode,
    gesture: Box<dyn PlayGesture>,

    /// Set after a card play; the next prompt appearance opens a session.
    awaiting_prompt: bool,

    /// Stack size seen last tick, for resolution-by-diffing.
    last_stack_count: usize,
}

impl DuelNavigator {
    pub fn new() -> Self {
        Self::with_gesture(Box::new(TwoStepCenterGesture))
    }

    pub fn with_gesture(gesture: Box<dyn PlayGesture>) -> Self {
        Self {
            zones: Vec::new(),
            zone_index: 0,
            card_index: 0,
            mode: DuelMode::Browsing,
            gesture,
            awaiting_prompt: false,
            last_stack_count: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn current_zone(&self) -> Option<&Zone> {
        self.zones.get(self.zone_index)
    }

    pub fn current_card(&self) -> Option<&CardRef> {
        self.current_zone()?.cards.get(self.card_index)
    }

    pub fn in_target_session(&self) -> bool {
        matches!(self.mode, DuelMode::TargetSelection(_))
    }

    pub fn session(&self) -> Option<&TargetSession> {
        match &self.mode {
            DuelMode::TargetSelection(s) => Some(s),
            DuelMode::Browsing => None,
        }
    }

    // -----------------------------------------------------------------------
    // Zones
    // -----------------------------------------------------------------------

    /// Rebuild every zone from the live layout. Zones whose root is not
    /// currently in the scene are dropped from the cycle.
    pub fn rebuild_zones(&mut self, scene: &dyn SceneGraph) {
        let mut zones = Vec::new();
        for &(kind, owner) in ZONE_ORDER {
            if let Some(root) = scene.find_active(kind.root_name(owner)) {
                zones.push(Zone {
                    kind,
                    owner,
                    cards: collect_cards(scene, root),
                });
            }
        }
        self.zones = zones;
        if self.zone_index >= self.zones.len() {
            self.zone_index = self.zones.len().saturating_sub(1);
        }
        self.clamp_card();
    }

    pub fn next_zone(&mut self, scene: &dyn SceneGraph, announcer: &mut Announcer) {
        self.step_zone(1, scene, announcer);
    }

    pub fn previous_zone(&mut self, scene: &dyn SceneGraph, announcer: &mut Announcer) {
        self.step_zone(-1, scene, announcer);
    }

    fn step_zone(&mut self, delta: isize, scene: &dyn SceneGraph, announcer: &mut Announcer) {
        self.rebuild_zones(scene);
        if self.zones.is_empty() {
            boundary(delta, announcer);
            return;
        }
        let next = self.zone_index as isize + delta;
        if next < 0 || next as usize >= self.zones.len() {
            boundary(delta, announcer);
            return;
        }
        self.zone_index = next as usize;
        self.card_index = 0;
        self.announce_zone(announcer);
    }

    fn announce_zone(&mut self, announcer: &mut Announcer) {
        if let Some(zone) = self.current_zone() {
            let mut text = format!(
                "{}, {}",
                zone.display_name(),
                count_phrase(zone.cards.len(), "card")
            );
            // Battlefields get a type breakdown read off the displayed type
            // lines, so "what can block" and "how much mana" are one key away
            if zone.kind == ZoneKind::Battlefield {
                let creatures = zone.cards.iter().filter(|c| is_creature(&c.type_line)).count();
                let lands = zone.cards.iter().filter(|c| is_land(&c.type_line)).count();
                if creatures > 0 {
                    text.push_str(&format!(", {}", count_phrase(creatures, "creature")));
                }
                if lands > 0 {
                    text.push_str(&format!(", {}", count_phrase(lands, "land")));
                }
            }
            announcer.announce(&text, Priority::Normal);
        }
    }

    // -----------------------------------------------------------------------
    // Cards
    // -----------------------------------------------------------------------

    pub fn next_card(&mut self, announcer: &mut Announcer) {
        self.step_card(1, announcer);
    }

    pub fn previous_card(&mut self, announcer: &mut Announcer) {
        self.step_card(-1, announcer);
    }

    fn step_card(&mut self, delta: isize, announcer: &mut Announcer) {
        let len = self.current_zone().map(|z| z.cards.len()).unwrap_or(0);
        if len == 0 {
            boundary(delta, announcer);
            return;
        }
        let next = self.card_index as isize + delta;
        if next < 0 || next as usize >= len {
            boundary(delta, announcer);
            return;
        }
        self.card_index = next as usize;
        self.announce_card(announcer);
    }

    pub fn announce_card(&mut self, announcer: &mut Announcer) {
        let (index, len, card) = match self.current_zone() {
            Some(zone) if !zone.cards.is_empty() => {
                let i = self.card_index.min(zone.cards.len() - 1);
                (i, zone.cards.len(), zone.cards[i].clone())
            }
            _ => return,
        };
        let text = if card.type_line.is_empty() {
            format!("{} of {}: {}", index + 1, len, card.name)
        } else {
            format!("{} of {}: {}, {}", index + 1, len, card.name, card.type_line)
        };
        announcer.announce(&text, Priority::Normal);
    }

    /// Re-announce the current zone and card on demand.
    pub fn read_current(&mut self, announcer: &mut Announcer) {
        announcer.reset_suppression();
        if self.current_card().is_some() {
            self.announce_card(announcer);
        } else {
            self.announce_zone(announcer);
        }
    }

    // -----------------------------------------------------------------------
    // Highlight cycling — Tab through everything currently playable.
    // -----------------------------------------------------------------------

    /// Jump to the next card carrying an active playable marker, wrapping
    /// past the end. Unavailable during target selection.
    pub fn cycle_highlight(&mut self, scene: &dyn SceneGraph, announcer: &mut Announcer) {
        if self.in_target_session() {
            return;
        }
        self.rebuild_zones(scene);

        // (zone index, card index) pairs of playable cards, in zone order
        let mut playable: Vec<(usize, usize)> = Vec::new();
        for (zi, zone) in self.zones.iter().enumerate() {
            for (ci, card) in zone.cards.iter().enumerate() {
                if scene.marker_active(card.node, PLAYABLE_MARKER) {
                    playable.push((zi, ci));
                }
            }
        }

        if playable.is_empty() {
            announcer.announce_phrase("phrase.nothing_playable", Priority::High);
            return;
        }

        let current = (self.zone_index, self.card_index);
        let next = playable
            .iter()
            .position(|&p| p > current)
            .unwrap_or(0); // wrap to the first playable card
        let (zi, ci) = playable[next];

        let zone_changed = zi != self.zone_index;
        self.zone_index = zi;
        self.card_index = ci;
        if zone_changed {
            // One announcement per action: fold the zone into the card line
            if let Some(zone) = self.zones.get(zi) {
                let name = zone.display_name();
                if let Some(card) = zone.cards.get(ci) {
                    announcer.announce(&format!("{}: {}", name, card.name), Priority::Normal);
                    return;
                }
            }
        }
        self.announce_card(announcer);
    }

    // -----------------------------------------------------------------------
    // Target selection
    // -----------------------------------------------------------------------

    /// Open a session over every node the host is currently highlighting as
    /// a valid target. Marker presence is ground truth; no rules reasoning.
    pub fn begin_target_session(
        &mut self,
        scene: &dyn SceneGraph,
        announcer: &mut Announcer,
    ) -> Result<(), DuelError> {
        if self.in_target_session() {
            return Err(DuelError::SessionAlreadyActive);
        }

        let mut targets = Vec::new();
        for zone in &self.zones {
            for card in &zone.cards {
                if scene.marker_active(card.node, TARGET_MARKER) {
                    targets.push(card.clone());
                }
            }
        }

        if targets.is_empty() {
            announcer.announce_phrase("phrase.no_targets", Priority::High);
            return Ok(());
        }

        let first = targets[0].name.clone();
        let count = targets.len();
        self.mode = DuelMode::TargetSelection(TargetSession { targets, index: 0 });
        let prefix = announcer.phrase("phrase.target_mode");
        announcer.announce(
            &format!("{}. 1 of {}: {}", prefix, count, first),
            Priority::High,
        );
        Ok(())
    }

    /// Cycle the session cursor. Wraps around: inside a session the target
    /// set is small and closed, unlike ordinary lists which clamp.
    pub fn cycle_target(&mut self, announcer: &mut Announcer) {
        let text = match &mut self.mode {
            DuelMode::TargetSelection(session) => {
                session.index = (session.index + 1) % session.targets.len();
                let t = &session.targets[session.index];
                format!(
                    "{} of {}: {}",
                    session.index + 1,
                    session.targets.len(),
                    t.name
                )
            }
            DuelMode::Browsing => return,
        };
        announcer.announce(&text, Priority::Normal);
    }

    /// Click the current target and close the session.
    pub fn choose_target(
        &mut self,
        input: &mut dyn InputChannel,
        announcer: &mut Announcer,
    ) -> Result<(), HostError> {
        let target = match &self.mode {
            DuelMode::TargetSelection(session) => session.targets[session.index].clone(),
            DuelMode::Browsing => return Ok(()),
        };
        input.click_node(target.node)?;
        self.mode = DuelMode::Browsing;
        announcer.announce(&target.name, Priority::Normal);
        Ok(())
    }

    /// Abandon the session. Speaks once; nothing about targets afterwards.
    pub fn cancel_session(&mut self, announcer: &mut Announcer) {
        if self.in_target_session() {
            self.mode = DuelMode::Browsing;
            announcer.announce_phrase("phrase.target_cancelled", Priority::High);
        }
    }

    // -----------------------------------------------------------------------
    // Card play
    // -----------------------------------------------------------------------

    /// Play the current card through the pluggable gesture and start
    /// watching for a target prompt.
    pub fn play_current_card(
        &mut self,
        scene: &dyn SceneGraph,
        input: &mut dyn InputChannel,
    ) -> Result<(), HostError> {
        let card = match self.current_card() {
            Some(c) => c.clone(),
            None => return Ok(()),
        };
        self.gesture.play(input, card.node, scene.viewport())?;
        self.awaiting_prompt = true;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Per-tick polling
    // -----------------------------------------------------------------------

    /// Poll-driven transitions: prompt appearance after a play opens a
    /// target session, prompt disappearance closes it silently, and a
    /// shrinking stack reads as a resolution. No true host events exist for
    /// any of these; count/presence diffing is the deliberate approximation.
    pub fn poll(&mut self, scene: &dyn SceneGraph, announcer: &mut Announcer) {
        let prompt_up =
            scene.find_active(SUBMIT_PROMPT).is_some() || scene.find_active(CANCEL_PROMPT).is_some();

        if self.in_target_session() {
            if !prompt_up {
                // Prompt vanished under us; drop the session silently
                self.mode = DuelMode::Browsing;
            }
        } else if self.awaiting_prompt && prompt_up {
            self.awaiting_prompt = false;
            self.rebuild_zones(scene);
            // Second session start is impossible from Browsing
            let _ = self.begin_target_session(scene, announcer);
        }

        let stack_count = self
            .zones
            .iter()
            .find(|z| z.kind == ZoneKind::Stack)
            .map(|z| z.cards.len())
            .unwrap_or(0);
        if stack_count < self.last_stack_count {
            announcer.announce_phrase("phrase.spell_resolved", Priority::Normal);
        }
        self.last_stack_count = stack_count;
    }

    /// Tear down all duel-scoped state on scene unload.
    pub fn reset(&mut self) {
        self.zones.clear();
        self.zone_index = 0;
        self.card_index = 0;
        self.mode = DuelMode::Browsing;
        self.awaiting_prompt = false;
        self.last_stack_count = 0;
    }

    fn clamp_card(&mut self) {
        let len = self.current_zone().map(|z| z.cards.len()).unwrap_or(0);
        if len == 0 {
            self.card_index = 0;
        } else if self.card_index >= len {
            self.card_index = len - 1;
        }
    }
}

impl Default for DuelNavigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cards under a zone root: card-named descendants, first text line as the
/// card name, second as the displayed type line.
fn collect_cards(scene: &dyn SceneGraph, root: crate::host::scene_model::NodeId) -> Vec<CardRef> {
    let mut cards = Vec::new();
    for node in scene.active_nodes() {
        if !node.name.contains("Card") || !scene.is_descendant_of(node.id, root) {
            continue;
        }
        let text = scene.visible_text(node.id);
        let name = text.first().cloned().unwrap_or_else(|| "unknown card".to_string());
        let type_line = text.get(1).cloned().unwrap_or_default();
        cards.push(CardRef {
            node: node.id,
            name,
            type_line,
        });
    }
    cards
}

fn count_phrase(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

fn boundary(delta: isize, announcer: &mut Announcer) {
    let key = if delta > 0 {
        "phrase.end_of_list"
    } else {
        "phrase.start_of_list"
    };
    announcer.announce_phrase(key, Priority::High);
}
