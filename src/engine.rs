use crate::duel::navigator::DuelNavigator;
use crate::group::overlay::{active_overlay, OverlayKind};
use crate::host::graph::SceneGraph;
use crate::host::input::InputChannel;
use crate::host::locale::Localization;
use crate::host::scene_model::NodeId;
use crate::host::speech::{AnnouncementSink, Priority};
use crate::nav::cursor::PendingIntent;
use crate::nav::navigator::{BackResult, NavRequest};
use crate::screens::menu::MenuScreen;
use crate::screens::scan::scan_fingerprint;
use crate::speech::announcer::Announcer;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::NavTraceEvent;

/// A discrete user action, delivered at most one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    NextElement,
    PreviousElement,
    Activate,
    Back,
    NextZone,
    PreviousZone,
    CycleHighlight,
    ReadCurrent,
}

/// Ticks to wait for the host to react to a synthetic click before giving
/// up, roughly two seconds at the host's 60 ticks per second.
pub const WAIT_TICKS: u32 = 120;

struct WaitState {
    remaining: u32,
    /// Fingerprint of the scene when the wait started. Any change counts
    /// as the host having reacted.
    fingerprint: String,
    /// True when waiting on a synthetic click; timeout then speaks
    /// "No effect" instead of re-arming silently.
    from_input: bool,
}

/// Single-threaded tick loop: routes commands to the menu or duel
/// navigator, performs clicks the navigators request, and owns the wait
/// state that bridges a click and the host's eventual reaction.
pub struct Engine {
    scene: Box<dyn SceneGraph>,
    input: Box<dyn InputChannel>,
    announcer: Announcer,
    menu: MenuScreen,
    duel: Option<DuelNavigator>,
    wait: Option<WaitState>,
    /// Overlay seen last tick. Tracked by kind, not bare presence: one
    /// overlay can be swapped for another with no presence gap in between,
    /// and that swap invalidates the element set just as hard as a close.
    overlay_seen: Option<OverlayKind>,
    tracer: TraceLogger,
    tick: u64,
}

impl Engine {
    pub fn new(
        scene: Box<dyn SceneGraph>,
        input: Box<dyn InputChannel>,
        sink: Box<dyn AnnouncementSink>,
        locale: Box<dyn Localization>,
        tracer: TraceLogger,
    ) -> Self {
        Self {
            scene,
            input,
            announcer: Announcer::new(sink, locale),
            menu: MenuScreen::new("unloaded"),
            duel: None,
            wait: None,
            overlay_seen: None,
            tracer,
            tick: 0,
        }
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn menu(&self) -> &MenuScreen {
        &self.menu
    }

    pub fn duel(&self) -> Option<&DuelNavigator> {
        self.duel.as_ref()
    }

    // -----------------------------------------------------------------------
    // Scene lifecycle — the only pushed events; everything else is polled.
    // -----------------------------------------------------------------------

    pub fn on_scene_loaded(&mut self, name: &str) {
        self.menu = MenuScreen::new(name);
        self.wait = None;
        self.overlay_seen = active_overlay(self.scene.as_ref()).map(|(kind, _)| kind);
        self.announcer.reset_suppression();
        if name.contains("Duel") {
            let mut duel = DuelNavigator::new();
            duel.rebuild_zones(self.scene.as_ref());
            self.duel = Some(duel);
        } else {
            self.duel = None;
            self.menu.rescan(self.scene.as_ref(), &mut self.announcer);
        }
    }

    pub fn on_scene_unloaded(&mut self) {
        self.menu.reset();
        if let Some(duel) = &mut self.duel {
            duel.reset();
        }
        self.duel = None;
        self.wait = None;
        self.announcer.reset_suppression();
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance one tick, optionally carrying a user command. Never blocks,
    /// never panics; every failure degrades to an announcement or a trace
    /// entry.
    pub fn tick(&mut self, command: Option<NavCommand>) {
        self.tick += 1;
        let spoken_before = self.announcer.last_spoken().map(str::to_string);

        let suppressed = if self.wait.is_some() {
            self.service_wait();
            command.is_some()
        } else {
            self.poll_overlay();
            if let Some(duel) = &mut self.duel {
                duel.poll(self.scene.as_ref(), &mut self.announcer);
            }
            if let Some(cmd) = command {
                self.dispatch(cmd);
            }
            false
        };

        self.trace_tick(command, suppressed, spoken_before);
    }

    fn service_wait(&mut self) {
        let settled = match &self.wait {
            Some(wait) => scan_fingerprint(self.scene.as_ref()) != wait.fingerprint,
            None => return,
        };

        if settled {
            self.wait = None;
            self.rescan();
            return;
        }

        let timed_out = {
            let wait = match &mut self.wait {
                Some(w) => w,
                None => return,
            };
            wait.remaining = wait.remaining.saturating_sub(1);
            wait.remaining == 0
        };

        if timed_out {
            let from_input = self.wait.take().map(|w| w.from_input).unwrap_or(false);
            // One last rescan in case the change slipped between polls
            self.rescan();
            if from_input {
                self.announcer
                    .announce_phrase("phrase.no_effect", Priority::High);
            }
        }
    }

    /// Overlays can open without any user action (tutorials, server
    /// prompts), so their appearance is polled, not event-driven. Any
    /// change of the active overlay, including a same-tick swap of one
    /// overlay for another, rebuilds whichever navigator owns the tick.
    fn poll_overlay(&mut self) {
        let now = active_overlay(self.scene.as_ref()).map(|(kind, _)| kind);
        if now == self.overlay_seen {
            return;
        }
        self.overlay_seen = now;
        match &mut self.duel {
            Some(duel) if now.is_none() => {
                // Overlay gone mid-duel; hand navigation back to the zones
                self.menu.reset();
                duel.rebuild_zones(self.scene.as_ref());
            }
            _ => {
                if now.is_some() {
                    // A freshly opened overlay starts on its tab strip; the
                    // intent falls back harmlessly for tabless overlays
                    self.menu.nav.set_intent(PendingIntent::EnterOverlayTabs);
                }
                self.menu.rescan(self.scene.as_ref(), &mut self.announcer);
            }
        }
    }

    fn rescan(&mut self) {
        match &mut self.duel {
            Some(duel) => {
                duel.rebuild_zones(self.scene.as_ref());
            }
            None => self.menu.rescan(self.scene.as_ref(), &mut self.announcer),
        }
    }

    // -----------------------------------------------------------------------
    // Command routing
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, cmd: NavCommand) {
        // A duel scene with an overlay up (settings, a dialog) navigates
        // like a menu until the overlay is gone.
        let duel_active =
            self.duel.is_some() && active_overlay(self.scene.as_ref()).is_none();

        if duel_active {
            self.dispatch_duel(cmd);
        } else {
            self.dispatch_menu(cmd);
        }
    }

    fn dispatch_menu(&mut self, cmd: NavCommand) {
        match cmd {
            NavCommand::NextElement => self.menu.nav.move_next(&mut self.announcer),
            NavCommand::PreviousElement => self.menu.nav.move_previous(&mut self.announcer),
            NavCommand::Activate => {
                if let Some(request) = self.menu.nav.enter(&mut self.announcer) {
                    self.perform(request);
                }
            }
            NavCommand::Back => self.back_chain(),
            NavCommand::ReadCurrent => {
                self.announcer.reset_suppression();
                self.menu.nav.announce_position(&mut self.announcer);
            }
            // Zone and highlight keys only mean something in a duel
            NavCommand::NextZone | NavCommand::PreviousZone | NavCommand::CycleHighlight => {}
        }
    }

    fn dispatch_duel(&mut self, cmd: NavCommand) {
        let duel = match &mut self.duel {
            Some(d) => d,
            None => return,
        };

        if duel.in_target_session() {
            match cmd {
                NavCommand::NextElement | NavCommand::PreviousElement => {
                    duel.cycle_target(&mut self.announcer);
                }
                NavCommand::Activate => {
                    if let Err(e) = duel.choose_target(self.input.as_mut(), &mut self.announcer) {
                        self.host_error(e);
                    }
                }
                NavCommand::Back => duel.cancel_session(&mut self.announcer),
                NavCommand::ReadCurrent => duel.read_current(&mut self.announcer),
                NavCommand::NextZone | NavCommand::PreviousZone | NavCommand::CycleHighlight => {}
            }
            return;
        }

        match cmd {
            NavCommand::NextElement => duel.next_card(&mut self.announcer),
            NavCommand::PreviousElement => duel.previous_card(&mut self.announcer),
            NavCommand::NextZone => duel.next_zone(self.scene.as_ref(), &mut self.announcer),
            NavCommand::PreviousZone => {
                duel.previous_zone(self.scene.as_ref(), &mut self.announcer)
            }
            NavCommand::CycleHighlight => {
                duel.cycle_highlight(self.scene.as_ref(), &mut self.announcer)
            }
            NavCommand::Activate => {
                if let Err(e) = duel.play_current_card(self.scene.as_ref(), self.input.as_mut()) {
                    self.host_error(e);
                }
            }
            NavCommand::Back => self.back_chain(),
            NavCommand::ReadCurrent => duel.read_current(&mut self.announcer),
        }
    }

    /// The universal back chain: subgroup, then group level, then the
    /// active overlay's close control, then a spoken acknowledgement that
    /// there is nothing left to exit. Back is never a silent no-op.
    fn back_chain(&mut self) {
        if self.duel.is_none() || active_overlay(self.scene.as_ref()).is_some() {
            if self.menu.nav.back(&mut self.announcer) == BackResult::Handled {
                return;
            }
        }

        if let Some((_, root)) = active_overlay(self.scene.as_ref()) {
            if let Some(close) = self.find_close_button(root) {
                self.click_and_wait(close);
                return;
            }
        }

        self.announcer.announce_phrase("phrase.back", Priority::Normal);
    }

    fn find_close_button(&self, overlay_root: NodeId) -> Option<NodeId> {
        self.scene
            .active_nodes()
            .into_iter()
            .find(|n| n.name.contains("Close") && self.scene.is_descendant_of(n.id, overlay_root))
            .map(|n| n.id)
    }

    // -----------------------------------------------------------------------
    // Click execution
    // -----------------------------------------------------------------------

    fn perform(&mut self, request: NavRequest) {
        match request {
            NavRequest::Click(node) => self.click_and_wait(node),
        }
    }

    /// Click and arm the wait state. The intent the navigator recorded
    /// before requesting the click is consumed by the rescan on settle.
    fn click_and_wait(&mut self, node: NodeId) {
        let fingerprint = scan_fingerprint(self.scene.as_ref());
        match self.input.click_node(node) {
            Ok(()) => {
                self.wait = Some(WaitState {
                    remaining: WAIT_TICKS,
                    fingerprint,
                    from_input: true,
                });
            }
            Err(e) => self.host_error(e),
        }
    }

    fn host_error(&mut self, e: impl std::fmt::Display) {
        // The user hears a result either way; the detail goes to the trace.
        self.tracer.log(
            &NavTraceEvent::now(self.tick, self.mode_name()).with_suppression(e.to_string()),
        );
        self.announcer
            .announce_phrase("phrase.no_effect", Priority::High);
    }

    // -----------------------------------------------------------------------
    // Tracing
    // -----------------------------------------------------------------------

    fn mode_name(&self) -> &'static str {
        if self.duel.is_some() {
            "duel"
        } else {
            "menu"
        }
    }

    fn trace_tick(
        &mut self,
        command: Option<NavCommand>,
        suppressed: bool,
        spoken_before: Option<String>,
    ) {
        let spoken_now = self.announcer.last_spoken().map(str::to_string);
        let announced = if spoken_now != spoken_before {
            spoken_now
        } else {
            None
        };

        if command.is_none() && announced.is_none() {
            return; // nothing observable this tick
        }

        let mut event =
            NavTraceEvent::now(self.tick, self.mode_name()).with_cursor(self.menu.nav.cursor());
        if let Some(cmd) = command {
            event = event.with_command(format!("{:?}", cmd));
        }
        if let Some(text) = announced {
            event = event.with_announcement(text);
        }
        if suppressed {
            event = event.with_suppression("waiting for host to settle");
        }
        self.tracer.log(&event);
    }
}
