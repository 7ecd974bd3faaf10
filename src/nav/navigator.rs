use std::collections::HashMap;

use crate::group::group_model::{ElementGroupInfo, GroupKind, InteractiveElement, SubgroupKind};
use crate::host::scene_model::NodeId;
use crate::host::speech::Priority;
use crate::nav::cursor::{Cursor, NavLevel, PendingIntent};
use crate::speech::announcer::Announcer;

/// Host interaction the navigator wants performed on its behalf. The
/// navigator never touches the input channel itself; the engine executes
/// the click and schedules the rescan.
#[derive(Debug, Clone, PartialEq)]
pub enum NavRequest {
    Click(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackResult {
    /// The navigator resolved the back press to a local transition.
    Handled,
    /// Nothing left to exit at this level; the caller owns the next step.
    Bubble,
}

#[derive(Debug, Clone)]
struct SubgroupState {
    kind: SubgroupKind,
    parent_group: usize,
    elements: Vec<InteractiveElement>,
    index: usize,
}

/// Two-level cursor over a group/element tree rebuilt from every scan.
///
/// Every rebuild fully replaces the group set; the host tree offers no
/// identity stable enough to diff against. Logical position survives
/// rebuilds through the single PendingIntent slot, consumed exactly once.
pub struct GroupedNavigator {
    groups: Vec<ElementGroupInfo>,
    cursor: Cursor,
    subgroup: Option<SubgroupState>,
    subgroup_tables: HashMap<SubgroupKind, Vec<InteractiveElement>>,
    pending: Option<PendingIntent>,
}

impl GroupedNavigator {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            cursor: Cursor::top(),
            subgroup: None,
            subgroup_tables: HashMap::new(),
            pending: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn groups(&self) -> &[ElementGroupInfo] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn in_subgroup(&self) -> bool {
        self.subgroup.is_some()
    }

    pub fn pending(&self) -> Option<&PendingIntent> {
        self.pending.as_ref()
    }

    pub fn current_group(&self) -> Option<&ElementGroupInfo> {
        self.groups.get(self.cursor.group)
    }

    pub fn current_element(&self) -> Option<&InteractiveElement> {
        if let Some(sub) = &self.subgroup {
            return sub.elements.get(sub.index);
        }
        if self.cursor.level != NavLevel::InsideGroup {
            return None;
        }
        self.current_group()?.elements.get(self.cursor.element)
    }

    // -----------------------------------------------------------------------
    // Pending intent
    // -----------------------------------------------------------------------

    /// Record the intent applied by the next rebuild. A RestoreGroup already
    /// in the slot is never displaced by a narrower auto-entry request.
    pub fn set_intent(&mut self, intent: PendingIntent) {
        if let Some(existing) = &self.pending {
            if existing.outranks(&intent) {
                return;
            }
        }
        self.pending = Some(intent);
    }

    pub fn clear_intent(&mut self) {
        self.pending = None;
    }

    // -----------------------------------------------------------------------
    // Rebuild
    // -----------------------------------------------------------------------

    /// Reorganize a fresh scan into the group tree and restore the cursor.
    ///
    /// Order of operations matters: folder membership is structural and is
    /// peeled off ahead of the generic kind bucketing, subgroup clusters are
    /// extracted into side tables with one drill-in entry left in place,
    /// then groups are emitted in their fixed display order.
    pub fn rebuild(&mut self, elements: Vec<InteractiveElement>, announcer: &mut Announcer) {
        self.subgroup = None;
        self.subgroup_tables.clear();

        // Folder groups, keyed by folder name in first-seen order
        let mut folders: Vec<(String, ElementGroupInfo)> = Vec::new();
        let mut plain: Vec<InteractiveElement> = Vec::new();

        for el in elements {
            if el.group == GroupKind::Excluded {
                continue;
            }
            match el.folder.clone() {
                Some(folder) => {
                    let pos = match folders.iter().position(|(n, _)| *n == folder) {
                        Some(p) => p,
                        None => {
                            folders.push((
                                folder.clone(),
                                ElementGroupInfo {
                                    kind: el.group,
                                    display_name: folder.clone(),
                                    elements: Vec::new(),
                                    is_folder: true,
                                    toggle: None,
                                    is_standalone: false,
                                    is_tab_strip: false,
                                },
                            ));
                            folders.len() - 1
                        }
                    };
                    let info = &mut folders[pos].1;
                    if el.is_folder_header {
                        info.toggle = Some(el.node);
                    } else {
                        info.elements.push(el);
                    }
                }
                None => plain.push(el),
            }
        }

        // Subgroup extraction: cluster members move to a side table, the
        // first one leaves a drill-in entry (still carrying the marker) in
        // its place.
        let mut stream: Vec<InteractiveElement> = Vec::new();
        for el in plain {
            match el.subgroup {
                Some(kind) => {
                    let table = self.subgroup_tables.entry(kind).or_default();
                    if table.is_empty() {
                        let mut entry = el.clone();
                        entry.label = kind.display_name().to_string();
                        stream.push(entry);
                    }
                    table.push(el);
                }
                None => stream.push(el),
            }
        }

        // Bucket by (kind, tab strip), preserving in-bucket scan order
        let mut buckets: Vec<((GroupKind, bool), Vec<InteractiveElement>)> = Vec::new();
        for el in stream {
            let key = (el.group, el.tab_strip);
            match buckets.iter_mut().find(|(k, _)| *k == key) {
                Some((_, v)) => v.push(el),
                None => buckets.push((key, vec![el])),
            }
        }
        buckets.sort_by_key(|((kind, tab), _)| (kind.display_order(), if *tab { 0 } else { 1 }));

        let mut groups: Vec<ElementGroupInfo> = buckets
            .into_iter()
            .map(|((kind, tab), els)| {
                let mut info = ElementGroupInfo::plain(kind, els);
                if tab {
                    info.is_tab_strip = true;
                    info.display_name = format!("{} tabs", kind.display_name());
                    info.is_standalone = false;
                }
                info
            })
            .collect();

        groups.extend(folders.into_iter().map(|(_, info)| info));

        self.groups = groups;
        self.place_cursor(announcer);
    }

    fn place_cursor(&mut self, announcer: &mut Announcer) {
        let intent = self.pending.take();

        if self.groups.is_empty() {
            self.cursor = Cursor::top();
            return;
        }

        let target = intent.as_ref().and_then(|i| self.resolve_intent(i));
        match target {
            Some(group) if !self.groups[group].elements.is_empty() => {
                self.cursor = Cursor::inside(group);
            }
            Some(group) => {
                // Intended group exists but is empty (e.g. still-collapsed
                // folder); stop on it at the group level.
                self.cursor = Cursor {
                    group,
                    element: 0,
                    level: NavLevel::GroupList,
                };
            }
            None => self.default_position(),
        }

        self.announce_position(announcer);
    }

    fn resolve_intent(&self, intent: &PendingIntent) -> Option<usize> {
        match intent {
            PendingIntent::RestoreGroup(name) => {
                self.groups.iter().position(|g| g.display_name == *name)
            }
            PendingIntent::EnterFolder(name) => self
                .groups
                .iter()
                .position(|g| g.is_folder && g.display_name == *name),
            PendingIntent::EnterOverlayTabs => self
                .groups
                .iter()
                .position(|g| g.kind.is_overlay() && g.is_tab_strip),
            PendingIntent::EnterOverlayContent => self
                .groups
                .iter()
                .position(|g| g.kind.is_overlay() && !g.is_tab_strip),
            PendingIntent::EnterFirstFolder => self.groups.iter().position(|g| g.is_folder),
            PendingIntent::EnterFolderAt(n) => self
                .groups
                .iter()
                .enumerate()
                .filter(|(_, g)| g.is_folder)
                .nth(*n)
                .map(|(i, _)| i),
        }
    }

    fn default_position(&mut self) {
        let sole_group = self.groups.len() == 1 && !self.groups[0].elements.is_empty();
        if sole_group || self.groups[0].is_standalone {
            self.cursor = Cursor::inside(0);
        } else {
            self.cursor = Cursor::top();
        }
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    pub fn move_next(&mut self, announcer: &mut Announcer) {
        self.step(1, announcer);
    }

    pub fn move_previous(&mut self, announcer: &mut Announcer) {
        self.step(-1, announcer);
    }

    fn step(&mut self, delta: isize, announcer: &mut Announcer) {
        if let Some(sub) = &mut self.subgroup {
            let next = sub.index as isize + delta;
            if next < 0 || next as usize >= sub.elements.len() {
                boundary(delta, announcer);
            } else {
                sub.index = next as usize;
                self.announce_position(announcer);
            }
            return;
        }

        if self.groups.is_empty() {
            boundary(delta, announcer);
            return;
        }

        // A standalone group's only element doubles as the group itself, so
        // moving off it is a group-level move.
        let group_move = self.cursor.level == NavLevel::GroupList
            || self
                .current_group()
                .map(|g| g.is_standalone)
                .unwrap_or(false);

        if group_move {
            let next = self.cursor.group as isize + delta;
            if next < 0 || next as usize >= self.groups.len() {
                boundary(delta, announcer);
                return;
            }
            let next = next as usize;
            let standalone = self.groups[next].is_standalone;
            self.cursor = if standalone {
                Cursor::inside(next)
            } else {
                Cursor {
                    group: next,
                    element: 0,
                    level: NavLevel::GroupList,
                }
            };
            self.announce_position(announcer);
        } else {
            let len = self.current_group().map(|g| g.elements.len()).unwrap_or(0);
            let next = self.cursor.element as isize + delta;
            if next < 0 || next as usize >= len {
                boundary(delta, announcer);
                return;
            }
            self.cursor.element = next as usize;
            self.announce_position(announcer);
        }
    }

    // -----------------------------------------------------------------------
    // Enter / back
    // -----------------------------------------------------------------------

    /// Act on the current cursor position. May transition locally (entering
    /// a group or subgroup) or hand back a click for the engine to perform.
    pub fn enter(&mut self, announcer: &mut Announcer) -> Option<NavRequest> {
        if self.groups.is_empty() {
            return None;
        }
        self.clamp();

        if let Some(sub) = &self.subgroup {
            let el = sub.elements.get(sub.index)?;
            let node = el.node;
            let parent_name = self.groups.get(sub.parent_group)?.display_name.clone();
            self.set_intent(PendingIntent::RestoreGroup(parent_name));
            return Some(NavRequest::Click(node));
        }

        match self.cursor.level {
            NavLevel::GroupList => {
                let group = &self.groups[self.cursor.group];
                if group.is_folder && group.elements.is_empty() {
                    if let Some(toggle) = group.toggle {
                        // Host-side expand; the rescan lands us back inside.
                        // An already-expanded folder is entered directly, so
                        // the toggle (and its host-side selection state) is
                        // never re-fired.
                        self.set_intent(PendingIntent::EnterFolder(group.display_name.clone()));
                        return Some(NavRequest::Click(toggle));
                    }
                }
                if group.elements.is_empty() {
                    self.announce_position(announcer);
                    return None;
                }
                self.cursor = Cursor::inside(self.cursor.group);
                self.announce_position(announcer);
                None
            }
            NavLevel::InsideGroup => {
                let el = self.current_element()?.clone();
                if let Some(kind) = el.subgroup {
                    if let Some(table) = self.subgroup_tables.get(&kind) {
                        if !table.is_empty() {
                            self.subgroup = Some(SubgroupState {
                                kind,
                                parent_group: self.cursor.group,
                                elements: table.clone(),
                                index: 0,
                            });
                            self.announce_position(announcer);
                            return None;
                        }
                    }
                }
                let group = self.current_group()?;
                let intent = if group.is_folder {
                    // Folder names come from the host and can collide with
                    // the fixed group names, so folders restore by their
                    // ordinal among the folder groups instead.
                    match self.folder_ordinal(self.cursor.group) {
                        0 => PendingIntent::EnterFirstFolder,
                        n => PendingIntent::EnterFolderAt(n),
                    }
                } else if group.is_tab_strip && group.kind.is_overlay() {
                    // Switching tabs rebuilds the overlay's content; resume
                    // inside the content group, not back on the strip
                    PendingIntent::EnterOverlayContent
                } else {
                    PendingIntent::RestoreGroup(group.display_name.clone())
                };
                self.set_intent(intent);
                Some(NavRequest::Click(el.node))
            }
        }
    }

    fn folder_ordinal(&self, group: usize) -> usize {
        self.groups[..group].iter().filter(|g| g.is_folder).count()
    }

    /// One step of the universal back chain. Folder groups are deliberately
    /// left expanded on exit: collapsing the host toggle would also destroy
    /// host-side selection state.
    pub fn back(&mut self, announcer: &mut Announcer) -> BackResult {
        if let Some(sub) = self.subgroup.take() {
            let group = sub.parent_group.min(self.groups.len().saturating_sub(1));
            // The parent group may have been rebuilt since entry; the way
            // back is the element still carrying the subgroup marker, not
            // a remembered index.
            let element = self
                .groups
                .get(group)
                .and_then(|g| g.elements.iter().position(|e| e.subgroup == Some(sub.kind)))
                .unwrap_or(0);
            self.cursor = Cursor {
                group,
                element,
                level: NavLevel::InsideGroup,
            };
            self.announce_position(announcer);
            return BackResult::Handled;
        }

        if self.cursor.level == NavLevel::InsideGroup && !self.groups.is_empty() {
            self.cursor.level = NavLevel::GroupList;
            self.cursor.element = 0;
            self.announce_position(announcer);
            return BackResult::Handled;
        }

        BackResult::Bubble
    }

    // -----------------------------------------------------------------------
    // Announcements
    // -----------------------------------------------------------------------

    pub fn announce_position(&mut self, announcer: &mut Announcer) {
        self.clamp();

        if let Some(sub) = &self.subgroup {
            if let Some(el) = sub.elements.get(sub.index) {
                announcer.announce(
                    &format!("{} of {}: {}", sub.index + 1, sub.elements.len(), el.label),
                    Priority::Normal,
                );
            }
            return;
        }

        let group = match self.groups.get(self.cursor.group) {
            Some(g) => g,
            None => return,
        };

        match self.cursor.level {
            NavLevel::InsideGroup => {
                if let Some(el) = group.elements.get(self.cursor.element) {
                    announcer.announce(
                        &format!(
                            "{} of {}: {}",
                            self.cursor.element + 1,
                            group.elements.len(),
                            el.label
                        ),
                        Priority::Normal,
                    );
                }
            }
            NavLevel::GroupList => {
                let name = if group.is_folder {
                    format!("{} folder", group.display_name)
                } else {
                    group.display_name.clone()
                };
                announcer.announce(
                    &format!(
                        "{} of {}: {}, {} items",
                        self.cursor.group + 1,
                        self.groups.len(),
                        name,
                        group.elements.len()
                    ),
                    Priority::Normal,
                );
            }
        }
    }

    /// Defensive clamp. Rebuilds can shrink groups under the cursor; an
    /// out-of-range index must degrade, never panic, inside a tick callback.
    fn clamp(&mut self) {
        if self.groups.is_empty() {
            self.cursor = Cursor::top();
            return;
        }
        if self.cursor.group >= self.groups.len() {
            self.cursor.group = self.groups.len() - 1;
            self.cursor.element = 0;
        }
        let len = self.groups[self.cursor.group].elements.len();
        if self.cursor.level == NavLevel::InsideGroup {
            if len == 0 {
                self.cursor.level = NavLevel::GroupList;
                self.cursor.element = 0;
            } else if self.cursor.element >= len {
                self.cursor.element = len - 1;
            }
        }
    }
}

impl Default for GroupedNavigator {
    fn default() -> Self {
        Self::new()
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
