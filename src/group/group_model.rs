use crate::host::scene_model::NodeId;
use crate::label::extract::SemanticType;

/// Semantic bucket an element is navigated under. Classification assigns
/// exactly one of these per element per scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Known chrome, never navigable.
    Excluded,

    // Overlay groups: while one is active, it is the whole navigable set.
    Popup,
    SettingsPanel,
    SocialPanel,
    Blade,
    Tutorial,

    // Domain groups
    PlayActions,
    Progression,
    Objectives,
    SocialActions,

    PrimaryActions,
    Filters,
    SettingsControls,

    /// Default bucket for everything interactive that matched no rule.
    Content,
}

impl GroupKind {
    pub fn is_overlay(self) -> bool {
        matches!(
            self,
            GroupKind::Popup
                | GroupKind::SettingsPanel
                | GroupKind::SocialPanel
                | GroupKind::Blade
                | GroupKind::Tutorial
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GroupKind::Excluded => "Excluded",
            GroupKind::Popup => "Dialog",
            GroupKind::SettingsPanel => "Settings",
            GroupKind::SocialPanel => "Social",
            GroupKind::Blade => "Panel",
            GroupKind::Tutorial => "Tutorial",
            GroupKind::PlayActions => "Play",
            GroupKind::Progression => "Progress",
            GroupKind::Objectives => "Objectives",
            GroupKind::SocialActions => "Friends",
            GroupKind::PrimaryActions => "Actions",
            GroupKind::Filters => "Filters",
            GroupKind::SettingsControls => "Options",
            GroupKind::Content => "Content",
        }
    }

    /// Fixed position in the emitted group list. Stable across scans so the
    /// group a user remembers as "second" stays second.
    pub fn display_order(self) -> usize {
        match self {
            GroupKind::Popup => 0,
            GroupKind::SettingsPanel => 1,
            GroupKind::SocialPanel => 2,
            GroupKind::Blade => 3,
            GroupKind::Tutorial => 4,
            GroupKind::PlayActions => 5,
            GroupKind::PrimaryActions => 6,
            GroupKind::Progression => 7,
            GroupKind::Objectives => 8,
            GroupKind::SocialActions => 9,
            GroupKind::Filters => 10,
            GroupKind::Content => 11,
            GroupKind::SettingsControls => 12,
            GroupKind::Excluded => usize::MAX,
        }
    }
}

/// Nested informational cluster reachable by drilling in from a single
/// entry inside a parent group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubgroupKind {
    DeckStats,
    CardDetails,
}

impl SubgroupKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SubgroupKind::DeckStats => "Deck statistics",
            SubgroupKind::CardDetails => "Card details",
        }
    }

    pub fn from_cluster_name(name: &str) -> Option<Self> {
        match name {
            "DeckStats" => Some(SubgroupKind::DeckStats),
            "CardDetails" => Some(SubgroupKind::CardDetails),
            _ => None,
        }
    }
}

/// Transient handle to one interactive host element. Recreated every scan;
/// the navigator never holds one across a host mutation.
#[derive(Debug, Clone)]
pub struct InteractiveElement {
    pub node: NodeId,
    pub label: String,
    pub semantic: SemanticType,
    pub group: GroupKind,

    /// Folder this element belongs to, from ancestor structure.
    pub folder: Option<String>,

    /// True for the folder's header row, whose activation expands/collapses
    /// the folder host-side.
    pub is_folder_header: bool,

    /// Set when the element belongs to a drill-in cluster.
    pub subgroup: Option<SubgroupKind>,

    /// Set for elements sitting in an overlay's tab strip.
    pub tab_strip: bool,
}

impl InteractiveElement {
    pub fn new(node: NodeId, label: &str, semantic: SemanticType, group: GroupKind) -> Self {
        Self {
            node,
            label: label.to_string(),
            semantic,
            group,
            folder: None,
            is_folder_header: false,
            subgroup: None,
            tab_strip: false,
        }
    }
}

/// One named bucket in the rebuilt navigation tree. Produced fresh each scan.
#[derive(Debug, Clone)]
pub struct ElementGroupInfo {
    pub kind: GroupKind,
    pub display_name: String,
    pub elements: Vec<InteractiveElement>,

    pub is_folder: bool,
    /// Node whose activation expands the folder host-side.
    pub toggle: Option<NodeId>,

    /// Single-element group collapsed to a directly-activatable entry.
    pub is_standalone: bool,

    /// Overlay tab row, navigated separately from the overlay's content.
    pub is_tab_strip: bool,
}

impl ElementGroupInfo {
    pub fn plain(kind: GroupKind, elements: Vec<InteractiveElement>) -> Self {
        let is_standalone = elements.len() == 1;
        Self {
            kind,
            display_name: kind.display_name().to_string(),
            elements,
            is_folder: false,
            toggle: None,
            is_standalone,
            is_tab_strip: false,
        }
    }
}
