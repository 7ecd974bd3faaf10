use crate::group::group_model::GroupKind;
use crate::group::overlay::{BLADE_ROOT, POPUP_ROOT, SETTINGS_ROOT, SOCIAL_ROOT, TUTORIAL_ROOT};
use crate::host::scene_model::AncestorToken;

// ============================================================================
// Element group classification — a pure function of node name + ancestor
// chain, evaluated against a fixed-precedence rule list. First match wins;
// ties break by position in this list, never by scan discovery order. New
// rules are appended to their precedence band without reordering the rest.
// ============================================================================

struct Rule {
    kind: GroupKind,
    applies: fn(&str, &[AncestorToken]) -> bool,
}

static RULES: &[Rule] = &[
    // (1) Explicit exclusions
    Rule { kind: GroupKind::Excluded, applies: is_chrome },
    // (2) Overlay groups
    Rule { kind: GroupKind::Popup, applies: |_, a| under(a, POPUP_ROOT) },
    Rule { kind: GroupKind::SettingsPanel, applies: |_, a| under(a, SETTINGS_ROOT) },
    Rule { kind: GroupKind::SocialPanel, applies: |_, a| under(a, SOCIAL_ROOT) },
    Rule { kind: GroupKind::Blade, applies: |_, a| under(a, BLADE_ROOT) },
    Rule { kind: GroupKind::Tutorial, applies: |_, a| under(a, TUTORIAL_ROOT) },
    // (3) Domain groups
    Rule { kind: GroupKind::PlayActions, applies: is_play_action },
    Rule { kind: GroupKind::Progression, applies: is_progression },
    Rule { kind: GroupKind::Objectives, applies: is_objective },
    Rule { kind: GroupKind::SocialActions, applies: is_social_action },
    // (4) Primary actions
    Rule { kind: GroupKind::PrimaryActions, applies: is_primary_action },
    // (5) Filters
    Rule { kind: GroupKind::Filters, applies: is_filter },
    // (6) Settings controls
    Rule { kind: GroupKind::SettingsControls, applies: is_settings_control },
    // (7) Default content bucket is the fall-through in determine_group()
];

/// Assign a node to exactly one semantic group.
pub fn determine_group(name: &str, ancestors: &[AncestorToken]) -> GroupKind {
    for rule in RULES {
        if (rule.applies)(name, ancestors) {
            return rule.kind;
        }
    }
    GroupKind::Content
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn under(ancestors: &[AncestorToken], ancestor_name: &str) -> bool {
    ancestors.iter().any(|t| t.name == ancestor_name)
}

fn name_has(name: &str, needle: &str) -> bool {
    name.contains(needle)
}

fn is_chrome(name: &str, ancestors: &[AncestorToken]) -> bool {
    const CHROME: &[&str] = &[
        "Backdrop",
        "Scrollbar",
        "TooltipAnchor",
        "SafeAreaFrame",
        "LoadingSpinner",
    ];
    CHROME.iter().any(|c| name_has(name, c)) || under(ancestors, "SystemChrome")
}

fn is_play_action(name: &str, ancestors: &[AncestorToken]) -> bool {
    under(ancestors, "PlayBar")
        || name_has(name, "Play")
        || name_has(name, "Resume")
        || name_has(name, "Rematch")
}

fn is_progression(name: &str, ancestors: &[AncestorToken]) -> bool {
    under(ancestors, "ProgressTrack")
        || under(ancestors, "MasteryPath")
        || name_has(name, "Rank")
        || name_has(name, "Level")
}

fn is_objective(name: &str, ancestors: &[AncestorToken]) -> bool {
    under(ancestors, "QuestPanel") || under(ancestors, "DailyWins") || name_has(name, "Quest")
}

fn is_social_action(name: &str, ancestors: &[AncestorToken]) -> bool {
    under(ancestors, "FriendRow") || name_has(name, "Friend") || name_has(name, "Challenge")
}

fn is_primary_action(name: &str, ancestors: &[AncestorToken]) -> bool {
    under(ancestors, "PrimaryButtonBar")
        || name_has(name, "Submit")
        || name_has(name, "Continue")
        || name_has(name, "Confirm")
        || name_has(name, "Done")
}

fn is_filter(name: &str, ancestors: &[AncestorToken]) -> bool {
    under(ancestors, "FilterBar")
        || name_has(name, "Filter")
        || name_has(name, "Sort")
        || name_has(name, "Search")
}

fn is_settings_control(name: &str, ancestors: &[AncestorToken]) -> bool {
    under(ancestors, "OptionsList")
        || name_has(name, "Toggle")
        || name_has(name, "Slider")
        || name_has(name, "Dropdown")
}
