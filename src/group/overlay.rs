use crate::group::group_model::GroupKind;
use crate::host::graph::SceneGraph;
use crate::host::scene_model::NodeId;

// ============================================================================
// Overlay detection — modal host states that suppress every other group.
// A small fixed priority list of independent presence checks; the host's
// own UI makes these mutually exclusive, so the first true one wins.
// ============================================================================

pub const POPUP_ROOT: &str = "PopupContainer";
pub const SETTINGS_ROOT: &str = "SettingsPanel";
pub const SOCIAL_ROOT: &str = "SocialSidebar";
pub const BLADE_ROOT: &str = "BladeContainer";
pub const TUTORIAL_ROOT: &str = "TutorialOverlay";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Popup,
    Settings,
    Social,
    Blade,
    Tutorial,
}

pub const OVERLAY_PRIORITY: [OverlayKind; 5] = [
    OverlayKind::Popup,
    OverlayKind::Settings,
    OverlayKind::Social,
    OverlayKind::Blade,
    OverlayKind::Tutorial,
];

impl OverlayKind {
    pub fn root_name(self) -> &'static str {
        match self {
            OverlayKind::Popup => POPUP_ROOT,
            OverlayKind::Settings => SETTINGS_ROOT,
            OverlayKind::Social => SOCIAL_ROOT,
            OverlayKind::Blade => BLADE_ROOT,
            OverlayKind::Tutorial => TUTORIAL_ROOT,
        }
    }

    pub fn group_kind(self) -> GroupKind {
        match self {
            OverlayKind::Popup => GroupKind::Popup,
            OverlayKind::Settings => GroupKind::SettingsPanel,
            OverlayKind::Social => GroupKind::SocialPanel,
            OverlayKind::Blade => GroupKind::Blade,
            OverlayKind::Tutorial => GroupKind::Tutorial,
        }
    }
}

/// The overlay currently suppressing normal navigation, if any.
pub fn active_overlay(scene: &dyn SceneGraph) -> Option<(OverlayKind, NodeId)> {
    for kind in OVERLAY_PRIORITY {
        if let Some(root) = scene.find_active(kind.root_name()) {
            return Some((kind, root));
        }
    }
    None
}

/// Whether a node sits inside the active overlay's subtree.
pub fn inside_overlay(scene: &dyn SceneGraph, id: NodeId, root: NodeId) -> bool {
    scene.is_descendant_of(id, root)
}

/// Fold an element's classified group into the active overlay. Elements
/// under an overlay that matched no overlay rule are still claimed by it,
/// so the overlay is always a closed navigable set. Exclusions stay out.
pub fn fold_into_overlay(kind: GroupKind, overlay: OverlayKind) -> GroupKind {
    if kind == GroupKind::Excluded || kind.is_overlay() {
        kind
    } else {
        overlay.group_kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_claims_unmatched_elements_but_not_chrome() {
        assert_eq!(
            fold_into_overlay(GroupKind::Content, OverlayKind::Popup),
            GroupKind::Popup
        );
        assert_eq!(
            fold_into_overlay(GroupKind::PlayActions, OverlayKind::Blade),
            GroupKind::Blade
        );
        assert_eq!(
            fold_into_overlay(GroupKind::Excluded, OverlayKind::Popup),
            GroupKind::Excluded
        );
        assert_eq!(
            fold_into_overlay(GroupKind::Popup, OverlayKind::Popup),
            GroupKind::Popup
        );
    }
}
