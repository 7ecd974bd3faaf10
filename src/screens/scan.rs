use sha1::{Digest, Sha1};

use crate::group::classifier::determine_group;
use crate::group::group_model::{GroupKind, InteractiveElement, SubgroupKind};
use crate::group::overlay::{active_overlay, fold_into_overlay, inside_overlay};
use crate::host::graph::SceneGraph;
use crate::label::extract::extract_label;
use crate::screens::element_index::ElementIndex;

/// One full read-only pass over the live tree: find interactive nodes,
/// label and classify them, apply overlay suppression and structural roles.
pub fn scan_elements(scene: &dyn SceneGraph, index: &mut ElementIndex) -> Vec<InteractiveElement> {
    let overlay = active_overlay(scene);
    let mut out = Vec::new();

    for node in scene.active_nodes() {
        if !index.is_interactive(&node) {
            continue;
        }

        let mut kind = determine_group(&node.name, &node.ancestors);
        if kind == GroupKind::Excluded {
            continue;
        }

        if let Some((overlay_kind, root)) = overlay {
            // An active overlay owns navigation outright: elements outside
            // its subtree disappear, elements inside it are claimed by it.
            if !inside_overlay(scene, node.id, root) {
                continue;
            }
            kind = fold_into_overlay(kind, overlay_kind);
        }

        let label = extract_label(scene, &node);
        let mut el = InteractiveElement::new(node.id, &label.text, label.semantic, kind);

        for token in &node.ancestors {
            match token.role.as_deref() {
                Some("folder") => el.folder = Some(token.name.clone()),
                Some("cluster") => el.subgroup = SubgroupKind::from_cluster_name(&token.name),
                Some("tabs") => el.tab_strip = true,
                _ => {}
            }
        }
        if el.folder.is_some() && node.name.contains("Header") {
            el.is_folder_header = true;
        }

        out.push(el);
    }

    out
}

/// Cheap digest of the current node set, used to detect whether the host
/// reacted to a synthesized click before the wait window runs out.
pub fn scan_fingerprint(scene: &dyn SceneGraph) -> String {
    let mut hasher = Sha1::new();
    for node in scene.active_nodes() {
        hasher.update(node.name.as_bytes());
        hasher.update(b"|");
    }
    format!("{:x}", hasher.finalize())
}
