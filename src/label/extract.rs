use crate::host::graph::SceneGraph;
use crate::host::scene_model::SceneNode;
use crate::label::symbols::resolve_symbols;

pub const UNKNOWN_LABEL: &str = "unknown element";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    Button,
    Toggle,
    Slider,
    Card,
    Text,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLabel {
    pub text: String,
    pub semantic: SemanticType,
}

/// Pull a human-readable label from a node: concatenate its visible
/// text-bearing children, strip markup, resolve icon codes.
///
/// Never fails; a node with no usable text reads as "unknown element".
/// Idempotent over an unchanged node, which the announcer's duplicate
/// suppression depends on.
pub fn extract_label(scene: &dyn SceneGraph, node: &SceneNode) -> ExtractedLabel {
    let raw = scene
        .visible_text(node.id)
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let cleaned = collapse_whitespace(&resolve_symbols(&strip_tags(&raw)));

    let semantic = semantic_of(node);
    if cleaned.is_empty() {
        ExtractedLabel {
            text: UNKNOWN_LABEL.to_string(),
            semantic: if semantic == SemanticType::Text {
                SemanticType::Unknown
            } else {
                semantic
            },
        }
    } else {
        ExtractedLabel {
            text: cleaned,
            semantic,
        }
    }
}

/// Semantic type from the node's own name. Display text never participates,
/// so localized labels cannot flip an element's type.
pub fn semantic_of(node: &SceneNode) -> SemanticType {
    let name = node.name.as_str();
    if name.contains("Toggle") || name.contains("Checkbox") {
        SemanticType::Toggle
    } else if name.contains("Slider") {
        SemanticType::Slider
    } else if name.contains("Button") {
        SemanticType::Button
    } else if name.contains("Card") {
        SemanticType::Card
    } else {
        SemanticType::Text
    }
}

/// Remove markup tags (`<b>`, `<color=#fff>`, `</size>`).
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> SceneNode {
        SceneNode {
            id: 1,
            name: name.to_string(),
            ancestors: vec![],
        }
    }

    #[test]
    fn strips_markup_tags() {
        assert_eq!(strip_tags("<b>Play</b> now"), "Play now");
        assert_eq!(strip_tags("<color=#ff0000>Red</color>"), "Red");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn semantic_type_comes_from_node_name() {
        assert_eq!(semantic_of(&node("PlayButton")), SemanticType::Button);
        assert_eq!(semantic_of(&node("VsyncToggle")), SemanticType::Toggle);
        assert_eq!(semantic_of(&node("VolumeSlider")), SemanticType::Slider);
        assert_eq!(semantic_of(&node("CardFront")), SemanticType::Card);
        assert_eq!(semantic_of(&node("Header")), SemanticType::Text);
    }
}
