use std::collections::HashMap;

use crate::host::scene_model::{NodeId, SceneNode};

/// Per-node interactivity cache. Keyed by ephemeral node id, so it is only
/// valid within one scene; the owning screen navigator resets it on every
/// scene change.
pub struct ElementIndex {
    cache: HashMap<NodeId, bool>,
}

const INTERACTIVE_HINTS: &[&str] = &[
    "Button", "Toggle", "Checkbox", "Slider", "Dropdown", "Card", "Tab", "Tile", "Row", "Input",
    "Header",
];

impl ElementIndex {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub fn is_interactive(&mut self, node: &SceneNode) -> bool {
        *self
            .cache
            .entry(node.id)
            .or_insert_with(|| classify_interactive(node))
    }

    pub fn reset(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for ElementIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_interactive(node: &SceneNode) -> bool {
    INTERACTIVE_HINTS.iter().any(|h| node.name.contains(h))
}
