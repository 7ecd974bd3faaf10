use crate::host::scene_model::{NodeId, SceneNode};

/// Read-only view of the host scene graph. Every method is a fresh poll;
/// nothing here is cached and no call mutates host state.
pub trait SceneGraph {
    /// All currently active, potentially interactable nodes.
    fn active_nodes(&self) -> Vec<SceneNode>;

    /// Visible text-bearing children of a node, in display order.
    /// Invisible and inactive children are already filtered out.
    fn visible_text(&self, id: NodeId) -> Vec<String>;

    /// Whether a named marker child of this node is currently active.
    fn marker_active(&self, id: NodeId, marker: &str) -> bool;

    /// Find an active node by exact name (overlay roots, zone roots, prompts).
    fn find_active(&self, name: &str) -> Option<NodeId>;

    /// Whether `id` sits inside the subtree rooted at `root`.
    fn is_descendant_of(&self, id: NodeId, root: NodeId) -> bool;

    /// Viewport size in host pixels, for synthesized pointer coordinates.
    fn viewport(&self) -> (f32, f32);
}
