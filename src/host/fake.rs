use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::error::HostError;
use crate::host::graph::SceneGraph;
use crate::host::input::InputChannel;
use crate::host::scene_model::{AncestorToken, NodeId, SceneNode};
use crate::host::speech::AnnouncementSink;

// ============================================================================
// Fake scene graph — the in-memory stand-in for the live host UI tree.
// Tests and the scenario runner build scenes out of these.
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub name: String,
    pub ancestors: Vec<AncestorToken>,
    pub text: Vec<String>,
    pub markers: Vec<String>,
}

impl FakeNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn under(mut self, ancestor: &str) -> Self {
        self.ancestors.push(AncestorToken::named(ancestor));
        self
    }

    pub fn under_role(mut self, ancestor: &str, role: &str) -> Self {
        self.ancestors.push(AncestorToken::with_role(ancestor, role));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text.push(text.to_string());
        self
    }

    pub fn marker(mut self, marker: &str) -> Self {
        self.markers.push(marker.to_string());
        self
    }
}

pub struct FakeSceneGraph {
    nodes: Vec<(NodeId, FakeNode)>,
    next_id: NodeId,
    viewport: (f32, f32),

    /// Scripted host reactions: clicking a node replaces the whole scene,
    /// the way an activation mutates the real tree.
    click_effects: HashMap<NodeId, Vec<FakeNode>>,
}

impl FakeSceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_id: 1,
            viewport: (1920.0, 1080.0),
            click_effects: HashMap::new(),
        }
    }

    pub fn with_nodes(nodes: Vec<FakeNode>) -> Self {
        let mut scene = Self::new();
        scene.replace_all(nodes);
        scene
    }

    pub fn add(&mut self, node: FakeNode) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    /// Replace the entire node set, invalidating every previously handed-out
    /// id. Mirrors what a host scene transition does to live references.
    pub fn replace_all(&mut self, nodes: Vec<FakeNode>) {
        self.nodes.clear();
        self.click_effects.clear();
        for node in nodes {
            self.add(node);
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.nodes.retain(|(_, n)| n.name != name);
    }

    pub fn set_marker(&mut self, name: &str, marker: &str, active: bool) {
        for (_, node) in self.nodes.iter_mut().filter(|(_, n)| n.name == name) {
            if active {
                if !node.markers.iter().any(|m| m == marker) {
                    node.markers.push(marker.to_string());
                }
            } else {
                node.markers.retain(|m| m != marker);
            }
        }
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name == name)
            .map(|(id, _)| *id)
    }

    /// Script a click reaction: activating this node swaps in a new scene.
    pub fn on_click_replace(&mut self, name: &str, nodes: Vec<FakeNode>) {
        if let Some(id) = self.id_of(name) {
            self.click_effects.insert(id, nodes);
        }
    }

    fn apply_click(&mut self, id: NodeId) -> Result<(), HostError> {
        if !self.nodes.iter().any(|(n, _)| *n == id) {
            return Err(HostError::NodeGone(id));
        }
        if let Some(nodes) = self.click_effects.remove(&id) {
            self.replace_all(nodes);
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<SceneNode> {
        self.nodes
            .iter()
            .map(|(id, n)| SceneNode {
                id: *id,
                name: n.name.clone(),
                ancestors: n.ancestors.clone(),
            })
            .collect()
    }
}

impl Default for FakeSceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle so the engine (reads) and the fake input channel (writes)
/// can point at the same scene, the way both sides share the real host tree.
#[derive(Clone)]
pub struct SharedScene(pub Rc<RefCell<FakeSceneGraph>>);

impl SharedScene {
    pub fn new(scene: FakeSceneGraph) -> Self {
        Self(Rc::new(RefCell::new(scene)))
    }
}

impl SceneGraph for SharedScene {
    fn active_nodes(&self) -> Vec<SceneNode> {
        self.0.borrow().snapshot()
    }

    fn visible_text(&self, id: NodeId) -> Vec<String> {
        self.0
            .borrow()
            .nodes
            .iter()
            .find(|(n, _)| *n == id)
            .map(|(_, node)| node.text.clone())
            .unwrap_or_default()
    }

    fn marker_active(&self, id: NodeId, marker: &str) -> bool {
        self.0
            .borrow()
            .nodes
            .iter()
            .find(|(n, _)| *n == id)
            .map(|(_, node)| node.markers.iter().any(|m| m == marker))
            .unwrap_or(false)
    }

    fn find_active(&self, name: &str) -> Option<NodeId> {
        self.0.borrow().id_of(name)
    }

    fn is_descendant_of(&self, id: NodeId, root: NodeId) -> bool {
        let scene = self.0.borrow();
        let root_name = match scene.nodes.iter().find(|(n, _)| *n == root) {
            Some((_, node)) => node.name.clone(),
            None => return false,
        };
        scene
            .nodes
            .iter()
            .find(|(n, _)| *n == id)
            .map(|(_, node)| node.ancestors.iter().any(|t| t.name == root_name))
            .unwrap_or(false)
    }

    fn viewport(&self) -> (f32, f32) {
        self.0.borrow().viewport
    }
}

// ============================================================================
// Fake input channel — records every synthesized click and applies any
// scripted scene reaction.
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ClickRecord {
    Node(NodeId),
    At(f32, f32),
}

pub struct FakeInput {
    scene: SharedScene,
    pub clicks: Vec<ClickRecord>,
}

impl FakeInput {
    pub fn new(scene: SharedScene) -> Self {
        Self {
            scene,
            clicks: Vec::new(),
        }
    }
}

impl InputChannel for FakeInput {
    fn click_node(&mut self, id: NodeId) -> Result<(), HostError> {
        self.clicks.push(ClickRecord::Node(id));
        self.scene.0.borrow_mut().apply_click(id)
    }

    fn click_at(&mut self, x: f32, y: f32) -> Result<(), HostError> {
        self.clicks.push(ClickRecord::At(x, y));
        Ok(())
    }
}

// ============================================================================
// Recording sink — captures spoken output for assertions.
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Spoken {
    pub text: String,
    pub interrupt: bool,
}

#[derive(Clone, Default)]
pub struct SpeechLog(pub Rc<RefCell<Vec<Spoken>>>);

impl SpeechLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().iter().map(|s| s.text.clone()).collect()
    }

    pub fn last(&self) -> Option<String> {
        self.0.borrow().last().map(|s| s.text.clone())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct RecordingSink {
    log: SpeechLog,
}

impl RecordingSink {
    pub fn new(log: SpeechLog) -> Self {
        Self { log }
    }
}

impl AnnouncementSink for RecordingSink {
    fn speak(&mut self, text: &str) {
        self.log.0.borrow_mut().push(Spoken {
            text: text.to_string(),
            interrupt: false,
        });
    }

    fn speak_interrupt(&mut self, text: &str) {
        self.log.0.borrow_mut().push(Spoken {
            text: text.to_string(),
            interrupt: true,
        });
    }
}
