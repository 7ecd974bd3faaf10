use crate::host::error::HostError;
use crate::host::scene_model::NodeId;

/// The only permitted mutation path into the host: synthesized pointer
/// events, the same channel a real user's mouse goes through.
pub trait InputChannel {
    /// Simulate a pointer click on a node.
    fn click_node(&mut self, id: NodeId) -> Result<(), HostError>;

    /// Simulate a pointer click at a viewport coordinate.
    fn click_at(&mut self, x: f32, y: f32) -> Result<(), HostError>;
}
