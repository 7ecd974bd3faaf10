use std::fmt;

use crate::host::scene_model::NodeId;

#[derive(Debug)]
pub enum HostError {
    /// The node vanished between the scan that found it and the click.
    NodeGone(NodeId),

    /// The host's input pipeline refused or swallowed the synthesized event.
    InputRejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NodeGone(id) => {
                write!(f, "Node {} no longer exists in the scene", id)
            }
            HostError::InputRejected(msg) => {
                write!(f, "Synthesized input rejected: {}", msg)
            }
        }
    }
}

impl std::error::Error for HostError {}
