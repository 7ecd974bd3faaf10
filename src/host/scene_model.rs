use serde::{Deserialize, Serialize};

/// Opaque handle to a host UI node. Carries no semantic meaning and may go
/// stale the moment the host mutates its tree.
pub type NodeId = u64;

/// One step of a node's ancestor chain, root-first. The optional role is
/// host-assigned structure ("folder", "cluster", "tabs") and drives the
/// structural rules that must not depend on substring collisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AncestorToken {
    pub name: String,
    pub role: Option<String>,
}

impl AncestorToken {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            role: None,
        }
    }

    pub fn with_role(name: &str, role: &str) -> Self {
        Self {
            name: name.to_string(),
            role: Some(role.to_string()),
        }
    }
}

/// Ephemeral view of a host node, recreated on every scan.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub ancestors: Vec<AncestorToken>,
}

impl SceneNode {
    /// True if any ancestor (or the node itself) matches the given name.
    pub fn under(&self, ancestor_name: &str) -> bool {
        self.ancestors.iter().any(|t| t.name == ancestor_name)
    }
}

/// Serialized form of a scene node, used by scene dumps (`classify` command)
/// and scenario files. Path tokens are "Name" or "Name#role".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneNodeDump {
    pub name: String,

    #[serde(default)]
    pub path: Vec<String>,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub markers: Vec<String>,
}

impl SceneNodeDump {
    pub fn ancestors(&self) -> Vec<AncestorToken> {
        self.path.iter().map(|token| parse_path_token(token)).collect()
    }
}

fn parse_path_token(token: &str) -> AncestorToken {
    match token.split_once('#') {
        Some((name, role)) => AncestorToken::with_role(name, role),
        None => AncestorToken::named(token),
    }
}
