//! Node abstractions for the token ring.
//!
//! Nodes are the physical replicas that own tokens. They are identified by a
//! compact `NodeId` that is cheap to compare and hash; replica sets are
//! deduplicated by this identity, never by name or token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact identifier for a node in the cluster.
///
/// Newtype over `u128` so a host id UUID fits without loss while comparisons
/// and hashing stay cheap.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u128);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Point-in-time view of a cluster node.
///
/// Keep this struct small and cheap to clone; it is shared behind `Arc` by
/// every ring entry the node owns and every replica set it appears in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Human-readable name or hostname.
    pub name: String,
    /// Data center label. Nodes without one never receive topology-aware replicas.
    #[serde(default)]
    pub datacenter: Option<String>,
    /// Rack label within the data center.
    #[serde(default)]
    pub rack: Option<String>,
}

impl Node {
    /// Construct a new node with no topology labels.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            datacenter: None,
            rack: None,
        }
    }

    /// Construct a node placed in `datacenter` / `rack`.
    pub fn with_topology(
        id: NodeId,
        name: impl Into<String>,
        datacenter: impl Into<String>,
        rack: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            datacenter: Some(datacenter.into()),
            rack: Some(rack.into()),
        }
    }

    pub fn datacenter(&self) -> Option<&str> {
        self.datacenter.as_deref()
    }

    pub fn rack(&self) -> Option<&str> {
        self.rack.as_deref()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.datacenter(), self.rack()) {
            (Some(dc), Some(rack)) => write!(f, "{} ({}/{})", self.name, dc, rack),
            (Some(dc), None) => write!(f, "{} ({})", self.name, dc),
            _ => f.write_str(&self.name),
        }
    }
}
