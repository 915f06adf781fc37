//! Topology snapshot loading.
//!
//! A snapshot is a JSON document listing the cluster's nodes with their
//! tokens, plus the replication settings of each keyspace:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "5c3ec1d0-7d7b-4c38-9a8e-0d4f4c7c3e11", "name": "10.0.0.1",
//!       "datacenter": "dc1", "rack": "r1", "tokens": ["-9000", "0"] }
//!   ],
//!   "keyspaces": {
//!     "ks1": { "class": "NetworkTopologyStrategy", "dc1": "3" }
//!   }
//! }
//! ```
//!
//! Tokens are written in the partitioner's own textual form. Replication
//! values are strings, as they appear in schema metadata.

use anyhow::{anyhow, Context};
use corelib::{Node, NodeId, Partitioner, Ring};
use replication::ReplicationConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub keyspaces: BTreeMap<String, ReplicationConfig>,
}

/// One node of the snapshot and the tokens it owns.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeEntry {
    /// Host id: a UUID or a decimal integer.
    pub id: String,
    /// Defaults to the id.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub datacenter: Option<String>,
    #[serde(default)]
    pub rack: Option<String>,
    pub tokens: Vec<String>,
}

impl NodeEntry {
    fn to_node(&self) -> anyhow::Result<Node> {
        let id = parse_node_id(&self.id)?;
        Ok(Node {
            id,
            name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            datacenter: self.datacenter.clone(),
            rack: self.rack.clone(),
        })
    }
}

impl Topology {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read topology file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid topology file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let topology: Self = serde_json::from_str(raw)?;
        debug!(
            nodes = topology.nodes.len(),
            keyspaces = topology.keyspaces.len(),
            "loaded topology"
        );
        Ok(topology)
    }

    /// Build the ring snapshot, parsing tokens with `partitioner`.
    pub fn ring<P: Partitioner>(&self, partitioner: &P) -> anyhow::Result<Ring<P::TokenType>> {
        let mut builder = Ring::builder();
        for entry in &self.nodes {
            let node = entry.to_node()?;
            let tokens = entry
                .tokens
                .iter()
                .map(|raw| partitioner.parse_token(raw))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("node {}", node.name))?;
            builder = builder.add_tokens(node, tokens);
        }
        Ok(builder.build()?)
    }

    pub fn keyspace(&self, name: &str) -> anyhow::Result<&ReplicationConfig> {
        self.keyspaces
            .get(name)
            .ok_or_else(|| anyhow!("unknown keyspace {}", name))
    }
}

/// Digit-only ids are decimal integers; anything else must be a UUID in one
/// of its standard text forms (hyphenated, simple, braced or URN).
fn parse_node_id(raw: &str) -> anyhow::Result<NodeId> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<u128>()
            .map(NodeId)
            .with_context(|| format!("invalid node id {}", raw));
    }
    Uuid::parse_str(raw)
        .map(|uuid| NodeId(uuid.as_u128()))
        .with_context(|| format!("invalid node id {}: expected a UUID or a decimal integer", raw))
}
