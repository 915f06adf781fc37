//! Computed replica placement.

use corelib::{Node, NodeId, Token};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Replica nodes for every token on a ring.
///
/// Each replica list is ordered (primary or first-discovered first) and
/// free of duplicate nodes. A map is produced fresh by every computation and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaMap<T: Token> {
    replicas: BTreeMap<T, Vec<Arc<Node>>>,
}

impl<T: Token> Default for ReplicaMap<T> {
    fn default() -> Self {
        Self {
            replicas: BTreeMap::new(),
        }
    }
}

impl<T: Token> ReplicaMap<T> {
    pub(crate) fn insert(&mut self, token: T, replicas: Vec<Arc<Node>>) {
        self.replicas.insert(token, replicas);
    }

    /// Number of ring tokens in the map.
    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }

    /// Replicas of a token that is on the ring.
    pub fn replicas(&self, token: &T) -> Option<&[Arc<Node>]> {
        self.replicas.get(token).map(Vec::as_slice)
    }

    /// Replicas for an arbitrary token, e.g. the hash of a routing key: the
    /// replicas of the first ring token at or after it, wrapping around.
    pub fn replicas_for(&self, token: &T) -> Option<&[Arc<Node>]> {
        self.replicas
            .range(token..)
            .next()
            .or_else(|| self.replicas.iter().next())
            .map(|(_, nodes)| nodes.as_slice())
    }

    /// Ids of the replicas of a ring token, in placement order.
    pub fn replica_ids(&self, token: &T) -> Vec<NodeId> {
        self.replicas(token)
            .map(|nodes| nodes.iter().map(|n| n.id).collect())
            .unwrap_or_default()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &T> + '_ {
        self.replicas.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &[Arc<Node>])> + '_ {
        self.replicas
            .iter()
            .map(|(token, nodes)| (token, nodes.as_slice()))
    }
}

/// Ordered, identity-deduplicated replica list under construction.
#[derive(Debug, Default)]
pub(crate) struct ReplicaSet {
    nodes: Vec<Arc<Node>>,
    seen: HashSet<NodeId>,
}

impl ReplicaSet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Append `node` unless it is already present. Returns whether it was added.
    pub(crate) fn push(&mut self, node: &Arc<Node>) -> bool {
        if self.seen.insert(node.id) {
            self.nodes.push(Arc::clone(node));
            true
        } else {
            false
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn into_vec(self) -> Vec<Arc<Node>> {
        self.nodes
    }
}
