//! Everywhere replication strategy.
//!
//! Every node in the ring replicates every token. No ring walk is needed:
//! the replica list is the set of distinct primary owners, shared by all
//! tokens.

use crate::replica_map::ReplicaMap;
use crate::strategy::ReplicationStrategy;
use corelib::{Ring, Token};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EverywhereStrategy;

impl ReplicationStrategy for EverywhereStrategy {
    fn compute_replicas_by_token<T: Token>(&self, ring: &Ring<T>) -> ReplicaMap<T> {
        let all_nodes = ring.nodes();
        let mut map = ReplicaMap::default();
        for token in ring.tokens() {
            map.insert(token.clone(), all_nodes.clone());
        }
        map
    }

    fn name(&self) -> &'static str {
        "EverywhereStrategy"
    }
}
