//! Local replication strategy.
//!
//! Used for node-local system keyspaces: the only replica of a token is its
//! primary owner. The replication factor is fixed at 1; a configured value
//! must still be well-formed but has no effect.

use crate::replica_map::ReplicaMap;
use crate::strategy::ReplicationStrategy;
use corelib::{Ring, Token};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStrategy;

impl ReplicationStrategy for LocalStrategy {
    fn compute_replicas_by_token<T: Token>(&self, ring: &Ring<T>) -> ReplicaMap<T> {
        let mut map = ReplicaMap::default();
        for (token, primary) in ring.entries() {
            map.insert(token.clone(), vec![Arc::clone(primary)]);
        }
        map
    }

    fn name(&self) -> &'static str {
        "LocalStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::token::Murmur3Token as M;
    use corelib::{Node, NodeId};

    #[test]
    fn test_primary_only() {
        let ring = Ring::builder()
            .add_tokens(Node::new(NodeId(1), "n1"), [M(-5), M(20)])
            .add_token(M(7), Node::new(NodeId(2), "n2"))
            .build()
            .unwrap();

        let map = LocalStrategy.compute_replicas_by_token(&ring);
        assert_eq!(map.len(), 3);
        assert_eq!(map.replica_ids(&M(-5)), vec![NodeId(1)]);
        assert_eq!(map.replica_ids(&M(7)), vec![NodeId(2)]);
        assert_eq!(map.replica_ids(&M(20)), vec![NodeId(1)]);
    }
}
