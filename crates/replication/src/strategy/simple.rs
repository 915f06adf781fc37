//! Simple replication strategy.
//!
//! Places N replicas sequentially around the ring (clockwise from the
//! primary). This is the simplest replication strategy and works well for:
//!
//! - Small clusters
//! - Single data center deployments
//! - When network topology doesn't matter
//!
//! # Algorithm
//!
//! For every ring token:
//! 1. Start at the token's primary owner
//! 2. Continue clockwise, collecting nodes not seen yet
//! 3. Stop at N distinct nodes or after one full revolution
//!
//! If the ring has fewer than N distinct nodes, every token is replicated
//! on all of them.
//!
//! # Performance
//!
//! - **Time**: O(t * w) where t = tokens, w = entries walked per token
//! - **Space**: O(t * N)
//!
//! # Limitations
//!
//! - Doesn't consider data center/rack placement
//! - May place replicas on nodes in the same failure domain

use crate::config::{required_factor, ReplicationConfig, StrategyClass, REPLICATION_FACTOR_KEY};
use crate::error::ReplicationError;
use crate::factor::ReplicationFactor;
use crate::replica_map::{ReplicaMap, ReplicaSet};
use crate::strategy::ReplicationStrategy;
use corelib::{Ring, Token};

/// Simple replication strategy: N replicas placed sequentially around the ring.
///
/// # Example
///
/// ```rust
/// use replication::{ReplicationStrategy, SimpleStrategy};
/// use corelib::token::Murmur3Token;
/// use corelib::{Node, NodeId, Ring};
///
/// let strategy = SimpleStrategy::new(2).unwrap();
/// let ring = Ring::builder()
///     .add_token(Murmur3Token(0), Node::new(NodeId(1), "node1"))
///     .add_token(Murmur3Token(10), Node::new(NodeId(2), "node2"))
///     .add_token(Murmur3Token(20), Node::new(NodeId(3), "node3"))
///     .build()
///     .unwrap();
///
/// let replicas = strategy.compute_replicas_by_token(&ring);
/// assert_eq!(replicas.replica_ids(&Murmur3Token(20)), vec![NodeId(3), NodeId(1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: ReplicationFactor,
}

impl SimpleStrategy {
    /// Create a new simple strategy with the given replication factor.
    ///
    /// # Errors
    /// [`ReplicationError::InvalidReplicationFactor`] if `replication_factor`
    /// is 0.
    pub fn new(replication_factor: usize) -> Result<Self, ReplicationError> {
        Self::with_factor(ReplicationFactor::new(replication_factor))
    }

    /// Create from a parsed factor, which may include transient replicas.
    pub fn with_factor(replication_factor: ReplicationFactor) -> Result<Self, ReplicationError> {
        if replication_factor.full_replicas() == 0 {
            return Err(ReplicationError::invalid_factor(
                REPLICATION_FACTOR_KEY,
                replication_factor.to_string(),
                "needs at least one full replica",
            ));
        }
        Ok(Self { replication_factor })
    }

    pub(crate) fn from_config(config: &ReplicationConfig) -> Result<Self, ReplicationError> {
        Self::with_factor(required_factor(config, StrategyClass::Simple)?)
    }

    pub fn replication_factor(&self) -> ReplicationFactor {
        self.replication_factor
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn compute_replicas_by_token<T: Token>(&self, ring: &Ring<T>) -> ReplicaMap<T> {
        let rf = self.replication_factor.full_replicas().min(ring.len());
        let mut map = ReplicaMap::default();

        for (i, (token, _)) in ring.entries().iter().enumerate() {
            let mut replicas = ReplicaSet::with_capacity(rf);
            for (_, node) in ring.walk_from(i) {
                if replicas.len() >= rf {
                    break;
                }
                replicas.push(node);
            }
            map.insert(token.clone(), replicas.into_vec());
        }
        map
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
