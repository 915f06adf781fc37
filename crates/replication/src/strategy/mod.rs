//! Replication strategy abstractions.
//!
//! Replication strategies decide which nodes hold a copy of each token
//! range. The set is closed, mirroring the strategies the server supports:
//!
//! - **LocalStrategy**: the primary owner only (node-local system data)
//! - **SimpleStrategy**: N distinct nodes placed sequentially around the ring
//! - **NetworkTopologyStrategy**: per-datacenter factors with rack diversity
//! - **EverywhereStrategy**: every node in the cluster
//!
//! [`Strategy::new_instance`] picks one from keyspace replication settings.

pub mod everywhere;
pub mod local;
pub mod network_topology;
pub mod simple;

pub use everywhere::EverywhereStrategy;
pub use local::LocalStrategy;
pub use network_topology::NetworkTopologyStrategy;
pub use simple::SimpleStrategy;

use crate::config::{optional_factor, ReplicationConfig, StrategyClass};
use crate::error::ReplicationError;
use crate::replica_map::ReplicaMap;
use corelib::{Ring, Token};
use tracing::debug;

/// Trait for replication strategies.
///
/// A replication strategy is a pure function of the ring snapshot: it holds
/// only validated configuration, keeps no state between calls, and returns
/// an independent [`ReplicaMap`] every time.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as one instance is
/// typically shared by every query routed to a keyspace.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Compute the replicas of every token on `ring`.
    ///
    /// Every ring token appears as a key of the result, and no replica list
    /// contains the same node twice.
    fn compute_replicas_by_token<T: Token>(&self, ring: &Ring<T>) -> ReplicaMap<T>;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// One of the four supported strategies, selected from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Local(LocalStrategy),
    Simple(SimpleStrategy),
    NetworkTopology(NetworkTopologyStrategy),
    Everywhere(EverywhereStrategy),
}

impl Strategy {
    /// Build the strategy described by a keyspace's replication settings.
    ///
    /// All parameters are parsed and validated here, so a bad configuration
    /// is reported before any replica computation.
    ///
    /// # Errors
    /// - [`ReplicationError::MissingClass`] if there is no `class` entry
    /// - [`ReplicationError::UnsupportedStrategy`] for any unknown class
    /// - factor errors from the selected strategy's constructor
    ///
    /// # Example
    /// ```rust
    /// use replication::{ReplicationConfig, Strategy};
    ///
    /// let config: ReplicationConfig = [
    ///     ("class".to_string(), "SimpleStrategy".to_string()),
    ///     ("replication_factor".to_string(), "3".to_string()),
    /// ]
    /// .into_iter()
    /// .collect();
    /// let strategy = Strategy::new_instance(&config).unwrap();
    /// assert!(matches!(strategy, Strategy::Simple(_)));
    /// ```
    pub fn new_instance(config: &ReplicationConfig) -> Result<Self, ReplicationError> {
        let class = StrategyClass::from_config(config)?;
        let strategy = match class {
            StrategyClass::Local => {
                optional_factor(config)?;
                Strategy::Local(LocalStrategy)
            }
            StrategyClass::Simple => Strategy::Simple(SimpleStrategy::from_config(config)?),
            StrategyClass::NetworkTopology => {
                Strategy::NetworkTopology(NetworkTopologyStrategy::from_config(config)?)
            }
            StrategyClass::Everywhere => {
                optional_factor(config)?;
                Strategy::Everywhere(EverywhereStrategy)
            }
        };
        debug!(strategy = ?strategy, "built replication strategy");
        Ok(strategy)
    }

    pub fn class(&self) -> StrategyClass {
        match self {
            Strategy::Local(_) => StrategyClass::Local,
            Strategy::Simple(_) => StrategyClass::Simple,
            Strategy::NetworkTopology(_) => StrategyClass::NetworkTopology,
            Strategy::Everywhere(_) => StrategyClass::Everywhere,
        }
    }
}

impl ReplicationStrategy for Strategy {
    fn compute_replicas_by_token<T: Token>(&self, ring: &Ring<T>) -> ReplicaMap<T> {
        let map = match self {
            Strategy::Local(s) => s.compute_replicas_by_token(ring),
            Strategy::Simple(s) => s.compute_replicas_by_token(ring),
            Strategy::NetworkTopology(s) => s.compute_replicas_by_token(ring),
            Strategy::Everywhere(s) => s.compute_replicas_by_token(ring),
        };
        metrics::counter!("replication.replica_maps_computed", "strategy" => self.name())
            .increment(1);
        debug!(
            strategy = self.name(),
            tokens = map.len(),
            nodes = ring.node_count(),
            "computed replica map"
        );
        map
    }

    fn name(&self) -> &'static str {
        self.class().short_name()
    }
}
