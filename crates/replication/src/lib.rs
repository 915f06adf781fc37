//! Replication strategies for the token ring.
//!
//! This crate turns a ring snapshot and a keyspace's replication settings
//! into the replicas of every token:
//! - Parsing and validating replication configuration
//! - The four server strategies (Local, Simple, NetworkTopology, Everywhere)
//! - Per-keyspace replica lookup for request routing
//!
//! Computation is pure: no I/O, no locks, no state kept between calls.

pub mod config;
pub mod error;
pub mod factor;
pub mod replica_map;
pub mod strategy;
pub mod token_map;

pub use config::{ReplicationConfig, StrategyClass};
pub use error::ReplicationError;
pub use factor::ReplicationFactor;
pub use replica_map::ReplicaMap;
pub use strategy::{
    EverywhereStrategy, LocalStrategy, NetworkTopologyStrategy, ReplicationStrategy,
    SimpleStrategy, Strategy,
};
pub use token_map::TokenMap;
