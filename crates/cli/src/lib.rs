//! CLI tool for inspecting replica placement.
//!
//! Loads a topology snapshot (nodes, their tokens, and keyspace replication
//! settings) and provides commands for:
//! - Inspecting ring ranges and owners
//! - Listing keyspace strategies
//! - Printing the replica map of a keyspace
//! - Routing a partition key to its replicas

pub mod commands;
pub mod config;
pub mod topology;

pub use commands::{Command, CommandResult};
pub use config::{CliConfig, PartitionerKind};
pub use topology::Topology;
