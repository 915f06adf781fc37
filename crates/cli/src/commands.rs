//! CLI subcommands.
//!
//! Every command renders its report into a `String`; `main` only prints it.

use crate::config::PartitionerKind;
use crate::topology::Topology;
use anyhow::Context;
use clap::Subcommand;
use corelib::partitioner::{ByteOrderedPartitioner, Murmur3Partitioner, RandomPartitioner};
use corelib::{Node, Partitioner, Ring};
use replication::{ReplicationStrategy, Strategy, TokenMap};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

pub type CommandResult = anyhow::Result<String>;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every token range with its primary owner.
    Ring,
    /// List keyspaces with their replication strategy.
    Keyspaces,
    /// Print the replicas of every ring token for a keyspace.
    Replicas {
        keyspace: String,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Hash a partition key and print the replicas that own it.
    Route { keyspace: String, key: String },
}

impl Command {
    pub fn execute(&self, topology: &Topology, partitioner: PartitionerKind) -> CommandResult {
        match partitioner {
            PartitionerKind::Murmur3 => self.execute_with(topology, &Murmur3Partitioner),
            PartitionerKind::Random => self.execute_with(topology, &RandomPartitioner),
            PartitionerKind::ByteOrdered => self.execute_with(topology, &ByteOrderedPartitioner),
        }
    }

    fn execute_with<P: Partitioner>(&self, topology: &Topology, partitioner: &P) -> CommandResult {
        let ring = topology.ring(partitioner)?;
        match self {
            Command::Ring => ring_report(&ring),
            Command::Keyspaces => keyspaces_report(topology),
            Command::Replicas { keyspace, json } => {
                let map = token_map(topology, ring, keyspace)?;
                if *json {
                    replicas_json(&map, keyspace)
                } else {
                    replicas_report(&map, keyspace)
                }
            }
            Command::Route { keyspace, key } => {
                let map = token_map(topology, ring, keyspace)?;
                let token = partitioner.partition(key.as_bytes());
                let replicas = map.replicas(keyspace, &token).unwrap_or_default();
                let mut out = String::new();
                writeln!(out, "token: {}", token)?;
                writeln!(out, "replicas: {}", names(replicas))?;
                Ok(out)
            }
        }
    }
}

fn token_map<T: corelib::Token>(
    topology: &Topology,
    ring: Ring<T>,
    keyspace: &str,
) -> anyhow::Result<TokenMap<T>> {
    let config = topology.keyspace(keyspace)?.clone();
    Ok(TokenMap::build(Arc::new(ring), [(keyspace, config)])?)
}

fn ring_report<T: corelib::Token>(ring: &Ring<T>) -> CommandResult {
    let mut out = String::new();
    writeln!(out, "{} tokens, {} nodes", ring.len(), ring.node_count())?;
    for (range, owner) in ring.ranges() {
        writeln!(out, "{}  {}", range, owner)?;
    }
    Ok(out)
}

fn keyspaces_report(topology: &Topology) -> CommandResult {
    let mut out = String::new();
    for (name, config) in &topology.keyspaces {
        let strategy = Strategy::new_instance(config)
            .with_context(|| format!("keyspace {}", name))?;
        let settings: BTreeMap<_, _> = config.iter().filter(|(k, _)| *k != "class").collect();
        let settings: Vec<String> = settings.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        writeln!(out, "{}  {}  {}", name, strategy.name(), settings.join(" "))?;
    }
    Ok(out)
}

fn replicas_report<T: corelib::Token>(map: &TokenMap<T>, keyspace: &str) -> CommandResult {
    let mut out = String::new();
    if let Some(replicas) = map.replica_map(keyspace) {
        for (token, nodes) in replicas.iter() {
            writeln!(out, "{}  {}", token, names(nodes))?;
        }
    }
    Ok(out)
}

fn replicas_json<T: corelib::Token>(map: &TokenMap<T>, keyspace: &str) -> CommandResult {
    let by_token: Vec<(String, Vec<&Node>)> = map
        .replica_map(keyspace)
        .map(|replicas| {
            replicas
                .iter()
                .map(|(token, nodes)| (token.to_string(), nodes.iter().map(Arc::as_ref).collect()))
                .collect()
        })
        .unwrap_or_default();
    let mut out = serde_json::to_string_pretty(&by_token)?;
    out.push('\n');
    Ok(out)
}

fn names(nodes: &[Arc<Node>]) -> String {
    nodes
        .iter()
        .map(|node| node.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
