//! Command-line configuration.

use crate::commands::Command;
use crate::topology::Topology;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspect replica placement for a cluster topology snapshot.
#[derive(Debug, Parser)]
#[command(name = "ringctl", version, about)]
pub struct CliConfig {
    /// Topology snapshot (JSON): nodes with tokens, and keyspace replication settings.
    #[arg(short, long, value_name = "FILE")]
    pub topology: PathBuf,

    /// Partitioner the tokens and keys belong to.
    #[arg(short, long, value_enum, default_value_t = PartitionerKind::Murmur3)]
    pub partitioner: PartitionerKind,

    /// Log strategy construction and replica map computation.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PartitionerKind {
    Murmur3,
    Random,
    ByteOrdered,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        init_logging(self.verbose);
        let topology = Topology::load(&self.topology)?;
        let output = self.command.execute(&topology, self.partitioner)?;
        print!("{}", output);
        Ok(())
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
