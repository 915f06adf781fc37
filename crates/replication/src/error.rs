//! Error types for replication strategy construction.
//!
//! Every variant is raised while a strategy is being built from keyspace
//! metadata, before any ring walk starts. Under-replication is not an error.

use thiserror::Error;

/// Errors raised while interpreting a replication configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// The configuration has no `class` entry.
    #[error("Missing replication strategy class in {0}")]
    MissingClass(String),

    /// The `class` entry names a strategy this crate does not implement.
    #[error("Unsupported replication strategy: {0}")]
    UnsupportedStrategy(String),

    /// A strategy that needs `replication_factor` did not get one.
    #[error("Missing replication factor for {strategy} in {config}")]
    MissingReplicationFactor {
        strategy: &'static str,
        config: String,
    },

    /// A replication factor value could not be parsed or is out of range.
    #[error("Invalid replication factor '{value}' for '{key}': {reason}")]
    InvalidReplicationFactor {
        key: String,
        value: String,
        reason: String,
    },

    /// Wraps any of the above with the keyspace it came from.
    #[error("Invalid replication configuration for keyspace {keyspace}: {source}")]
    InvalidKeyspace {
        keyspace: String,
        source: Box<ReplicationError>,
    },
}

impl ReplicationError {
    pub(crate) fn invalid_factor(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ReplicationError::InvalidReplicationFactor {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Attach the keyspace name to a configuration error.
    pub fn for_keyspace(self, keyspace: impl Into<String>) -> Self {
        ReplicationError::InvalidKeyspace {
            keyspace: keyspace.into(),
            source: Box::new(self),
        }
    }
}
