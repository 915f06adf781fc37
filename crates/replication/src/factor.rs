//! Replication factor values.
//!
//! Keyspace metadata carries factors as strings, either `"<replicas>"` or
//! `"<replicas>/<transient>"` when transient replication is enabled. Only
//! full replicas are placed by the strategies.

use crate::error::ReplicationError;
use std::fmt;

/// A parsed replication factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplicationFactor {
    all_replicas: usize,
    transient_replicas: usize,
}

impl ReplicationFactor {
    /// A factor with no transient replicas.
    pub fn new(all_replicas: usize) -> Self {
        Self {
            all_replicas,
            transient_replicas: 0,
        }
    }

    /// Parse the value stored under `key` in a replication config.
    ///
    /// # Errors
    /// [`ReplicationError::InvalidReplicationFactor`] if either part is not a
    /// number, is negative, or there are more transient than total replicas.
    pub fn parse(key: &str, value: &str) -> Result<Self, ReplicationError> {
        let invalid = |reason: String| ReplicationError::invalid_factor(key, value, reason);
        let trimmed = value.trim();

        let (all, transient) = match trimmed.split_once('/') {
            Some((all, transient)) => (
                parse_count(all).map_err(invalid)?,
                parse_count(transient).map_err(invalid)?,
            ),
            None => (parse_count(trimmed).map_err(invalid)?, 0),
        };
        if transient > all {
            return Err(invalid(format!(
                "{} transient replicas exceed {} total replicas",
                transient, all
            )));
        }
        Ok(Self {
            all_replicas: all,
            transient_replicas: transient,
        })
    }

    pub fn all_replicas(&self) -> usize {
        self.all_replicas
    }

    pub fn transient_replicas(&self) -> usize {
        self.transient_replicas
    }

    /// Replicas holding a full copy of the data. This is what gets placed.
    pub fn full_replicas(&self) -> usize {
        self.all_replicas - self.transient_replicas
    }

    pub fn has_transient(&self) -> bool {
        self.transient_replicas > 0
    }
}

fn parse_count(part: &str) -> Result<usize, String> {
    let n = part
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("not a number ({})", e))?;
    usize::try_from(n).map_err(|_| "must not be negative".to_string())
}

impl fmt::Display for ReplicationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_transient() {
            write!(f, "{}/{}", self.all_replicas, self.transient_replicas)
        } else {
            write!(f, "{}", self.all_replicas)
        }
    }
}
