//! Replication configuration parsing.
//!
//! Keyspace metadata describes replication as a string-to-string map. This
//! module turns that map into typed values so the strategy constructors only
//! deal with validated input.

use crate::error::ReplicationError;
use crate::factor::ReplicationFactor;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Replication settings of a keyspace, as found in schema metadata.
pub type ReplicationConfig = HashMap<String, String>;

/// Key naming the strategy class.
pub const CLASS_KEY: &str = "class";

/// Key holding the global replication factor.
pub const REPLICATION_FACTOR_KEY: &str = "replication_factor";

const LOCATOR_PACKAGE: &str = "org.apache.cassandra.locator.";

/// The closed set of strategies the server can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyClass {
    Local,
    Simple,
    NetworkTopology,
    Everywhere,
}

impl StrategyClass {
    /// Read and resolve the `class` entry of `config`.
    pub fn from_config(config: &ReplicationConfig) -> Result<Self, ReplicationError> {
        let class = config
            .get(CLASS_KEY)
            .ok_or_else(|| ReplicationError::MissingClass(describe(config)))?;
        Self::parse(class)
    }

    /// Resolve a class name, fully qualified or bare.
    pub fn parse(class: &str) -> Result<Self, ReplicationError> {
        let short = class.strip_prefix(LOCATOR_PACKAGE).unwrap_or(class);
        match short {
            "LocalStrategy" => Ok(StrategyClass::Local),
            "SimpleStrategy" => Ok(StrategyClass::Simple),
            "NetworkTopologyStrategy" => Ok(StrategyClass::NetworkTopology),
            "EverywhereStrategy" => Ok(StrategyClass::Everywhere),
            _ => Err(ReplicationError::UnsupportedStrategy(class.to_string())),
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            StrategyClass::Local => "LocalStrategy",
            StrategyClass::Simple => "SimpleStrategy",
            StrategyClass::NetworkTopology => "NetworkTopologyStrategy",
            StrategyClass::Everywhere => "EverywhereStrategy",
        }
    }

    /// Fully qualified server class name.
    pub fn class_name(self) -> String {
        format!("{}{}", LOCATOR_PACKAGE, self.short_name())
    }
}

impl fmt::Display for StrategyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// The `replication_factor` entry, required.
pub(crate) fn required_factor(
    config: &ReplicationConfig,
    strategy: StrategyClass,
) -> Result<ReplicationFactor, ReplicationError> {
    let value = config.get(REPLICATION_FACTOR_KEY).ok_or_else(|| {
        ReplicationError::MissingReplicationFactor {
            strategy: strategy.short_name(),
            config: describe(config),
        }
    })?;
    ReplicationFactor::parse(REPLICATION_FACTOR_KEY, value)
}

/// The `replication_factor` entry if present. Strategies that ignore the
/// factor still reject a malformed one.
pub(crate) fn optional_factor(
    config: &ReplicationConfig,
) -> Result<Option<ReplicationFactor>, ReplicationError> {
    config
        .get(REPLICATION_FACTOR_KEY)
        .map(|value| ReplicationFactor::parse(REPLICATION_FACTOR_KEY, value))
        .transpose()
}

/// One factor per datacenter: every entry except `class`.
///
/// `replication_factor` is a CQL auto-expansion directive rather than a
/// datacenter name, so it is skipped as well.
pub(crate) fn datacenter_factors(
    config: &ReplicationConfig,
) -> Result<BTreeMap<String, ReplicationFactor>, ReplicationError> {
    config
        .iter()
        .filter(|(key, _)| key.as_str() != CLASS_KEY && key.as_str() != REPLICATION_FACTOR_KEY)
        .map(|(dc, value)| Ok((dc.clone(), ReplicationFactor::parse(dc, value)?)))
        .collect()
}

/// Stable rendering of a config for error messages.
pub(crate) fn describe(config: &ReplicationConfig) -> String {
    format!("{:?}", config.iter().collect::<BTreeMap<_, _>>())
}
