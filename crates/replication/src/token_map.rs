//! Per-keyspace replica lookup for one ring snapshot.
//!
//! Keyspaces usually share a handful of replication settings, so replica
//! maps are computed once per distinct configuration and shared between the
//! keyspaces that use it. A new `TokenMap` is built on every topology or
//! schema change; an existing one never changes.

use crate::config::ReplicationConfig;
use crate::error::ReplicationError;
use crate::replica_map::ReplicaMap;
use crate::strategy::{ReplicationStrategy, Strategy};
use corelib::{Node, Partitioner, Ring, Token};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Replica maps of every keyspace, for one ring snapshot.
#[derive(Debug, Clone)]
pub struct TokenMap<T: Token> {
    ring: Arc<Ring<T>>,
    keyspaces: BTreeMap<String, Arc<ReplicaMap<T>>>,
}

impl<T: Token> TokenMap<T> {
    /// Compute replica maps for `keyspaces` on `ring`.
    ///
    /// Every configuration is validated before any map is computed.
    ///
    /// # Errors
    /// [`ReplicationError::InvalidKeyspace`] naming the first keyspace whose
    /// replication settings are invalid.
    pub fn build<I, K>(ring: Arc<Ring<T>>, keyspaces: I) -> Result<Self, ReplicationError>
    where
        I: IntoIterator<Item = (K, ReplicationConfig)>,
        K: Into<String>,
    {
        let mut strategies = Vec::new();
        for (name, config) in keyspaces {
            let name = name.into();
            let strategy = Strategy::new_instance(&config)
                .map_err(|e| e.for_keyspace(name.as_str()))?;
            let key: BTreeMap<String, String> = config.into_iter().collect();
            strategies.push((name, key, strategy));
        }

        let mut computed: HashMap<BTreeMap<String, String>, Arc<ReplicaMap<T>>> = HashMap::new();
        let mut keyspaces = BTreeMap::new();
        for (name, key, strategy) in strategies {
            let map = computed
                .entry(key)
                .or_insert_with(|| Arc::new(strategy.compute_replicas_by_token(&ring)));
            keyspaces.insert(name, Arc::clone(map));
        }
        debug!(
            keyspaces = keyspaces.len(),
            distinct_configs = computed.len(),
            tokens = ring.len(),
            "built token map"
        );

        Ok(Self { ring, keyspaces })
    }

    pub fn ring(&self) -> &Arc<Ring<T>> {
        &self.ring
    }

    /// Names of the keyspaces in this map, sorted.
    pub fn keyspaces(&self) -> impl Iterator<Item = &str> + '_ {
        self.keyspaces.keys().map(String::as_str)
    }

    pub fn replica_map(&self, keyspace: &str) -> Option<&Arc<ReplicaMap<T>>> {
        self.keyspaces.get(keyspace)
    }

    /// Replicas of `keyspace` for an arbitrary token.
    pub fn replicas(&self, keyspace: &str, token: &T) -> Option<&[Arc<Node>]> {
        self.replica_map(keyspace)?.replicas_for(token)
    }

    /// Replicas of `keyspace` for a routing key hashed by `partitioner`.
    pub fn replicas_for_key<P>(
        &self,
        keyspace: &str,
        partitioner: &P,
        key: &[u8],
    ) -> Option<&[Arc<Node>]>
    where
        P: Partitioner<TokenType = T>,
    {
        self.replicas(keyspace, &partitioner.partition(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::token::Murmur3Token as M;
    use corelib::NodeId;

    fn config(entries: &[(&str, &str)]) -> ReplicationConfig {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ring() -> Arc<Ring<M>> {
        Arc::new(
            Ring::builder()
                .add_token(M(0), Node::new(NodeId(1), "n1"))
                .add_token(M(100), Node::new(NodeId(2), "n2"))
                .add_token(M(200), Node::new(NodeId(3), "n3"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_shared_configs_share_maps() {
        let rf2 = config(&[("class", "SimpleStrategy"), ("replication_factor", "2")]);
        let map = TokenMap::build(
            ring(),
            [
                ("ks1", rf2.clone()),
                ("ks2", rf2),
                ("system", config(&[("class", "LocalStrategy")])),
            ],
        )
        .unwrap();

        assert!(Arc::ptr_eq(
            map.replica_map("ks1").unwrap(),
            map.replica_map("ks2").unwrap()
        ));
        assert_eq!(map.keyspaces().collect::<Vec<_>>(), vec!["ks1", "ks2", "system"]);

        let replicas = map.replicas("ks1", &M(150)).unwrap();
        assert_eq!(replicas.iter().map(|n| n.id).collect::<Vec<_>>(), vec![NodeId(3), NodeId(1)]);
        assert_eq!(map.replicas("system", &M(150)).unwrap().len(), 1);
        assert!(map.replicas("missing", &M(0)).is_none());
    }

    #[test]
    fn test_invalid_keyspace_is_named() {
        let err = TokenMap::build(
            ring(),
            [
                ("good", config(&[("class", "EverywhereStrategy")])),
                ("bad", config(&[("class", "foo")])),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ReplicationError::UnsupportedStrategy("foo".into()).for_keyspace("bad")
        );
        assert!(err.to_string().contains("keyspace bad"));
    }
}
