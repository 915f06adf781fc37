//! Network topology replication strategy.
//!
//! Each datacenter gets its own replication factor, and inside a datacenter
//! replicas are spread over as many racks as possible before any rack is
//! used twice. The placement must agree with the server's own algorithm,
//! otherwise token-aware routing quietly degrades to random coordinators.
//!
//! # Algorithm
//!
//! For every ring token, walk the ring clockwise from its primary owner.
//! For each node encountered, in its datacenter `dc`:
//!
//! 1. Skip it if `dc` is not configured or already has `RF[dc]` replicas
//! 2. If the node has no rack, or every rack of `dc` is already used, accept it
//! 3. Otherwise accept it only if its rack is new; remember it as *skipped*
//!    if the rack was already used
//! 4. When the last unused rack of `dc` gets used, append the skipped nodes
//!    of `dc` in walk order until `RF[dc]` is reached
//!
//! The walk stops once every datacenter holds `min(RF[dc], nodes in dc)`
//! replicas, or after one full revolution.
//!
//! ```text
//!   walk:     a1(r1)  a2(r1)  b1(r2)  a3(r1)      RF[dc] = 3
//!   step:     accept  skip    accept  -
//!                             └─ racks exhausted: backfill a2
//!   result:   [a1, b1, a2]
//! ```
//!
//! # Performance
//!
//! - **Time**: O(t * n) worst case, t = tokens, n = ring entries
//! - **Space**: O(t * sum(RF))

use crate::config::{datacenter_factors, ReplicationConfig};
use crate::error::ReplicationError;
use crate::factor::ReplicationFactor;
use crate::replica_map::{ReplicaMap, ReplicaSet};
use crate::strategy::ReplicationStrategy;
use corelib::{Node, Ring, Token};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::warn;

/// Per-datacenter replication with rack diversity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTopologyStrategy {
    replication_factors: BTreeMap<String, ReplicationFactor>,
}

impl NetworkTopologyStrategy {
    /// Create a strategy from datacenter name to replication factor.
    /// A factor of 0 is valid and places no replicas in that datacenter.
    pub fn new<I, S>(factors: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            replication_factors: factors
                .into_iter()
                .map(|(dc, rf)| (dc.into(), ReplicationFactor::new(rf)))
                .collect(),
        }
    }

    pub(crate) fn from_config(config: &ReplicationConfig) -> Result<Self, ReplicationError> {
        Ok(Self {
            replication_factors: datacenter_factors(config)?,
        })
    }

    pub fn replication_factors(&self) -> &BTreeMap<String, ReplicationFactor> {
        &self.replication_factors
    }

    /// Full replicas configured for `datacenter` (0 if not configured).
    pub fn replication_factor(&self, datacenter: &str) -> usize {
        self.replication_factors
            .get(datacenter)
            .map_or(0, ReplicationFactor::full_replicas)
    }
}

/// Nodes and racks present in one datacenter of the ring.
#[derive(Debug, Default)]
struct DatacenterInfo<'a> {
    nodes: usize,
    racks: HashSet<&'a str>,
}

fn datacenters<'a>(nodes: &'a [Arc<Node>]) -> HashMap<&'a str, DatacenterInfo<'a>> {
    let mut dcs: HashMap<&str, DatacenterInfo<'_>> = HashMap::new();
    for node in nodes {
        if let Some(dc) = node.datacenter() {
            let info = dcs.entry(dc).or_default();
            info.nodes += 1;
            if let Some(rack) = node.rack() {
                info.racks.insert(rack);
            }
        }
    }
    dcs
}

/// Walk state of one datacenter while placing a single token.
struct DatacenterWalk<'a> {
    rf: usize,
    /// Replicas this datacenter can actually reach: `min(rf, nodes in dc)`.
    target: usize,
    total_racks: usize,
    accepted: usize,
    seen_racks: HashSet<&'a str>,
    skipped: Vec<&'a Arc<Node>>,
}

impl<'a> DatacenterWalk<'a> {
    fn is_done(&self) -> bool {
        self.accepted >= self.target
    }

    fn racks_exhausted(&self) -> bool {
        self.seen_racks.len() >= self.total_racks
    }

    fn accept(&mut self, node: &Arc<Node>, replicas: &mut ReplicaSet) {
        if replicas.push(node) {
            self.accepted += 1;
        }
    }

    fn skip(&mut self, node: &'a Arc<Node>) {
        if !self.skipped.iter().any(|n| n.id == node.id) {
            self.skipped.push(node);
        }
    }

    fn backfill(&mut self, replicas: &mut ReplicaSet) {
        for node in std::mem::take(&mut self.skipped) {
            if self.accepted >= self.rf {
                break;
            }
            self.accept(node, replicas);
        }
    }
}

impl ReplicationStrategy for NetworkTopologyStrategy {
    fn compute_replicas_by_token<T: Token>(&self, ring: &Ring<T>) -> ReplicaMap<T> {
        let nodes = ring.nodes();
        let dcs = datacenters(&nodes);

        for dc in self.replication_factors.keys() {
            if !ring.is_empty() && !dcs.contains_key(dc.as_str()) {
                warn!(
                    datacenter = %dc,
                    "replication settings name a datacenter with no nodes in the ring"
                );
            }
        }

        let capacity: usize = self.replication_factors.values().map(|f| f.full_replicas()).sum();
        let mut under_replicated: HashSet<&str> = HashSet::new();
        let mut map = ReplicaMap::default();

        for (i, (token, _)) in ring.entries().iter().enumerate() {
            let mut walks: HashMap<&str, DatacenterWalk<'_>> = self
                .replication_factors
                .iter()
                .map(|(dc, factor)| {
                    let rf = factor.full_replicas();
                    let info = dcs.get(dc.as_str());
                    let walk = DatacenterWalk {
                        rf,
                        target: rf.min(info.map_or(0, |d| d.nodes)),
                        total_racks: info.map_or(0, |d| d.racks.len()),
                        accepted: 0,
                        seen_racks: HashSet::new(),
                        skipped: Vec::new(),
                    };
                    (dc.as_str(), walk)
                })
                .collect();
            let mut pending = walks.values().filter(|w| !w.is_done()).count();
            let mut replicas = ReplicaSet::with_capacity(capacity.min(nodes.len()));

            for (_, node) in ring.walk_from(i) {
                if pending == 0 {
                    break;
                }
                let Some(walk) = node.datacenter().and_then(|dc| walks.get_mut(dc)) else {
                    continue;
                };
                if walk.accepted >= walk.rf {
                    continue;
                }
                let was_done = walk.is_done();

                match node.rack() {
                    Some(rack) if !walk.racks_exhausted() => {
                        if walk.seen_racks.contains(rack) {
                            walk.skip(node);
                        } else {
                            walk.accept(node, &mut replicas);
                            walk.seen_racks.insert(rack);
                            if walk.racks_exhausted() {
                                walk.backfill(&mut replicas);
                            }
                        }
                    }
                    _ => walk.accept(node, &mut replicas),
                }

                if !was_done && walk.is_done() {
                    pending -= 1;
                }
            }

            for (dc, walk) in &walks {
                if walk.accepted < walk.rf && under_replicated.insert(*dc) {
                    warn!(
                        datacenter = %dc,
                        expected = walk.rf,
                        achieved = walk.accepted,
                        "could not achieve replication factor for datacenter"
                    );
                    metrics::counter!("replication.under_replicated_datacenters").increment(1);
                }
            }

            map.insert(token.clone(), replicas.into_vec());
        }
        map
    }

    fn name(&self) -> &'static str {
        "NetworkTopologyStrategy"
    }
}
