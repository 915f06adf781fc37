//! Property tests over generated rings.
//!
//! Rings have up to eight nodes spread over two datacenters and three racks,
//! with a random number of tokens each.

use corelib::token::Murmur3Token;
use corelib::{Node, NodeId, Ring};
use proptest::prelude::*;
use replication::{
    EverywhereStrategy, LocalStrategy, NetworkTopologyStrategy, ReplicaMap, ReplicationStrategy,
    SimpleStrategy,
};
use std::collections::{HashMap, HashSet};

const DATACENTERS: [&str; 2] = ["dc1", "dc2"];
const RACKS: [&str; 3] = ["r1", "r2", "r3"];

fn arb_ring() -> impl Strategy<Value = Ring<Murmur3Token>> {
    (1usize..8)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((0..DATACENTERS.len(), 0..RACKS.len()), n),
                prop::collection::btree_map(any::<i64>(), 0..n, 1..40),
            )
        })
        .prop_map(|(layout, tokens)| {
            let nodes: Vec<Node> = layout
                .iter()
                .enumerate()
                .map(|(i, (dc, rack))| {
                    Node::with_topology(
                        NodeId(i as u128),
                        format!("node{}", i),
                        DATACENTERS[*dc],
                        RACKS[*rack],
                    )
                })
                .collect();
            tokens
                .into_iter()
                .fold(Ring::builder(), |builder, (token, owner)| {
                    builder.add_token(Murmur3Token(token), nodes[owner].clone())
                })
                .build()
                .unwrap()
        })
}

fn assert_complete_and_unique(ring: &Ring<Murmur3Token>, map: &ReplicaMap<Murmur3Token>) {
    assert_eq!(map.len(), ring.len());
    for token in ring.tokens() {
        let ids = map.replica_ids(token);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate replica for token {}", token);
    }
}

proptest! {
    #[test]
    fn local_is_primary_only(ring in arb_ring()) {
        let map = LocalStrategy.compute_replicas_by_token(&ring);
        assert_complete_and_unique(&ring, &map);
        for (token, primary) in ring.entries() {
            prop_assert_eq!(map.replica_ids(token), vec![primary.id]);
        }
    }

    #[test]
    fn everywhere_is_every_node(ring in arb_ring()) {
        let map = EverywhereStrategy.compute_replicas_by_token(&ring);
        assert_complete_and_unique(&ring, &map);
        let all: HashSet<NodeId> = ring.nodes().iter().map(|n| n.id).collect();
        for token in ring.tokens() {
            let replicas: HashSet<NodeId> = map.replica_ids(token).into_iter().collect();
            prop_assert_eq!(&replicas, &all);
        }
    }

    #[test]
    fn simple_takes_first_distinct_nodes(ring in arb_ring(), rf in 1usize..6) {
        let map = SimpleStrategy::new(rf).unwrap().compute_replicas_by_token(&ring);
        assert_complete_and_unique(&ring, &map);

        for (i, (token, _)) in ring.entries().iter().enumerate() {
            let mut expected = Vec::new();
            for (_, node) in ring.walk_from(i) {
                if !expected.contains(&node.id) {
                    expected.push(node.id);
                }
            }
            expected.truncate(rf);
            prop_assert_eq!(map.replica_ids(token), expected);
        }
    }

    #[test]
    fn network_topology_meets_quotas_with_rack_diversity(
        ring in arb_ring(),
        rf1 in 0usize..5,
        rf2 in 0usize..5,
    ) {
        let strategy = NetworkTopologyStrategy::new([("dc1", rf1), ("dc2", rf2)]);
        let map = strategy.compute_replicas_by_token(&ring);
        assert_complete_and_unique(&ring, &map);

        let nodes = ring.nodes();
        let mut nodes_in: HashMap<&str, usize> = HashMap::new();
        let mut racks_in: HashMap<&str, HashSet<&str>> = HashMap::new();
        for node in &nodes {
            let dc = node.datacenter().unwrap();
            *nodes_in.entry(dc).or_default() += 1;
            racks_in.entry(dc).or_default().insert(node.rack().unwrap());
        }

        for token in ring.tokens() {
            let replicas = map.replicas(token).unwrap();
            for (dc, rf) in [("dc1", rf1), ("dc2", rf2)] {
                let chosen: Vec<_> = replicas.iter().filter(|n| n.datacenter() == Some(dc)).collect();
                let available = nodes_in.get(dc).copied().unwrap_or(0);
                prop_assert_eq!(chosen.len(), rf.min(available));

                let racks_used: HashSet<_> = chosen.iter().map(|n| n.rack()).collect();
                let racks_available = racks_in.get(dc).map_or(0, HashSet::len);
                prop_assert_eq!(racks_used.len(), chosen.len().min(racks_available));
            }
        }

        prop_assert_eq!(strategy.compute_replicas_by_token(&ring), map);
    }
}
