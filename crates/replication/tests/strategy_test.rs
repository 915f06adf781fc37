//! Scenario tests for replica placement.
//!
//! # Test Strategy
//!
//! 1. **Factory**: configuration dispatch and fail-fast validation
//! 2. **Simple**: ring walk order, under-replication
//! 3. **NetworkTopology**: multi-datacenter rack placement
//! 4. **Stability**: repeated computation on one snapshot

use corelib::token::Murmur3Token;
use corelib::{Node, NodeId, Ring};
use replication::{
    LocalStrategy, NetworkTopologyStrategy, ReplicationConfig, ReplicationError,
    ReplicationStrategy, SimpleStrategy, Strategy,
};
use std::collections::HashSet;

fn config(entries: &[(&str, &str)]) -> ReplicationConfig {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Ring where the i-th node (in `nodes` order) owns token `i * 1000`.
fn ring_of(nodes: Vec<Node>) -> Ring<Murmur3Token> {
    nodes
        .into_iter()
        .enumerate()
        .fold(Ring::builder(), |builder, (i, node)| {
            builder.add_token(Murmur3Token(i as i64 * 1000), node)
        })
        .build()
        .unwrap()
}

fn plain(id: u128) -> Node {
    Node::new(NodeId(id), format!("node{}", id))
}

// ============================================================================
// Factory Tests
// ============================================================================

#[test]
fn test_factory_fails_before_computation() {
    assert!(matches!(
        Strategy::new_instance(&config(&[("replication_factor", "3")])),
        Err(ReplicationError::MissingClass(_))
    ));
    let err = Strategy::new_instance(&config(&[("class", "foo")])).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported replication strategy: foo");
    assert!(matches!(
        Strategy::new_instance(&config(&[
            ("class", "org.apache.cassandra.locator.SimpleStrategy"),
            ("replication_factor", "three"),
        ])),
        Err(ReplicationError::InvalidReplicationFactor { .. })
    ));
}

#[test]
fn test_factory_network_topology_factors() {
    let strategy = Strategy::new_instance(&config(&[
        ("class", "org.apache.cassandra.locator.NetworkTopologyStrategy"),
        ("dc1", "3"),
        ("dc2", "2/1"),
        ("dc3", "0"),
    ]))
    .unwrap();

    let nts = match strategy {
        Strategy::NetworkTopology(nts) => nts,
        other => panic!("expected NetworkTopologyStrategy, got {:?}", other),
    };
    assert_eq!(nts.replication_factor("dc1"), 3);
    assert_eq!(nts.replication_factor("dc2"), 1);
    assert_eq!(nts.replication_factor("dc3"), 0);
    assert_eq!(nts.replication_factor("unknown"), 0);
}

// ============================================================================
// Simple Strategy Tests
// ============================================================================

#[test]
fn test_simple_rf3_on_six_nodes() {
    let ring = ring_of((1..=6).map(plain).collect());
    let map = SimpleStrategy::new(3).unwrap().compute_replicas_by_token(&ring);

    assert_eq!(map.len(), 6);
    for (i, token) in ring.tokens().enumerate() {
        let expected: Vec<NodeId> = (0..3).map(|k| NodeId(((i + k) % 6) as u128 + 1)).collect();
        assert_eq!(map.replica_ids(token), expected, "token {}", token);
    }
}

#[test]
fn test_simple_rf10_on_four_nodes() {
    // Eight tokens, four distinct nodes
    let ring = ring_of([1, 2, 3, 4, 1, 2, 3, 4].into_iter().map(plain).collect());
    let map = SimpleStrategy::new(10).unwrap().compute_replicas_by_token(&ring);

    let all: HashSet<NodeId> = (1..=4).map(NodeId).collect();
    for token in ring.tokens() {
        let replicas: HashSet<NodeId> = map.replica_ids(token).into_iter().collect();
        assert_eq!(replicas, all);
    }
}

#[test]
fn test_simple_with_vnodes() {
    let ring = Ring::builder()
        .with_vnodes(32)
        .add_node(plain(1))
        .add_node(plain(2))
        .add_node(plain(3))
        .add_node(plain(4))
        .build()
        .unwrap();
    let map = SimpleStrategy::new(3).unwrap().compute_replicas_by_token(&ring);

    for (token, primary) in ring.entries() {
        let ids = map.replica_ids(token);
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], primary.id);
    }
}

// ============================================================================
// Network Topology Tests
// ============================================================================

/// DC1: three racks with one node each. DC2: one rack with two nodes.
fn two_datacenter_ring() -> Ring<Murmur3Token> {
    ring_of(vec![
        Node::with_topology(NodeId(1), "dc1-a", "DC1", "r1"),
        Node::with_topology(NodeId(10), "dc2-a", "DC2", "r1"),
        Node::with_topology(NodeId(2), "dc1-b", "DC1", "r2"),
        Node::with_topology(NodeId(3), "dc1-c", "DC1", "r3"),
        Node::with_topology(NodeId(11), "dc2-b", "DC2", "r1"),
    ])
}

#[test]
fn test_network_topology_per_datacenter_counts() {
    let ring = two_datacenter_ring();
    let map = NetworkTopologyStrategy::new([("DC1", 3), ("DC2", 2)]).compute_replicas_by_token(&ring);

    assert_eq!(map.len(), ring.len());
    for token in ring.tokens() {
        let replicas = map.replicas(token).unwrap();
        let in_dc = |dc: &str| replicas.iter().filter(|n| n.datacenter() == Some(dc)).count();
        assert_eq!(in_dc("DC1"), 3);
        assert_eq!(in_dc("DC2"), 2);

        let dc1_racks: HashSet<_> = replicas
            .iter()
            .filter(|n| n.datacenter() == Some("DC1"))
            .map(|n| n.rack())
            .collect();
        assert_eq!(dc1_racks.len(), 3, "one DC1 replica per rack");
    }
}

#[test]
fn test_network_topology_start_token_rotates_choice() {
    // Same layout, but DC1 only needs one replica
    let ring = two_datacenter_ring();
    let map = NetworkTopologyStrategy::new([("DC1", 1), ("DC2", 1)]).compute_replicas_by_token(&ring);

    assert_eq!(map.replica_ids(&Murmur3Token(0)), vec![NodeId(1), NodeId(10)]);
    assert_eq!(map.replica_ids(&Murmur3Token(2000)), vec![NodeId(2), NodeId(11)]);
    assert_eq!(map.replica_ids(&Murmur3Token(4000)), vec![NodeId(11), NodeId(1)]);
}

#[test]
fn test_network_topology_rack_preference_over_ring_order() {
    let ring = ring_of(vec![
        Node::with_topology(NodeId(1), "a1", "DC1", "r1"),
        Node::with_topology(NodeId(2), "a2", "DC1", "r1"),
        Node::with_topology(NodeId(3), "a3", "DC1", "r1"),
        Node::with_topology(NodeId(4), "b1", "DC1", "r2"),
    ]);
    let map = NetworkTopologyStrategy::new([("DC1", 2)]).compute_replicas_by_token(&ring);
    // Nodes 2 and 3 come first clockwise but share rack r1 with node 1
    assert_eq!(map.replica_ids(&Murmur3Token(0)), vec![NodeId(1), NodeId(4)]);
}

// ============================================================================
// Stability Tests
// ============================================================================

#[test]
fn test_repeated_computation_is_identical() {
    let ring = two_datacenter_ring();
    let strategies = [
        Strategy::Local(LocalStrategy),
        Strategy::Simple(SimpleStrategy::new(2).unwrap()),
        Strategy::NetworkTopology(NetworkTopologyStrategy::new([("DC1", 2), ("DC2", 1)])),
        Strategy::new_instance(&config(&[("class", "EverywhereStrategy")])).unwrap(),
    ];
    for strategy in strategies {
        let first = strategy.compute_replicas_by_token(&ring);
        let second = strategy.compute_replicas_by_token(&ring);
        assert_eq!(first, second, "{} must be deterministic", strategy.name());
    }
}

#[test]
fn test_concurrent_computation_on_shared_snapshot() {
    let ring = std::sync::Arc::new(two_datacenter_ring());
    let strategy = std::sync::Arc::new(NetworkTopologyStrategy::new([("DC1", 3), ("DC2", 2)]));
    let expected = strategy.compute_replicas_by_token(&ring);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ring = std::sync::Arc::clone(&ring);
            let strategy = std::sync::Arc::clone(&strategy);
            std::thread::spawn(move || strategy.compute_replicas_by_token(&ring))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
