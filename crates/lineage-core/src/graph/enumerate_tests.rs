//! Tests for depth-first enumeration.

use super::context::{CancellationFlag, TraversalContext};
use super::diagnostics::TraversalDiagnostics;
use super::enumerate::{enumerate, enumerate_with, DepthFirstEntry};
use super::model::GraphModel;
use super::policy::Direction;
use super::types::EntityNode;
use crate::error::Error;

fn build_graph(ids: &[&str], links: &[(&str, &str)]) -> GraphModel {
    let mut builder = GraphModel::builder();
    for id in ids {
        builder.add_node(EntityNode::new(id)).unwrap();
    }
    for (parent, child) in links {
        builder.link(parent, child).unwrap();
    }
    builder.build()
}

fn rows(entries: &[DepthFirstEntry]) -> Vec<(&str, usize)> {
    entries
        .iter()
        .map(|e| (e.id.as_str(), e.distance))
        .collect()
}

#[test]
fn test_enumerate_small_tree_preorder() {
    let graph = build_graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("A", "D")]);
    let entries = enumerate(&graph, "A", Direction::Child, 2).unwrap();
    assert_eq!(rows(&entries), vec![("A", 0), ("B", 1), ("C", 2), ("D", 1)]);
}

#[test]
fn test_enumerate_respects_max_distance() {
    // 1 → 2 → 3 → 4
    let graph = build_graph(&["1", "2", "3", "4"], &[("1", "2"), ("2", "3"), ("3", "4")]);

    let entries = enumerate(&graph, "1", Direction::Child, 1).unwrap();
    assert_eq!(rows(&entries), vec![("1", 0), ("2", 1)]);

    let entries = enumerate(&graph, "4", Direction::Parent, 10).unwrap();
    assert_eq!(rows(&entries), vec![("4", 0), ("3", 1), ("2", 2), ("1", 3)]);
}

#[test]
fn test_enumerate_zero_distance_is_seed_only() {
    let graph = build_graph(&["A", "B"], &[("A", "B")]);
    let entries = enumerate(&graph, "A", Direction::Child, 0).unwrap();
    assert_eq!(rows(&entries), vec![("A", 0)]);
}

#[test]
fn test_enumerate_diamond_emits_once_per_path() {
    // 1 → 2 → 4, 1 → 3 → 4
    let graph = build_graph(
        &["1", "2", "3", "4"],
        &[("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")],
    );
    let entries = enumerate(&graph, "1", Direction::Child, 5).unwrap();
    assert_eq!(
        rows(&entries),
        vec![("1", 0), ("2", 1), ("4", 2), ("3", 1), ("4", 2)]
    );
}

#[test]
fn test_enumerate_paths_of_different_lengths() {
    // A → B → D, A → D
    let graph = build_graph(&["A", "B", "D"], &[("A", "B"), ("B", "D"), ("A", "D")]);
    let entries = enumerate(&graph, "A", Direction::Child, 3).unwrap();
    assert_eq!(rows(&entries), vec![("A", 0), ("B", 1), ("D", 2), ("D", 1)]);
}

#[test]
fn test_enumerate_missing_seed() {
    let graph = build_graph(&["A"], &[]);
    let entries = enumerate(&graph, "missing", Direction::Child, 3).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_enumerate_missing_seed_counts_as_completed_traversal() {
    let graph = build_graph(&["A"], &[]);
    let diagnostics = TraversalDiagnostics::new();
    let ctx = TraversalContext::new().with_observer(&diagnostics);

    let entries = enumerate_with(&graph, "missing", Direction::Parent, 3, &ctx).unwrap();

    assert!(entries.is_empty());
    assert_eq!(diagnostics.traversals(), 1);
    assert_eq!(diagnostics.items_emitted(), 0);
}

#[test]
fn test_enumerate_cycle_bounded_by_distance() {
    // 1 → 2 → 3 → 1
    let graph = build_graph(&["1", "2", "3"], &[("1", "2"), ("2", "3"), ("3", "1")]);
    let entries = enumerate(&graph, "1", Direction::Child, 4).unwrap();
    assert_eq!(
        rows(&entries),
        vec![("1", 0), ("2", 1), ("3", 2), ("1", 3), ("2", 4)]
    );
}

#[test]
fn test_enumerate_cycle_unbounded_distance_hits_budget() {
    let graph = build_graph(&["1", "2"], &[("1", "2"), ("2", "1")]);
    let diagnostics = TraversalDiagnostics::new();
    let ctx = TraversalContext::new()
        .with_visit_budget(50)
        .with_observer(&diagnostics);

    let err = enumerate_with(&graph, "1", Direction::Child, usize::MAX, &ctx).unwrap_err();
    assert_eq!(
        err,
        Error::TraversalLimitExceeded {
            seed: "1".to_string(),
            budget: 50,
        }
    );
    assert_eq!(diagnostics.budget_exceeded(), 1);
    assert_eq!(diagnostics.traversals(), 0);
}

#[test]
fn test_enumerate_budget_exactly_sufficient() {
    let graph = build_graph(&["A", "B", "C"], &[("A", "B"), ("A", "C")]);
    let ctx = TraversalContext::new().with_visit_budget(3);
    let entries = enumerate_with(&graph, "A", Direction::Child, 1, &ctx).unwrap();
    assert_eq!(entries.len(), 3);

    let ctx = TraversalContext::new().with_visit_budget(2);
    assert!(enumerate_with(&graph, "A", Direction::Child, 1, &ctx).is_err());
}

#[test]
fn test_enumerate_dense_cycle_with_default_budget() {
    // Complete digraph on 4 nodes: breadth explodes combinatorially.
    let ids = ["a", "b", "c", "d"];
    let mut links = Vec::new();
    for from in ids {
        for to in ids {
            if from != to {
                links.push((from, to));
            }
        }
    }
    let graph = build_graph(&ids, &links);
    let result = enumerate(&graph, "a", Direction::Child, 30);
    assert!(matches!(result, Err(Error::TraversalLimitExceeded { .. })));
}

#[test]
fn test_enumerate_dangling_edge_emitted_as_leaf() {
    let graph = GraphModel::from_nodes([
        EntityNode::new("A").with_child("ghost").with_child("B"),
        EntityNode::new("B"),
    ])
    .unwrap();
    let diagnostics = TraversalDiagnostics::new();
    let ctx = TraversalContext::new().with_observer(&diagnostics);

    let entries = enumerate_with(&graph, "A", Direction::Child, 3, &ctx).unwrap();
    assert_eq!(rows(&entries), vec![("A", 0), ("ghost", 1), ("B", 1)]);
    assert_eq!(diagnostics.dangling_edges(), 1);
    assert_eq!(diagnostics.items_emitted(), 3);
}

#[test]
fn test_enumerate_cancelled() {
    let graph = build_graph(&["A", "B"], &[("A", "B")]);
    let flag = CancellationFlag::new();
    flag.cancel();
    let ctx = TraversalContext::new().with_cancellation(&flag);
    let result = enumerate_with(&graph, "A", Direction::Child, 3, &ctx);
    assert_eq!(result, Err(Error::Cancelled));
}

#[test]
fn test_entry_serializes_for_rendering() {
    let entry = DepthFirstEntry::new("S-1", 2);
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json, serde_json::json!({"id": "S-1", "distance": 2}));
}
