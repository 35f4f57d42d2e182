//! Fuzz target for lineage traversal over arbitrary (possibly cyclic) graphs.
//!
//! Looks for:
//! - Panics on self-loops, cycles, dangling edges and duplicate links
//! - Non-termination of layering or enumeration
//! - Violations of the one-layer-per-id invariant
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_lineage_traversal
//! ```

#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lineage_core::graph::{
    compute_layers, enumerate_with, Direction, EntityNode, GraphModel, TraversalContext,
    TraversalOptions,
};

/// Fuzzing input describing a small lineage graph.
#[derive(Arbitrary, Debug)]
struct LineageInput {
    /// Number of registered nodes (bounded below).
    nodes: u8,
    /// Child edges as (from, to); `to` may exceed `nodes` to create dangling edges.
    links: Vec<(u8, u8)>,
    /// Seed index.
    seed: u8,
    /// Policy selector and depth.
    policy: u8,
    depth: u8,
    /// Enumeration distance bound.
    max_distance: u8,
    parent_direction: bool,
}

fuzz_target!(|input: LineageInput| {
    let count = usize::from(input.nodes % 32) + 1;
    let mut nodes: Vec<EntityNode> = (0..count)
        .map(|i| EntityNode::new(&format!("n{i}")))
        .collect();
    for &(from, to) in input.links.iter().take(256) {
        let from = usize::from(from) % count;
        let to_id = format!("n{}", to % 40);
        let node = std::mem::replace(&mut nodes[from], EntityNode::new("tmp"));
        nodes[from] = node.with_child(&to_id).with_parent(&to_id);
    }
    let Ok(graph) = GraphModel::from_nodes(nodes) else {
        return;
    };

    let direction = if input.parent_direction {
        Direction::Parent
    } else {
        Direction::Child
    };
    let depth = usize::from(input.depth % 16);
    let options = match input.policy % 3 {
        0 => TraversalOptions::nearest(),
        1 => TraversalOptions::specific(depth, depth),
        _ => TraversalOptions::multi(),
    };
    let seed = format!("n{}", input.seed % 40);

    let layers = compute_layers(&graph, &seed, direction, &options);
    let mut seen = HashSet::new();
    for layer in &layers {
        for id in layer.iter() {
            assert_ne!(id, seed);
            assert!(seen.insert(id.to_string()));
        }
    }

    let ctx = TraversalContext::new().with_visit_budget(4096);
    let _ = enumerate_with(
        &graph,
        &seed,
        direction,
        usize::from(input.max_distance),
        &ctx,
    );
});
