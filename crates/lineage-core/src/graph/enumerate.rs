//! Depth-first unrolling of a lineage graph into a flat, annotated list.
//!
//! The output models a tree view: there is no visited set, so an entity
//! reachable along several paths is emitted once per path, each time with the
//! length of that path. The walk runs on an explicit work stack and counts
//! every visit against the context's budget, which bounds the work on cyclic
//! or densely re-converging input regardless of `max_distance`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::context::TraversalContext;
use super::model::GraphModel;
use super::policy::Direction;

/// Number of stack pops between two cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 256;

/// One row of a depth-first unrolling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepthFirstEntry {
    /// Entity id.
    pub id: String,
    /// Edges traversed from the seed along this path (0 for the seed).
    pub distance: usize,
}

impl DepthFirstEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(id: &str, distance: usize) -> Self {
        Self {
            id: id.to_string(),
            distance,
        }
    }
}

/// Preorder walk from `seed_id` in `direction`, up to `max_distance` edges.
///
/// Uses [`DEFAULT_VISIT_BUDGET`](super::context::DEFAULT_VISIT_BUDGET).
/// Returns an empty list if the seed is not in the graph.
///
/// # Errors
///
/// Returns `Error::TraversalLimitExceeded` if more nodes would be visited
/// than the budget allows.
///
/// # Example
///
/// ```rust
/// use lineage_core::graph::{enumerate, DepthFirstEntry, Direction, EntityNode, GraphModel};
///
/// let graph = GraphModel::from_nodes([
///     EntityNode::new("A").with_child("B").with_child("D"),
///     EntityNode::new("B").with_child("C"),
///     EntityNode::new("C"),
///     EntityNode::new("D"),
/// ])
/// .unwrap();
///
/// let entries = enumerate(&graph, "A", Direction::Child, 2).unwrap();
/// assert_eq!(
///     entries,
///     vec![
///         DepthFirstEntry::new("A", 0),
///         DepthFirstEntry::new("B", 1),
///         DepthFirstEntry::new("C", 2),
///         DepthFirstEntry::new("D", 1),
///     ]
/// );
/// ```
pub fn enumerate(
    graph: &GraphModel,
    seed_id: &str,
    direction: Direction,
    max_distance: usize,
) -> Result<Vec<DepthFirstEntry>> {
    enumerate_with(
        graph,
        seed_id,
        direction,
        max_distance,
        &TraversalContext::default(),
    )
}

/// Like [`enumerate`], with an explicit budget, observer and cancellation.
///
/// # Errors
///
/// Returns `Error::TraversalLimitExceeded` when the visit budget is spent and
/// `Error::Cancelled` when the cancellation flag is observed.
pub fn enumerate_with(
    graph: &GraphModel,
    seed_id: &str,
    direction: Direction,
    max_distance: usize,
    ctx: &TraversalContext<'_>,
) -> Result<Vec<DepthFirstEntry>> {
    let observer = ctx.observer();
    let mut entries: Vec<DepthFirstEntry> = Vec::new();
    if !graph.contains(seed_id) {
        tracing::debug!(seed = seed_id, "seed not in lineage graph");
        observer.on_entries_enumerated(seed_id, direction, 0);
        return Ok(entries);
    }

    let budget = ctx.visit_budget();
    let mut stack: Vec<(&str, usize)> = vec![(seed_id, 0)];
    let mut visits = 0usize;

    while let Some((id, distance)) = stack.pop() {
        if visits % CANCEL_CHECK_INTERVAL == 0 && ctx.is_cancelled() {
            tracing::debug!(seed = seed_id, visits, "enumeration cancelled");
            return Err(Error::Cancelled);
        }
        visits += 1;
        if visits > budget {
            tracing::warn!(
                seed = seed_id,
                budget,
                ?direction,
                max_distance,
                "lineage enumeration exceeded visit budget"
            );
            observer.on_budget_exceeded(seed_id, budget);
            return Err(Error::TraversalLimitExceeded {
                seed: seed_id.to_string(),
                budget,
            });
        }

        entries.push(DepthFirstEntry::new(id, distance));
        if distance >= max_distance {
            continue;
        }

        let Some(node) = graph.get(id) else {
            continue;
        };
        // Reverse so the first edge is popped first.
        for edge in node.edges(direction).iter().rev() {
            let target = edge.target();
            if !graph.contains(target) {
                observer.on_dangling_edge(id, target, direction);
            }
            stack.push((target, distance + 1));
        }
    }

    tracing::debug!(
        seed = seed_id,
        ?direction,
        max_distance,
        entries = entries.len(),
        "enumerated lineage"
    );
    observer.on_entries_enumerated(seed_id, direction, entries.len());
    Ok(entries)
}
