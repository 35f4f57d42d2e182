//! Depth grouping: ancestors or descendants of a seed, layer by layer.
//!
//! Expansion is gated per level by an [`ExpansionPolicy`] rather than by a
//! plain distance bound, so a policy can stop on the shape of the layer just
//! produced (see [`DepthPolicy::Multi`](super::policy::DepthPolicy::Multi)).
//!
//! A single visited set spans the whole call: every entity lands in the layer
//! where it was first discovered, the seed never appears in any layer, and
//! cycles terminate.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::context::TraversalContext;
use super::model::GraphModel;
use super::policy::{Direction, ExpansionPolicy, TraversalOptions};

/// Entities found at one distance from the seed.
///
/// Iteration order is discovery order: frontier order, then edge order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLayer {
    depth: usize,
    ids: IndexSet<String>,
}

impl DepthLayer {
    /// Returns the distance from the seed (1-based).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the entity ids in discovery order.
    #[must_use]
    pub fn ids(&self) -> &IndexSet<String> {
        &self.ids
    }

    /// Returns true if the layer holds `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns the number of entities in the layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the layer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates ids in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Ancestor and descendant layers of one seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageLayers {
    /// Ancestor layers, nearest first.
    pub parents: Vec<DepthLayer>,
    /// Descendant layers, nearest first.
    pub children: Vec<DepthLayer>,
}

impl LineageLayers {
    /// Returns the layers for one direction.
    #[must_use]
    pub fn layers(&self, direction: Direction) -> &[DepthLayer] {
        match direction {
            Direction::Parent => &self.parents,
            Direction::Child => &self.children,
        }
    }
}

/// Groups the entities reachable from `seed_id` in `direction` by depth.
///
/// Returns an empty sequence if the seed is not in the graph or has no edges
/// in `direction`.
///
/// # Example
///
/// ```rust
/// use lineage_core::graph::{compute_layers, Direction, EntityNode, GraphModel, TraversalOptions};
///
/// let graph = GraphModel::from_nodes([
///     EntityNode::new("A").with_child("B").with_child("D"),
///     EntityNode::new("B").with_child("C"),
///     EntityNode::new("C"),
///     EntityNode::new("D"),
/// ])
/// .unwrap();
///
/// let layers = compute_layers(&graph, "A", Direction::Child, &TraversalOptions::specific(0, 2));
/// assert_eq!(layers.len(), 2);
/// assert_eq!(layers[0].iter().collect::<Vec<_>>(), vec!["B", "D"]);
/// assert_eq!(layers[1].iter().collect::<Vec<_>>(), vec!["C"]);
/// ```
#[must_use]
pub fn compute_layers(
    graph: &GraphModel,
    seed_id: &str,
    direction: Direction,
    options: &TraversalOptions,
) -> Vec<DepthLayer> {
    // No cancellation flag is attached, so the walk cannot be interrupted.
    compute_layers_with(
        graph,
        seed_id,
        direction,
        options,
        &TraversalContext::default(),
    )
    .unwrap_or_default()
}

/// Like [`compute_layers`], with an observer and cancellation flag.
///
/// # Errors
///
/// Returns `Error::Cancelled` if the context's cancellation flag is set
/// before a frontier expansion.
pub fn compute_layers_with(
    graph: &GraphModel,
    seed_id: &str,
    direction: Direction,
    options: &TraversalOptions,
    ctx: &TraversalContext<'_>,
) -> Result<Vec<DepthLayer>> {
    compute_layers_by(graph, seed_id, direction, &options.policy, ctx)
}

/// Layering with an arbitrary stopping rule.
///
/// # Errors
///
/// Returns `Error::Cancelled` if the context's cancellation flag is set
/// before a frontier expansion.
pub fn compute_layers_by(
    graph: &GraphModel,
    seed_id: &str,
    direction: Direction,
    policy: &dyn ExpansionPolicy,
    ctx: &TraversalContext<'_>,
) -> Result<Vec<DepthLayer>> {
    let observer = ctx.observer();
    let mut layers: Vec<DepthLayer> = Vec::new();
    if !graph.contains(seed_id) {
        tracing::debug!(seed = seed_id, "seed not in lineage graph");
        observer.on_layers_computed(seed_id, direction, 0);
        return Ok(layers);
    }

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    visited.insert(seed_id);
    let mut frontier: Vec<&str> = vec![seed_id];
    let mut previous_layer_size = 1;

    loop {
        let next_depth = layers.len() + 1;
        if !policy.should_expand(direction, next_depth, previous_layer_size) {
            break;
        }
        if ctx.is_cancelled() {
            tracing::debug!(seed = seed_id, depth = next_depth, "layering cancelled");
            return Err(Error::Cancelled);
        }

        let mut layer: IndexSet<String> = IndexSet::new();
        let mut next_frontier: Vec<&str> = Vec::new();
        for &id in &frontier {
            for edge in graph.edges(id, direction) {
                let target = edge.target();
                let known = graph.contains(target);
                if !known {
                    observer.on_dangling_edge(id, target, direction);
                }
                if !visited.insert(target) {
                    continue;
                }
                layer.insert(target.to_string());
                if known {
                    next_frontier.push(target);
                }
            }
        }

        if layer.is_empty() {
            break;
        }
        previous_layer_size = layer.len();
        layers.push(DepthLayer {
            depth: next_depth,
            ids: layer,
        });
        frontier = next_frontier;
    }

    tracing::debug!(
        seed = seed_id,
        ?direction,
        layers = layers.len(),
        "computed lineage layers"
    );
    observer.on_layers_computed(seed_id, direction, layers.len());
    Ok(layers)
}

/// Computes ancestor and descendant layers of `seed_id` with one policy.
#[must_use]
pub fn compute_lineage(
    graph: &GraphModel,
    seed_id: &str,
    options: &TraversalOptions,
) -> LineageLayers {
    LineageLayers {
        parents: compute_layers(graph, seed_id, Direction::Parent, options),
        children: compute_layers(graph, seed_id, Direction::Child, options),
    }
}

/// Like [`compute_lineage`], with an observer and cancellation flag.
///
/// # Errors
///
/// Returns `Error::Cancelled` if the context's cancellation flag is set.
pub fn compute_lineage_with(
    graph: &GraphModel,
    seed_id: &str,
    options: &TraversalOptions,
    ctx: &TraversalContext<'_>,
) -> Result<LineageLayers> {
    Ok(LineageLayers {
        parents: compute_layers_with(graph, seed_id, Direction::Parent, options, ctx)?,
        children: compute_layers_with(graph, seed_id, Direction::Child, options, ctx)?,
    })
}
