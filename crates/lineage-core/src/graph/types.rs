//! Entity and edge types for lineage graphs.
//!
//! An [`EntityNode`] is one vertex of the derivation graph (a sample, a
//! material, a data object). It owns two ordered edge lists: edges to the
//! entities it was derived from (parents) and edges to the entities derived
//! from it (children).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::policy::Direction;

/// A reference from one entity to another.
///
/// Edges have no identity of their own. `position` fixes the traversal order
/// among the edges of one node; equal positions keep declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Edge {
    target: String,
    position: u32,
}

impl Edge {
    /// Creates an edge to `target` at the given ordering position.
    #[must_use]
    pub fn new(target: &str, position: u32) -> Self {
        Self {
            target: target.to_string(),
            position,
        }
    }

    /// Returns the id of the entity this edge points to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the ordering position.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }
}

/// Display metadata carried through traversal untouched.
///
/// Owned by whoever builds the graph; the traversal engine never reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeMetadata {
    /// Entity category, e.g. `"Sample"` or `"Material"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Key the rendering layer uses to pick a badge icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_key: Option<String>,
    /// Any further display properties.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
}

impl NodeMetadata {
    /// Creates metadata with a category and icon key.
    #[must_use]
    pub fn new(category: &str, icon_key: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            icon_key: Some(icon_key.to_string()),
            properties: HashMap::new(),
        }
    }

    /// Adds a display property (builder pattern).
    #[must_use]
    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }
}

/// A vertex in the lineage graph.
///
/// # Example
///
/// ```rust
/// use lineage_core::graph::{Direction, EntityNode};
///
/// let node = EntityNode::new("urn:lsid:sample:S-2")
///     .with_parent("urn:lsid:sample:S-1")
///     .with_child("urn:lsid:sample:S-3")
///     .with_child("urn:lsid:sample:S-4");
///
/// assert_eq!(node.parent_edges().len(), 1);
/// assert_eq!(node.edges(Direction::Child)[1].target(), "urn:lsid:sample:S-4");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityNode {
    id: String,
    #[serde(default)]
    parent_edges: Vec<Edge>,
    #[serde(default)]
    child_edges: Vec<Edge>,
    #[serde(default)]
    metadata: NodeMetadata,
}

impl EntityNode {
    /// Creates a node with no edges and empty metadata.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_edges: Vec::new(),
            child_edges: Vec::new(),
            metadata: NodeMetadata::default(),
        }
    }

    /// Appends a parent edge after the existing ones (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent_id: &str) -> Self {
        let position = next_position(&self.parent_edges);
        self.parent_edges.push(Edge::new(parent_id, position));
        self
    }

    /// Appends a child edge after the existing ones (builder pattern).
    #[must_use]
    pub fn with_child(mut self, child_id: &str) -> Self {
        let position = next_position(&self.child_edges);
        self.child_edges.push(Edge::new(child_id, position));
        self
    }

    /// Adds a parent edge with an explicit position (builder pattern).
    #[must_use]
    pub fn with_parent_edge(mut self, edge: Edge) -> Self {
        self.parent_edges.push(edge);
        self
    }

    /// Adds a child edge with an explicit position (builder pattern).
    #[must_use]
    pub fn with_child_edge(mut self, edge: Edge) -> Self {
        self.child_edges.push(edge);
        self
    }

    /// Sets the display metadata (builder pattern).
    #[must_use]
    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the entity id (lsid).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the edges to ancestors.
    #[must_use]
    pub fn parent_edges(&self) -> &[Edge] {
        &self.parent_edges
    }

    /// Returns the edges to descendants.
    #[must_use]
    pub fn child_edges(&self) -> &[Edge] {
        &self.child_edges
    }

    /// Returns the edges in the given direction.
    #[must_use]
    pub fn edges(&self, direction: Direction) -> &[Edge] {
        match direction {
            Direction::Parent => &self.parent_edges,
            Direction::Child => &self.child_edges,
        }
    }

    /// Returns the display metadata.
    #[must_use]
    pub fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    pub(crate) fn edges_mut(&mut self, direction: Direction) -> &mut Vec<Edge> {
        match direction {
            Direction::Parent => &mut self.parent_edges,
            Direction::Child => &mut self.child_edges,
        }
    }

    /// Stable-sorts both edge lists by position.
    pub(crate) fn sort_edges(&mut self) {
        self.parent_edges.sort_by_key(Edge::position);
        self.child_edges.sort_by_key(Edge::position);
    }
}

/// Position one past the highest existing position.
pub(crate) fn next_position(edges: &[Edge]) -> u32 {
    edges
        .iter()
        .map(Edge::position)
        .max()
        .map_or(0, |p| p.saturating_add(1))
}
