//! Immutable lineage graph keyed by entity id.
//!
//! A [`GraphModel`] is assembled once through [`GraphModelBuilder`] from a
//! neighbourhood fetched by the query layer and is read-only afterwards, so a
//! single model can be shared across threads and traversals without locking.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

use super::policy::Direction;
use super::types::{next_position, Edge, EntityNode};

/// Read-only mapping from entity id to [`EntityNode`].
///
/// Edges may point at ids that are not present. Such dangling edges are
/// tolerated: traversal treats their targets as leaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    nodes: FxHashMap<String, EntityNode>,
}

impl GraphModel {
    /// Returns a builder for a new model.
    #[must_use]
    pub fn builder() -> GraphModelBuilder {
        GraphModelBuilder::new()
    }

    /// Builds a model from a list of nodes.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeExists` on a duplicate id and
    /// `Error::InvalidEntityId` on an empty id.
    pub fn from_nodes<I>(nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = EntityNode>,
    {
        let mut builder = GraphModelBuilder::new();
        for node in nodes {
            builder.add_node(node)?;
        }
        Ok(builder.build())
    }

    /// Gets a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EntityNode> {
        self.nodes.get(id)
    }

    /// Returns true if a node with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the model holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns all node ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Returns all nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &EntityNode> {
        self.nodes.values()
    }

    /// Returns the edges of `id` in `direction`, or an empty slice when the
    /// node is unknown.
    #[must_use]
    pub fn edges(&self, id: &str, direction: Direction) -> &[Edge] {
        match self.nodes.get(id) {
            Some(node) => node.edges(direction),
            None => &[],
        }
    }

    /// Lists every edge whose target is missing from the model as
    /// `(from, to, direction)`, sorted for stable output.
    #[must_use]
    pub fn dangling_edges(&self) -> Vec<(String, String, Direction)> {
        let mut dangling: Vec<(String, String, Direction)> = self
            .nodes
            .values()
            .flat_map(|node| {
                [Direction::Parent, Direction::Child]
                    .into_iter()
                    .flat_map(move |direction| {
                        node.edges(direction)
                            .iter()
                            .map(move |edge| (node, edge, direction))
                    })
            })
            .filter(|(_, edge, _)| !self.nodes.contains_key(edge.target()))
            .map(|(node, edge, direction)| {
                (node.id().to_string(), edge.target().to_string(), direction)
            })
            .collect();
        dangling.sort();
        dangling
    }
}

impl Serialize for GraphModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut nodes: Vec<&EntityNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id().cmp(b.id()));
        nodes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GraphModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let nodes = Vec::<EntityNode>::deserialize(deserializer)?;
        Self::from_nodes(nodes).map_err(serde::de::Error::custom)
    }
}

/// Collects nodes and reciprocal links, then freezes them into a
/// [`GraphModel`].
///
/// # Example
///
/// ```rust
/// use lineage_core::graph::{EntityNode, GraphModel};
///
/// let mut builder = GraphModel::builder();
/// builder.add_node(EntityNode::new("S-1")).unwrap();
/// builder.add_node(EntityNode::new("S-2")).unwrap();
/// builder.link("S-1", "S-2").unwrap();
///
/// let graph = builder.build();
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.get("S-2").unwrap().parent_edges()[0].target(), "S-1");
/// ```
#[derive(Debug, Default)]
pub struct GraphModelBuilder {
    nodes: FxHashMap<String, EntityNode>,
}

impl GraphModelBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(expected_nodes: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(expected_nodes, Default::default()),
        }
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEntityId` if the id is empty or whitespace-only,
    /// and `Error::NodeExists` if a node with the same id was already added.
    pub fn add_node(&mut self, node: EntityNode) -> Result<()> {
        if node.id().trim().is_empty() {
            return Err(Error::InvalidEntityId(
                "Entity id cannot be empty or whitespace-only".to_string(),
            ));
        }
        if self.nodes.contains_key(node.id()) {
            return Err(Error::NodeExists(node.id().to_string()));
        }
        self.nodes.insert(node.id().to_string(), node);
        Ok(())
    }

    /// Records that `child_id` was derived from `parent_id`.
    ///
    /// Appends a child edge to the parent and a parent edge to the child, each
    /// after the node's existing edges.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if either endpoint has not been added.
    pub fn link(&mut self, parent_id: &str, child_id: &str) -> Result<()> {
        for id in [parent_id, child_id] {
            if !self.nodes.contains_key(id) {
                return Err(Error::NodeNotFound(id.to_string()));
            }
        }
        self.push_link(parent_id, child_id, Direction::Child);
        Ok(())
    }

    /// Returns true if a node with the given id was added.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the number of nodes added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Freezes the collected nodes, ordering every edge list by position.
    #[must_use]
    pub fn build(mut self) -> GraphModel {
        for node in self.nodes.values_mut() {
            node.sort_edges();
        }
        GraphModel { nodes: self.nodes }
    }

    /// Appends `from → to` in `direction` and the reverse edge on `to`.
    fn push_link(&mut self, from: &str, to: &str, direction: Direction) {
        for (node_id, target, side) in [(from, to, direction), (to, from, direction.opposite())] {
            if let Some(node) = self.nodes.get_mut(node_id) {
                let edges = node.edges_mut(side);
                let position = next_position(edges);
                edges.push(Edge::new(target, position));
            }
        }
    }
}
