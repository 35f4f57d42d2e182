//! In-memory lineage graph and traversal engines.
//!
//! Provides the immutable [`GraphModel`], the depth grouping engine
//! ([`compute_layers`]) and the depth-first enumerator ([`enumerate`]). Both
//! engines are pure functions over a shared `&GraphModel`.
//!
//! # Example
//!
//! ```rust
//! use lineage_core::graph::{compute_layers, enumerate, Direction, GraphModel, EntityNode, TraversalOptions};
//!
//! let mut builder = GraphModel::builder();
//! for id in ["S-1", "S-2", "S-3"] {
//!     builder.add_node(EntityNode::new(id)).unwrap();
//! }
//! builder.link("S-1", "S-2").unwrap();
//! builder.link("S-2", "S-3").unwrap();
//! let graph = builder.build();
//!
//! let ancestors = compute_layers(&graph, "S-3", Direction::Parent, &TraversalOptions::multi());
//! assert_eq!(ancestors.len(), 2);
//!
//! let rows = enumerate(&graph, "S-1", Direction::Child, 5).unwrap();
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[2].distance, 2);
//! ```

mod context;
mod diagnostics;
pub mod enumerate;
pub mod layers;
mod model;
mod policy;
mod types;

#[cfg(test)]
mod enumerate_tests;

pub use context::{CancellationFlag, TraversalContext, DEFAULT_VISIT_BUDGET};
pub use diagnostics::{DiagnosticsSnapshot, NoopObserver, TraversalDiagnostics, TraversalObserver};
pub use enumerate::{enumerate, enumerate_with, DepthFirstEntry};
pub use layers::{
    compute_layers, compute_layers_by, compute_layers_with, compute_lineage,
    compute_lineage_with, DepthLayer, LineageLayers,
};
pub use model::{GraphModel, GraphModelBuilder};
pub use policy::{DepthPolicy, Direction, ExpansionPolicy, TraversalOptions};
pub use types::{Edge, EntityNode, NodeMetadata};
