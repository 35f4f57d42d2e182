//! # lineage-core
//!
//! Derivation-lineage traversal engine for laboratory data.
//!
//! Entities (samples, materials, data objects) are linked by "derived-from"
//! edges. Given an immutable [`GraphModel`](graph::GraphModel) fetched by a
//! query layer, this crate computes:
//!
//! - **Depth layers**: ancestors or descendants of a seed grouped by distance,
//!   under a `Nearest`, `Specific` or `Multi` stopping policy
//!   ([`compute_layers`](graph::compute_layers)).
//! - **Depth-first rows**: a preorder unrolling of the graph annotated with
//!   per-path distance, for tree tables ([`enumerate`](graph::enumerate)).
//!
//! Both are pure functions. They tolerate missing seeds and dangling edges,
//! terminate on cyclic input, and report dangling edges through an optional
//! [`TraversalObserver`](graph::TraversalObserver).
//!
//! ## Quick Start
//!
//! ```rust
//! use lineage_core::graph::{
//!     compute_layers, enumerate, Direction, EntityNode, GraphModel, TraversalOptions,
//! };
//!
//! fn main() -> lineage_core::Result<()> {
//!     let graph = GraphModel::from_nodes([
//!         EntityNode::new("A").with_child("B").with_child("D"),
//!         EntityNode::new("B").with_parent("A").with_child("C"),
//!         EntityNode::new("C").with_parent("B"),
//!         EntityNode::new("D").with_parent("A"),
//!     ])?;
//!
//!     let layers = compute_layers(&graph, "A", Direction::Child, &TraversalOptions::specific(0, 2));
//!     assert_eq!(layers.len(), 2);
//!
//!     let rows = enumerate(&graph, "C", Direction::Parent, 10)?;
//!     assert_eq!(rows.len(), 3);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::uninlined_format_args, clippy::manual_assert))]

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;

pub use config::{LineageConfig, LogFormat, LoggingConfig, PolicyKind, TraversalSettings};
pub use error::{Error, Result};
