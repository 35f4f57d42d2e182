//! Traversal direction and depth policies.
//!
//! A [`DepthPolicy`] decides, before each new depth layer is produced, whether
//! expansion may continue. The layering loop only talks to the
//! [`ExpansionPolicy`] trait, so custom stopping rules can be plugged in
//! through [`compute_layers_by`](super::layers::compute_layers_by).

use serde::{Deserialize, Serialize};

/// Which side of the lineage to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ancestors: follow parent edges.
    Parent,
    /// Descendants: follow child edges.
    Child,
}

impl Direction {
    /// Returns the other direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
        }
    }
}

/// Decides whether a traversal may produce another depth layer.
pub trait ExpansionPolicy {
    /// Returns true if the layer at `next_depth` (1-based) may be produced.
    ///
    /// `previous_layer_size` is the number of distinct ids in the layer at
    /// `next_depth - 1`; the seed counts as a layer of size 1.
    fn should_expand(
        &self,
        direction: Direction,
        next_depth: usize,
        previous_layer_size: usize,
    ) -> bool;
}

/// Built-in stopping rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DepthPolicy {
    /// Only the immediate neighbours.
    #[default]
    Nearest,
    /// Up to `parent_depth` levels of ancestors or `child_depth` levels of
    /// descendants, depending on the direction walked.
    Specific {
        /// Ancestor levels.
        parent_depth: usize,
        /// Descendant levels.
        child_depth: usize,
    },
    /// Follow the single-lineage trunk and stop at the first layer holding
    /// more than one distinct entity (that layer is still returned).
    Multi,
}

impl DepthPolicy {
    /// Returns the depth bound for a direction, if this policy has one.
    #[must_use]
    pub fn max_depth(&self, direction: Direction) -> Option<usize> {
        match *self {
            Self::Nearest => Some(1),
            Self::Specific {
                parent_depth,
                child_depth,
            } => Some(match direction {
                Direction::Parent => parent_depth,
                Direction::Child => child_depth,
            }),
            Self::Multi => None,
        }
    }
}

impl ExpansionPolicy for DepthPolicy {
    fn should_expand(
        &self,
        direction: Direction,
        next_depth: usize,
        previous_layer_size: usize,
    ) -> bool {
        match self {
            Self::Nearest | Self::Specific { .. } => self
                .max_depth(direction)
                .is_some_and(|max| next_depth <= max),
            Self::Multi => previous_layer_size <= 1,
        }
    }
}

/// Options for [`compute_layers`](super::layers::compute_layers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalOptions {
    /// Stopping rule applied before each new layer.
    pub policy: DepthPolicy,
}

impl TraversalOptions {
    /// Creates options with the given policy.
    #[must_use]
    pub fn new(policy: DepthPolicy) -> Self {
        Self { policy }
    }

    /// Immediate neighbours only.
    #[must_use]
    pub fn nearest() -> Self {
        Self::new(DepthPolicy::Nearest)
    }

    /// Bounded depth per direction.
    #[must_use]
    pub fn specific(parent_depth: usize, child_depth: usize) -> Self {
        Self::new(DepthPolicy::Specific {
            parent_depth,
            child_depth,
        })
    }

    /// Stop at the first branch point.
    #[must_use]
    pub fn multi() -> Self {
        Self::new(DepthPolicy::Multi)
    }
}
