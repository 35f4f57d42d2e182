//! Error types for lineage-core.
//!
//! Only structural problems while building a graph, resource exhaustion and
//! cancellation surface as errors. A missing seed or a dangling edge is
//! tolerated by every traversal and produces an empty or truncated result.

use thiserror::Error;

/// Lineage engine error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node with this id was already added to the graph builder.
    #[error("Entity '{0}' already exists in the graph")]
    NodeExists(String),

    /// A node referenced while building the graph does not exist.
    #[error("Entity '{0}' not found in the graph")]
    NodeNotFound(String),

    /// Entity ids must be non-empty.
    #[error("Invalid entity id: {0}")]
    InvalidEntityId(String),

    /// The depth-first enumerator visited more nodes than its budget allows.
    #[error("Traversal from '{seed}' exceeded the visit budget of {budget} nodes")]
    TraversalLimitExceeded {
        /// Seed the traversal started from.
        seed: String,
        /// Budget that was exhausted.
        budget: usize,
    },

    /// The caller cancelled the traversal.
    #[error("Traversal cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns a stable code for user-facing reporting.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NodeExists(_) => "LINEAGE-001",
            Self::NodeNotFound(_) => "LINEAGE-002",
            Self::InvalidEntityId(_) => "LINEAGE-003",
            Self::TraversalLimitExceeded { .. } => "LINEAGE-004",
            Self::Cancelled => "LINEAGE-005",
            Self::Config(_) => "LINEAGE-006",
        }
    }

    /// Returns true when the caller may retry with a smaller radius or
    /// truncate the view instead of reporting a failure.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TraversalLimitExceeded { .. } | Self::Cancelled)
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for lineage operations.
pub type Result<T> = std::result::Result<T, Error>;
