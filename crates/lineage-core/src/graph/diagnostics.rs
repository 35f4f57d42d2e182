//! Observable traversal signals.
//!
//! Traversals never fail on dangling edges; they report them through a
//! [`TraversalObserver`] instead. [`TraversalDiagnostics`] is a thread-safe
//! counter implementation that can be shared across concurrent traversals.

use std::sync::atomic::{AtomicU64, Ordering};

use super::policy::Direction;

/// Hook invoked by traversals. Every method defaults to a no-op.
pub trait TraversalObserver: Send + Sync {
    /// An edge from `from` pointed at `to`, which is absent from the graph.
    ///
    /// Called once per edge followed, so two entities sharing a missing
    /// target produce two calls.
    fn on_dangling_edge(&self, _from: &str, _to: &str, _direction: Direction) {}

    /// A depth-first enumeration from `seed` ran out of its visit budget.
    fn on_budget_exceeded(&self, _seed: &str, _budget: usize) {}

    /// Layering from `seed` finished with `layers` layers.
    fn on_layers_computed(&self, _seed: &str, _direction: Direction, _layers: usize) {}

    /// Enumeration from `seed` finished with `entries` entries.
    fn on_entries_enumerated(&self, _seed: &str, _direction: Direction, _entries: usize) {}
}

/// Observer that ignores every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TraversalObserver for NoopObserver {}

/// Point-in-time copy of [`TraversalDiagnostics`] counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsSnapshot {
    /// Dangling edges encountered.
    pub dangling_edges: u64,
    /// Enumerations aborted by the visit budget.
    pub budget_exceeded: u64,
    /// Completed traversals (layering and enumeration), including those that
    /// returned nothing because the seed was unknown. Cancelled or
    /// budget-aborted calls are not counted.
    pub traversals: u64,
    /// Layers plus entries produced by completed traversals.
    pub items_emitted: u64,
}

/// Counting observer.
///
/// Counters use relaxed atomics; values are exact once all traversals that
/// share the observer have returned.
#[derive(Debug, Default)]
pub struct TraversalDiagnostics {
    dangling_edges: AtomicU64,
    budget_exceeded: AtomicU64,
    traversals: AtomicU64,
    items_emitted: AtomicU64,
}

impl TraversalDiagnostics {
    /// Creates a diagnostics counter set starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of dangling edges encountered.
    #[must_use]
    pub fn dangling_edges(&self) -> u64 {
        self.dangling_edges.load(Ordering::Relaxed)
    }

    /// Returns how many enumerations hit their visit budget.
    #[must_use]
    pub fn budget_exceeded(&self) -> u64 {
        self.budget_exceeded.load(Ordering::Relaxed)
    }

    /// Returns the number of completed traversals.
    #[must_use]
    pub fn traversals(&self) -> u64 {
        self.traversals.load(Ordering::Relaxed)
    }

    /// Returns the number of layers and entries produced.
    #[must_use]
    pub fn items_emitted(&self) -> u64 {
        self.items_emitted.load(Ordering::Relaxed)
    }

    /// Copies all counters.
    #[must_use]
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            dangling_edges: self.dangling_edges(),
            budget_exceeded: self.budget_exceeded(),
            traversals: self.traversals(),
            items_emitted: self.items_emitted(),
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.dangling_edges.store(0, Ordering::Relaxed);
        self.budget_exceeded.store(0, Ordering::Relaxed);
        self.traversals.store(0, Ordering::Relaxed);
        self.items_emitted.store(0, Ordering::Relaxed);
    }

    fn record_completion(&self, items: usize) {
        self.traversals.fetch_add(1, Ordering::Relaxed);
        self.items_emitted
            .fetch_add(u64::try_from(items).unwrap_or(u64::MAX), Ordering::Relaxed);
    }
}

impl TraversalObserver for TraversalDiagnostics {
    fn on_dangling_edge(&self, from: &str, to: &str, direction: Direction) {
        tracing::trace!(from, to, ?direction, "dangling lineage edge");
        self.dangling_edges.fetch_add(1, Ordering::Relaxed);
    }

    fn on_budget_exceeded(&self, _seed: &str, _budget: usize) {
        self.budget_exceeded.fetch_add(1, Ordering::Relaxed);
    }

    fn on_layers_computed(&self, _seed: &str, _direction: Direction, layers: usize) {
        self.record_completion(layers);
    }

    fn on_entries_enumerated(&self, _seed: &str, _direction: Direction, entries: usize) {
        self.record_completion(entries);
    }
}
