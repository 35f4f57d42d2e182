//! Per-call traversal limits, cancellation and observation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::diagnostics::{NoopObserver, TraversalObserver};

/// Default number of nodes the depth-first enumerator may visit per call.
pub const DEFAULT_VISIT_BUDGET: usize = 100_000;

/// Shared cancellation signal.
///
/// Clones share the same flag: cancel one and every traversal holding a clone
/// stops at its next check.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Creates a flag that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once [`cancel`](Self::cancel) was called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

static NOOP_OBSERVER: NoopObserver = NoopObserver;

/// Limits and hooks for a single traversal call.
///
/// # Example
///
/// ```rust
/// use lineage_core::graph::{CancellationFlag, TraversalContext, TraversalDiagnostics};
///
/// let diagnostics = TraversalDiagnostics::new();
/// let cancel = CancellationFlag::new();
/// let ctx = TraversalContext::new()
///     .with_visit_budget(500)
///     .with_observer(&diagnostics)
///     .with_cancellation(&cancel);
///
/// assert_eq!(ctx.visit_budget(), 500);
/// assert!(!ctx.is_cancelled());
/// ```
#[derive(Clone, Copy)]
pub struct TraversalContext<'a> {
    visit_budget: usize,
    observer: &'a dyn TraversalObserver,
    cancellation: Option<&'a CancellationFlag>,
}

impl Default for TraversalContext<'_> {
    fn default() -> Self {
        Self {
            visit_budget: DEFAULT_VISIT_BUDGET,
            observer: &NOOP_OBSERVER,
            cancellation: None,
        }
    }
}

impl<'a> TraversalContext<'a> {
    /// Creates a context with the default budget, no observer and no
    /// cancellation flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of node visits (builder pattern).
    #[must_use]
    pub fn with_visit_budget(mut self, visit_budget: usize) -> Self {
        self.visit_budget = visit_budget;
        self
    }

    /// Attaches an observer (builder pattern).
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn TraversalObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Attaches a cancellation flag (builder pattern).
    #[must_use]
    pub fn with_cancellation(mut self, flag: &'a CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Returns the visit budget.
    #[must_use]
    pub fn visit_budget(&self) -> usize {
        self.visit_budget
    }

    /// Returns the attached observer.
    #[must_use]
    pub fn observer(&self) -> &'a dyn TraversalObserver {
        self.observer
    }

    /// Returns true if a cancellation flag is attached and set.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_some_and(CancellationFlag::is_cancelled)
    }
}

impl fmt::Debug for TraversalContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalContext")
            .field("visit_budget", &self.visit_budget)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}
