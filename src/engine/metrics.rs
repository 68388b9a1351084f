//! Merge run metrics.
//!
//! The intended usage is:
//!
//! - `Merger::merge` for normal operation.
//! - `Merger::merge_with_metrics` for debugging rule sets and inspecting
//!   which rule fired where in each pass.
//!
//! Events carry the merged chunk's rendered text, so they allocate; the
//! plain `merge` path still collects them but drops them on return.

use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

/// One applied merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeEvent {
    /// 1-based pass number.
    pub pass: usize,
    /// Index of the first replaced chunk in the sequence at merge time.
    pub position: usize,
    pub rule_id: String,
    /// Number of chunks replaced by the merged one.
    pub consumed: usize,
    /// Rendered merged chunk, `[CODE] text`.
    pub text: String,
}

/// Timing and merge counts for a single pass.
#[derive(Debug, Default, Clone)]
pub struct PassMetrics {
    pub pass: usize,
    /// Elapsed time for the pass.
    pub duration: Duration,
    pub merges: usize,
    pub chunks_before: usize,
    pub chunks_after: usize,
    /// Rules left after category gating.
    pub rules_considered: usize,
    pub events: Vec<MergeEvent>,
}

/// Totals for a whole merge run.
#[derive(Debug, Default, Clone)]
pub struct MergeMetrics {
    pub total: Duration,
    pub passes: Vec<PassMetrics>,
    pub total_merges: usize,
    /// True when the last pass made no merge.
    pub converged: bool,
}

impl MergeMetrics {
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Every merge event across passes, in application order.
    pub fn events(&self) -> impl Iterator<Item = &MergeEvent> + '_ {
        self.passes.iter().flat_map(|p| p.events.iter())
    }
}
