// Metrics hooks for the `matcher` crate.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`],
// then every [`Selector::select`](crate::Selector::select) reports its latency,
// candidate count and number of comparisons. This keeps instrumentation
// decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::{MatchError, RunningMaxPolicy};

/// Metrics observer for selections.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one selection.
    ///
    /// `candidates` is the number of records offered, `comparisons` the number
    /// of similarity computations actually performed (smaller than
    /// `3 * candidates` when an exact match ended the scan early).
    fn record_selection(
        &self,
        policy: RunningMaxPolicy,
        latency: Duration,
        candidates: usize,
        comparisons: usize,
        result: Result<(), MatchError>,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// This is typically called once during service startup.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
