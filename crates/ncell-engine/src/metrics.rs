//! Per-step performance metrics for the automaton.
//!
//! [`StepMetrics`] captures timing data for a single step, for logging
//! and benchmarking.

/// Timing data collected during a single step.
///
/// All durations are in microseconds. The automaton populates these
/// fields after each successful step; read them with
/// [`Automaton::last_metrics`](crate::Automaton::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent in the update sweep (mask application, rule, write),
    /// in microseconds.
    pub sweep_us: u64,
    /// Number of interior cells written.
    pub cells_updated: usize,
    /// Whether the sweep ran on the rayon pool.
    pub parallel: bool,
}

impl StepMetrics {
    /// Cells updated per second of sweep time, or `None` for a sweep
    /// that took under a microsecond.
    pub fn cells_per_second(&self) -> Option<f64> {
        (self.sweep_us > 0).then(|| self.cells_updated as f64 * 1e6 / self.sweep_us as f64)
    }
}
