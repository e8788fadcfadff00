//! Per-press performance metrics.

/// Metrics for the most recent completed press.
///
/// Returned by [`PressEngine::last_metrics()`](crate::PressEngine::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PressMetrics {
    /// Wall-clock duration of the press in microseconds.
    pub total_us: u64,
    /// Pulses dequeued and delivered during the press.
    pub pulses: u64,
    /// Deepest the pulse queue got during the press.
    pub peak_queue_len: usize,
}
