//! The press engine: a strict-FIFO pulse dispatcher.
//!
//! [`PressEngine`] owns the network and a pulse queue, and drives one
//! full button press to quiescence per [`press()`](PressEngine::press)
//! call. FIFO order is load-bearing: outputs are enqueued rather than
//! delivered depth-first, so every pulse of one wave completes before
//! any of its consequences fire. A depth-first variant would produce
//! different, wrong per-press counts.

use std::collections::VecDeque;
use std::time::Instant;

use cascade_core::{BuildError, Fingerprint, Level, ModuleDef, NodeId, PressId, Pulse, StepError};
use smallvec::SmallVec;

use crate::metrics::PressMetrics;
use crate::network::Network;

// ── SinkTrace ───────────────────────────────────────────────────

/// Deliveries to the watched node during a single press.
///
/// Cleared at the start of every press. Empty when no node is watched
/// or nothing reached it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SinkTrace {
    deliveries: SmallVec<[(NodeId, Level); 8]>,
}

impl SinkTrace {
    /// All deliveries as `(source, level)`, in arrival order.
    pub fn deliveries(&self) -> &[(NodeId, Level)] {
        &self.deliveries
    }

    /// Number of deliveries.
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    /// Whether nothing was delivered this press.
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Low deliveries this press.
    pub fn low_count(&self) -> u64 {
        self.deliveries.iter().filter(|(_, l)| l.is_low()).count() as u64
    }

    /// High deliveries this press.
    pub fn high_count(&self) -> u64 {
        self.deliveries.iter().filter(|(_, l)| l.is_high()).count() as u64
    }

    /// Whether exactly one low pulse was delivered this press.
    ///
    /// This is the sink-target stopping condition. A press with zero
    /// deliveries is simply unsatisfying, not an error.
    pub fn is_lone_low(&self) -> bool {
        self.low_count() == 1
    }

    fn push(&mut self, source: NodeId, level: Level) {
        self.deliveries.push((source, level));
    }
}

// ── PressRecord ─────────────────────────────────────────────────

/// Aggregate of one completed button press.
///
/// Created fresh at the start of a press, finalized when the queue
/// drains. The fingerprint is the post-press flip-flop snapshot used
/// for cycle detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PressRecord {
    /// 1-based id of the press this record describes.
    pub press: PressId,
    /// Low pulses dequeued during the press (the synthetic button pulse
    /// included, per the counting contract).
    pub low: u64,
    /// High pulses dequeued during the press.
    pub high: u64,
    /// Flip-flop states after the press.
    pub fingerprint: Fingerprint,
    /// Deliveries to the watched node during the press.
    pub sink: SinkTrace,
}

// ── PressEngine ─────────────────────────────────────────────────

/// Single-threaded press engine.
///
/// Owns all simulation state and executes presses synchronously; each
/// [`press()`](PressEngine::press) call enqueues the synthetic entry
/// pulse, drains the queue to quiescence in strict FIFO order, and
/// returns the press's [`PressRecord`].
///
/// The queue instance is reused across presses but logically per-press:
/// empty when a press starts, empty when it ends, and cleared if a
/// press aborts.
#[derive(Clone, Debug)]
pub struct PressEngine {
    network: Network,
    queue: VecDeque<Pulse>,
    presses: u64,
    watch: Option<NodeId>,
    last_metrics: PressMetrics,
}

impl PressEngine {
    /// Wrap a built network in a fresh engine.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            queue: VecDeque::new(),
            presses: 0,
            watch: None,
            last_metrics: PressMetrics::default(),
        }
    }

    /// Build the network and the engine in one step.
    pub fn from_defs(defs: &[ModuleDef]) -> Result<Self, BuildError> {
        Network::build(defs).map(Self::new)
    }

    /// The underlying network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Record every delivery to `node` in each press's [`SinkTrace`].
    ///
    /// The watched node may be passive: sink observation does not
    /// require a typed module. Replaces any previous watch target.
    pub fn watch(&mut self, node: NodeId) {
        self.watch = Some(node);
    }

    /// The currently watched node, if any.
    pub fn watched(&self) -> Option<NodeId> {
        self.watch
    }

    /// Completed presses since construction or the last reset.
    pub fn press_count(&self) -> PressId {
        PressId(self.presses)
    }

    /// Metrics from the most recent completed press.
    pub fn last_metrics(&self) -> &PressMetrics {
        &self.last_metrics
    }

    /// Reset to the initial state: all flip-flops off, all conjunction
    /// memories low, press counter zeroed, queue empty.
    ///
    /// The watch target is kept; it is configuration, not state.
    pub fn reset(&mut self) {
        self.network.reset();
        self.queue.clear();
        self.presses = 0;
        self.last_metrics = PressMetrics::default();
    }

    /// Execute one button press to quiescence.
    ///
    /// Every dequeued pulse increments the press's low or high counter.
    /// Deliveries to the watched node are recorded in the returned
    /// record's [`SinkTrace`].
    ///
    /// # Errors
    ///
    /// A wiring violation ([`StepError`]) aborts the press: the queue is
    /// cleared, the press does not count, and module state is left as
    /// the partial press made it. Callers should [`reset()`](Self::reset)
    /// before driving the engine further.
    pub fn press(&mut self) -> Result<PressRecord, StepError> {
        let press_start = Instant::now();
        debug_assert!(self.queue.is_empty(), "press started with a dirty queue");

        let press = PressId(self.presses + 1);
        let mut low = 0u64;
        let mut high = 0u64;
        let mut pulses = 0u64;
        let mut peak = 0usize;
        let mut sink = SinkTrace::default();

        // 1. The synthetic entry pulse: button presses the broadcaster.
        self.queue.push_back(Pulse {
            target: self.network.broadcaster(),
            level: Level::Low,
            source: self.network.button(),
        });
        peak = peak.max(self.queue.len());

        // 2. Strict FIFO drain: arrival order, never reordered.
        while let Some(pulse) = self.queue.pop_front() {
            match pulse.level {
                Level::Low => low += 1,
                Level::High => high += 1,
            }
            pulses += 1;

            if self.watch == Some(pulse.target) {
                sink.push(pulse.source, pulse.level);
            }

            let emitted = match self.network.deliver(pulse.target, pulse.level, pulse.source) {
                Ok(emitted) => emitted,
                Err(err) => {
                    // 2a. Abort: a partially applied press must not leak
                    // into the next one through a dirty queue.
                    self.queue.clear();
                    return Err(err);
                }
            };

            // 2b. Fan out to the declared outputs, in declared order.
            if let Some(level) = emitted {
                let outputs = self.network.node(pulse.target).outputs();
                for &target in outputs {
                    self.queue.push_back(Pulse {
                        target,
                        level,
                        source: pulse.target,
                    });
                }
                peak = peak.max(self.queue.len());
            }
        }

        // 3. Publish: the press only counts once the queue drained.
        self.presses = press.0;
        self.last_metrics = PressMetrics {
            total_us: press_start.elapsed().as_micros() as u64,
            pulses,
            peak_queue_len: peak,
        };

        Ok(PressRecord {
            press,
            low,
            high,
            fingerprint: self.network.fingerprint(),
            sink,
        })
    }
}
