//! Aggregate-count mode: totals over N presses, with cycle exit.

use cascade_core::DetectError;
use cascade_engine::PressEngine;

use crate::history::{CycleInfo, PressHistory};

/// Total low/high pulse counts across a run of presses.
///
/// The product of the two is the caller's business, not this crate's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PulseTotals {
    /// Total low pulses.
    pub low: u64,
    /// Total high pulses.
    pub high: u64,
}

/// Total pulse counts over `presses` button presses.
///
/// Resets the engine, then presses and records until either the press
/// budget is reached (totals are direct sums) or a flip-flop fingerprint
/// repeats (the run is periodic from that state on, and the remaining
/// presses are extrapolated arithmetically). Both paths return exactly
/// what pressing `presses` times and summing would have returned; the
/// determinism tests cross-check this against brute force.
///
/// # Errors
///
/// [`DetectError::Step`] if a press fails.
pub fn pulse_totals(engine: &mut PressEngine, presses: u64) -> Result<PulseTotals, DetectError> {
    engine.reset();
    let mut history = PressHistory::new(engine.network().fingerprint());

    while (history.len() as u64) < presses {
        let record = engine.press()?;
        if let Some(cycle) = history.record(record) {
            return Ok(extrapolate(&history, cycle, presses));
        }
    }

    Ok(history.prefix_totals(presses as usize))
}

/// Project recorded presses across the remaining budget.
///
/// Presses `1..=offset` are the lead-in, counted once from the recorded
/// prefix. The remaining `presses - offset` presses consist of whole
/// cycles (per-cycle totals times the cycle count) plus a remainder,
/// which reuses the *prefix* sums of the recorded cycle: press k of the
/// remainder behaves exactly like recorded press `offset + k`.
fn extrapolate(history: &PressHistory, cycle: CycleInfo, presses: u64) -> PulseTotals {
    let CycleInfo { offset, period } = cycle;

    let lead = history.prefix_totals(offset as usize);
    let through_cycle = history.prefix_totals((offset + period) as usize);
    let cycle_low = through_cycle.low - lead.low;
    let cycle_high = through_cycle.high - lead.high;

    let steps = presses - offset;
    let full_cycles = steps / period;
    let remainder = steps % period;
    let through_remainder = history.prefix_totals((offset + remainder) as usize);

    PulseTotals {
        low: lead.low + full_cycles * cycle_low + (through_remainder.low - lead.low),
        high: lead.high + full_cycles * cycle_high + (through_remainder.high - lead.high),
    }
}
