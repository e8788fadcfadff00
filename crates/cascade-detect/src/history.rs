//! Press history and fingerprint-based cycle detection.

use cascade_core::Fingerprint;
use cascade_engine::PressRecord;
use indexmap::IndexMap;

use crate::aggregate::PulseTotals;

/// A detected repetition in the press sequence.
///
/// The engine's state after press `offset` equals its state after press
/// `offset + period`, so presses `offset + 1 ..= offset + period` form a
/// cycle that repeats forever. `offset` 0 means the state returned to
/// the initial (pre-press) state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleInfo {
    /// Presses before the cycle begins.
    pub offset: u64,
    /// Presses per cycle.
    pub period: u64,
}

/// Append-only record of presses, with repeat detection.
///
/// Every recorded fingerprint is compared against all prior fingerprints
/// in the run, the initial (press-0) state included. The first repeat
/// yields a [`CycleInfo`].
#[derive(Clone, Debug)]
pub struct PressHistory {
    records: Vec<PressRecord>,
    /// Fingerprint → the press count after which it was observed.
    seen: IndexMap<Fingerprint, u64>,
}

impl PressHistory {
    /// Start a history from the engine's pre-press fingerprint.
    pub fn new(initial: Fingerprint) -> Self {
        let mut seen = IndexMap::new();
        seen.insert(initial, 0);
        Self {
            records: Vec::new(),
            seen,
        }
    }

    /// Number of presses recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no press has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All recorded presses, in order.
    pub fn records(&self) -> &[PressRecord] {
        &self.records
    }

    /// Append a press record; report the cycle if its fingerprint has
    /// been seen before in this run.
    pub fn record(&mut self, record: PressRecord) -> Option<CycleInfo> {
        let press = self.records.len() as u64 + 1;
        let fingerprint = record.fingerprint.clone();
        self.records.push(record);

        match self.seen.get(&fingerprint) {
            Some(&offset) => Some(CycleInfo {
                offset,
                period: press - offset,
            }),
            None => {
                self.seen.insert(fingerprint, press);
                None
            }
        }
    }

    /// Summed low/high counts over the first `presses` recorded presses.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `presses` presses have been recorded.
    pub fn prefix_totals(&self, presses: usize) -> PulseTotals {
        self.records[..presses]
            .iter()
            .fold(PulseTotals::default(), |acc, r| PulseTotals {
                low: acc.low + r.low,
                high: acc.high + r.high,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::{parse_definitions, PressId};
    use cascade_engine::PressEngine;

    fn interference_engine() -> PressEngine {
        let defs = parse_definitions(
            "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output",
        )
        .unwrap();
        PressEngine::from_defs(&defs).unwrap()
    }

    #[test]
    fn detects_return_to_initial_state() {
        let mut engine = interference_engine();
        let mut history = PressHistory::new(engine.network().fingerprint());

        // Presses 1-3 visit distinct states; press 4 closes the cycle.
        for _ in 0..3 {
            assert_eq!(history.record(engine.press().unwrap()), None);
        }
        let cycle = history.record(engine.press().unwrap()).unwrap();
        assert_eq!(
            cycle,
            CycleInfo {
                offset: 0,
                period: 4,
            }
        );
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn reports_offset_for_cycles_not_through_initial_state() {
        // Synthetic records: states A B C B → cycle of period 2 after a
        // 1-press lead-in.
        let state = |bit: Option<usize>| {
            let mut fp = cascade_core::Fingerprint::new(3);
            if let Some(b) = bit {
                fp.set(b, true);
            }
            fp
        };
        let record = |press: u64, fp: cascade_core::Fingerprint| PressRecord {
            press: PressId(press),
            low: 1,
            high: 0,
            fingerprint: fp,
            sink: Default::default(),
        };

        let mut history = PressHistory::new(state(None));
        assert_eq!(history.record(record(1, state(Some(0)))), None);
        assert_eq!(history.record(record(2, state(Some(1)))), None);
        assert_eq!(history.record(record(3, state(Some(2)))), None);
        let cycle = history.record(record(4, state(Some(1)))).unwrap();
        assert_eq!(
            cycle,
            CycleInfo {
                offset: 2,
                period: 2,
            }
        );
    }

    #[test]
    fn prefix_totals_sum_in_order() {
        let mut engine = interference_engine();
        let mut history = PressHistory::new(engine.network().fingerprint());
        for _ in 0..4 {
            history.record(engine.press().unwrap());
        }

        assert_eq!(history.prefix_totals(0), PulseTotals::default());
        assert_eq!(history.prefix_totals(1), PulseTotals { low: 4, high: 4 });
        assert_eq!(history.prefix_totals(4), PulseTotals { low: 17, high: 11 });
    }
}
