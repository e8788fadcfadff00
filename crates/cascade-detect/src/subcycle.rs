//! Subcycle decomposition: the LCM shortcut for sink-target mode.
//!
//! For the networks this mode targets, the sink hangs off a single
//! conjunction whose inputs are fed by independent subgraphs, each
//! going high with its own period. The conjunction first sees all
//! inputs high, and the sink its lone low, on the press where those
//! periods coincide: the least common multiple.
//!
//! The brute-force search in [`crate::sink`] remains the reference
//! semantics; this shortcut is only valid for networks of that shape,
//! and the integration tests hold the two equal where both apply.

use cascade_core::{DetectError, NodeId, PressId};
use cascade_engine::PressEngine;
use indexmap::IndexMap;

/// Predict the lone-low press by combining per-input periods.
///
/// Requires the sink to be fed by exactly one conjunction. Watches that
/// conjunction, records for each of its inputs the first press on which
/// the input delivers a high pulse, and returns the least common
/// multiple of those press counts.
///
/// # Errors
///
/// [`DetectError::UnknownSink`] if the name appears nowhere in the
/// network; [`DetectError::NoFeeder`] / [`DetectError::MultipleFeeders`]
/// / [`DetectError::FeederNotConjunction`] if the network does not have
/// the decomposable shape; [`DetectError::PeriodOverflow`] if the
/// combined period exceeds `u64`; [`DetectError::Step`] if a press
/// fails.
pub fn lone_low_by_subcycles(
    engine: &mut PressEngine,
    sink: &str,
) -> Result<PressId, DetectError> {
    let network = engine.network();
    let target = network.lookup(sink).ok_or_else(|| DetectError::UnknownSink {
        name: sink.to_string(),
    })?;

    let feeders = network.feeders(target);
    let feeder = match feeders.as_slice() {
        [] => {
            return Err(DetectError::NoFeeder {
                sink: sink.to_string(),
            })
        }
        [feeder] => *feeder,
        many => {
            return Err(DetectError::MultipleFeeders {
                sink: sink.to_string(),
                count: many.len(),
            })
        }
    };
    let inputs =
        network
            .conjunction_inputs(feeder)
            .ok_or_else(|| DetectError::FeederNotConjunction {
                module: network.name(feeder).to_string(),
            })?;

    engine.reset();
    engine.watch(feeder);

    // First press at which each input went high into the feeder.
    let mut first_high: IndexMap<NodeId, u64> = IndexMap::with_capacity(inputs.len());
    while first_high.len() < inputs.len() {
        let record = engine.press()?;
        for &(source, level) in record.sink.deliveries() {
            if level.is_high() && !first_high.contains_key(&source) {
                first_high.insert(source, record.press.0);
            }
        }
    }

    let mut combined = 1u64;
    for &period in first_high.values() {
        combined = lcm(combined, period).ok_or(DetectError::PeriodOverflow)?;
    }
    Ok(PressId(combined))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple, `None` on overflow.
fn lcm(a: u64, b: u64) -> Option<u64> {
    (a / gcd(a, b)).checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::parse_definitions;

    fn engine(text: &str) -> PressEngine {
        PressEngine::from_defs(&parse_definitions(text).unwrap()).unwrap()
    }

    fn interference() -> PressEngine {
        engine("broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output")
    }

    #[test]
    fn gcd_and_lcm_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 1), 1);
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(4, 8), Some(8));
        assert_eq!(lcm(u64::MAX, 2), None);
    }

    #[test]
    fn single_input_feeder_reduces_to_its_period() {
        // `b` is fed only by the conjunction `inv`, whose sole input `a`
        // first goes high on press 1 (turning on). LCM over one input is
        // just that input's first-high press, and brute force agrees:
        // `inv` inverts the high into `b`'s lone low on press 1.
        let mut engine = interference();
        assert_eq!(
            lone_low_by_subcycles(&mut engine, "b").unwrap(),
            PressId(1)
        );
        assert_eq!(
            crate::sink::presses_until_lone_low(&mut engine, "b").unwrap(),
            PressId(1)
        );
    }

    #[test]
    fn unknown_sink_is_an_error() {
        let mut engine = interference();
        assert_eq!(
            lone_low_by_subcycles(&mut engine, "rx"),
            Err(DetectError::UnknownSink {
                name: "rx".to_string(),
            })
        );
    }

    #[test]
    fn unfed_sink_is_an_error() {
        let mut engine = interference();
        assert_eq!(
            lone_low_by_subcycles(&mut engine, "broadcaster"),
            Err(DetectError::NoFeeder {
                sink: "broadcaster".to_string(),
            })
        );
    }

    #[test]
    fn multiply_fed_sink_is_an_error() {
        let mut engine = interference();
        assert_eq!(
            lone_low_by_subcycles(&mut engine, "con"),
            Err(DetectError::MultipleFeeders {
                sink: "con".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn non_conjunction_feeder_is_an_error() {
        // `inv` is fed only by the flip-flop `a`.
        let mut engine = interference();
        assert_eq!(
            lone_low_by_subcycles(&mut engine, "inv"),
            Err(DetectError::FeederNotConjunction {
                module: "a".to_string(),
            })
        );
    }
}
