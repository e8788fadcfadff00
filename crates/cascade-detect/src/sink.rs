//! Sink-target mode: press until the sink sees a lone low pulse.

use cascade_core::{DetectError, PressId};
use cascade_engine::PressEngine;

/// Press repeatedly until the named sink receives exactly one low pulse
/// during a single press; return that press's 1-based id.
///
/// The sink may be an untyped name (one that only ever appears as an
/// output). Its per-press delivery trace is reset at the start of every
/// press, and a press that delivers nothing to the sink simply does not
/// satisfy the condition.
///
/// This loop is unbounded by design: a network that never satisfies the
/// condition does not terminate here. Callers that need a cap should
/// drive [`pulse_totals`](crate::pulse_totals) instead and bound the
/// press budget.
///
/// # Errors
///
/// [`DetectError::UnknownSink`] if the name appears nowhere in the
/// network, [`DetectError::Step`] if a press fails.
pub fn presses_until_lone_low(
    engine: &mut PressEngine,
    sink: &str,
) -> Result<PressId, DetectError> {
    let target = engine
        .network()
        .lookup(sink)
        .ok_or_else(|| DetectError::UnknownSink {
            name: sink.to_string(),
        })?;

    engine.reset();
    engine.watch(target);

    loop {
        let record = engine.press()?;
        if record.sink.is_lone_low() {
            return Ok(record.press);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::parse_definitions;

    fn engine(text: &str) -> PressEngine {
        PressEngine::from_defs(&parse_definitions(text).unwrap()).unwrap()
    }

    #[test]
    fn finds_first_satisfying_press() {
        // `inv` hears from `a` once per press: high on odd presses
        // (a turns on), low on even ones. The first lone low lands on
        // press 2.
        let mut engine = engine(
            "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output",
        );
        assert_eq!(presses_until_lone_low(&mut engine, "inv").unwrap(), PressId(2));
    }

    #[test]
    fn skips_presses_with_no_deliveries() {
        // A three-bit ripple counter delivers to `done` only when the
        // top bit pulses: high at press 4, low at press 8. Every other
        // press delivers nothing and must not satisfy the condition.
        let mut engine = engine("broadcaster -> c0\n%c0 -> c1\n%c1 -> c2\n%c2 -> done");
        assert_eq!(
            presses_until_lone_low(&mut engine, "done").unwrap(),
            PressId(8)
        );
    }

    #[test]
    fn resolves_lone_low_on_the_first_press_too() {
        let mut engine = engine(
            "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output",
        );
        // `output` hears high then low from `con` on press 1: one low.
        assert_eq!(
            presses_until_lone_low(&mut engine, "output").unwrap(),
            PressId(1)
        );
    }

    #[test]
    fn search_restarts_from_initial_state() {
        let mut engine = engine("broadcaster -> c0\n%c0 -> c1\n%c1 -> c2\n%c2 -> done");
        // Disturb the state first; the search must reset before pressing.
        for _ in 0..3 {
            engine.press().unwrap();
        }
        assert_eq!(
            presses_until_lone_low(&mut engine, "done").unwrap(),
            PressId(8)
        );
    }

    #[test]
    fn unknown_sink_is_an_error() {
        let mut engine = engine("broadcaster -> a\n%a -> b");
        assert_eq!(
            presses_until_lone_low(&mut engine, "rx"),
            Err(DetectError::UnknownSink {
                name: "rx".to_string(),
            })
        );
    }
}
