//! Determinism integration tests: identical runs from identical state,
//! reset idempotence, and extrapolation equal to brute force.

use cascade_core::parse_definitions;
use cascade_detect::{pulse_totals, PulseTotals};
use cascade_engine::{PressEngine, PressRecord};

// ── Helpers ─────────────────────────────────────────────────────

fn engine(text: &str) -> PressEngine {
    PressEngine::from_defs(&parse_definitions(text).unwrap()).unwrap()
}

fn interference() -> PressEngine {
    engine("broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output")
}

/// Four-bit ripple counter: period 16, long enough that extrapolation
/// has a real cycle to chew on.
fn counter_chain() -> PressEngine {
    engine("broadcaster -> c0\n%c0 -> c1\n%c1 -> c2\n%c2 -> c3\n%c3 -> done")
}

fn run(engine: &mut PressEngine, presses: usize) -> Vec<PressRecord> {
    (0..presses).map(|_| engine.press().unwrap()).collect()
}

fn brute_totals(engine: &mut PressEngine, presses: u64) -> PulseTotals {
    engine.reset();
    let mut totals = PulseTotals::default();
    for _ in 0..presses {
        let record = engine.press().unwrap();
        totals.low += record.low;
        totals.high += record.high;
    }
    totals
}

// ── Identical configurations, identical runs ────────────────────

#[test]
fn thousand_press_determinism() {
    let mut engine_a = interference();
    let mut engine_b = interference();

    for press in 1..=1000u64 {
        let record_a = engine_a.press().unwrap();
        let record_b = engine_b.press().unwrap();
        assert_eq!(
            record_a, record_b,
            "determinism failure at press {press}"
        );
    }
}

// ── Reset idempotence ───────────────────────────────────────────

#[test]
fn reset_and_replay_reproduces_counts_and_fingerprints() {
    let mut engine = counter_chain();
    let first = run(&mut engine, 500);

    engine.reset();
    let second = run(&mut engine, 500);

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.press, b.press);
        assert_eq!((a.low, a.high), (b.low, b.high));
        assert_eq!(a.fingerprint, b.fingerprint);
    }
}

#[test]
fn reset_after_partial_run_matches_fresh_engine() {
    let mut disturbed = interference();
    run(&mut disturbed, 7);
    disturbed.reset();

    let mut fresh = interference();
    assert_eq!(run(&mut disturbed, 100), run(&mut fresh, 100));
}

// ── Extrapolation equals reference semantics ────────────────────

#[test]
fn extrapolated_totals_equal_brute_force_across_budgets() {
    let mut optimized = counter_chain();
    let mut reference = counter_chain();

    // Budgets below, at, and well past the 16-press cycle.
    for n in (0..=40u64).chain([100, 160, 161, 1000]) {
        let fast = pulse_totals(&mut optimized, n).unwrap();
        let slow = brute_totals(&mut reference, n);
        assert_eq!(fast, slow, "divergence at {n} presses");
    }
}

#[test]
fn detection_leaves_engine_reusable() {
    // pulse_totals resets on entry, so interleaving detection runs with
    // manual presses must not change any answer.
    let mut engine = interference();
    let expected = pulse_totals(&mut engine, 1000).unwrap();

    engine.press().unwrap();
    engine.press().unwrap();
    assert_eq!(pulse_totals(&mut engine, 1000).unwrap(), expected);
}
