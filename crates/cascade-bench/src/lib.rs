//! Benchmark profiles for the Cascade pulse-propagation engine.
//!
//! Provides pre-built definition lists for benchmarking:
//!
//! - [`counter_profile`]: a flip-flop ripple counter of configurable
//!   width; presses are cheap but the state cycle is `2^bits` long
//! - [`interference_profile`]: the worked flip-flop/conjunction network
//!   with a 4-press cycle
//! - [`subcycle_profile`]: two counter chains meeting in a conjunction,
//!   the decomposable shape sink-target mode is built for

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cascade_core::{ModuleDef, ModuleKind};

/// A ripple counter: `broadcaster -> c0; %c0 -> c1; ...; %c{n-1} -> done`.
///
/// After `k` presses the flip-flops read `k` in binary, so the
/// fingerprint cycle has period `2^bits`.
pub fn counter_profile(bits: usize) -> Vec<ModuleDef> {
    assert!(bits > 0, "counter needs at least one flip-flop");
    let mut defs = vec![ModuleDef::new("broadcaster", ModuleKind::Broadcast, ["c0"])];
    for i in 0..bits {
        let target = if i + 1 == bits {
            "done".to_string()
        } else {
            format!("c{}", i + 1)
        };
        defs.push(ModuleDef::new(
            format!("c{i}"),
            ModuleKind::FlipFlop,
            [target],
        ));
    }
    defs
}

/// The worked interference network: 4-press cycle, 17 low / 11 high per
/// cycle.
pub fn interference_profile() -> Vec<ModuleDef> {
    vec![
        ModuleDef::new("broadcaster", ModuleKind::Broadcast, ["a"]),
        ModuleDef::new("a", ModuleKind::FlipFlop, ["inv", "con"]),
        ModuleDef::new("inv", ModuleKind::Conjunction, ["b"]),
        ModuleDef::new("b", ModuleKind::FlipFlop, ["con"]),
        ModuleDef::new("con", ModuleKind::Conjunction, ["output"]),
    ]
}

/// Two inverted counter chains of `left_bits` and `right_bits` flip-flops
/// meeting in a final conjunction that feeds `sink`.
///
/// The feeder's inputs go high with periods `2^left_bits` and
/// `2^right_bits`, so the sink's lone low lands on their LCM.
pub fn subcycle_profile(left_bits: usize, right_bits: usize) -> Vec<ModuleDef> {
    assert!(left_bits > 0 && right_bits > 0);
    let mut defs = vec![ModuleDef::new(
        "broadcaster",
        ModuleKind::Broadcast,
        ["f0", "g0"],
    )];
    for (prefix, bits, inverter) in [("f", left_bits, "fi"), ("g", right_bits, "gi")] {
        for i in 0..bits {
            let target = if i + 1 == bits {
                inverter.to_string()
            } else {
                format!("{prefix}{}", i + 1)
            };
            defs.push(ModuleDef::new(
                format!("{prefix}{i}"),
                ModuleKind::FlipFlop,
                [target],
            ));
        }
        defs.push(ModuleDef::new(inverter, ModuleKind::Conjunction, ["con"]));
    }
    defs.push(ModuleDef::new("con", ModuleKind::Conjunction, ["sink"]));
    defs
}
