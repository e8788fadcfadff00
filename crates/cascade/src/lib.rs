//! Cascade: a pulse-propagation simulation engine with cycle detection.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Cascade sub-crates. For most users, adding `cascade` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cascade::prelude::*;
//!
//! // The worked chain-and-loop network: one press produces exactly
//! // 8 low and 4 high pulses, and the state returns to rest.
//! let defs = parse_definitions(
//!     "broadcaster -> a, b, c\n\
//!      %a -> b\n\
//!      %b -> c\n\
//!      %c -> inv\n\
//!      &inv -> a",
//! )
//! .unwrap();
//! let mut engine = PressEngine::from_defs(&defs).unwrap();
//!
//! let record = engine.press().unwrap();
//! assert_eq!((record.low, record.high), (8, 4));
//!
//! // Long runs extrapolate from the detected cycle instead of
//! // simulating every press.
//! let totals = pulse_totals(&mut engine, 1000).unwrap();
//! assert_eq!((totals.low, totals.high), (8000, 4000));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cascade-core` | Levels, pulses, IDs, definitions, parsing, errors |
//! | [`engine`] | `cascade-engine` | Network registry and the press engine |
//! | [`detect`] | `cascade-detect` | Press history, cycle detection, sink search |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: levels, pulses, IDs, definitions, parsing, and errors
/// (`cascade-core`).
pub use cascade_core as types;

/// Network runtime and press engine (`cascade-engine`).
///
/// [`engine::Network`] builds the module arena from a definition list;
/// [`engine::PressEngine`] drives button presses to quiescence.
pub use cascade_engine as engine;

/// Cycle detection and long-run extrapolation (`cascade-detect`).
///
/// Aggregate-count mode ([`detect::pulse_totals`]), sink-target mode
/// ([`detect::presses_until_lone_low`]), and the subcycle LCM shortcut
/// ([`detect::lone_low_by_subcycles`]).
pub use cascade_detect as detect;

/// Common imports for typical Cascade usage.
///
/// ```rust
/// use cascade::prelude::*;
/// ```
pub mod prelude {
    // Core types and parsing
    pub use cascade_core::{
        parse_definitions, Fingerprint, Level, ModuleDef, ModuleKind, NodeId, PressId, Pulse,
    };

    // Errors
    pub use cascade_core::{BuildError, DetectError, ParseError, StepError};

    // Engine
    pub use cascade_engine::{Network, PressEngine, PressMetrics, PressRecord, SinkTrace};

    // Detection
    pub use cascade_detect::{
        lone_low_by_subcycles, presses_until_lone_low, pulse_totals, CycleInfo, PressHistory,
        PulseTotals,
    };
}
