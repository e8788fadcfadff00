//! Core types for the Cascade pulse-propagation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary used throughout the Cascade workspace:
//! signal levels and pulses, typed IDs, module definitions, the
//! definition-text parser, flip-flop fingerprints, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod def;
pub mod error;
pub mod fingerprint;
pub mod id;
pub mod parse;
pub mod pulse;

pub use def::{ModuleDef, ModuleKind, BROADCASTER, BUTTON};
pub use error::{BuildError, DetectError, ParseError, StepError};
pub use fingerprint::Fingerprint;
pub use id::{NodeId, PressId};
pub use parse::parse_definitions;
pub use pulse::{Level, Pulse};
