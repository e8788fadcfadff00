//! Cycle detection and long-run extrapolation for Cascade.
//!
//! This crate layers analysis over [`cascade_engine::PressEngine`]:
//!
//! - [`PressHistory`] records per-press results and spots the first
//!   repeating flip-flop fingerprint.
//! - [`pulse_totals`] runs aggregate-count mode: press up to N times,
//!   exit early on a fingerprint cycle, and extrapolate the totals.
//! - [`presses_until_lone_low`] runs sink-target mode: press until the
//!   watched sink receives exactly one low pulse in a single press.
//! - [`lone_low_by_subcycles`] is the LCM shortcut for networks that
//!   decompose into independent subcycles feeding one conjunction.
//!
//! Every entry point resets the engine first: detection assumes a
//! known starting state, and replaying from that state is what makes
//! the extrapolations trustworthy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod history;
pub mod sink;
pub mod subcycle;

pub use aggregate::{pulse_totals, PulseTotals};
pub use history::{CycleInfo, PressHistory};
pub use sink::presses_until_lone_low;
pub use subcycle::lone_low_by_subcycles;
