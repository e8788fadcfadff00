//! Pulse network runtime and press engine for Cascade.
//!
//! This crate owns the runtime half of the workspace: [`Network`] builds
//! the module arena from a definition list and wires conjunction inputs
//! from global reverse adjacency; [`PressEngine`] drives one button
//! press at a time to quiescence through a strict-FIFO pulse queue and
//! reports per-press [`PressRecord`]s.
//!
//! Everything here is single-threaded and fully synchronous: one press
//! runs to completion before the next begins, and all state is owned by
//! the engine and mutated through `&mut self`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod metrics;
pub mod module;
pub mod network;
pub mod press;

pub use metrics::PressMetrics;
pub use module::Module;
pub use network::Network;
pub use press::{PressEngine, PressRecord, SinkTrace};
