//! Error types for the Cascade workspace, organized by subsystem:
//! parsing, network construction, pulse dispatch, and detection.

use std::error::Error;
use std::fmt;

// ── ParseError ──────────────────────────────────────────────────

/// Errors from parsing module-definition text.
///
/// Line numbers are 1-based and refer to the input handed to
/// [`parse_definitions`](crate::parse::parse_definitions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not match `name -> output, output, ...`.
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },
    /// The left-hand name carries no `%`/`&` prefix and is not the
    /// literal `broadcaster`.
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// The unprefixed name as written.
        name: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line, text } => {
                write!(f, "malformed module line {line}: '{text}'")
            }
            Self::UnknownKind { line, name } => {
                write!(f, "unrecognized module kind on line {line}: '{name}'")
            }
        }
    }
}

impl Error for ParseError {}

// ── BuildError ──────────────────────────────────────────────────

/// Errors from network construction.
///
/// Construction is all-or-nothing: any of these aborts the build and no
/// partial network is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// No definition of kind `Broadcast`: the network has no entry point.
    NoBroadcaster,
    /// Two definitions share a name.
    DuplicateModule {
        /// The name defined more than once.
        name: String,
    },
    /// A name appears twice within one module's output list.
    DuplicateOutput {
        /// The module whose output list is malformed.
        module: String,
        /// The repeated output name.
        output: String,
    },
    /// A definition uses a reserved name (`button`).
    ReservedName {
        /// The reserved name.
        name: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBroadcaster => write!(f, "no broadcast module defined"),
            Self::DuplicateModule { name } => {
                write!(f, "module '{name}' defined more than once")
            }
            Self::DuplicateOutput { module, output } => {
                write!(f, "module '{module}' lists output '{output}' more than once")
            }
            Self::ReservedName { name } => {
                write!(f, "module name '{name}' is reserved")
            }
        }
    }
}

impl Error for BuildError {}

// ── StepError ───────────────────────────────────────────────────

/// Errors from pulse dispatch during a button press.
///
/// A step error aborts the press in flight; the engine clears its queue
/// rather than continue with corrupted state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A conjunction received a pulse from a source outside its
    /// remembered-input set. This signals a construction bug and is
    /// never silently tolerated, since continuing would corrupt the
    /// all-high evaluation and produce silently wrong counts.
    UnwiredConjunctionInput {
        /// The conjunction that received the pulse.
        module: String,
        /// The unexpected source.
        source: String,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnwiredConjunctionInput { module, source } => {
                write!(
                    f,
                    "conjunction '{module}' received a pulse from unwired source '{source}'"
                )
            }
        }
    }
}

impl Error for StepError {}

// ── DetectError ─────────────────────────────────────────────────

/// Errors from the detection layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetectError {
    /// A press failed while detection was driving the engine.
    Step(StepError),
    /// The named sink does not appear anywhere in the network.
    UnknownSink {
        /// The name that failed to resolve.
        name: String,
    },
    /// No module feeds the sink, so the subcycle decomposition does not
    /// apply.
    NoFeeder {
        /// The sink name.
        sink: String,
    },
    /// More than one module feeds the sink; the subcycle shortcut
    /// requires a single feeding conjunction.
    MultipleFeeders {
        /// The sink name.
        sink: String,
        /// How many feeders were found.
        count: usize,
    },
    /// The sink's single feeder is not a conjunction.
    FeederNotConjunction {
        /// The feeder's name.
        module: String,
    },
    /// The combined subcycle period does not fit in a `u64`.
    PeriodOverflow,
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(e) => write!(f, "press failed: {e}"),
            Self::UnknownSink { name } => {
                write!(f, "sink '{name}' does not appear in the network")
            }
            Self::NoFeeder { sink } => write!(f, "no module feeds sink '{sink}'"),
            Self::MultipleFeeders { sink, count } => {
                write!(f, "{count} modules feed sink '{sink}', expected exactly one")
            }
            Self::FeederNotConjunction { module } => {
                write!(f, "sink feeder '{module}' is not a conjunction")
            }
            Self::PeriodOverflow => write!(f, "combined subcycle period overflows u64"),
        }
    }
}

impl Error for DetectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Step(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StepError> for DetectError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}
