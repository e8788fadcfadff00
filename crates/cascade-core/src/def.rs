//! Module definitions: the build input for a pulse network.

use std::fmt;

/// The canonical name of the broadcast entry-point module.
pub const BROADCASTER: &str = "broadcaster";

/// The reserved name of the synthetic press source.
///
/// Every button press is delivered as a low pulse whose source is a
/// synthetic node with this name. Defining a module with this name is a
/// construction error.
pub const BUTTON: &str = "button";

/// The behavioral variant of a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Forwards every incoming pulse, unchanged, to every output.
    Broadcast,
    /// On/off memory: ignores high pulses, toggles on low pulses and
    /// emits high (off→on) or low (on→off).
    FlipFlop,
    /// Remembers the most recent level from each input; emits low when
    /// every remembered level is high, high otherwise.
    Conjunction,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast => write!(f, "broadcast"),
            Self::FlipFlop => write!(f, "flip-flop"),
            Self::Conjunction => write!(f, "conjunction"),
        }
    }
}

/// One module definition: name, kind, and declared outputs.
///
/// The full, ordered definition list is the single source of truth for
/// network wiring. Conjunction input sets are computed from the reverse
/// adjacency of the *complete* list at build time, so a `ModuleDef` is
/// meaningful only as part of its list, never in isolation.
///
/// Output order is significant: it is the order in which downstream
/// nodes receive pulses. Duplicate names within one output list are
/// rejected at network construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDef {
    /// Unique module name (prefix already stripped).
    pub name: String,
    /// Behavioral variant.
    pub kind: ModuleKind,
    /// Ordered output target names. Targets need not be defined modules;
    /// a name appearing only as an output denotes an untyped sink.
    pub outputs: Vec<String>,
}

impl ModuleDef {
    /// Convenience constructor.
    pub fn new(
        name: impl Into<String>,
        kind: ModuleKind,
        outputs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }
}
