//! Runtime modules and their per-variant pulse behavior.
//!
//! Behavior dispatch is a tagged sum type, not trait objects: the three
//! variants are a closed set and exhaustive matching keeps every new
//! code path honest about all of them.

use cascade_core::{Level, ModuleKind, NodeId};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Marker error: a conjunction received a pulse from a source outside
/// its remembered-input set.
///
/// The network converts this into a
/// [`StepError`](cascade_core::StepError) with both end names attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UnwiredInput;

/// Variant-specific state.
///
/// `Passive` covers every name that is referenced but never defined:
/// untyped sinks and the synthetic button. A passive node absorbs
/// pulses and emits nothing, which realizes "delivery to an undefined
/// target is a no-op" without a special case in the dispatch loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Behavior {
    Broadcast,
    FlipFlop {
        on: bool,
    },
    Conjunction {
        /// Most recent level seen from each input, keyed by source id.
        /// The key set is fixed at build time and never changes shape.
        memory: IndexMap<NodeId, Level>,
    },
    Passive,
}

/// One node of a pulse network.
///
/// Owns its name, its ordered output list (as ids into the network
/// arena), and its variant state. Modules never reference each other
/// directly; the graph is cyclic, and all edges go through the
/// network's registry.
#[derive(Clone, Debug)]
pub struct Module {
    name: String,
    outputs: SmallVec<[NodeId; 4]>,
    behavior: Behavior,
}

impl Module {
    /// A typed module with no outputs wired yet.
    pub(crate) fn typed(name: &str, kind: ModuleKind) -> Self {
        let behavior = match kind {
            ModuleKind::Broadcast => Behavior::Broadcast,
            ModuleKind::FlipFlop => Behavior::FlipFlop { on: false },
            ModuleKind::Conjunction => Behavior::Conjunction {
                memory: IndexMap::new(),
            },
        };
        Self {
            name: name.to_string(),
            outputs: SmallVec::new(),
            behavior,
        }
    }

    /// An untyped node: output-only sink or the synthetic button.
    pub(crate) fn passive(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outputs: SmallVec::new(),
            behavior: Behavior::Passive,
        }
    }

    /// The module's canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared outputs, in delivery order.
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// The behavioral variant, or `None` for passive nodes.
    pub fn kind(&self) -> Option<ModuleKind> {
        match self.behavior {
            Behavior::Broadcast => Some(ModuleKind::Broadcast),
            Behavior::FlipFlop { .. } => Some(ModuleKind::FlipFlop),
            Behavior::Conjunction { .. } => Some(ModuleKind::Conjunction),
            Behavior::Passive => None,
        }
    }

    /// Flip-flop state, or `None` for other variants.
    pub fn is_on(&self) -> Option<bool> {
        match self.behavior {
            Behavior::FlipFlop { on } => Some(on),
            _ => None,
        }
    }

    pub(crate) fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub(crate) fn set_outputs(&mut self, outputs: SmallVec<[NodeId; 4]>) {
        self.outputs = outputs;
    }

    /// Register `source` as a conjunction input, remembered low.
    ///
    /// No-op for other variants; the builder only calls this for
    /// conjunction targets.
    pub(crate) fn wire_input(&mut self, source: NodeId) {
        if let Behavior::Conjunction { memory } = &mut self.behavior {
            memory.insert(source, Level::Low);
        }
    }

    /// Restore this variant's initial state: flip-flops off, conjunction
    /// memories all-low.
    pub(crate) fn reset_state(&mut self) {
        match &mut self.behavior {
            Behavior::FlipFlop { on } => *on = false,
            Behavior::Conjunction { memory } => {
                for level in memory.values_mut() {
                    *level = Level::Low;
                }
            }
            Behavior::Broadcast | Behavior::Passive => {}
        }
    }

    /// Apply one incoming pulse and return the level to emit to every
    /// output, if any.
    ///
    /// - Broadcast: forwards the incoming level.
    /// - Flip-flop: ignores high; on low, toggles and emits high when
    ///   turning on, low when turning off.
    /// - Conjunction: records the source's level, then emits low iff
    ///   every remembered input is high. An empty memory is vacuously
    ///   all-high, so a zero-input conjunction always emits low.
    /// - Passive: absorbs.
    pub(crate) fn receive(
        &mut self,
        level: Level,
        source: NodeId,
    ) -> Result<Option<Level>, UnwiredInput> {
        match &mut self.behavior {
            Behavior::Broadcast => Ok(Some(level)),
            Behavior::Passive => Ok(None),
            Behavior::FlipFlop { on } => match level {
                Level::High => Ok(None),
                Level::Low => {
                    *on = !*on;
                    Ok(Some(if *on { Level::High } else { Level::Low }))
                }
            },
            Behavior::Conjunction { memory } => {
                // Zero remembered inputs: vacuously all-high, and there is
                // no slot the wiring check could apply to.
                if memory.is_empty() {
                    return Ok(Some(Level::Low));
                }
                match memory.get_mut(&source) {
                    Some(slot) => {
                        *slot = level;
                        let all_high = memory.values().all(|l| l.is_high());
                        Ok(Some(if all_high { Level::Low } else { Level::High }))
                    }
                    None => Err(UnwiredInput),
                }
            }
        }
    }
}
