//! Network construction and the name-interned module registry.
//!
//! A [`Network`] owns every module in a flat arena indexed by
//! [`NodeId`]; a registry maps names to ids. All cross-module edges are
//! ids resolved through the arena, the natural shape for a graph that
//! is itself cyclic (conjunctions routinely feed back into nodes near
//! the entry point).
//!
//! Construction is all-or-nothing and works from the complete, ordered
//! definition list: conjunction input sets come from the reverse
//! adjacency of that list, never from a partially built graph.

use cascade_core::{
    BuildError, Fingerprint, Level, ModuleDef, ModuleKind, NodeId, StepError, BUTTON,
};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::module::{Behavior, Module, UnwiredInput};

/// Arena index as a typed id.
///
/// # Panics
///
/// Panics if the arena has grown past `u32::MAX` nodes, which no real
/// definition list approaches.
fn arena_id(index: usize) -> NodeId {
    NodeId(u32::try_from(index).expect("node count fits in u32"))
}

/// A fully wired pulse network.
///
/// Holds one [`Module`] per name referenced anywhere in the definition
/// list (typed for defined names, passive for output-only sinks), plus
/// the synthetic `button` node, the broadcast entry point, and the
/// flip-flop roster in definition order (the fingerprint bit order).
#[derive(Clone, Debug)]
pub struct Network {
    nodes: Vec<Module>,
    index: IndexMap<String, NodeId>,
    broadcaster: NodeId,
    button: NodeId,
    flip_flops: Vec<NodeId>,
}

impl Network {
    /// Build a network from a complete definition list.
    ///
    /// Definitions are interned first, in definition order, so
    /// `NodeId(i)` names the `i`-th definition; output-only names
    /// follow in first-appearance order, then the synthetic button.
    ///
    /// # Errors
    ///
    /// [`BuildError::ReservedName`] if a definition claims `button`,
    /// [`BuildError::DuplicateModule`] for a repeated definition name,
    /// [`BuildError::DuplicateOutput`] for a repeated name within one
    /// output list, and [`BuildError::NoBroadcaster`] if no definition
    /// has kind [`ModuleKind::Broadcast`]. No partial network is ever
    /// returned.
    pub fn build(defs: &[ModuleDef]) -> Result<Self, BuildError> {
        let mut nodes: Vec<Module> = Vec::with_capacity(defs.len() + 1);
        let mut index: IndexMap<String, NodeId> = IndexMap::with_capacity(defs.len() + 1);

        // 1. One typed node per definition, in definition order.
        for def in defs {
            if def.name == BUTTON {
                return Err(BuildError::ReservedName {
                    name: def.name.clone(),
                });
            }
            if index.contains_key(&def.name) {
                return Err(BuildError::DuplicateModule {
                    name: def.name.clone(),
                });
            }
            let id = arena_id(nodes.len());
            index.insert(def.name.clone(), id);
            nodes.push(Module::typed(&def.name, def.kind));
        }

        // 2. Resolve output lists. Names seen only as outputs become
        //    passive sinks, interned in first-appearance order.
        let mut wiring: Vec<SmallVec<[NodeId; 4]>> = Vec::with_capacity(defs.len());
        for def in defs {
            let mut outputs: SmallVec<[NodeId; 4]> = SmallVec::with_capacity(def.outputs.len());
            for name in &def.outputs {
                let id = match index.get(name) {
                    Some(&id) => id,
                    None => {
                        let id = arena_id(nodes.len());
                        index.insert(name.clone(), id);
                        nodes.push(Module::passive(name));
                        id
                    }
                };
                if outputs.contains(&id) {
                    return Err(BuildError::DuplicateOutput {
                        module: def.name.clone(),
                        output: name.clone(),
                    });
                }
                outputs.push(id);
            }
            wiring.push(outputs);
        }

        // 3. Conjunction memories from the reverse adjacency of the full
        //    list. Outer loop order makes each memory's key order the
        //    definition order of its sources.
        for (i, outputs) in wiring.iter().enumerate() {
            let source = arena_id(i);
            for &target in outputs {
                nodes[target.index()].wire_input(source);
            }
        }

        // 4. Attach the output lists.
        for (i, outputs) in wiring.into_iter().enumerate() {
            nodes[i].set_outputs(outputs);
        }

        // 5. Entry point: the first definition of kind Broadcast.
        let broadcaster = defs
            .iter()
            .position(|d| d.kind == ModuleKind::Broadcast)
            .map(arena_id)
            .ok_or(BuildError::NoBroadcaster)?;

        // 6. The synthetic button, reused if an output list already
        //    referenced the name.
        let button = match index.get(BUTTON) {
            Some(&id) => id,
            None => {
                let id = arena_id(nodes.len());
                index.insert(BUTTON.to_string(), id);
                nodes.push(Module::passive(BUTTON));
                id
            }
        };

        // 7. Flip-flop roster in definition order.
        let flip_flops = defs
            .iter()
            .enumerate()
            .filter(|(_, d)| d.kind == ModuleKind::FlipFlop)
            .map(|(i, _)| arena_id(i))
            .collect();

        Ok(Self {
            nodes,
            index,
            broadcaster,
            button,
            flip_flops,
        })
    }

    /// Resolve a name to its node id.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// The node behind an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this network.
    pub fn node(&self, id: NodeId) -> &Module {
        &self.nodes[id.index()]
    }

    /// The canonical name behind an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this network.
    pub fn name(&self, id: NodeId) -> &str {
        self.nodes[id.index()].name()
    }

    /// Total number of nodes, passive sinks and button included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of flip-flops (the fingerprint width).
    pub fn flip_flop_count(&self) -> usize {
        self.flip_flops.len()
    }

    /// The broadcast entry point.
    pub fn broadcaster(&self) -> NodeId {
        self.broadcaster
    }

    /// The synthetic press source.
    pub fn button(&self) -> NodeId {
        self.button
    }

    /// The behavioral kind of a node, or `None` for passive nodes.
    pub fn kind(&self, id: NodeId) -> Option<ModuleKind> {
        self.nodes[id.index()].kind()
    }

    /// Every node whose output list contains `target`, in arena order.
    pub fn feeders(&self, target: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, m)| m.outputs().contains(&target))
            .map(|(i, _)| arena_id(i))
            .collect()
    }

    /// A conjunction's remembered-input set, in definition order of the
    /// sources. `None` if the node is not a conjunction.
    pub fn conjunction_inputs(&self, id: NodeId) -> Option<Vec<NodeId>> {
        match self.nodes[id.index()].behavior() {
            Behavior::Conjunction { memory } => Some(memory.keys().copied().collect()),
            _ => None,
        }
    }

    /// Restore the full initial state: every flip-flop off, every
    /// conjunction memory all-low.
    ///
    /// Detection assumes a known starting state, and conjunction memory
    /// is state; resetting flip-flops alone would let counts diverge
    /// between a fresh network and a reset one.
    pub fn reset(&mut self) {
        for module in &mut self.nodes {
            module.reset_state();
        }
    }

    /// Snapshot every flip-flop's state, in definition order.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut fp = Fingerprint::new(self.flip_flops.len());
        for (bit, &id) in self.flip_flops.iter().enumerate() {
            if self.nodes[id.index()].is_on() == Some(true) {
                fp.set(bit, true);
            }
        }
        fp
    }

    /// Deliver one pulse to its target, returning the level the target
    /// emits to its outputs, if any.
    ///
    /// A pulse into a conjunction from outside its remembered-input set
    /// is a wiring violation: construction guarantees it cannot happen,
    /// so its occurrence means the network is corrupt and the press must
    /// abort.
    pub(crate) fn deliver(
        &mut self,
        target: NodeId,
        level: Level,
        source: NodeId,
    ) -> Result<Option<Level>, StepError> {
        match self.nodes[target.index()].receive(level, source) {
            Ok(emitted) => Ok(emitted),
            Err(UnwiredInput) => Err(StepError::UnwiredConjunctionInput {
                module: self.nodes[target.index()].name().to_string(),
                source: self.nodes[source.index()].name().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::parse_definitions;

    fn chain_loop() -> Vec<ModuleDef> {
        parse_definitions(
            "broadcaster -> a, b, c\n%a -> b\n%b -> c\n%c -> inv\n&inv -> a",
        )
        .unwrap()
    }

    fn interference() -> Vec<ModuleDef> {
        parse_definitions(
            "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output",
        )
        .unwrap()
    }

    // ── Construction ───────────────────────────────────────────

    #[test]
    fn definitions_intern_in_order_then_sinks_then_button() {
        let network = Network::build(&interference()).unwrap();

        assert_eq!(network.lookup("broadcaster"), Some(NodeId(0)));
        assert_eq!(network.lookup("a"), Some(NodeId(1)));
        assert_eq!(network.lookup("inv"), Some(NodeId(2)));
        assert_eq!(network.lookup("b"), Some(NodeId(3)));
        assert_eq!(network.lookup("con"), Some(NodeId(4)));
        // "output" appears only as an output: passive sink after defs.
        assert_eq!(network.lookup("output"), Some(NodeId(5)));
        assert_eq!(network.lookup(BUTTON), Some(NodeId(6)));
        assert_eq!(network.node_count(), 7);

        assert_eq!(network.kind(NodeId(5)), None);
        assert_eq!(network.kind(NodeId(4)), Some(ModuleKind::Conjunction));
        assert_eq!(network.broadcaster(), NodeId(0));
    }

    #[test]
    fn conjunction_inputs_come_from_global_reverse_adjacency() {
        let network = Network::build(&interference()).unwrap();

        let con = network.lookup("con").unwrap();
        let a = network.lookup("a").unwrap();
        let b = network.lookup("b").unwrap();
        assert_eq!(network.conjunction_inputs(con), Some(vec![a, b]));

        let inv = network.lookup("inv").unwrap();
        assert_eq!(network.conjunction_inputs(inv), Some(vec![a]));

        // Non-conjunctions have no input memory.
        assert_eq!(network.conjunction_inputs(a), None);
    }

    #[test]
    fn feeders_are_the_reverse_edges() {
        let network = Network::build(&interference()).unwrap();
        let con = network.lookup("con").unwrap();
        let output = network.lookup("output").unwrap();

        assert_eq!(network.feeders(output), vec![con]);
        assert_eq!(
            network.feeders(con),
            vec![network.lookup("a").unwrap(), network.lookup("b").unwrap()]
        );
    }

    #[test]
    fn output_order_is_preserved() {
        let network = Network::build(&chain_loop()).unwrap();
        let bc = network.node(network.broadcaster());
        let names: Vec<_> = bc.outputs().iter().map(|&id| network.name(id)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    // ── Construction errors ────────────────────────────────────

    #[test]
    fn missing_broadcaster_is_fatal() {
        let defs = parse_definitions("%a -> b\n%b -> a").unwrap();
        assert_eq!(Network::build(&defs).unwrap_err(), BuildError::NoBroadcaster);
    }

    #[test]
    fn duplicate_definition_is_fatal() {
        let defs = parse_definitions("broadcaster -> a\n%a -> b\n&a -> b").unwrap();
        assert_eq!(
            Network::build(&defs).unwrap_err(),
            BuildError::DuplicateModule {
                name: "a".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_output_is_fatal() {
        let defs = parse_definitions("broadcaster -> a, a").unwrap();
        assert_eq!(
            Network::build(&defs).unwrap_err(),
            BuildError::DuplicateOutput {
                module: "broadcaster".to_string(),
                output: "a".to_string(),
            }
        );
    }

    #[test]
    fn button_name_is_reserved() {
        let defs = parse_definitions("broadcaster -> a\n%button -> a").unwrap();
        assert_eq!(
            Network::build(&defs).unwrap_err(),
            BuildError::ReservedName {
                name: "button".to_string(),
            }
        );
    }

    #[test]
    fn output_may_reference_button() {
        // Referencing the button as a target is odd but harmless: the
        // existing passive node absorbs the pulses.
        let defs = parse_definitions("broadcaster -> button").unwrap();
        let network = Network::build(&defs).unwrap();
        assert_eq!(network.lookup(BUTTON), Some(network.button()));
        assert_eq!(network.node_count(), 2);
    }

    // ── State management ───────────────────────────────────────

    #[test]
    fn reset_restores_flip_flops_and_conjunction_memory() {
        let mut network = Network::build(&interference()).unwrap();
        let a = network.lookup("a").unwrap();
        let con = network.lookup("con").unwrap();
        let bc = network.broadcaster();

        // Drive some state in by hand.
        network.deliver(a, Level::Low, bc).unwrap();
        assert_eq!(network.node(a).is_on(), Some(true));
        network.deliver(con, Level::High, a).unwrap();

        network.reset();
        assert_eq!(network.node(a).is_on(), Some(false));
        assert_eq!(network.fingerprint(), Fingerprint::new(2));

        // Memory is back to all-low: one high from `a` must not read as
        // all-high (b's slot is low again).
        let emitted = network.deliver(con, Level::High, a).unwrap();
        assert_eq!(emitted, Some(Level::High));
    }

    #[test]
    fn fingerprint_bits_follow_definition_order() {
        let mut network = Network::build(&chain_loop()).unwrap();
        let bc = network.broadcaster();
        let b = network.lookup("b").unwrap();

        // Flip-flop roster is a, b, c; turn only `b` on.
        network.deliver(b, Level::Low, bc).unwrap();

        let fp = network.fingerprint();
        assert_eq!(fp.to_string(), "010");
    }

    // ── Wiring violations ──────────────────────────────────────

    #[test]
    fn unwired_conjunction_source_fails_loudly() {
        let mut network = Network::build(&interference()).unwrap();
        let inv = network.lookup("inv").unwrap();
        let b = network.lookup("b").unwrap();

        // `inv` remembers only `a`; a pulse claiming to come from `b`
        // signals a corrupt build.
        let err = network.deliver(inv, Level::High, b).unwrap_err();
        assert_eq!(
            err,
            StepError::UnwiredConjunctionInput {
                module: "inv".to_string(),
                source: "b".to_string(),
            }
        );
    }
}
