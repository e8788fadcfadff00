//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a node within a pulse network.
///
/// Every name that appears anywhere in the definition list, whether as a
/// module or only as an output target, is interned to a sequential `NodeId` at
/// network construction. All edges between modules are `NodeId` lookups
/// through the network registry, never direct references: the graph is
/// routinely cyclic, and ids keep it ownable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The arena index this id names.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing button-press counter, 1-based.
///
/// `PressId(0)` means no press has completed yet; the first completed
/// press is `PressId(1)`. Sink-target detection reports its answer as
/// the `PressId` of the satisfying press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PressId(pub u64);

impl fmt::Display for PressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PressId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
