//! Small shared types: the node-key marker trait and component identifiers.

use std::fmt;
use std::hash::Hash;

/// Marker trait for node identifiers.
///
/// Nodes are opaque keys: the algorithms only clone, compare, hash, and
/// debug-print them, so any type with those capabilities works as a node.
/// The trait is blanket-implemented and never needs a manual impl.
pub trait NodeKey: Clone + Eq + Hash + fmt::Debug {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + fmt::Debug {}

/// Identifier of one connected component of a fused graph.
///
/// Ids are dense (`0..component_count`) and assigned per collapse in
/// ascending order of component size, ties broken by discovery order. An id
/// names a component only within the call that produced it; a different
/// input ordering may give the same node cluster a different id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ComponentId(usize);

impl ComponentId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the dense integer behind this id.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
