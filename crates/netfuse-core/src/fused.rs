//! The fused similarity graph produced by the fusion engine.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::types::NodeKey;

/// An undirected simple graph over the vertex universe of a fuse call.
///
/// Wraps a petgraph [`UnGraph`] with a node → index map for O(1) lookup by
/// node key. Nodes are never removed, so petgraph indices stay dense and
/// follow discovery order.
///
/// Invariant: every node carries a self-loop; it is inserted the moment the
/// node is added. Invariant: at most one edge connects any node pair, in
/// either orientation. Both hold by construction because mutation is
/// crate-internal; a fused graph is only built by [`crate::fuse::fuse`].
#[derive(Debug, Clone)]
pub struct FusedGraph<N> {
    graph: UnGraph<N, ()>,
    node_to_index: HashMap<N, NodeIndex>,
}

impl<N: NodeKey> FusedGraph<N> {
    pub(crate) fn with_capacity(nodes: usize) -> Self {
        Self {
            // Every node brings a self-loop, so edge capacity starts at the
            // node capacity.
            graph: UnGraph::with_capacity(nodes, nodes),
            node_to_index: HashMap::with_capacity(nodes),
        }
    }

    /// Inserts `node` with its self-loop; a no-op for known nodes.
    pub(crate) fn add_node(&mut self, node: N) -> NodeIndex {
        if let Some(&index) = self.node_to_index.get(&node) {
            return index;
        }
        let index = self.graph.add_node(node.clone());
        self.node_to_index.insert(node, index);
        self.graph.add_edge(index, index, ());
        index
    }

    /// Connects two known nodes; a no-op if the pair is already connected
    /// in either orientation.
    pub(crate) fn connect(&mut self, a: NodeIndex, b: NodeIndex) {
        self.graph.update_edge(a, b, ());
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the number of analog edges, i.e. edges between distinct
    /// nodes. Relies on the one-self-loop-per-node invariant.
    pub fn analog_edge_count(&self) -> usize {
        self.graph.edge_count() - self.graph.node_count()
    }

    /// Returns `true` if `node` is part of the vertex universe.
    pub fn contains_node(&self, node: &N) -> bool {
        self.node_to_index.contains_key(node)
    }

    /// Returns `true` if the edge is present, in either orientation.
    /// Unknown endpoints yield `false`.
    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        let (Some(&a), Some(&b)) = (self.node_to_index.get(u), self.node_to_index.get(v)) else {
            return false;
        };
        self.graph.find_edge(a, b).is_some()
    }

    /// Iterates nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// Iterates the neighbors of `node`.
    ///
    /// Includes `node` itself once, via its self-loop. Unknown nodes yield
    /// an empty iterator.
    pub fn neighbors(&self, node: &N) -> impl Iterator<Item = &N> {
        self.node_to_index
            .get(node)
            .into_iter()
            .flat_map(|&index| self.graph.neighbors(index))
            .filter_map(|index| self.graph.node_weight(index))
    }

    /// Looks up the petgraph [`NodeIndex`] for a node key.
    pub fn node_index(&self, node: &N) -> Option<NodeIndex> {
        self.node_to_index.get(node).copied()
    }

    /// Returns a reference to the underlying [`UnGraph`] for use with
    /// petgraph algorithms.
    pub fn graph(&self) -> &UnGraph<N, ()> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn fused_pair() -> FusedGraph<&'static str> {
        let mut fused = FusedGraph::with_capacity(2);
        let a = fused.add_node("a");
        let b = fused.add_node("b");
        fused.connect(a, b);
        fused
    }

    #[test]
    fn every_added_node_gets_a_self_loop() {
        let mut fused = FusedGraph::with_capacity(3);
        for node in ["x", "y", "z"] {
            fused.add_node(node);
        }
        for node in ["x", "y", "z"] {
            assert!(fused.has_edge(&node, &node), "{node} should have a self-loop");
        }
        assert_eq!(fused.node_count(), 3);
        assert_eq!(fused.edge_count(), 3);
        assert_eq!(fused.analog_edge_count(), 0);
    }

    #[test]
    fn re_adding_a_node_is_a_noop() {
        let mut fused = FusedGraph::with_capacity(1);
        let first = fused.add_node("a");
        let second = fused.add_node("a");
        assert_eq!(first, second);
        assert_eq!(fused.node_count(), 1);
        assert_eq!(fused.edge_count(), 1, "self-loop must not duplicate");
    }

    #[test]
    fn connect_deduplicates_both_orientations() {
        let mut fused = fused_pair();
        let a = fused.node_index(&"a").expect("a is present");
        let b = fused.node_index(&"b").expect("b is present");
        fused.connect(a, b);
        fused.connect(b, a);
        assert_eq!(fused.analog_edge_count(), 1);
        assert!(fused.has_edge(&"a", &"b"));
        assert!(fused.has_edge(&"b", &"a"));
    }

    #[test]
    fn neighbors_include_self_via_the_loop() {
        let fused = fused_pair();
        let mut neighbors: Vec<&str> = fused.neighbors(&"a").copied().collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, ["a", "b"]);
    }

    #[test]
    fn unknown_nodes_have_no_edges_or_neighbors() {
        let fused = fused_pair();
        assert!(!fused.contains_node(&"q"));
        assert!(!fused.has_edge(&"a", &"q"));
        assert_eq!(fused.neighbors(&"q").count(), 0);
        assert_eq!(fused.node_index(&"q"), None);
    }

    #[test]
    fn nodes_iterate_in_discovery_order() {
        let mut fused = FusedGraph::with_capacity(3);
        for node in ["m", "k", "j"] {
            fused.add_node(node);
        }
        let order: Vec<&&str> = fused.nodes().collect();
        assert_eq!(order, [&"m", &"k", &"j"]);
    }
}
