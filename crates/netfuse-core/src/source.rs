//! Input-graph representation and the vertex-universe union.
//!
//! A [`SourceGraph`] is what callers hand to fusion and collapsing: a set of
//! nodes plus undirected edges, loops permitted, no parallel edges. Nodes
//! are kept in first-insertion order and edges in normalized
//! lowest-ordinal-first form so that iteration over either is deterministic
//! for a fixed construction sequence.

use std::collections::{HashMap, HashSet};

use crate::types::NodeKey;

#[cfg(feature = "serde")]
pub use wire::WireGraphError;

/// An undirected input graph over opaque node keys.
///
/// Backed by an insertion-ordered node arena plus a node → ordinal map;
/// edges are stored as normalized ordinal pairs with set semantics (adding
/// an existing edge, in either orientation, is a no-op). The fuse and
/// collapse passes only ever read a `SourceGraph`; they never mutate it.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        into = "wire::WireGraph<N>",
        try_from = "wire::WireGraph<N>",
        bound(
            serialize = "N: NodeKey + serde::Serialize",
            deserialize = "N: NodeKey + serde::Deserialize<'de>"
        )
    )
)]
pub struct SourceGraph<N> {
    nodes: Vec<N>,
    node_to_ordinal: HashMap<N, usize>,
    edges: Vec<(usize, usize)>,
    edge_set: HashSet<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl<N: NodeKey> SourceGraph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_to_ordinal: HashMap::new(),
            edges: Vec::new(),
            edge_set: HashSet::new(),
            adjacency: Vec::new(),
        }
    }

    /// Builds a graph from an edge list, inserting endpoints as they appear.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Inserts a node. Returns `false` if the node was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.node_to_ordinal.contains_key(&node) {
            return false;
        }
        self.ordinal_or_insert(node);
        true
    }

    /// Inserts an undirected edge, adding either endpoint first if missing.
    ///
    /// A loop (`u == v`) is a valid edge. Returns `false` if the edge was
    /// already present in either orientation.
    pub fn add_edge(&mut self, u: N, v: N) -> bool {
        let a = self.ordinal_or_insert(u);
        let b = self.ordinal_or_insert(v);
        let key = if a <= b { (a, b) } else { (b, a) };
        if !self.edge_set.insert(key) {
            return false;
        }
        self.edges.push(key);
        self.adjacency[a].push(b);
        if a != b {
            self.adjacency[b].push(a);
        }
        true
    }

    /// Returns `true` if `node` is present.
    pub fn contains_node(&self, node: &N) -> bool {
        self.node_to_ordinal.contains_key(node)
    }

    /// Returns `true` if the edge is present, in either orientation.
    pub fn contains_edge(&self, u: &N, v: &N) -> bool {
        let (Some(&a), Some(&b)) = (self.node_to_ordinal.get(u), self.node_to_ordinal.get(v))
        else {
            return false;
        };
        let key = if a <= b { (a, b) } else { (b, a) };
        self.edge_set.contains(&key)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct edges (loops count once).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates nodes in first-insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// Iterates edges in insertion order, endpoints in normalized order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.edges
            .iter()
            .map(|&(a, b)| (&self.nodes[a], &self.nodes[b]))
    }

    /// Iterates the neighbors of `node` in edge-insertion order.
    ///
    /// A loop contributes `node` itself once. Unknown nodes yield an empty
    /// iterator.
    pub fn neighbors(&self, node: &N) -> impl Iterator<Item = &N> {
        let ordinals: &[usize] = self
            .node_to_ordinal
            .get(node)
            .map(|&ordinal| self.adjacency[ordinal].as_slice())
            .unwrap_or(&[]);
        ordinals.iter().map(|&ordinal| &self.nodes[ordinal])
    }

    /// Returns the number of distinct neighbors of `node` (a loop counts
    /// once). Zero for unknown nodes.
    pub fn degree(&self, node: &N) -> usize {
        self.node_to_ordinal
            .get(node)
            .map(|&ordinal| self.adjacency[ordinal].len())
            .unwrap_or(0)
    }

    fn ordinal_or_insert(&mut self, node: N) -> usize {
        if let Some(&ordinal) = self.node_to_ordinal.get(&node) {
            return ordinal;
        }
        let ordinal = self.nodes.len();
        self.node_to_ordinal.insert(node.clone(), ordinal);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        ordinal
    }

    fn node_at(&self, ordinal: usize) -> Option<&N> {
        self.nodes.get(ordinal)
    }
}

impl<N: NodeKey> Default for SourceGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the vertex universe of a fuse call: the set union of the node
/// sets of all `graphs`, in first-encounter order (graphs in slice order,
/// nodes in per-graph insertion order).
pub fn vertex_universe<N: NodeKey>(graphs: &[SourceGraph<N>]) -> Vec<N> {
    let mut seen: HashSet<&N> = HashSet::new();
    let mut universe: Vec<N> = Vec::new();
    for graph in graphs {
        for node in graph.nodes() {
            if seen.insert(node) {
                universe.push(node.clone());
            }
        }
    }
    universe
}

#[cfg(feature = "serde")]
mod wire {
    //! Serialized form of [`SourceGraph`]: a node list plus ordinal edge
    //! pairs into it. Keeps map keys out of the wire format so non-string
    //! node types survive JSON.

    use serde::{Deserialize, Serialize};

    use super::SourceGraph;
    use crate::types::NodeKey;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct WireGraph<N> {
        nodes: Vec<N>,
        edges: Vec<(usize, usize)>,
    }

    /// Rejection reasons when rebuilding a [`SourceGraph`] from its wire form.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum WireGraphError {
        /// The node list names the same node twice.
        ///
        /// The field is the `Debug` rendering of the duplicate.
        DuplicateNode(String),
        /// An edge refers to an ordinal past the end of the node list.
        OrdinalOutOfRange {
            /// The offending ordinal.
            ordinal: usize,
            /// The length of the accompanying node list.
            node_count: usize,
        },
    }

    impl std::fmt::Display for WireGraphError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::DuplicateNode(node) => {
                    write!(f, "node list contains {node} more than once")
                }
                Self::OrdinalOutOfRange {
                    ordinal,
                    node_count,
                } => {
                    write!(
                        f,
                        "edge ordinal {ordinal} out of range for {node_count} nodes"
                    )
                }
            }
        }
    }

    impl std::error::Error for WireGraphError {}

    impl<N: NodeKey> From<SourceGraph<N>> for WireGraph<N> {
        fn from(graph: SourceGraph<N>) -> Self {
            Self {
                nodes: graph.nodes,
                edges: graph.edges,
            }
        }
    }

    impl<N: NodeKey> TryFrom<WireGraph<N>> for SourceGraph<N> {
        type Error = WireGraphError;

        fn try_from(wire: WireGraph<N>) -> Result<Self, WireGraphError> {
            let mut graph = SourceGraph::new();
            let node_count = wire.nodes.len();
            for node in wire.nodes {
                if graph.contains_node(&node) {
                    return Err(WireGraphError::DuplicateNode(format!("{node:?}")));
                }
                graph.add_node(node);
            }
            for (a, b) in wire.edges {
                let u = graph.node_at(a).cloned().ok_or(
                    WireGraphError::OrdinalOutOfRange {
                        ordinal: a,
                        node_count,
                    },
                )?;
                let v = graph.node_at(b).cloned().ok_or(
                    WireGraphError::OrdinalOutOfRange {
                        ordinal: b,
                        node_count,
                    },
                )?;
                graph.add_edge(u, v);
            }
            Ok(graph)
        }
    }
}
