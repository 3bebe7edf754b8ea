//! Collapsing: contract each fused component into one node of a
//! multigraph.

use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::components::{ComponentPartition, connected_components};
use crate::fused::FusedGraph;
use crate::source::SourceGraph;
use crate::types::{ComponentId, NodeKey};

// ---------------------------------------------------------------------------
// CollapseError
// ---------------------------------------------------------------------------

/// Errors that can occur during collapsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollapseError {
    /// A source graph contains a node the fused graph has never seen.
    ///
    /// Collapsing assigns every source node to the component of its fused
    /// counterpart, so the fused graph must cover every source node. The
    /// field is the `Debug` rendering of the missing node.
    NodeNotFused {
        /// The source node absent from the fused graph.
        node: String,
    },
}

impl fmt::Display for CollapseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFused { node } => {
                write!(f, "source node {node} is not part of the fused graph")
            }
        }
    }
}

impl std::error::Error for CollapseError {}

// ---------------------------------------------------------------------------
// CollapsedGraph
// ---------------------------------------------------------------------------

/// A multigraph over component ids.
///
/// Nodes are the dense ids of one [`ComponentPartition`]; by construction
/// [`ComponentId`] and petgraph [`NodeIndex`] coincide. Edges are derived
/// from the original source edges, one collapsed edge per original edge,
/// so parallel edges and self-loops carry multiplicity.
#[derive(Debug, Clone)]
pub struct CollapsedGraph {
    graph: UnGraph<ComponentId, ()>,
}

impl CollapsedGraph {
    /// Creates a graph holding `count` components and no edges yet.
    pub(crate) fn with_components(count: usize) -> Self {
        let mut graph = UnGraph::with_capacity(count, count);
        for index in 0..count {
            graph.add_node(ComponentId::new(index));
        }
        Self { graph }
    }

    /// Adds one collapsed edge; parallel edges and self-loops accumulate.
    pub(crate) fn link(&mut self, a: ComponentId, b: ComponentId) {
        self.graph
            .add_edge(NodeIndex::new(a.index()), NodeIndex::new(b.index()), ());
    }

    /// Returns the number of components.
    pub fn component_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the total number of collapsed edges, multiplicity included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if `id` names a component of this graph.
    pub fn contains_component(&self, id: ComponentId) -> bool {
        id.index() < self.graph.node_count()
    }

    /// Iterates all collapsed edges, one entry per original edge.
    pub fn edges(&self) -> impl Iterator<Item = (ComponentId, ComponentId)> {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()]))
    }

    /// Returns how many parallel edges connect `a` and `b` (in either
    /// orientation), or how many self-loops `a` carries when `a == b`.
    /// Unknown ids yield zero.
    pub fn edge_multiplicity(&self, a: ComponentId, b: ComponentId) -> usize {
        if !self.contains_component(a) || !self.contains_component(b) {
            return 0;
        }
        self.graph
            .edges_connecting(NodeIndex::new(a.index()), NodeIndex::new(b.index()))
            .count()
    }

    /// Returns the number of self-loops at `id`. Unknown ids yield zero.
    pub fn self_loop_count(&self, id: ComponentId) -> usize {
        self.edge_multiplicity(id, id)
    }

    /// Looks up the petgraph [`NodeIndex`] for a component id.
    pub fn node_index(&self, id: ComponentId) -> Option<NodeIndex> {
        self.contains_component(id)
            .then(|| NodeIndex::new(id.index()))
    }

    /// Returns a reference to the underlying [`UnGraph`] for use with
    /// petgraph algorithms.
    pub fn graph(&self) -> &UnGraph<ComponentId, ()> {
        &self.graph
    }
}

// ---------------------------------------------------------------------------
// CollapseOutput
// ---------------------------------------------------------------------------

/// The result of a successful collapse.
#[derive(Debug, Clone)]
pub struct CollapseOutput<N> {
    /// The collapsed multigraph of component ids.
    pub collapsed: CollapsedGraph,
    /// Which original nodes each component absorbed, and the inverse map.
    pub partition: ComponentPartition<N>,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Collapses each connected component of `fused` into one node of a
/// multigraph, re-wiring the edges of `sources` onto component ids.
///
/// Components are numbered by ascending size (discovery order breaks
/// ties). Then every edge `(u, v)` of every source graph, taken in slice
/// order and per-graph insertion order, contributes exactly one collapsed
/// edge between the components of `u` and `v`; a self-loop when both
/// endpoints share a component. Two original edges mapping to the same
/// component pair yield two parallel collapsed edges.
///
/// `sources` is usually the same slice that went into the fuse, but any
/// graphs whose nodes the fused graph covers are accepted.
///
/// # Errors
///
/// Returns [`CollapseError::NodeNotFused`] when a source node is absent
/// from the fused graph; the check runs before any edge is re-wired.
pub fn collapse<N: NodeKey>(
    fused: &FusedGraph<N>,
    sources: &[SourceGraph<N>],
) -> Result<CollapseOutput<N>, CollapseError> {
    let partition = connected_components(fused);

    for source in sources {
        for node in source.nodes() {
            if partition.component_of(node).is_none() {
                return Err(CollapseError::NodeNotFused {
                    node: format!("{node:?}"),
                });
            }
        }
    }

    let mut collapsed = CollapsedGraph::with_components(partition.len());
    for source in sources {
        for (u, v) in source.edges() {
            let cu = component_of_checked(&partition, u)?;
            let cv = component_of_checked(&partition, v)?;
            collapsed.link(cu, cv);
        }
    }

    Ok(CollapseOutput {
        collapsed,
        partition,
    })
}

/// The no-panic lookup used by the edge pass; coverage was checked up
/// front, so a miss here cannot happen for edge endpoints.
fn component_of_checked<N: NodeKey>(
    partition: &ComponentPartition<N>,
    node: &N,
) -> Result<ComponentId, CollapseError> {
    partition
        .component_of(node)
        .ok_or_else(|| CollapseError::NodeNotFused {
            node: format!("{node:?}"),
        })
}
