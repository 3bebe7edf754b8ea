//! Connected-component discovery over a fused graph.

use std::collections::HashMap;

use petgraph::visit::EdgeRef;

use crate::fused::FusedGraph;
use crate::types::{ComponentId, NodeKey};
use crate::union_find::UnionFind;

/// The partition of a fused graph's nodes into connected components.
///
/// An integer-indexed arena: member lists are addressed by [`ComponentId`]
/// and the inverse `component_of` map is total over the fused graph's
/// nodes. Ids are assigned in ascending component size, ties broken by
/// discovery order (the order nodes first entered the fused graph), so a
/// fixed input always yields the same numbering.
#[derive(Debug, Clone)]
pub struct ComponentPartition<N> {
    members: Vec<Vec<N>>,
    component_of: HashMap<N, ComponentId>,
}

impl<N: NodeKey> ComponentPartition<N> {
    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the partition covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the total node count across all components.
    pub fn node_count(&self) -> usize {
        self.component_of.len()
    }

    /// Returns the members of `id` in discovery order, or an empty slice
    /// for an unknown id.
    pub fn members(&self, id: ComponentId) -> &[N] {
        self.members
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the component that absorbed `node`, if the node was part of
    /// the fused graph.
    pub fn component_of(&self, node: &N) -> Option<ComponentId> {
        self.component_of.get(node).copied()
    }

    /// Iterates `(id, members)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &[N])> {
        self.members
            .iter()
            .enumerate()
            .map(|(index, members)| (ComponentId::new(index), members.as_slice()))
    }
}

/// Computes the connected components of `fused`.
///
/// Unions the endpoints of every fused edge (self-loops are no-ops),
/// buckets nodes by representative in discovery order, then sorts the
/// buckets by size ascending. The sort is stable, so equal-sized
/// components keep their discovery order; ids are assigned in the final
/// order.
pub fn connected_components<N: NodeKey>(fused: &FusedGraph<N>) -> ComponentPartition<N> {
    let graph = fused.graph();
    let node_count = graph.node_count();

    let mut uf = UnionFind::new(node_count);
    for edge in graph.edge_references() {
        uf.union(edge.source().index(), edge.target().index());
    }

    let mut bucket_of_rep: HashMap<usize, usize> = HashMap::new();
    let mut buckets: Vec<Vec<usize>> = Vec::new();
    for index in 0..node_count {
        let rep = uf.find(index);
        let bucket = *bucket_of_rep.entry(rep).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[bucket].push(index);
    }

    buckets.sort_by_key(Vec::len);

    let nodes: Vec<&N> = graph.node_weights().collect();
    let mut members: Vec<Vec<N>> = Vec::with_capacity(buckets.len());
    let mut component_of: HashMap<N, ComponentId> = HashMap::with_capacity(node_count);
    for (index, bucket) in buckets.iter().enumerate() {
        let id = ComponentId::new(index);
        let mut component: Vec<N> = Vec::with_capacity(bucket.len());
        for &ordinal in bucket {
            let node = nodes[ordinal].clone();
            component_of.insert(node.clone(), id);
            component.push(node);
        }
        members.push(component);
    }

    ComponentPartition {
        members,
        component_of,
    }
}
