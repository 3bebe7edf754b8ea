//! Post-operation invariant checkers for correctness validation.

use std::collections::HashSet;

use netfuse_core::{
    CollapseOutput, ComponentPartition, FusedGraph, NodeKey, SourceGraph, vertex_universe,
};

/// Verifies fused graph invariants: full universe coverage and a
/// self-loop at every node.
pub fn check_fused_invariants<N: NodeKey>(
    fused: &FusedGraph<N>,
    graphs: &[SourceGraph<N>],
) -> Result<(), String> {
    let universe = vertex_universe(graphs);
    if fused.node_count() != universe.len() {
        return Err(format!(
            "node count mismatch: fused={}, universe={}",
            fused.node_count(),
            universe.len()
        ));
    }
    for node in &universe {
        if !fused.contains_node(node) {
            return Err(format!("universe node {node:?} missing from fused graph"));
        }
        if !fused.has_edge(node, node) {
            return Err(format!("fused node {node:?} has no self-loop"));
        }
    }
    if fused.edge_count() < fused.node_count() {
        return Err(format!(
            "fewer edges than self-loops: edges={}, nodes={}",
            fused.edge_count(),
            fused.node_count()
        ));
    }
    Ok(())
}

/// Verifies the component partition against the fused graph:
/// - every fused node is assigned to exactly one component
/// - the member lists and the inverse map agree
/// - member counts ascend with the component id
/// - the component count matches petgraph's own count
pub fn check_partition<N: NodeKey>(
    fused: &FusedGraph<N>,
    partition: &ComponentPartition<N>,
) -> Result<(), String> {
    let mut assigned: HashSet<&N> = HashSet::new();
    let mut previous_len = 0usize;
    for (id, members) in partition.iter() {
        if members.len() < previous_len {
            return Err(format!(
                "component {id} is smaller than its predecessor: {} < {previous_len}",
                members.len()
            ));
        }
        previous_len = members.len();
        for member in members {
            if !assigned.insert(member) {
                return Err(format!("node {member:?} assigned to two components"));
            }
            if partition.component_of(member) != Some(id) {
                return Err(format!("inverse map disagrees for node {member:?}"));
            }
        }
    }
    if assigned.len() != fused.node_count() {
        return Err(format!(
            "partition covers {} nodes, fused graph has {}",
            assigned.len(),
            fused.node_count()
        ));
    }

    let independent = petgraph::algo::connected_components(fused.graph());
    if partition.len() != independent {
        return Err(format!(
            "component count mismatch: partition={}, petgraph={independent}",
            partition.len()
        ));
    }
    Ok(())
}

/// Verifies collapse invariants:
/// - the collapsed node count equals the partition's component count
/// - one collapsed edge per original edge (conservation)
/// - every original edge's component pair is connected
pub fn check_collapse<N: NodeKey>(
    output: &CollapseOutput<N>,
    graphs: &[SourceGraph<N>],
) -> Result<(), String> {
    if output.collapsed.component_count() != output.partition.len() {
        return Err(format!(
            "collapsed node count {} != component count {}",
            output.collapsed.component_count(),
            output.partition.len()
        ));
    }

    let source_edges: usize = graphs.iter().map(SourceGraph::edge_count).sum();
    if output.collapsed.edge_count() != source_edges {
        return Err(format!(
            "collapsed edge count {} != source edge count {source_edges}",
            output.collapsed.edge_count()
        ));
    }

    for graph in graphs {
        for (u, v) in graph.edges() {
            let cu = output
                .partition
                .component_of(u)
                .ok_or_else(|| format!("node {u:?} missing from partition"))?;
            let cv = output
                .partition
                .component_of(v)
                .ok_or_else(|| format!("node {v:?} missing from partition"))?;
            if output.collapsed.edge_multiplicity(cu, cv) == 0 {
                return Err(format!("source edge {u:?}-{v:?} has no collapsed counterpart"));
            }
        }
    }
    Ok(())
}
