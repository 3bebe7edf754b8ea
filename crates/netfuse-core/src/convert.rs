//! Conversion of a collapsed multigraph back into a simple graph over
//! component ids, ready to feed into another fuse round.

use std::collections::HashSet;

use crate::collapse::CollapsedGraph;
use crate::source::SourceGraph;
use crate::types::ComponentId;

/// Flattens a collapsed multigraph into a [`SourceGraph`] over
/// [`ComponentId`] keys.
///
/// Every component becomes a node, including isolated ones. Parallel
/// edges dedupe to one, self-loops survive as single loops, and edge
/// multiplicity is discarded. The result is a valid fuse input, which is
/// what makes iterated fuse and collapse rounds possible.
pub fn simplify(collapsed: &CollapsedGraph) -> SourceGraph<ComponentId> {
    let mut simple = SourceGraph::new();
    for &id in collapsed.graph().node_weights() {
        simple.add_node(id);
    }
    let mut seen: HashSet<(ComponentId, ComponentId)> = HashSet::new();
    for (a, b) in collapsed.edges() {
        let key = if a <= b { (a, b) } else { (b, a) };
        if seen.insert(key) {
            simple.add_edge(a, b);
        }
    }
    simple
}
