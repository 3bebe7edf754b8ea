//! The fusion engine: build a similarity graph over a family of input
//! graphs.

use std::collections::HashSet;
use std::fmt;

use petgraph::graph::NodeIndex;

use crate::fused::FusedGraph;
use crate::similarity::{Similarity, SimilarityError};
use crate::source::{SourceGraph, vertex_universe};
use crate::types::NodeKey;

// ---------------------------------------------------------------------------
// FuseError
// ---------------------------------------------------------------------------

/// Errors that can occur during fusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuseError {
    /// The similarity oracle failed; its error is carried unmodified.
    Similarity(SimilarityError),
    /// The oracle returned an analog that is not part of the vertex
    /// universe.
    ///
    /// The field is the `Debug` rendering of the offending node.
    ForeignAnalog {
        /// The node the oracle returned but no input graph contains.
        analog: String,
    },
}

impl fmt::Display for FuseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Similarity(err) => err.fmt(f),
            Self::ForeignAnalog { analog } => {
                write!(f, "oracle returned analog {analog} outside the vertex universe")
            }
        }
    }
}

impl std::error::Error for FuseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Similarity(err) => Some(err),
            Self::ForeignAnalog { .. } => None,
        }
    }
}

impl From<SimilarityError> for FuseError {
    fn from(err: SimilarityError) -> Self {
        Self::Similarity(err)
    }
}

// ---------------------------------------------------------------------------
// FuseConfig
// ---------------------------------------------------------------------------

/// Configuration for the fusion scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuseConfig {
    /// Emit a `log::debug!` progress line after every this-many processed
    /// vertices. `None` and `Some(0)` both disable progress output.
    ///
    /// Default: `None`.
    pub progress_every: Option<usize>,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Fuses `graphs` into a similarity graph using the default [`FuseConfig`].
///
/// Computes the vertex universe (the union of all node sets), gives every
/// node a self-loop, then scans each node once: the oracle is invoked with
/// the node, the rest of the universe as candidates, and `threshold`; every
/// returned analog becomes an undirected edge.
///
/// The oracle need not be symmetric. An edge discovered from either
/// endpoint's scan is stored undirected, so `(u, a)` added during u's scan
/// also connects a to u even if a's own scan would not return u; no
/// symmetry check is made. Callers must not depend on the order edges are
/// constructed, only on the resulting edge set.
///
/// `threshold` is passed through to the oracle unvalidated; its range and
/// meaning are oracle-defined. An empty `graphs` slice is not an error and
/// yields an empty fused graph.
///
/// # Errors
///
/// Returns [`FuseError::Similarity`] when the oracle fails; the oracle's
/// error aborts the scan and reaches the caller unmodified. Returns
/// [`FuseError::ForeignAnalog`] when the oracle returns a node outside the
/// vertex universe.
pub fn fuse<N, S>(
    threshold: f64,
    oracle: &S,
    graphs: &[SourceGraph<N>],
) -> Result<FusedGraph<N>, FuseError>
where
    N: NodeKey,
    S: Similarity<N> + ?Sized,
{
    fuse_with_config(threshold, oracle, graphs, &FuseConfig::default())
}

/// Fuses `graphs` using the given configuration.
///
/// # Errors
///
/// See [`fuse`].
pub fn fuse_with_config<N, S>(
    threshold: f64,
    oracle: &S,
    graphs: &[SourceGraph<N>],
    config: &FuseConfig,
) -> Result<FusedGraph<N>, FuseError>
where
    N: NodeKey,
    S: Similarity<N> + ?Sized,
{
    let universe = vertex_universe(graphs);
    let total = universe.len();

    let mut fused = FusedGraph::with_capacity(total);
    let indices: Vec<NodeIndex> = universe
        .iter()
        .map(|node| fused.add_node(node.clone()))
        .collect();

    let universe_set: HashSet<N> = universe.iter().cloned().collect();
    let stride = config.progress_every.unwrap_or(0);

    for (position, node) in universe.iter().enumerate() {
        // Candidates are the universe minus the node under scan; the
        // oracle never sees the source among them.
        let mut candidates = universe_set.clone();
        candidates.remove(node);

        let analogs = oracle.analogs(node, &candidates, threshold)?;

        for analog in analogs {
            if analog == *node {
                // Tolerated: the node's self-loop already exists.
                continue;
            }
            let Some(analog_index) = fused.node_index(&analog) else {
                return Err(FuseError::ForeignAnalog {
                    analog: format!("{analog:?}"),
                });
            };
            fused.connect(indices[position], analog_index);
        }

        if stride > 0 && (position + 1) % stride == 0 {
            log::debug!(
                "fused {}/{total} vertices at threshold {threshold}",
                position + 1
            );
        }
    }

    if stride > 0 {
        log::debug!(
            "fuse complete: {total} vertices, {} analog edges",
            fused.analog_edge_count()
        );
    }

    Ok(fused)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn accept_all(
        _source: &&'static str,
        candidates: &HashSet<&'static str>,
        _threshold: f64,
    ) -> Result<HashSet<&'static str>, SimilarityError> {
        Ok(candidates.clone())
    }

    fn reject_all(
        _source: &&'static str,
        _candidates: &HashSet<&'static str>,
        _threshold: f64,
    ) -> Result<HashSet<&'static str>, SimilarityError> {
        Ok(HashSet::new())
    }

    #[test]
    fn no_input_graphs_fuse_to_an_empty_graph() {
        let graphs: Vec<SourceGraph<&'static str>> = Vec::new();
        let fused = fuse(0.5, &accept_all, &graphs).expect("empty input is not an error");
        assert_eq!(fused.node_count(), 0);
        assert_eq!(fused.edge_count(), 0);
    }

    #[test]
    fn every_universe_node_gets_a_self_loop() {
        let g1 = SourceGraph::from_edges([("a", "b")]);
        let g2 = SourceGraph::from_edges([("b", "c")]);
        let fused = fuse(0.5, &reject_all, &[g1, g2]).expect("fuse should succeed");
        assert_eq!(fused.node_count(), 3);
        for node in ["a", "b", "c"] {
            assert!(fused.has_edge(&node, &node), "{node} should have a self-loop");
        }
        assert_eq!(fused.analog_edge_count(), 0);
    }

    #[test]
    fn analogs_become_undirected_edges() {
        let g1 = SourceGraph::from_edges([("a", "b")]);
        let link_a_c = |source: &&'static str,
                        candidates: &HashSet<&'static str>,
                        _threshold: f64| {
            let mut analogs = HashSet::new();
            if *source == "a" && candidates.contains(&"c") {
                analogs.insert("c");
            }
            Ok::<_, SimilarityError>(analogs)
        };
        let mut g2 = SourceGraph::new();
        g2.add_node("c");
        let fused = fuse(0.9, &link_a_c, &[g1, g2]).expect("fuse should succeed");
        assert!(fused.has_edge(&"a", &"c"));
        assert!(fused.has_edge(&"c", &"a"), "storage is undirected");
        assert!(!fused.has_edge(&"b", &"c"));
        assert_eq!(fused.analog_edge_count(), 1);
    }

    #[test]
    fn single_node_universe_sees_empty_candidates() {
        let mut graph = SourceGraph::new();
        graph.add_node("only");
        let saw_empty = |source: &&'static str,
                         candidates: &HashSet<&'static str>,
                         _threshold: f64| {
            assert_eq!(*source, "only");
            assert!(candidates.is_empty(), "sole node must see no candidates");
            Ok::<_, SimilarityError>(HashSet::new())
        };
        let fused = fuse(0.1, &saw_empty, &[graph]).expect("fuse should succeed");
        assert_eq!(fused.node_count(), 1);
        assert_eq!(fused.edge_count(), 1, "only the self-loop");
    }

    #[test]
    fn source_is_never_among_its_own_candidates() {
        let graph = SourceGraph::from_edges([("a", "b"), ("b", "c")]);
        let check = |source: &&'static str,
                     candidates: &HashSet<&'static str>,
                     _threshold: f64| {
            assert!(
                !candidates.contains(source),
                "candidates must exclude the source"
            );
            assert_eq!(candidates.len(), 2);
            Ok::<_, SimilarityError>(HashSet::new())
        };
        fuse(0.5, &check, &[graph]).expect("fuse should succeed");
    }

    #[test]
    fn oracle_errors_propagate_unmodified() {
        let graph = SourceGraph::from_edges([("a", "b")]);
        let failing = |_source: &&'static str,
                       _candidates: &HashSet<&'static str>,
                       _threshold: f64| {
            Err::<HashSet<&'static str>, _>(SimilarityError::new("no similarity for this pair"))
        };
        let err = fuse(0.5, &failing, &[graph]).expect_err("fuse must fail");
        assert_eq!(
            err,
            FuseError::Similarity(SimilarityError::new("no similarity for this pair"))
        );
    }

    #[test]
    fn foreign_analogs_fail_the_fuse() {
        let graph = SourceGraph::from_edges([("a", "b")]);
        let foreign = |_source: &&'static str,
                       _candidates: &HashSet<&'static str>,
                       _threshold: f64| {
            let mut analogs = HashSet::new();
            analogs.insert("ghost");
            Ok::<_, SimilarityError>(analogs)
        };
        let err = fuse(0.5, &foreign, &[graph]).expect_err("fuse must fail");
        assert_eq!(
            err,
            FuseError::ForeignAnalog {
                analog: "\"ghost\"".to_owned()
            }
        );
    }

    #[test]
    fn oracle_returning_the_source_is_tolerated() {
        let graph = SourceGraph::from_edges([("a", "b")]);
        let echo_source = |source: &&'static str,
                           _candidates: &HashSet<&'static str>,
                           _threshold: f64| {
            let mut analogs = HashSet::new();
            analogs.insert(*source);
            Ok::<_, SimilarityError>(analogs)
        };
        let fused = fuse(0.5, &echo_source, &[graph]).expect("fuse should succeed");
        assert_eq!(fused.edge_count(), 2, "self-loops only, not duplicated");
        assert_eq!(fused.analog_edge_count(), 0);
    }

    #[test]
    fn threshold_reaches_the_oracle_untouched() {
        let graph = SourceGraph::from_edges([("a", "b")]);
        let check_threshold = |_source: &&'static str,
                               _candidates: &HashSet<&'static str>,
                               threshold: f64| {
            assert!((threshold - 0.73).abs() < f64::EPSILON);
            Ok::<_, SimilarityError>(HashSet::new())
        };
        fuse(0.73, &check_threshold, &[graph]).expect("fuse should succeed");
    }

    #[test]
    fn zero_progress_stride_is_silent_and_safe() {
        let graph = SourceGraph::from_edges([("a", "b"), ("b", "c")]);
        let config = FuseConfig {
            progress_every: Some(0),
        };
        let fused = fuse_with_config(0.5, &reject_all, &[graph], &config)
            .expect("a zero stride must not fail the scan");
        assert_eq!(fused.node_count(), 3);
    }

    #[test]
    fn progress_stride_does_not_change_the_result() {
        let graph = SourceGraph::from_edges([("a", "b"), ("b", "c"), ("c", "d")]);
        let quiet = fuse(0.5, &accept_all, &[graph.clone()])
            .expect("fuse should succeed");
        let config = FuseConfig {
            progress_every: Some(2),
        };
        let chatty = fuse_with_config(0.5, &accept_all, &[graph], &config)
            .expect("fuse should succeed");
        assert_eq!(quiet.node_count(), chatty.node_count());
        assert_eq!(quiet.edge_count(), chatty.edge_count());
    }

    #[test]
    fn fuse_error_displays_both_variants() {
        let oracle_err = FuseError::Similarity(SimilarityError::new("boom"));
        assert_eq!(oracle_err.to_string(), "similarity oracle failed: boom");
        let foreign = FuseError::ForeignAnalog {
            analog: "\"x\"".to_owned(),
        };
        assert_eq!(
            foreign.to_string(),
            "oracle returned analog \"x\" outside the vertex universe"
        );
    }
}
