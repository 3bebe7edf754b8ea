//! The similarity-oracle contract consumed by the fusion engine.

use std::collections::HashSet;
use std::fmt;

/// Error raised by a similarity oracle.
///
/// Opaque to the engine: fusion never inspects the message, it only carries
/// the error to the caller unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityError {
    message: String,
}

impl SimilarityError {
    /// Creates an error carrying the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The oracle-supplied message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SimilarityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "similarity oracle failed: {}", self.message)
    }
}

impl std::error::Error for SimilarityError {}

/// A similarity oracle: decides which candidates are analogs of a source
/// node at a given threshold.
///
/// The oracle is a capability, not a class hierarchy. Any closure of the
/// matching shape implements it via the blanket impl below, so the usual way
/// to supply one is:
///
/// ```
/// use std::collections::HashSet;
/// use netfuse_core::{Similarity, SimilarityError};
///
/// let prefix_len = 3usize;
/// let oracle = move |source: &String, candidates: &HashSet<String>, _threshold: f64| {
///     let stem: String = source.chars().take(prefix_len).collect();
///     Ok::<_, SimilarityError>(
///         candidates
///             .iter()
///             .filter(|candidate| candidate.starts_with(&stem))
///             .cloned()
///             .collect::<HashSet<String>>(),
///     )
/// };
/// # let _ = &oracle as &dyn Similarity<String>;
/// ```
///
/// Extra options travel by closure capture (`prefix_len` above).
///
/// # Contract
///
/// - The returned set must not contain `source`. The engine tolerates a
///   violation (the node's self-loop already exists) but callers must not
///   rely on that.
/// - Every returned node must be a member of `candidates`; anything else
///   fails the surrounding fuse.
/// - The threshold's range and meaning are oracle-defined; the engine
///   passes it through unvalidated.
/// - Errors abort the surrounding fuse and reach the caller unmodified.
pub trait Similarity<N> {
    /// Returns the subset of `candidates` that are analogs of `source` at
    /// `threshold`.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError`] when similarity is undefined for a pair
    /// or the oracle's backing resource fails.
    fn analogs(
        &self,
        source: &N,
        candidates: &HashSet<N>,
        threshold: f64,
    ) -> Result<HashSet<N>, SimilarityError>;
}

impl<N, F> Similarity<N> for F
where
    F: Fn(&N, &HashSet<N>, f64) -> Result<HashSet<N>, SimilarityError>,
{
    fn analogs(
        &self,
        source: &N,
        candidates: &HashSet<N>,
        threshold: f64,
    ) -> Result<HashSet<N>, SimilarityError> {
        self(source, candidates, threshold)
    }
}
