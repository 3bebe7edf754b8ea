//! The stem oracle: treats two generated names as analogs when they share
//! a stem.

use std::collections::HashSet;

use netfuse_core::{Similarity, SimilarityError};

/// Returns the stem of a generated name: everything before the last `-`,
/// or the whole name when it carries no variant suffix.
pub fn stem(name: &str) -> &str {
    name.rsplit_once('-').map_or(name, |(stem, _)| stem)
}

/// Scores a name pair: `1.0` when the stems match, `0.0` otherwise.
pub fn stem_score(a: &str, b: &str) -> f64 {
    if stem(a) == stem(b) { 1.0 } else { 0.0 }
}

/// A [`Similarity`] oracle over generated names, keyed on [`stem_score`].
///
/// At thresholds in `(0.0, 1.0]` it returns exactly the candidates sharing
/// the source's stem. At `0.0` it accepts every candidate, and above `1.0`
/// it accepts none; benchmarks use those two extremes to pin the cost of
/// the scan itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct StemOracle;

impl Similarity<String> for StemOracle {
    fn analogs(
        &self,
        source: &String,
        candidates: &HashSet<String>,
        threshold: f64,
    ) -> Result<HashSet<String>, SimilarityError> {
        Ok(candidates
            .iter()
            .filter(|candidate| stem_score(source, candidate.as_str()) >= threshold)
            .cloned()
            .collect())
    }
}
