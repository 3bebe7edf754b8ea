//! Graph family generator and benchmark utilities for netfuse.
//!
//! This crate provides deterministic generation of overlapping graph
//! families for benchmarking and property-based testing of `netfuse-core`.

pub mod correctness;
pub mod generator;
pub mod oracle;

pub use generator::{GeneratorConfig, SizeTier, generate_graph_family};
pub use oracle::{StemOracle, stem, stem_score};
