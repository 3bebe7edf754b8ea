#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod collapse;
pub mod components;
pub mod convert;
pub mod fuse;
pub mod fused;
pub mod similarity;
pub mod source;
pub mod types;
pub mod union_find;

pub use collapse::{CollapseError, CollapseOutput, CollapsedGraph, collapse};
pub use components::{ComponentPartition, connected_components};
pub use convert::simplify;
pub use fuse::{FuseConfig, FuseError, fuse, fuse_with_config};
pub use fused::FusedGraph;
pub use similarity::{Similarity, SimilarityError};
#[cfg(feature = "serde")]
pub use source::WireGraphError;
pub use source::{SourceGraph, vertex_universe};
pub use types::{ComponentId, NodeKey};
pub use union_find::UnionFind;

/// Returns the current version of the netfuse-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
