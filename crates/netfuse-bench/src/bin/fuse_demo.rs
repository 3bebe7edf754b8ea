//! Runs the full fuse/collapse pipeline over a generated medium-tier
//! family and reports stage timings.
//!
//! Progress lines from the fusion scan surface at `RUST_LOG=debug`.

use std::error::Error;
use std::time::Instant;

use netfuse_bench::{SizeTier, StemOracle, generate_graph_family};
use netfuse_core::{FuseConfig, SourceGraph, collapse, fuse_with_config, simplify};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    eprintln!("Generating Medium tier family...");
    let graphs = generate_graph_family(&SizeTier::Medium.config(42));
    let node_total: usize = graphs.iter().map(SourceGraph::node_count).sum();
    let edge_total: usize = graphs.iter().map(SourceGraph::edge_count).sum();
    eprintln!(
        "Generated {} graphs, {node_total} nodes, {edge_total} edges",
        graphs.len()
    );

    let config = FuseConfig {
        progress_every: Some(100),
    };
    let started = Instant::now();
    let fused = fuse_with_config(0.5, &StemOracle, &graphs, &config)?;
    eprintln!(
        "Fused {} vertices, {} analog edges in {:.1?}",
        fused.node_count(),
        fused.analog_edge_count(),
        started.elapsed()
    );

    let started = Instant::now();
    let output = collapse(&fused, &graphs)?;
    eprintln!(
        "Collapsed into {} components, {} edges in {:.1?}",
        output.collapsed.component_count(),
        output.collapsed.edge_count(),
        started.elapsed()
    );

    let simple = simplify(&output.collapsed);
    eprintln!(
        "Simplified to {} nodes, {} edges",
        simple.node_count(),
        simple.edge_count()
    );

    Ok(())
}
