//! Graph family generator.
//!
//! Produces families of [`SourceGraph`] instances whose node names overlap
//! by stem, so a stem-keyed oracle finds realistic analog clusters across
//! the family.

use netfuse_core::SourceGraph;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for the graph family generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of graphs in the family.
    pub num_graphs: usize,
    /// Number of entities spread across the graphs.
    pub num_entities: usize,
    /// How many consecutive graphs each entity appears in.
    pub entity_spread: usize,
    /// Random edges attempted per graph; duplicate draws collapse.
    pub edges_per_graph: usize,
    /// Fraction of edge draws forced into self-loops (0.0-1.0).
    pub loop_rate: f64,
    /// Fraction of entities recorded under one shared name instead of
    /// per-graph variants (0.0-1.0).
    pub shared_name_rate: f64,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 2 graphs, ~60 vertices in the universe
    Small,
    /// 3 graphs, ~500 vertices
    Medium,
    /// 4 graphs, ~3000 vertices
    Large,
    /// 4 graphs, ~6000 vertices
    XLarge,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                num_graphs: 2,
                num_entities: 30,
                entity_spread: 2,
                edges_per_graph: 60,
                loop_rate: 0.05,
                shared_name_rate: 0.2,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                num_graphs: 3,
                num_entities: 250,
                entity_spread: 2,
                edges_per_graph: 600,
                loop_rate: 0.05,
                shared_name_rate: 0.2,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                num_graphs: 4,
                num_entities: 1000,
                entity_spread: 3,
                edges_per_graph: 3000,
                loop_rate: 0.05,
                shared_name_rate: 0.25,
            },
            SizeTier::XLarge => GeneratorConfig {
                seed,
                num_graphs: 4,
                num_entities: 2000,
                entity_spread: 3,
                edges_per_graph: 8000,
                loop_rate: 0.1,
                shared_name_rate: 0.25,
            },
        }
    }
}

/// Generates a family of overlapping graphs from the given configuration.
///
/// Each entity appears in `entity_spread` consecutive graphs, either under
/// per-graph variant names sharing a stem (`e0042-a`, `e0042-b`) or, for a
/// `shared_name_rate` fraction, under one identical name in every graph it
/// inhabits. All randomness is deterministic, seeded from `config.seed`.
pub fn generate_graph_family(config: &GeneratorConfig) -> Vec<SourceGraph<String>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let num_graphs = config.num_graphs.max(1);
    let spread = config.entity_spread.clamp(1, num_graphs);

    let mut node_lists: Vec<Vec<String>> = vec![Vec::new(); num_graphs];
    for entity in 0..config.num_entities {
        let stem = entity_stem(entity);
        let start = rng.gen_range(0..num_graphs);
        let shared = rng.gen_bool(config.shared_name_rate);
        for offset in 0..spread {
            let graph_index = (start + offset) % num_graphs;
            let name = if shared {
                stem.clone()
            } else {
                variant_name(&stem, graph_index)
            };
            node_lists[graph_index].push(name);
        }
    }

    let mut graphs = Vec::with_capacity(num_graphs);
    for names in node_lists {
        let mut graph = SourceGraph::new();
        for name in &names {
            graph.add_node(name.clone());
        }
        if !names.is_empty() {
            for _ in 0..config.edges_per_graph {
                let u = names[rng.gen_range(0..names.len())].clone();
                let v = if rng.gen_bool(config.loop_rate) {
                    u.clone()
                } else {
                    names[rng.gen_range(0..names.len())].clone()
                };
                graph.add_edge(u, v);
            }
        }
        graphs.push(graph);
    }
    graphs
}

/// The shared stem for an entity index. Stems carry no `-` separator, so
/// the variant suffix is the only dash in a generated name.
fn entity_stem(entity: usize) -> String {
    format!("e{entity:04}")
}

/// The per-graph variant of an entity name, `e0042-c` for graph 2.
fn variant_name(stem: &str, graph_index: usize) -> String {
    let letter = char::from(b'a' + (graph_index % 26) as u8);
    format!("{stem}-{letter}")
}
