//! Synthetic graph generators for performance runs
//!
//! Graphs are dense-ish random digraphs: every node picks `out_degree`
//! distinct targets (dropping itself if drawn) with random capacities.
//! Nothing here is special to the engine; the output is an ordinary
//! [`Graph`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::algorithm::traits::{Capacity, Node};
use crate::data_structures::graph::Graph;

/// Largest node count the generators will produce
pub const MAX_GENERATED_NODES: usize = 100_000;

/// Inclusive range of generated capacities
pub const CAPACITY_RANGE: std::ops::RangeInclusive<Capacity> = 1..=100;

/// Generator errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("can not create more than {limit} nodes (requested {requested})")]
    TooManyNodes { requested: usize, limit: usize },

    #[error("out-degree {out_degree} exceeds the node count {nodes}")]
    DegreeExceedsNodes { out_degree: usize, nodes: usize },
}

/// Spreadsheet-style label of the `index`-th node: `A`..`Z`, `AA`, `AB`, ...
pub fn node_label(mut index: usize) -> String {
    let mut reversed = String::new();
    loop {
        reversed.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    reversed.chars().rev().collect()
}

/// `count` distinct node labels
pub fn node_labels(count: usize) -> Result<Vec<String>, GeneratorError> {
    if count > MAX_GENERATED_NODES {
        return Err(GeneratorError::TooManyNodes {
            requested: count,
            limit: MAX_GENERATED_NODES,
        });
    }
    Ok((0..count).map(node_label).collect())
}

/// Random edges over `nodes`
///
/// Each node draws `out_degree` distinct targets; a node that draws itself
/// simply has one edge fewer. `capacity` is called once per edge.
pub fn random_edges<N, R, F>(
    nodes: &[N],
    out_degree: usize,
    rng: &mut R,
    mut capacity: F,
) -> Result<Vec<(N, N, Capacity)>, GeneratorError>
where
    N: Node,
    R: Rng + ?Sized,
    F: FnMut(&N, &N, &mut R) -> Capacity,
{
    if out_degree > nodes.len() {
        return Err(GeneratorError::DegreeExceedsNodes {
            out_degree,
            nodes: nodes.len(),
        });
    }

    let mut edges = Vec::with_capacity(nodes.len() * out_degree);
    for from in nodes {
        let targets: Vec<&N> = nodes.choose_multiple(rng, out_degree).collect();
        for to in targets {
            if to != from {
                let value = capacity(from, to, rng);
                edges.push((from.clone(), to.clone(), value));
            }
        }
    }
    Ok(edges)
}

/// Seeded random graph of `node_count` labelled nodes
///
/// Capacities are uniform over [`CAPACITY_RANGE`].
pub fn random_graph(
    node_count: usize,
    out_degree: usize,
    seed: u64,
) -> Result<Graph<String>, GeneratorError> {
    let nodes = node_labels(node_count)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let edges = random_edges(&nodes, out_degree, &mut rng, |_, _, rng| {
        rng.gen_range(CAPACITY_RANGE)
    })?;
    Ok(Graph::from_edges(edges))
}
