//! Edmonds-Karp Maximum Flow Implementation
//!
//! This module wires the residual graph and the breadth-first path finder
//! into the Edmonds-Karp loop:
//!
//! 1. Build the residual graph of the caller's graph (the caller's graph is
//!    only read).
//! 2. Check that the sink is reachable at all. Before any flow is pushed the
//!    only open arcs are the original edges, so this is plain reachability
//!    in the original graph. An unreachable sink is reported as
//!    [`FlowError::NoPath`], not as a zero flow.
//! 3. Repeatedly find a shortest augmenting path and push its bottleneck,
//!    until no path remains.
//!
//! Every augmentation raises the total by at least one unit and the total is
//! bounded by the capacity leaving the source, so the loop terminates.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::Instant;

use log::{debug, info, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::augmenting_path::{AugmentingPath, PathFinder};
use crate::algorithm::traits::{
    parse_bool_parameter, Algorithm, AlgorithmError, AlgorithmParameter, Capacity, Flow, Node,
    ParameterType,
};
use crate::data_structures::graph::Graph;
use crate::data_structures::residual::ResidualGraph;

/// Name of the parameter that keeps augmenting paths in the result
pub const RECORD_PATHS: &str = "record_paths";

/// Flow algorithm errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError<N: Node> {
    /// Source and sink are not connected by any positive-capacity path
    #[error("there is no path from {src} to {sink}")]
    NoPath { src: N, sink: N },
}

/// Augmenting path expressed with node identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPath<N> {
    /// Path vertices, source first
    pub nodes: Vec<N>,
    /// Flow pushed along the path
    pub flow: Flow,
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths pushed
    pub augmentations: usize,
    /// Nodes expanded across every path search, reachability check included
    pub nodes_expanded: usize,
    /// Wall-clock time of the computation
    pub execution_time_ms: f64,
}

/// Maximum flow result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult<N> {
    /// Maximum flow value
    pub max_flow: Flow,
    /// Augmenting paths in the order they were pushed; empty unless path
    /// recording is enabled
    pub paths: Vec<FlowPath<N>>,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

/// Pushes the bottleneck of `path` through `residual` and returns it
///
/// Each edge of the path loses the bottleneck in its own direction and gains
/// it in the opposite one; both sides move in the same call.
pub fn augment<N: Node>(residual: &mut ResidualGraph<N>, path: &AugmentingPath) -> Capacity {
    let bottleneck = path.bottleneck();
    for edge in path.edges() {
        residual.push_flow(edge.from, edge.slot, bottleneck);
    }
    bottleneck
}

/// Edmonds-Karp maximum flow solver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    /// Keep every augmenting path in the result
    record_paths: bool,
}

impl MaxFlowSolver {
    /// Creates a solver with path recording disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables path recording
    pub fn with_path_recording(mut self, record_paths: bool) -> Self {
        self.record_paths = record_paths;
        self
    }

    /// Computes the maximum flow from `source` to `sink` in `graph`
    pub fn solve<N: Node>(
        &self,
        graph: &Graph<N>,
        source: &N,
        sink: &N,
    ) -> Result<MaxFlowResult<N>, FlowError<N>> {
        let mut residual = ResidualGraph::from_graph(graph);
        debug!(
            "built residual graph: {} nodes, {} arcs",
            residual.node_count(),
            residual.arc_count()
        );

        self.solve_in_place(&mut residual, source, sink)
    }

    /// Runs the augmentation loop over a caller-owned residual graph
    ///
    /// `source == sink` is answered with a zero flow without searching.
    ///
    /// The residual graph is left in its final state, which is where the
    /// per-edge flows can be read back from.
    pub fn solve_in_place<N: Node>(
        &self,
        residual: &mut ResidualGraph<N>,
        source: &N,
        sink: &N,
    ) -> Result<MaxFlowResult<N>, FlowError<N>> {
        let started = Instant::now();
        let no_path = || FlowError::NoPath {
            src: source.clone(),
            sink: sink.clone(),
        };

        if source == sink {
            debug!("source and sink are both {}, flow is zero", source);
            return Ok(MaxFlowResult {
                max_flow: 0,
                paths: Vec::new(),
                metrics: FlowMetrics::default(),
            });
        }

        let (Some(s), Some(t)) = (residual.index_of(source), residual.index_of(sink)) else {
            debug!("{} or {} is not in the graph", source, sink);
            return Err(no_path());
        };

        let mut finder = PathFinder::with_capacity(residual.node_count());
        if !finder.reaches(residual, s, t) {
            debug!("{} is unreachable from {}", sink, source);
            return Err(no_path());
        }

        let mut total: Flow = 0;
        let mut augmentations = 0;
        let mut paths = Vec::new();

        while let Some(path) = finder.find(residual, s, t) {
            let pushed = augment(residual, &path);
            total += Flow::from(pushed);
            augmentations += 1;

            trace!(
                "augmentation {}: pushed {} over {} edges, total {}",
                augmentations,
                pushed,
                path.len(),
                total
            );

            if self.record_paths {
                paths.push(FlowPath {
                    nodes: path
                        .nodes()
                        .into_iter()
                        .filter_map(|index| residual.node(index).cloned())
                        .collect(),
                    flow: Flow::from(pushed),
                });
            }
        }

        let metrics = FlowMetrics {
            augmentations,
            nodes_expanded: finder.nodes_expanded(),
            execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };

        info!(
            "max flow from {} to {} is {} ({} augmentations, {:.3} ms)",
            source, sink, total, metrics.augmentations, metrics.execution_time_ms
        );

        Ok(MaxFlowResult {
            max_flow: total,
            paths,
            metrics,
        })
    }

    /// Solves several source/sink pairs over the same graph in parallel
    ///
    /// Every pair gets its own residual graph; results come back in the
    /// order of `pairs`.
    pub fn solve_many<N>(
        &self,
        graph: &Graph<N>,
        pairs: &[(N, N)],
    ) -> Vec<Result<MaxFlowResult<N>, FlowError<N>>>
    where
        N: Node + Send + Sync,
    {
        debug!("solving {} source/sink pairs in parallel", pairs.len());
        pairs
            .par_iter()
            .map(|(source, sink)| self.solve(graph, source, sink))
            .collect()
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Ford-Fulkerson maximum flow with breadth-first augmenting paths; \
         O(V·E²) time, O(V + E) space for the residual graph."
            .to_string()
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![AlgorithmParameter {
            name: RECORD_PATHS.to_string(),
            value: self.record_paths.to_string(),
            value_type: ParameterType::Boolean,
            description: "keep every augmenting path in the result".to_string(),
        }]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            RECORD_PATHS => {
                self.record_paths = parse_bool_parameter(name, value)?;
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter(name.to_string())),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            RECORD_PATHS => Some(self.record_paths.to_string()),
            _ => None,
        }
    }
}

/// Maximum flow from `source` to `sink`
///
/// Fails with [`FlowError::NoPath`] when the two are not connected.
pub fn max_flow<N: Node>(graph: &Graph<N>, source: &N, sink: &N) -> Result<Flow, FlowError<N>> {
    MaxFlowSolver::new()
        .solve(graph, source, sink)
        .map(|result| result.max_flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tunnel_graph() -> Graph<&'static str> {
        Graph::from_edges(vec![
            ("S", "A", 4),
            ("S", "B", 8),
            ("A", "C", 6),
            ("C", "D", 3),
            ("C", "T", 11),
            ("D", "T", 2),
            ("B", "A", 3),
            ("B", "C", 6),
            ("B", "D", 2),
        ])
    }

    fn random_graph(seed: u64, nodes: u32, out_degree: usize) -> Graph<u32> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = Graph::new();
        for from in 0..nodes {
            for _ in 0..out_degree {
                let to = rng.gen_range(0..nodes);
                if to != from {
                    graph.add_edge(from, to, rng.gen_range(1..=20));
                }
            }
        }
        graph
    }

    #[test]
    fn test_tunnel_throughput() {
        assert_eq!(max_flow(&tunnel_graph(), &"S", &"T"), Ok(12));
    }

    #[test]
    fn test_no_double_visiting() {
        assert_eq!(max_flow(&tunnel_graph(), &"A", &"D"), Ok(3));
    }

    #[test]
    fn test_no_path() {
        let err = max_flow(&tunnel_graph(), &"A", &"S").unwrap_err();
        assert_eq!(err, FlowError::NoPath { src: "A", sink: "S" });
        assert_eq!(err.to_string(), "there is no path from A to S");
    }

    #[test]
    fn test_unknown_endpoints() {
        let graph = tunnel_graph();
        assert!(matches!(max_flow(&graph, &"S", &"Z"), Err(FlowError::NoPath { .. })));
        assert!(matches!(max_flow(&graph, &"Z", &"T"), Err(FlowError::NoPath { .. })));
    }

    #[test]
    fn test_same_endpoint_is_zero() {
        let graph = tunnel_graph();
        assert_eq!(max_flow(&graph, &"S", &"S"), Ok(0));
        assert_eq!(max_flow(&graph, &"T", &"T"), Ok(0));
        // Even for a node the graph has never seen
        assert_eq!(max_flow(&graph, &"Z", &"Z"), Ok(0));

        let mut residual = ResidualGraph::from_graph(&graph);
        let result = MaxFlowSolver::new()
            .solve_in_place(&mut residual, &"S", &"S")
            .unwrap();
        assert_eq!(result.max_flow, 0);
        assert_eq!(result.metrics.nodes_expanded, 0);
    }

    #[test]
    fn test_total_beyond_single_capacity_range() {
        let graph = Graph::from_edges(vec![("S", "T", u64::MAX), ("S", "A", 1), ("A", "T", 1)]);
        assert_eq!(max_flow(&graph, &"S", &"T"), Ok(Flow::from(u64::MAX) + 1));

        let wide = Graph::from_edges(vec![
            ("S", "A", u64::MAX),
            ("S", "B", u64::MAX),
            ("A", "T", u64::MAX),
            ("B", "T", u64::MAX),
        ]);
        let result = MaxFlowSolver::new()
            .with_path_recording(true)
            .solve(&wide, &"S", &"T")
            .unwrap();
        assert_eq!(result.max_flow, 2 * Flow::from(u64::MAX));
        assert!(result.paths.iter().all(|path| path.flow == Flow::from(u64::MAX)));
    }

    #[test]
    fn test_zero_capacity_edges_do_not_connect() {
        let graph = Graph::from_edges(vec![("S", "A", 5), ("A", "T", 0)]);
        assert!(matches!(max_flow(&graph, &"S", &"T"), Err(FlowError::NoPath { .. })));
    }

    #[test]
    fn test_flow_cancellation_through_reverse_arcs() {
        // The first path S-A-D-T blocks D-T; the second has to undo A-D
        let graph = Graph::from_edges(vec![
            ("S", "A", 1),
            ("S", "B", 1),
            ("A", "D", 1),
            ("A", "E", 1),
            ("B", "D", 1),
            ("D", "T", 1),
            ("E", "T", 1),
        ]);
        let result = MaxFlowSolver::new()
            .with_path_recording(true)
            .solve(&graph, &"S", &"T")
            .unwrap();

        assert_eq!(result.max_flow, 2);
        assert_eq!(result.paths[0].nodes, vec!["S", "A", "D", "T"]);
        assert_eq!(result.paths[1].nodes, vec!["S", "B", "D", "A", "E", "T"]);

        let classic = Graph::from_edges(vec![
            ("S", "A", 10),
            ("S", "C", 10),
            ("A", "B", 4),
            ("A", "C", 2),
            ("A", "D", 8),
            ("C", "D", 9),
            ("D", "B", 6),
            ("B", "T", 10),
            ("D", "T", 10),
        ]);
        assert_eq!(max_flow(&classic, &"S", &"T"), Ok(19));
    }

    #[test]
    fn test_idempotent_and_non_mutating() {
        let graph = tunnel_graph();
        let snapshot = graph.clone();

        let first = max_flow(&graph, &"S", &"T");
        assert_eq!(graph, snapshot);
        let second = max_flow(&graph, &"S", &"T");
        assert_eq!(graph, snapshot);

        assert_eq!(first, second);
    }

    #[test]
    fn test_deterministic_path_choices() {
        let solver = MaxFlowSolver::new().with_path_recording(true);
        let graph = tunnel_graph();

        let first = solver.solve(&graph, &"S", &"T").unwrap();
        let second = solver.solve(&graph, &"S", &"T").unwrap();

        assert_eq!(first.paths, second.paths);
        assert_eq!(first.max_flow, second.max_flow);

        // Shortest paths first, ties by neighbor order
        assert_eq!(first.paths[0].nodes, vec!["S", "A", "C", "T"]);
        assert_eq!(first.paths[0].flow, 4);
        let recorded: Flow = first.paths.iter().map(|path| path.flow).sum();
        assert_eq!(recorded, first.max_flow);
        assert_eq!(first.metrics.augmentations, first.paths.len());
    }

    #[test]
    fn test_paths_not_recorded_by_default() {
        let result = MaxFlowSolver::new().solve(&tunnel_graph(), &"S", &"T").unwrap();
        assert!(result.paths.is_empty());
        assert!(result.metrics.augmentations > 0);
        assert!(result.metrics.nodes_expanded > 0);
    }

    #[test]
    fn test_conservation_after_termination() {
        let graph = tunnel_graph();
        let mut residual = ResidualGraph::from_graph(&graph);

        let result = MaxFlowSolver::new()
            .solve_in_place(&mut residual, &"S", &"T")
            .unwrap();

        let s = residual.index_of(&"S").unwrap();
        let t = residual.index_of(&"T").unwrap();

        for index in 0..residual.node_count() {
            if index != s && index != t {
                assert_eq!(residual.net_flow(index), 0, "node {:?}", residual.node(index));
            }
        }
        assert_eq!(residual.net_flow(s), result.max_flow as i128);
        assert_eq!(residual.net_flow(t), -(result.max_flow as i128));
    }

    #[test]
    fn test_pair_sums_constant_and_capacities_respected() {
        let mut graph = random_graph(7, 60, 6);
        graph.add_edge(0, 59, 5);
        let mut residual = ResidualGraph::from_graph(&graph);
        let original: Vec<Vec<Capacity>> = (0..residual.node_count())
            .map(|u| {
                (0..residual.arcs(u).len())
                    .map(|slot| residual.pair_capacity(u, slot))
                    .collect()
            })
            .collect();

        let result = MaxFlowSolver::new()
            .solve_in_place(&mut residual, &0, &59)
            .unwrap();
        assert!(result.max_flow >= 5);
        assert!(result.metrics.augmentations > 0);

        for u in 0..residual.node_count() {
            for slot in 0..residual.arcs(u).len() {
                assert_eq!(residual.pair_capacity(u, slot), original[u][slot]);
                assert!(residual.flow_on(u, slot) <= Flow::from(original[u][slot]));
            }
        }
    }

    #[test]
    fn test_flow_bounded_by_source_capacity() {
        for seed in 0..20 {
            let graph = random_graph(seed, 40, 4);
            match max_flow(&graph, &0, &39) {
                Ok(flow) => {
                    assert!(flow <= graph.outgoing_capacity(&0));
                }
                Err(FlowError::NoPath { src, sink }) => {
                    assert_eq!((src, sink), (0, 39));
                }
            }
        }
    }

    #[test]
    fn test_solve_many_matches_sequential() {
        let graph = random_graph(3, 80, 5);
        let pairs: Vec<(u32, u32)> = (1..16).map(|sink| (0, sink)).chain([(5, 5)]).collect();

        let parallel = MaxFlowSolver::new().solve_many(&graph, &pairs);
        assert_eq!(parallel.len(), pairs.len());

        for ((source, sink), result) in pairs.iter().zip(parallel) {
            let sequential = max_flow(&graph, source, sink);
            assert_eq!(result.map(|r| r.max_flow), sequential);
        }
    }

    #[test]
    fn test_algorithm_parameters() {
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.name(), "Edmonds-Karp");
        assert_eq!(solver.category(), "max_flow");
        assert_eq!(solver.get_parameter(RECORD_PATHS), Some("false".to_string()));

        assert!(solver.set_parameter(RECORD_PATHS, "true").is_ok());
        assert_eq!(solver.get_parameters().get(RECORD_PATHS), Some(&"true".to_string()));

        // Test invalid parameters
        assert!(solver.set_parameter(RECORD_PATHS, "sometimes").is_err());
        assert_eq!(
            solver.set_parameter("global_relabel_frequency", "50"),
            Err(AlgorithmError::UnknownParameter("global_relabel_frequency".to_string()))
        );
        assert_eq!(solver.get_parameter("global_relabel_frequency"), None);
    }

    #[test]
    fn test_metrics_serialize() {
        let result = MaxFlowSolver::new()
            .with_path_recording(true)
            .solve(&tunnel_graph(), &"S", &"T")
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["max_flow"], 12);
        assert!(json["paths"].as_array().map_or(false, |paths| !paths.is_empty()));
    }
}
