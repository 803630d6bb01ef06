//! Performance Validation Harness
//!
//! Times the max-flow engine on seeded random graphs of increasing size and
//! density. Only the flow computation is timed; generating the graph is not
//! part of a sample. The scenario list mirrors the scaling runs the engine
//! is tuned against: small sanity graphs up to ten thousand nodes with
//! twenty edges each.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::graph::max_flow::{FlowError, MaxFlowSolver};
use crate::algorithm::traits::Flow;
use crate::validation::generators::{node_label, random_graph, GeneratorError};

/// One point of the scaling curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScalingScenario {
    /// Number of nodes
    pub nodes: usize,
    /// Targets drawn per node
    pub out_degree: usize,
}

impl ScalingScenario {
    pub const fn new(nodes: usize, out_degree: usize) -> Self {
        Self { nodes, out_degree }
    }
}

impl fmt::Display for ScalingScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.nodes, self.out_degree)
    }
}

/// Parses `NODESxDEGREE`, e.g. `1000x20`
impl FromStr for ScalingScenario {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidScenario(s.to_string());
        let (nodes, out_degree) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;

        Ok(Self {
            nodes: nodes.trim().parse().map_err(|_| invalid())?,
            out_degree: out_degree.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Default scaling runs, sparse-to-dense within each size class
pub const DEFAULT_SCENARIOS: [ScalingScenario; 6] = [
    ScalingScenario::new(10, 2),
    // 100 nodes, with increasing density
    ScalingScenario::new(100, 20),
    ScalingScenario::new(100, 40),
    // 1000 nodes, with increasing density
    ScalingScenario::new(1000, 20),
    ScalingScenario::new(1000, 40),
    ScalingScenario::new(10000, 20),
];

/// Individual performance measurement sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// Measured scenario
    pub scenario: ScalingScenario,
    /// Edges actually generated
    pub edges: usize,
    /// Flow found, `None` when the random graph left the sink unreachable
    pub max_flow: Option<Flow>,
    /// Augmenting paths pushed
    pub augmentations: usize,
    /// Measured execution time of the flow computation
    pub execution_time: Duration,
}

/// Performance validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid scenario {0:?}, expected NODESxDEGREE")]
    InvalidScenario(String),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// Generates the scenario's graph and times one max-flow run over it
///
/// The first generated label is the source and the last one the sink.
pub fn measure(scenario: ScalingScenario, seed: u64) -> Result<PerformanceSample, ValidationError> {
    let graph = random_graph(scenario.nodes, scenario.out_degree, seed)?;
    if scenario.nodes == 0 {
        return Ok(PerformanceSample {
            scenario,
            edges: 0,
            max_flow: None,
            augmentations: 0,
            execution_time: Duration::ZERO,
        });
    }
    let source = node_label(0);
    let sink = node_label(scenario.nodes - 1);
    debug!(
        "scenario {}: {} edges, {} -> {}",
        scenario,
        graph.edge_count(),
        source,
        sink
    );

    let solver = MaxFlowSolver::new();
    let started = Instant::now();
    let outcome = solver.solve(&graph, &source, &sink);
    let execution_time = started.elapsed();

    let (max_flow, augmentations) = match outcome {
        Ok(result) => (Some(result.max_flow), result.metrics.augmentations),
        Err(FlowError::NoPath { .. }) => (None, 0),
    };

    Ok(PerformanceSample {
        scenario,
        edges: graph.edge_count(),
        max_flow,
        augmentations,
        execution_time,
    })
}

/// Measures every scenario in order with the same seed
pub fn run_suite(
    scenarios: &[ScalingScenario],
    seed: u64,
) -> Result<Vec<PerformanceSample>, ValidationError> {
    let mut samples = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let sample = measure(*scenario, seed)?;
        info!(
            "{} nodes, {} edges/node: {:.5} s",
            scenario.nodes,
            scenario.out_degree,
            sample.execution_time.as_secs_f64()
        );
        samples.push(sample);
    }
    Ok(samples)
}
