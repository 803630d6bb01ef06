//! nwtunnel core: maximum flow through capacity-weighted tunnel networks
//!
//! The engine computes the maximum flow between a source and a sink with the
//! Edmonds-Karp method: Ford-Fulkerson augmentation where every augmenting
//! path is found breadth-first over the residual graph.
//!
//! ```
//! use nwtunnel_core::{max_flow, FlowError, Graph};
//!
//! let graph = Graph::from_edges(vec![
//!     ("S", "A", 4),
//!     ("S", "B", 8),
//!     ("A", "C", 6),
//!     ("C", "D", 3),
//!     ("C", "T", 11),
//!     ("D", "T", 2),
//!     ("B", "A", 3),
//!     ("B", "C", 6),
//!     ("B", "D", 2),
//! ]);
//!
//! assert_eq!(max_flow(&graph, &"S", &"T"), Ok(12));
//! assert_eq!(
//!     max_flow(&graph, &"A", &"S"),
//!     Err(FlowError::NoPath { src: "A", sink: "S" })
//! );
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::graph::{
    augment, max_flow, AugmentingPath, FlowError, FlowMetrics, FlowPath, MaxFlowResult,
    MaxFlowSolver, PathEdge, PathFinder,
};
pub use crate::algorithm::traits::{
    Algorithm, AlgorithmError, AlgorithmParameter, Capacity, Flow, Node, NodeIndex, ParameterType,
};
pub use crate::data_structures::{Adjacency, ArcKind, Graph, ResidualArc, ResidualGraph};
