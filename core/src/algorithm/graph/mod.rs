//! Network flow algorithms over capacity-weighted graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod augmenting_path;
pub mod max_flow;

pub use self::augmenting_path::{AugmentingPath, PathEdge, PathFinder};
pub use self::max_flow::{
    augment, max_flow, FlowError, FlowMetrics, FlowPath, MaxFlowResult, MaxFlowSolver,
};
