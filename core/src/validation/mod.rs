//! Synthetic inputs and timing harness for exercising the engine at scale

pub mod generators;
pub mod performance;

pub use self::generators::{node_labels, random_edges, random_graph, GeneratorError};
pub use self::performance::{
    measure, run_suite, PerformanceSample, ScalingScenario, ValidationError, DEFAULT_SCENARIOS,
};
