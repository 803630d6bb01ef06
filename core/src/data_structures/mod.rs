//! Graph storage: the caller-facing adjacency graph and the residual copy
//! the engine works on.

pub mod graph;
pub mod residual;

pub use self::graph::{Adjacency, Graph};
pub use self::residual::{ArcKind, ResidualArc, ResidualGraph};
