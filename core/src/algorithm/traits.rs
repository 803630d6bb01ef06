//! Core algorithm trait definitions for the nwtunnel flow engine
//!
//! This module establishes the shared vocabulary of the engine: the bounds a
//! node identifier must satisfy, the integer types carried on edges, and the
//! string-parameter configuration surface every algorithm object exposes.
//!
//! # Key Design Principles
//! - Node identifiers are opaque: only equality, hashing and display are used
//! - Capacities are unsigned, so negative capacities cannot reach the engine
//! - Flow totals are wider than capacities and never overflow
//! - Parameters are validated at the point they are set
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Edge capacity carried by the graph and its residual copy
pub type Capacity = u64;

/// Accumulated flow value
///
/// Twice as wide as [`Capacity`]: a total over many saturated edges can pass
/// `u64::MAX` even though every single edge fits.
pub type Flow = u128;

/// Dense index of an interned node inside a residual graph
pub type NodeIndex = usize;

/// Identifier bounds required of graph nodes
///
/// Blanket-implemented, so `String`, `&str` and the integer types all qualify
/// without ceremony.
pub trait Node: Clone + Eq + Hash + Debug + Display {}

impl<T> Node for T where T: Clone + Eq + Hash + Debug + Display {}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Boolean,
}

/// Description of a tunable algorithm parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub description: String,
}

/// Errors raised while configuring an algorithm
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs: configuration is the only state kept
/// - Deterministic behavior for given inputs
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> String;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Snapshot of every parameter as a name/value map
    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters()
            .into_iter()
            .map(|parameter| (parameter.name, parameter.value))
            .collect()
    }
}

/// Parses a boolean parameter value, accepting the usual spellings
pub fn parse_bool_parameter(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected a boolean, got {:?}", value),
        }),
    }
}
