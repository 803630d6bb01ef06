//! Graph file loading
//!
//! A graph file is JSON in either of the shapes the core graph accepts: a
//! list of `[from, to, capacity]` triples, or an object mapping each node to
//! its `[neighbor, capacity]` pairs. Capacities must be non-negative
//! integers; anything else is reported as a malformed description.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use nwtunnel_core::Graph;

/// Errors raised while loading a graph description
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed graph description: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parses a graph description from JSON text
pub fn parse_graph(text: &str) -> Result<Graph<String>, LoadError> {
    // Two steps so syntax errors keep their line and column
    let document: serde_json::Value = serde_json::from_str(text)?;
    let graph = Graph::<String>::deserialize(document)?;
    debug!(
        "parsed graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Reads and parses the graph description stored at `path`
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph<String>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", text.len(), path.display());
    parse_graph(&text)
}
