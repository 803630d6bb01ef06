//! Capacity-weighted directed graph
//!
//! The graph maps every source node to the ordered list of its outgoing
//! `(neighbor, capacity)` pairs. Insertion order is preserved, both across
//! source nodes and within each neighbor list, because it decides how the
//! path search breaks ties between equally short paths.
//!
//! A node that only ever appears as a neighbor has no entry of its own.
//! Looking it up through [`Graph::neighbors`] yields an empty slice; absent
//! keys are a normal state of the structure rather than an error.
//!
//! Two input shapes are accepted: a flat list of `(from, to, capacity)`
//! triples, grouped per source in input order, or a pre-built adjacency map
//! used as-is.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, Flow, Node};

/// Adjacency representation: node to ordered `(neighbor, capacity)` pairs
pub type Adjacency<N> = IndexMap<N, Vec<(N, Capacity)>>;

/// Directed graph with non-negative integer capacities
#[derive(Clone, PartialEq, Eq)]
pub struct Graph<N: Node> {
    /// Outgoing edges per source node, in insertion order
    adjacency: Adjacency<N>,
    /// Total number of edges across all neighbor lists
    edge_count: usize,
}

impl<N: Node> Graph<N> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
            edge_count: 0,
        }
    }

    /// Groups a flat list of `(from, to, capacity)` triples into adjacency
    /// form, preserving input order per source node
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, Capacity)>,
    {
        let mut graph = Self::new();
        for (from, to, capacity) in edges {
            graph.add_edge(from, to, capacity);
        }
        graph
    }

    /// Appends an edge to the end of `from`'s neighbor list
    pub fn add_edge(&mut self, from: N, to: N, capacity: Capacity) {
        self.adjacency.entry(from).or_default().push((to, capacity));
        self.edge_count += 1;
    }

    /// Outgoing `(neighbor, capacity)` pairs of `node`
    ///
    /// Nodes without an entry, including those that only appear as a
    /// neighbor and those absent from the graph altogether, have no outgoing
    /// edges and yield an empty slice.
    pub fn neighbors(&self, node: &N) -> &[(N, Capacity)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `node` appears anywhere in the graph, as a source or a neighbor
    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
            || self
                .adjacency
                .values()
                .any(|neighbors| neighbors.iter().any(|(to, _)| to == node))
    }

    /// Every node in first-seen order: each source, followed by any of its
    /// neighbors not seen before
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        let mut seen: IndexSet<&N> = IndexSet::with_capacity(self.adjacency.len());
        for (from, neighbors) in &self.adjacency {
            seen.insert(from);
            seen.extend(neighbors.iter().map(|(to, _)| to));
        }
        seen.into_iter()
    }

    /// Number of distinct nodes, counting neighbor-only nodes
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Iterates over every edge as `(from, to, capacity)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, Capacity)> {
        self.adjacency.iter().flat_map(|(from, neighbors)| {
            neighbors.iter().map(move |(to, capacity)| (from, to, *capacity))
        })
    }

    /// Source nodes with their neighbor lists, in insertion order
    pub fn adjacency(&self) -> &Adjacency<N> {
        &self.adjacency
    }

    /// Sum of the capacities leaving `node`, an upper bound on any flow
    /// sourced there
    pub fn outgoing_capacity(&self, node: &N) -> Flow {
        self.neighbors(node)
            .iter()
            .fold(0, |total: Flow, (_, capacity)| total + Flow::from(*capacity))
    }
}

impl<N: Node> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.adjacency.iter()).finish()
    }
}

/// A pre-built adjacency map is used directly
impl<N: Node> From<Adjacency<N>> for Graph<N> {
    fn from(adjacency: Adjacency<N>) -> Self {
        let edge_count = adjacency.values().map(Vec::len).sum();
        Self {
            adjacency,
            edge_count,
        }
    }
}

impl<N: Node> FromIterator<(N, N, Capacity)> for Graph<N> {
    fn from_iter<I: IntoIterator<Item = (N, N, Capacity)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<N: Node> Extend<(N, N, Capacity)> for Graph<N> {
    fn extend<I: IntoIterator<Item = (N, N, Capacity)>>(&mut self, iter: I) {
        for (from, to, capacity) in iter {
            self.add_edge(from, to, capacity);
        }
    }
}

/// Either accepted on-disk shape of a graph description
#[derive(Deserialize)]
#[serde(untagged)]
enum GraphDocument<N: Eq + Hash> {
    /// `[["S", "A", 4], ...]`
    EdgeList(Vec<(N, N, Capacity)>),
    /// `{"S": [["A", 4], ...], ...}`
    Adjacency(IndexMap<N, Vec<(N, Capacity)>>),
}

impl<'de, N> Deserialize<'de> for Graph<N>
where
    N: Node + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match GraphDocument::deserialize(deserializer)? {
            GraphDocument::EdgeList(edges) => Self::from_edges(edges),
            GraphDocument::Adjacency(adjacency) => Self::from(adjacency),
        })
    }
}

impl<N> Serialize for Graph<N>
where
    N: Node + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.adjacency.iter())
    }
}
