//! Breadth-first augmenting path search
//!
//! Finds one path through the residual graph that uses only arcs with
//! positive residual capacity. The frontier is first-in-first-out, so the
//! path returned is always a shortest one (by arc count), which is what gives
//! Edmonds-Karp its O(V·E) bound on the number of augmentations.
//!
//! # Properties
//! - Each node is discovered at most once per search, so cycles cannot trap
//!   the traversal and a returned path never repeats a node
//! - Ties between equally short paths are broken by arc order, making the
//!   choice reproducible for a given graph
//! - The search starts from the node it is given, whatever node that is
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, Node, NodeIndex};
use crate::data_structures::residual::ResidualGraph;

/// One step of an augmenting path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEdge {
    /// Tail of the arc
    pub from: NodeIndex,
    /// Head of the arc
    pub to: NodeIndex,
    /// Slot of the arc in `from`'s arc list
    pub slot: usize,
    /// Residual capacity of the arc when the path was discovered
    pub residual: Capacity,
}

/// A source-to-sink walk over open residual arcs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    edges: Vec<PathEdge>,
}

impl AugmentingPath {
    /// Edges in walk order
    pub fn edges(&self) -> &[PathEdge] {
        &self.edges
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false for paths produced by [`PathFinder`]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Smallest residual capacity along the path
    pub fn bottleneck(&self) -> Capacity {
        self.edges
            .iter()
            .map(|edge| edge.residual)
            .min()
            .unwrap_or(0)
    }

    /// Visited nodes, start and end included
    pub fn nodes(&self) -> Vec<NodeIndex> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            nodes.push(first.from);
        }
        nodes.extend(self.edges.iter().map(|edge| edge.to));
        nodes
    }
}

/// Reusable breadth-first search state
///
/// Visited marks are stamped with a per-search epoch so consecutive searches
/// over the same residual graph do not pay to clear them.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    /// Epoch in which each node was last discovered
    seen: Vec<u32>,
    /// Arc used to discover each node: `(predecessor, slot)`
    parent: Vec<(NodeIndex, usize)>,
    /// FIFO frontier
    queue: VecDeque<NodeIndex>,
    /// Current search epoch, zero means never searched
    epoch: u32,
    /// Nodes dequeued and expanded over the finder's lifetime
    expanded: usize,
}

impl PathFinder {
    /// Creates a finder with no preallocated buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a finder sized for graphs of `node_count` nodes
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            seen: vec![0; node_count],
            parent: vec![(0, 0); node_count],
            queue: VecDeque::with_capacity(node_count),
            epoch: 0,
            expanded: 0,
        }
    }

    /// Total nodes expanded by every search so far
    pub fn nodes_expanded(&self) -> usize {
        self.expanded
    }

    /// Finds a shortest path from `from` to `to` over open arcs
    ///
    /// Returns `None` when no such path exists, when either index lies
    /// outside the graph, and when `from == to`: a path needs at least one
    /// edge.
    pub fn find<N: Node>(
        &mut self,
        residual: &ResidualGraph<N>,
        from: NodeIndex,
        to: NodeIndex,
    ) -> Option<AugmentingPath> {
        let node_count = residual.node_count();
        if from == to || from >= node_count || to >= node_count {
            return None;
        }

        self.begin_search(node_count);
        let epoch = self.epoch;

        self.seen[from] = epoch;
        self.queue.push_back(from);

        while let Some(u) = self.queue.pop_front() {
            self.expanded += 1;

            for (slot, arc) in residual.arcs(u).iter().enumerate() {
                if !arc.is_open() || self.seen[arc.to] == epoch {
                    continue;
                }

                self.seen[arc.to] = epoch;
                self.parent[arc.to] = (u, slot);

                if arc.to == to {
                    self.queue.clear();
                    return Some(self.reconstruct(residual, from, to));
                }

                self.queue.push_back(arc.to);
            }
        }

        None
    }

    /// Whether any open path leads from `from` to `to`
    pub fn reaches<N: Node>(
        &mut self,
        residual: &ResidualGraph<N>,
        from: NodeIndex,
        to: NodeIndex,
    ) -> bool {
        self.find(residual, from, to).is_some()
    }

    /// Prepares buffers and advances the epoch
    fn begin_search(&mut self, node_count: usize) {
        if self.seen.len() < node_count {
            self.seen.resize(node_count, 0);
            self.parent.resize(node_count, (0, 0));
        }

        self.queue.clear();
        self.epoch = match self.epoch.checked_add(1) {
            Some(epoch) => epoch,
            None => {
                // Stamps from earlier searches could collide after wrapping
                self.seen.fill(0);
                1
            }
        };
    }

    /// Walks parent links back from `to` and materializes the path
    fn reconstruct<N: Node>(
        &self,
        residual: &ResidualGraph<N>,
        from: NodeIndex,
        to: NodeIndex,
    ) -> AugmentingPath {
        let mut edges = Vec::new();
        let mut current = to;

        while current != from {
            let (previous, slot) = self.parent[current];
            let residual_capacity = residual
                .arc(previous, slot)
                .map(|arc| arc.residual)
                .unwrap_or(0);

            edges.push(PathEdge {
                from: previous,
                to: current,
                slot,
                residual: residual_capacity,
            });
            current = previous;
        }

        edges.reverse();
        trace!("augmenting path of {} edges from {} to {}", edges.len(), from, to);

        AugmentingPath { edges }
    }
}
