//! Residual graph with paired forward and reverse arcs
//!
//! The residual graph is a working copy derived from a [`Graph`]. Nodes are
//! interned to dense [`NodeIndex`] values in first-seen order and every
//! original edge `A -> B (c)` becomes a pair of arcs: the forward arc with
//! residual capacity `c`, and a reverse arc `B -> A` starting at zero. Each arc
//! records the slot of its partner, so pushing flow updates both directions
//! in one step and their sum never changes.
//!
//! Within a node's arc list the forward arcs come first, in the original
//! neighbor order, followed by the reverse arcs in the order their forward
//! edges were visited. The caller's graph is never touched.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, Flow, Node, NodeIndex};
use crate::data_structures::graph::Graph;

/// Whether an arc mirrors an original edge or was synthesized as its partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcKind {
    /// Arc of an edge present in the original graph
    Forward,
    /// Back arc created alongside a forward arc, starting at zero capacity
    Reverse,
}

/// Arc of the residual graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualArc {
    /// Target vertex
    pub to: NodeIndex,
    /// Remaining capacity in this direction
    pub residual: Capacity,
    /// Slot of the paired arc inside `to`'s arc list
    pub reverse: usize,
    /// Original edge or synthesized partner
    pub kind: ArcKind,
}

impl ResidualArc {
    /// Whether flow can still be pushed along this arc
    #[inline]
    pub fn is_open(&self) -> bool {
        self.residual > 0
    }
}

/// Working copy of a graph used while augmenting flow
#[derive(Debug, Clone)]
pub struct ResidualGraph<N: Node> {
    /// Node identifiers, position is the node's index
    nodes: IndexSet<N>,
    /// Outgoing arcs per node index
    arcs: Vec<Vec<ResidualArc>>,
}

impl<N: Node> ResidualGraph<N> {
    /// Builds the residual graph of `graph`, adding a zero-capacity back arc
    /// for every forward edge
    pub fn from_graph(graph: &Graph<N>) -> Self {
        let mut nodes: IndexSet<N> = IndexSet::with_capacity(graph.adjacency().len());
        for node in graph.nodes() {
            nodes.insert(node.clone());
        }

        let mut arcs: Vec<Vec<ResidualArc>> = vec![Vec::new(); nodes.len()];

        // Forward arcs first, in original neighbor order
        for (from, neighbors) in graph.adjacency() {
            let Some(u) = nodes.get_index_of(from) else {
                continue;
            };
            arcs[u].reserve(neighbors.len());
            for (to, capacity) in neighbors {
                if let Some(v) = nodes.get_index_of(to) {
                    arcs[u].push(ResidualArc {
                        to: v,
                        residual: *capacity,
                        reverse: usize::MAX,
                        kind: ArcKind::Forward,
                    });
                }
            }
        }

        // Then a partner for every forward arc, appended to the target's list
        let forward_counts: Vec<usize> = arcs.iter().map(Vec::len).collect();
        for (u, &count) in forward_counts.iter().enumerate() {
            for slot in 0..count {
                let v = arcs[u][slot].to;
                let partner = arcs[v].len();
                arcs[v].push(ResidualArc {
                    to: u,
                    residual: 0,
                    reverse: slot,
                    kind: ArcKind::Reverse,
                });
                arcs[u][slot].reverse = partner;
            }
        }

        Self { nodes, arcs }
    }

    /// Index of `node`, if it appears in the graph
    pub fn index_of(&self, node: &N) -> Option<NodeIndex> {
        self.nodes.get_index_of(node)
    }

    /// Identifier of the node at `index`
    pub fn node(&self, index: NodeIndex) -> Option<&N> {
        self.nodes.get_index(index)
    }

    /// Outgoing arcs of `index`; empty for indices outside the graph
    pub fn arcs(&self, index: NodeIndex) -> &[ResidualArc] {
        self.arcs.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The arc stored at `slot` of `from`'s list
    pub fn arc(&self, from: NodeIndex, slot: usize) -> Option<&ResidualArc> {
        self.arcs.get(from).and_then(|arcs| arcs.get(slot))
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of arcs, counting both members of every pair
    pub fn arc_count(&self) -> usize {
        self.arcs.iter().map(Vec::len).sum()
    }

    /// Pushes `delta` units along the arc at `slot` of `from`
    ///
    /// The arc loses `delta` residual capacity and its partner gains it; both
    /// sides change together so the pair sum is preserved.
    ///
    /// # Panics
    /// If `delta` exceeds the arc's residual capacity.
    pub fn push_flow(&mut self, from: NodeIndex, slot: usize, delta: Capacity) {
        let arc = &mut self.arcs[from][slot];
        assert!(
            delta <= arc.residual,
            "pushing {} units through an arc with {} left",
            delta,
            arc.residual
        );
        arc.residual -= delta;
        let (to, reverse) = (arc.to, arc.reverse);
        self.arcs[to][reverse].residual += delta;
    }

    /// Residual capacity of an arc plus that of its partner
    ///
    /// Constant for the whole run: the original forward capacity.
    pub fn pair_capacity(&self, from: NodeIndex, slot: usize) -> Capacity {
        let arc = self.arcs[from][slot];
        arc.residual + self.arcs[arc.to][arc.reverse].residual
    }

    /// Flow currently carried by the forward arc at `slot` of `from`
    ///
    /// Reverse arcs carry no flow of their own and report zero.
    pub fn flow_on(&self, from: NodeIndex, slot: usize) -> Flow {
        let arc = self.arcs[from][slot];
        match arc.kind {
            ArcKind::Forward => Flow::from(self.arcs[arc.to][arc.reverse].residual),
            ArcKind::Reverse => 0,
        }
    }

    /// Total flow entering `index` over original edges
    pub fn inflow(&self, index: NodeIndex) -> Flow {
        // A reverse arc out of `index` holds exactly the flow on its incoming
        // forward partner.
        self.arcs(index)
            .iter()
            .filter(|arc| arc.kind == ArcKind::Reverse)
            .map(|arc| Flow::from(arc.residual))
            .sum()
    }

    /// Total flow leaving `index` over original edges
    pub fn outflow(&self, index: NodeIndex) -> Flow {
        (0..self.arcs(index).len())
            .map(|slot| self.flow_on(index, slot))
            .sum()
    }

    /// Outflow minus inflow at `index`
    pub fn net_flow(&self, index: NodeIndex) -> i128 {
        // Each side sums at most one u64 per arc, far below i128::MAX
        self.outflow(index) as i128 - self.inflow(index) as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph<&'static str> {
        Graph::from_edges(vec![
            ("S", "A", 5),
            ("S", "B", 3),
            ("A", "T", 4),
            ("B", "T", 6),
        ])
    }

    #[test]
    fn test_residual_graph_construction() {
        let residual = ResidualGraph::from_graph(&diamond());

        assert_eq!(residual.node_count(), 4);
        // 4 forward + 4 reverse arcs
        assert_eq!(residual.arc_count(), 8);

        let s = residual.index_of(&"S").unwrap();
        let t = residual.index_of(&"T").unwrap();

        // Forward arcs keep their capacities and order
        let caps: Vec<_> = residual.arcs(s).iter().map(|arc| arc.residual).collect();
        assert_eq!(caps, vec![5, 3]);

        // The sink only has back arcs, all closed
        assert_eq!(residual.arcs(t).len(), 2);
        assert!(residual
            .arcs(t)
            .iter()
            .all(|arc| arc.kind == ArcKind::Reverse && !arc.is_open()));
    }

    #[test]
    fn test_forward_arcs_precede_reverse_arcs() {
        let residual = ResidualGraph::from_graph(&diamond());
        let a = residual.index_of(&"A").unwrap();

        let kinds: Vec<_> = residual.arcs(a).iter().map(|arc| arc.kind).collect();
        assert_eq!(kinds, vec![ArcKind::Forward, ArcKind::Reverse]);
        assert_eq!(residual.node(residual.arcs(a)[1].to), Some(&"S"));
    }

    #[test]
    fn test_pairs_point_at_each_other() {
        let residual = ResidualGraph::from_graph(&diamond());

        for u in 0..residual.node_count() {
            for (slot, arc) in residual.arcs(u).iter().enumerate() {
                let partner = residual.arc(arc.to, arc.reverse).unwrap();
                assert_eq!(partner.to, u);
                assert_eq!(partner.reverse, slot);
                assert_ne!(partner.kind, arc.kind);
            }
        }
    }

    #[test]
    fn test_push_flow_preserves_pair_capacity() {
        let mut residual = ResidualGraph::from_graph(&diamond());
        let s = residual.index_of(&"S").unwrap();
        let a = residual.index_of(&"A").unwrap();

        residual.push_flow(s, 0, 2);

        assert_eq!(residual.arcs(s)[0].residual, 3);
        assert_eq!(residual.flow_on(s, 0), 2);
        assert_eq!(residual.pair_capacity(s, 0), 5);
        assert_eq!(residual.inflow(a), 2);
        assert_eq!(residual.outflow(s), 2);
        assert_eq!(residual.net_flow(s), 2);
        assert_eq!(residual.net_flow(a), -2);
    }

    #[test]
    fn test_original_graph_untouched() {
        let graph = diamond();
        let snapshot = graph.clone();

        let mut residual = ResidualGraph::from_graph(&graph);
        residual.push_flow(0, 0, 5);

        assert_eq!(graph, snapshot);
    }

    #[test]
    fn test_parallel_and_antiparallel_edges_pair_separately() {
        let graph = Graph::from_edges(vec![("X", "Y", 2), ("X", "Y", 3), ("Y", "X", 4)]);
        let mut residual = ResidualGraph::from_graph(&graph);
        let x = residual.index_of(&"X").unwrap();

        residual.push_flow(x, 1, 3);

        // Only the second parallel edge moved
        assert_eq!(residual.arcs(x)[0].residual, 2);
        assert_eq!(residual.arcs(x)[1].residual, 0);
        assert_eq!(residual.pair_capacity(x, 0), 2);
        assert_eq!(residual.pair_capacity(x, 1), 3);
        assert_eq!(residual.outflow(x), 3);
    }

    #[test]
    fn test_sums_of_saturated_maximal_arcs() {
        let graph = Graph::from_edges(vec![("X", "Y", u64::MAX), ("X", "Y", u64::MAX)]);
        let mut residual = ResidualGraph::from_graph(&graph);
        let x = residual.index_of(&"X").unwrap();
        let y = residual.index_of(&"Y").unwrap();

        residual.push_flow(x, 0, u64::MAX);
        residual.push_flow(x, 1, u64::MAX);

        let expected = 2 * Flow::from(u64::MAX);
        assert_eq!(residual.outflow(x), expected);
        assert_eq!(residual.inflow(y), expected);
        assert_eq!(residual.net_flow(x), expected as i128);
        assert_eq!(residual.net_flow(y), -(expected as i128));
    }

    #[test]
    fn test_unknown_index_has_no_arcs() {
        let residual = ResidualGraph::from_graph(&diamond());
        assert!(residual.arcs(99).is_empty());
        assert!(residual.node(99).is_none());
        assert!(residual.index_of(&"Q").is_none());
    }

    #[test]
    #[should_panic]
    fn test_overdraw_panics() {
        let mut residual = ResidualGraph::from_graph(&diamond());
        residual.push_flow(0, 0, 6);
    }
}
