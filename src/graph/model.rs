//! Graph - the immutable input to every layout and classification call.
//!
//! The topology is stored in petgraph's undirected `Graph`, with node weights
//! holding the starting positions. Node slot `i` in the caller's buffers maps
//! to petgraph `NodeIndex` `i`, because nodes are inserted in order and never
//! removed. Edges are inserted once per node pair in ascending `(a, b)` order,
//! so iteration order is deterministic for a given input.

use std::collections::BTreeSet;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::edge::Edge;
use super::node::{check_finite, positions_from_flat, NodeId, Position};
use crate::error::{GraphDefect, Result};

/// An undirected graph with per-node starting positions.
///
/// Built once per call and never mutated afterwards. Construction validates
/// every index, so the algorithms can index freely.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: UnGraph<Position, ()>,
}

impl Graph {
    /// Build a graph from per-node neighbor lists.
    ///
    /// `adjacency[i]` lists the neighbors of node `i`. The lists must be
    /// symmetric (if `i` lists `j`, `j` lists `i`), free of self-references and
    /// in range. Repeated entries collapse into a single edge. Every coordinate
    /// must be finite.
    pub fn new(positions: Vec<Position>, adjacency: &[Vec<u32>]) -> Result<Self> {
        check_finite(&positions)?;
        let node_count = positions.len();
        if adjacency.len() != node_count {
            return Err(GraphDefect::AdjacencyLength {
                expected: node_count,
                found: adjacency.len(),
            }
            .into());
        }

        let mut neighbor_sets: Vec<Vec<usize>> = Vec::with_capacity(node_count);
        for (node, list) in adjacency.iter().enumerate() {
            let mut set = Vec::with_capacity(list.len());
            for &neighbor in list {
                let neighbor = neighbor as usize;
                if neighbor >= node_count {
                    return Err(GraphDefect::NeighborOutOfRange {
                        node,
                        neighbor,
                        node_count,
                    }
                    .into());
                }
                if neighbor == node {
                    return Err(GraphDefect::SelfLoop { node }.into());
                }
                set.push(neighbor);
            }
            set.sort_unstable();
            set.dedup();
            neighbor_sets.push(set);
        }

        for (node, set) in neighbor_sets.iter().enumerate() {
            for &neighbor in set {
                if neighbor_sets[neighbor].binary_search(&node).is_err() {
                    return Err(GraphDefect::AsymmetricAdjacency { node, neighbor }.into());
                }
            }
        }

        let edges = neighbor_sets.iter().enumerate().flat_map(|(node, set)| {
            set.iter()
                .filter(move |&&neighbor| node < neighbor)
                .map(move |&neighbor| (node, neighbor))
        });

        Ok(Self::assemble(positions, edges))
    }

    /// Build a graph from undirected edge pairs.
    ///
    /// Each pair may appear in either orientation and any number of times.
    pub fn from_edges(positions: Vec<Position>, pairs: &[(u32, u32)]) -> Result<Self> {
        check_finite(&positions)?;
        let node_count = positions.len();
        let mut edges: BTreeSet<(usize, usize)> = BTreeSet::new();

        for &(u, v) in pairs {
            let (u, v) = (u as usize, v as usize);
            if u >= node_count || v >= node_count {
                let (node, neighbor) = if v >= node_count { (u, v) } else { (v, u) };
                return Err(GraphDefect::NeighborOutOfRange {
                    node,
                    neighbor,
                    node_count,
                }
                .into());
            }
            if u == v {
                return Err(GraphDefect::SelfLoop { node: u }.into());
            }
            edges.insert((u.min(v), u.max(v)));
        }

        Ok(Self::assemble(positions, edges))
    }

    /// Build a graph from a flat position buffer `[x0, y0, z0, x1, ...]` and
    /// per-node neighbor lists.
    pub fn from_flat(positions: &[f32], adjacency: &[Vec<u32>]) -> Result<Self> {
        Self::new(positions_from_flat(positions)?, adjacency)
    }

    fn assemble(positions: Vec<Position>, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut inner = UnGraph::with_capacity(positions.len(), positions.len());
        for position in positions {
            inner.add_node(position);
        }
        for (a, b) in edges {
            inner.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        Self { inner }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Whether `id` names a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.inner.node_count()
    }

    /// Starting positions in slot order.
    pub fn positions(&self) -> Vec<Position> {
        self.inner.node_weights().copied().collect()
    }

    /// Neighbors of a node in ascending id order.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut neighbors: Vec<NodeId> = self
            .inner
            .neighbors(NodeIndex::new(id.index()))
            .map(|n| NodeId(n.index() as u32))
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Every undirected edge once, in ascending `(a, b)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.inner.edge_references().filter_map(|e| {
            Edge::new(
                NodeId(e.source().index() as u32),
                NodeId(e.target().index() as u32),
            )
        })
    }

    /// The underlying petgraph structure, for traversals.
    pub(crate) fn inner(&self) -> &UnGraph<Position, ()> {
        &self.inner
    }
}
