//! Undirected edge type.
//!
//! Edges are stored once per node pair, with endpoints normalized so that
//! `a < b`. Self-loops cannot be represented.

use std::fmt;

use super::node::NodeId;

/// An undirected edge between two distinct nodes, normalized so `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    /// Create a normalized edge. Returns None for a self-loop.
    #[inline]
    pub fn new(u: NodeId, v: NodeId) -> Option<Self> {
        match u.cmp(&v) {
            std::cmp::Ordering::Less => Some(Self { a: u, b: v }),
            std::cmp::Ordering::Greater => Some(Self { a: v, b: u }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Endpoints as slot indices.
    #[inline]
    pub fn indices(self) -> (usize, usize) {
        (self.a.index(), self.b.index())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({}-{})", self.a.0, self.b.0)
    }
}
