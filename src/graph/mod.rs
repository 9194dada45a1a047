//! Graph data structures.
//!
//! This module provides the input model shared by every algorithm: node
//! positions plus a validated, symmetric undirected adjacency stored in
//! petgraph. Graphs are built per call and never mutated by the engine.

mod edge;
mod model;
mod node;

pub use edge::Edge;
pub use model::Graph;
pub use node::{flatten_positions, positions_from_flat, NodeId, Position};
pub(crate) use node::check_finite;
