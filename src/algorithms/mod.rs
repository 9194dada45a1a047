//! Graph topology algorithms.

pub mod tree;

pub use tree::{classify, component_count, is_connected, is_tree, TreeVerdict};
