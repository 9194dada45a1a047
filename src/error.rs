//! Error types shared by every layout and classification entry point.

/// Structural problems found while building a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphDefect {
    #[error("adjacency has {found} entries but there are {expected} nodes")]
    AdjacencyLength { expected: usize, found: usize },

    #[error("node {node} lists neighbor {neighbor}, but only {node_count} nodes exist")]
    NeighborOutOfRange {
        node: usize,
        neighbor: usize,
        node_count: usize,
    },

    #[error("node {node} lists itself as a neighbor")]
    SelfLoop { node: usize },

    #[error("node {node} lists {neighbor}, but {neighbor} does not list {node}")]
    AsymmetricAdjacency { node: usize, neighbor: usize },

    #[error("position buffer length {len} is not a multiple of {stride}")]
    MalformedBuffer { len: usize, stride: usize },

    #[error("node {node} has a non-finite coordinate")]
    NonFinitePosition { node: usize },
}

/// Inputs that are well-formed graphs but unusable for the requested layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputDefect {
    #[error("graph with {node_count} nodes and {edge_count} edges is not a tree")]
    NotATree { node_count: usize, edge_count: usize },

    #[error("root {root} is out of range for {node_count} nodes")]
    RootOutOfRange { root: usize, node_count: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphDefect),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputDefect),

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("layout cancelled after {completed} of {iterations} iterations")]
    Cancelled { completed: usize, iterations: usize },
}

impl Error {
    pub(crate) fn parameter(name: &'static str, value: impl Into<f64>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
