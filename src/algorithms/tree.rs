//! Linear-time tree recognition.
//!
//! A graph is a tree iff it has exactly `|V| - 1` edges and every node is
//! reachable from node 0. The edge count is checked first, so the traversal
//! only runs on graphs that could be trees.

use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;

use crate::graph::Graph;

/// Outcome of [`classify`], with the counts it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeVerdict {
    pub is_tree: bool,
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes reached from node 0. Zero when the edge count already ruled the
    /// graph out and no traversal ran.
    pub reached: usize,
}

/// Classify a graph as tree or non-tree.
///
/// An empty graph is not a tree. A single node with no edges is.
pub fn classify(graph: &Graph) -> TreeVerdict {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let mut verdict = TreeVerdict {
        is_tree: false,
        node_count,
        edge_count,
        reached: 0,
    };

    if node_count == 0 || edge_count != node_count - 1 {
        return verdict;
    }

    verdict.reached = reachable_from_first(graph);
    verdict.is_tree = verdict.reached == node_count;
    verdict
}

/// Whether the graph is connected and has exactly `|V| - 1` edges.
pub fn is_tree(graph: &Graph) -> bool {
    classify(graph).is_tree
}

/// Whether every node is reachable from node 0. An empty graph is not connected.
pub fn is_connected(graph: &Graph) -> bool {
    !graph.is_empty() && reachable_from_first(graph) == graph.node_count()
}

/// Number of connected components.
pub fn component_count(graph: &Graph) -> usize {
    petgraph::algo::connected_components(graph.inner())
}

fn reachable_from_first(graph: &Graph) -> usize {
    let inner = graph.inner();
    if inner.node_count() == 0 {
        return 0;
    }

    let mut dfs = Dfs::new(inner, NodeIndex::new(0));
    let mut reached = 0;
    while dfs.next(inner).is_some() {
        reached += 1;
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;

    fn graph(node_count: usize, pairs: &[(u32, u32)]) -> Graph {
        Graph::from_edges(vec![Position::ORIGIN; node_count], pairs).unwrap()
    }

    #[test]
    fn test_path_is_tree() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let verdict = classify(&g);
        assert!(verdict.is_tree);
        assert_eq!(verdict.reached, 4);
    }

    #[test]
    fn test_cycle_is_not_tree() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let verdict = classify(&g);
        assert!(!verdict.is_tree);
        assert_eq!(verdict.edge_count, 4);
        assert_eq!(verdict.reached, 0, "edge count should reject before traversal");
    }

    #[test]
    fn test_two_disjoint_edges_is_not_tree() {
        let g = graph(4, &[(0, 1), (2, 3)]);
        assert!(!is_tree(&g));
        assert!(!is_connected(&g));
        assert_eq!(component_count(&g), 2);
    }

    #[test]
    fn test_right_edge_count_but_disconnected() {
        // Triangle plus an isolated node: 4 nodes, 3 edges.
        let g = graph(4, &[(0, 1), (1, 2), (2, 0)]);
        let verdict = classify(&g);
        assert!(!verdict.is_tree);
        assert_eq!(verdict.reached, 3);
    }

    #[test]
    fn test_empty_graph_is_not_tree() {
        let g = graph(0, &[]);
        assert!(!is_tree(&g));
        assert!(!is_connected(&g));
        assert_eq!(component_count(&g), 0);
    }

    #[test]
    fn test_single_node_is_tree() {
        let g = graph(1, &[]);
        assert!(is_tree(&g));
        assert!(is_connected(&g));
    }

    #[test]
    fn test_star_is_tree() {
        let g = graph(6, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
        assert!(is_tree(&g));
    }

    #[test]
    fn test_tree_iff_edges_and_connectivity() {
        let cases: Vec<(usize, Vec<(u32, u32)>)> = vec![
            (2, vec![]),
            (2, vec![(0, 1)]),
            (3, vec![(0, 1), (1, 2), (0, 2)]),
            (5, vec![(0, 1), (1, 2), (3, 4)]),
            (5, vec![(4, 3), (3, 2), (2, 1), (1, 0)]),
        ];

        for (n, pairs) in cases {
            let g = graph(n, &pairs);
            let expected = g.edge_count() + 1 == g.node_count() && is_connected(&g);
            assert_eq!(is_tree(&g), expected, "n={n}, pairs={pairs:?}");
        }
    }
}
