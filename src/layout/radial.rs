//! Radial tree layout.
//!
//! Places the root at the origin and every other node on a ring of radius
//! `depth * radius_step`. Each subtree owns an angular wedge whose width is
//! proportional to its size, so heavy subtrees get more of the circle.
//!
//! # Algorithm Overview
//!
//! 1. **Subtree metrics (bottom-up):** DFS from the root records parent,
//!    depth and ordered children for every node, then accumulates subtree
//!    sizes in reverse discovery order.
//! 2. **Angular slots (top-down):** The root receives `[-π, π]`. A node's angle
//!    is the midpoint of its wedge. Below the root, the range handed to the
//!    children is narrowed to `angle ± acos(r / (r + radius_step))`, the arc
//!    over which the next ring stays on this node's side of the tangent, so
//!    neighbouring subtrees cannot overlap on outer rings. Children then split
//!    that range in proportion to their subtree sizes, left to right.
//! 3. **Coordinate transform:** `(r cos θ, r sin θ, 0)`.
//!
//! Both passes use explicit stacks, so tree depth is bounded by memory rather
//! than the call stack.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::tree;
use crate::error::{Error, InputDefect, Result};
use crate::graph::{Graph, NodeId, Position};

/// Configuration for the radial tree layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadialLayoutConfig {
    /// Distance between consecutive depth rings (default: 2.0).
    pub radius_step: f32,
}

impl Default for RadialLayoutConfig {
    fn default() -> Self {
        Self { radius_step: 2.0 }
    }
}

impl RadialLayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.radius_step.is_finite() && self.radius_step > 0.0) {
            return Err(Error::parameter("radius_step", self.radius_step));
        }
        Ok(())
    }
}

/// Per-node placement computed by the top-down pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngularSlot {
    /// Parent in the rooted tree (None for the root).
    pub parent: Option<NodeId>,
    /// Depth in the tree (root = 0).
    pub depth: u32,
    /// Nodes in this node's subtree, itself included.
    pub subtree_size: usize,
    /// Ring radius, `depth * radius_step`.
    pub radius: f32,
    /// Angle of the node, the midpoint of its wedge.
    pub angle: f32,
    /// Wedge assigned by the parent.
    pub wedge_start: f32,
    pub wedge_end: f32,
    /// Range shared out among the children, after narrowing.
    pub child_start: f32,
    pub child_end: f32,
}

impl AngularSlot {
    pub fn wedge_span(&self) -> f32 {
        self.wedge_end - self.wedge_start
    }

    pub fn child_span(&self) -> f32 {
        self.child_end - self.child_start
    }
}

/// Rooted-tree facts gathered by the bottom-up pass.
struct SubtreeMetrics {
    parent: Vec<Option<usize>>,
    depth: Vec<u32>,
    size: Vec<usize>,
    children: Vec<Vec<usize>>,
}

/// The radial tree layout engine.
#[derive(Debug, Clone, Default)]
pub struct RadialLayout {
    config: RadialLayoutConfig,
}

impl RadialLayout {
    /// Create a radial layout with the given configuration.
    pub fn new(config: RadialLayoutConfig) -> Self {
        Self { config }
    }

    /// Create a radial layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RadialLayoutConfig::default())
    }

    pub fn config(&self) -> &RadialLayoutConfig {
        &self.config
    }

    /// Compute positions for every node, rooted at `root`.
    ///
    /// The graph must be a tree; anything else is rejected with
    /// `InvalidInput` rather than laid out partially.
    pub fn run(&self, graph: &Graph, root: NodeId) -> Result<Vec<Position>> {
        let slots = self.slots(graph, root)?;
        Ok(slots
            .iter()
            .map(|s| Position::planar(s.radius * s.angle.cos(), s.radius * s.angle.sin()))
            .collect())
    }

    /// Compute the angular slot of every node, indexed by node slot.
    pub fn slots(&self, graph: &Graph, root: NodeId) -> Result<Vec<AngularSlot>> {
        self.config.validate()?;

        let verdict = tree::classify(graph);
        if !verdict.is_tree {
            return Err(InputDefect::NotATree {
                node_count: verdict.node_count,
                edge_count: verdict.edge_count,
            }
            .into());
        }
        if !graph.contains(root) {
            return Err(InputDefect::RootOutOfRange {
                root: root.index(),
                node_count: graph.node_count(),
            }
            .into());
        }

        debug!(
            nodes = graph.node_count(),
            root = root.raw(),
            radius_step = self.config.radius_step,
            "computing radial layout"
        );

        let metrics = Self::compute_subtree_metrics(graph, root.index());
        Ok(self.assign_angular_slots(&metrics, root.index()))
    }

    /// Bottom-up pass: parent, depth, children and subtree size per node.
    fn compute_subtree_metrics(graph: &Graph, root: usize) -> SubtreeMetrics {
        let n = graph.node_count();
        let mut metrics = SubtreeMetrics {
            parent: vec![None; n],
            depth: vec![0; n],
            size: vec![1; n],
            children: vec![Vec::new(); n],
        };

        let mut visited = vec![false; n];
        let mut discovery = Vec::with_capacity(n);
        let mut stack = vec![root];
        visited[root] = true;

        while let Some(v) = stack.pop() {
            discovery.push(v);
            for neighbor in graph.neighbors(NodeId(v as u32)) {
                let c = neighbor.index();
                if visited[c] {
                    continue;
                }
                visited[c] = true;
                metrics.parent[c] = Some(v);
                metrics.depth[c] = metrics.depth[v] + 1;
                metrics.children[v].push(c);
                stack.push(c);
            }
        }

        // Every node is discovered after its parent, so the reverse order
        // finishes each subtree before adding it to its parent.
        for &v in discovery.iter().rev() {
            if let Some(p) = metrics.parent[v] {
                metrics.size[p] += metrics.size[v];
            }
        }

        metrics
    }

    /// Top-down pass: wedge, angle and radius per node.
    fn assign_angular_slots(&self, metrics: &SubtreeMetrics, root: usize) -> Vec<AngularSlot> {
        let step = self.config.radius_step;
        let mut slots = vec![AngularSlot::default(); metrics.size.len()];
        let mut stack: Vec<(usize, f32, f32)> = vec![(root, -PI, PI)];

        while let Some((v, wedge_start, wedge_end)) = stack.pop() {
            let depth = metrics.depth[v];
            let radius = depth as f32 * step;
            let angle = (wedge_start + wedge_end) / 2.0;

            let (mut lo, mut hi) = (wedge_start, wedge_end);
            if depth > 0 {
                let half = (radius / (radius + step)).acos();
                lo = lo.max(angle - half);
                hi = hi.min(angle + half);
            }

            slots[v] = AngularSlot {
                parent: metrics.parent[v].map(|p| NodeId(p as u32)),
                depth,
                subtree_size: metrics.size[v],
                radius,
                angle,
                wedge_start,
                wedge_end,
                child_start: lo,
                child_end: hi,
            };

            // Leaves have no descendants to share the range with.
            let descendants = metrics.size[v] - 1;
            if descendants == 0 {
                continue;
            }

            let angle_step = (hi - lo) / descendants as f32;
            let mut left = lo;
            let mut wedges = Vec::with_capacity(metrics.children[v].len());
            for &c in &metrics.children[v] {
                let right = left + metrics.size[c] as f32 * angle_step;
                wedges.push((c, left, right));
                left = right;
            }
            // Reversed so the leftmost child is popped first.
            stack.extend(wedges.into_iter().rev());
        }

        slots
    }
}
