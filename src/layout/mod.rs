//! Layout algorithms for graph visualization.
//!
//! This module provides the layout engines and the pipeline the editor calls:
//! run one engine, then fit the result into the viewport. The radial layout
//! is only offered for trees.

pub mod force;
pub mod normalize;
pub mod radial;

pub use force::{ForceLayout, ForceLayoutConfig, ForceSimulation};
pub use normalize::{recalibrate, ViewportConfig};
pub use radial::{AngularSlot, RadialLayout, RadialLayoutConfig};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::tree;
use crate::error::Result;
use crate::graph::{Graph, NodeId, Position};

/// Which layout to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutRequest {
    Force { iterations: usize },
    Radial { root: u32 },
}

impl LayoutRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Force { .. } => "force",
            Self::Radial { .. } => "radial",
        }
    }
}

/// Settings for every stage of [`compute_layout`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub force: ForceLayoutConfig,
    pub radial: RadialLayoutConfig,
    pub viewport: ViewportConfig,
}

/// Layouts applicable to `graph`, with their default parameters.
///
/// The force layout applies to any non-empty graph; the radial layout only
/// to trees, rooted at node 0.
pub fn available_layouts(graph: &Graph, iterations: usize) -> Vec<LayoutRequest> {
    if graph.is_empty() {
        return Vec::new();
    }
    let mut layouts = vec![LayoutRequest::Force { iterations }];
    if tree::is_tree(graph) {
        layouts.push(LayoutRequest::Radial { root: 0 });
    }
    layouts
}

/// Run the requested layout and fit its output into the viewport.
pub fn compute_layout(
    graph: &Graph,
    request: LayoutRequest,
    options: &LayoutOptions,
) -> Result<Vec<Position>> {
    debug!(layout = request.name(), nodes = graph.node_count(), "computing layout");

    let raw = match request {
        LayoutRequest::Force { iterations } => {
            ForceLayout::new(options.force.clone()).run(graph, iterations)?
        }
        LayoutRequest::Radial { root } => {
            RadialLayout::new(options.radial.clone()).run(graph, NodeId(root))?
        }
    };

    recalibrate(&raw, &options.viewport)
}
