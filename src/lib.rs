//! Geo-Compute - WASM Layout Module
//!
//! This module provides the graph layout and topology algorithms behind the
//! Geo-Compute graph editor. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; the same algorithms are
//! available as a plain Rust library.
//!
//! # Architecture
//!
//! - `graph`: Validated graph input (positions + undirected adjacency) on petgraph
//! - `algorithms`: Topology queries (tree recognition, connectivity)
//! - `layout`: Force-directed and radial tree layouts, viewport normalization
//! - `spatial`: Bounding boxes over position sets
//!
//! Every operation is a pure function of its inputs: no state survives between
//! calls, and the input graph is never mutated.

use js_sys::Float32Array;
use serde::de::DeserializeOwned;
use tracing::warn;
use wasm_bindgen::prelude::*;

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod layout;
pub mod spatial;

pub use algorithms::{classify, is_tree, TreeVerdict};
pub use error::{Error, GraphDefect, InputDefect, Result};
pub use graph::{Edge, Graph, NodeId, Position};
pub use layout::{
    available_layouts, compute_layout, recalibrate, ForceLayout, ForceLayoutConfig,
    ForceSimulation, LayoutOptions, LayoutRequest, RadialLayout, RadialLayoutConfig,
    ViewportConfig,
};

use graph::{flatten_positions, positions_from_flat};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log a rejected call and convert it for JavaScript.
fn reject(err: Error) -> JsError {
    warn!(%err, "rejected layout call");
    JsError::new(&err.to_string())
}

/// Deserialize an optional JS object, falling back to the default when the
/// caller passed `undefined` or `null`.
fn from_js_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
) -> std::result::Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn graph_from_js(positions: &[f32], adjacency: JsValue) -> std::result::Result<Graph, JsError> {
    let adjacency: Vec<Vec<u32>> = serde_wasm_bindgen::from_value(adjacency)?;
    Graph::from_flat(positions, &adjacency).map_err(reject)
}

fn to_float32_array(positions: &[Position]) -> Float32Array {
    Float32Array::from(&flatten_positions(positions)[..])
}

/// Iteration counts arrive as signed JS numbers. Anything below 1 is rejected.
fn iteration_count(iterations: i32) -> Result<usize> {
    usize::try_from(iterations)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| Error::parameter("iterations", iterations))
}

/// Main entry point for layout computation.
///
/// Holds only the layout options; graphs are passed in with each call.
/// Positions cross the boundary as flat `[x0, y0, z0, x1, ...]` arrays and
/// adjacency as `number[][]`.
#[wasm_bindgen]
pub struct GeoComputeWasm {
    options: LayoutOptions,
}

#[wasm_bindgen]
impl GeoComputeWasm {
    /// Create an engine. `options` may be omitted to use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> std::result::Result<GeoComputeWasm, JsError> {
        let options: LayoutOptions = from_js_or_default(options)?;
        options.force.validate().map_err(reject)?;
        options.radial.validate().map_err(reject)?;
        options.viewport.validate().map_err(reject)?;
        Ok(Self { options })
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Whether the graph is connected with exactly `nodes - 1` edges.
    #[wasm_bindgen(js_name = isTree)]
    pub fn is_tree(
        &self,
        positions: &[f32],
        adjacency: JsValue,
    ) -> std::result::Result<bool, JsError> {
        let graph = graph_from_js(positions, adjacency)?;
        Ok(algorithms::is_tree(&graph))
    }

    /// Whether every node is reachable from node 0. False for an empty graph.
    #[wasm_bindgen(js_name = isConnected)]
    pub fn is_connected(
        &self,
        positions: &[f32],
        adjacency: JsValue,
    ) -> std::result::Result<bool, JsError> {
        let graph = graph_from_js(positions, adjacency)?;
        Ok(algorithms::is_connected(&graph))
    }

    /// Number of connected components, isolated nodes included.
    #[wasm_bindgen(js_name = componentCount)]
    pub fn component_count(
        &self,
        positions: &[f32],
        adjacency: JsValue,
    ) -> std::result::Result<u32, JsError> {
        let graph = graph_from_js(positions, adjacency)?;
        Ok(algorithms::component_count(&graph) as u32)
    }

    /// Layout requests applicable to the graph, e.g.
    /// `[{ kind: "force", iterations }, { kind: "radial", root: 0 }]`.
    #[wasm_bindgen(js_name = availableLayouts)]
    pub fn available_layouts(
        &self,
        positions: &[f32],
        adjacency: JsValue,
        iterations: i32,
    ) -> std::result::Result<JsValue, JsError> {
        let iterations = iteration_count(iterations).map_err(reject)?;
        let graph = graph_from_js(positions, adjacency)?;
        let layouts = layout::available_layouts(&graph, iterations);
        Ok(serde_wasm_bindgen::to_value(&layouts)?)
    }

    // =========================================================================
    // Layout Algorithms
    // =========================================================================

    /// Run the force-directed layout. Returns raw (un-normalized) positions.
    #[wasm_bindgen(js_name = forceLayout)]
    pub fn force_layout(
        &self,
        positions: &[f32],
        adjacency: JsValue,
        iterations: i32,
    ) -> std::result::Result<Float32Array, JsError> {
        let iterations = iteration_count(iterations).map_err(reject)?;
        let graph = graph_from_js(positions, adjacency)?;
        let result = ForceLayout::new(self.options.force.clone())
            .run(&graph, iterations)
            .map_err(reject)?;
        Ok(to_float32_array(&result))
    }

    /// Run the radial tree layout. Returns raw (un-normalized) positions.
    #[wasm_bindgen(js_name = radialLayout)]
    pub fn radial_layout(
        &self,
        positions: &[f32],
        adjacency: JsValue,
        root: u32,
    ) -> std::result::Result<Float32Array, JsError> {
        let graph = graph_from_js(positions, adjacency)?;
        let result = RadialLayout::new(self.options.radial.clone())
            .run(&graph, NodeId(root))
            .map_err(reject)?;
        Ok(to_float32_array(&result))
    }

    /// Fit positions into the configured viewport.
    pub fn recalibrate(&self, positions: &[f32]) -> std::result::Result<Float32Array, JsError> {
        let positions = positions_from_flat(positions).map_err(reject)?;
        let result = layout::recalibrate(&positions, &self.options.viewport).map_err(reject)?;
        Ok(to_float32_array(&result))
    }

    /// Run a layout request (`{ kind: "force", iterations }` or
    /// `{ kind: "radial", root }`) and fit the result into the viewport.
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(
        &self,
        positions: &[f32],
        adjacency: JsValue,
        request: JsValue,
    ) -> std::result::Result<Float32Array, JsError> {
        let graph = graph_from_js(positions, adjacency)?;
        let request: LayoutRequest = serde_wasm_bindgen::from_value(request)?;
        let result = layout::compute_layout(&graph, request, &self.options).map_err(reject)?;
        Ok(to_float32_array(&result))
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Get the bounding box of a position set.
    ///
    /// Returns [min_x, min_y, max_x, max_y], or None if there are no positions.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self, positions: &[f32]) -> std::result::Result<Option<Vec<f32>>, JsError> {
        let positions = positions_from_flat(positions).map_err(reject)?;
        Ok(spatial::bounds(&positions).map(|b| b.to_array().to_vec()))
    }
}

/// A force-directed layout advanced incrementally from JavaScript.
///
/// Intended for a requestAnimationFrame loop or a Web Worker: call
/// `stepMany` with a small budget per frame and read `positions` to render
/// intermediate states. Dropping the object cancels the layout.
#[wasm_bindgen]
pub struct ForceSimulationWasm {
    simulation: ForceSimulation,
}

#[wasm_bindgen]
impl ForceSimulationWasm {
    /// Start a simulation. `config` may be omitted to use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        positions: &[f32],
        adjacency: JsValue,
        iterations: i32,
        config: JsValue,
    ) -> std::result::Result<ForceSimulationWasm, JsError> {
        let iterations = iteration_count(iterations).map_err(reject)?;
        let graph = graph_from_js(positions, adjacency)?;
        let config: ForceLayoutConfig = from_js_or_default(config)?;
        let simulation = ForceSimulation::new(&graph, iterations, config).map_err(reject)?;
        Ok(Self { simulation })
    }

    /// Advance one iteration. Returns false once the simulation has finished.
    pub fn step(&mut self) -> bool {
        self.simulation.step()
    }

    /// Advance up to `count` iterations. Returns whether iterations remain.
    #[wasm_bindgen(js_name = stepMany)]
    pub fn step_many(&mut self, count: u32) -> bool {
        self.simulation.step_many(count as usize)
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.simulation.is_finished()
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> u32 {
        self.simulation.iteration() as u32
    }

    /// Maximum movement allowed in the next iteration.
    pub fn temperature(&self) -> f32 {
        self.simulation.temperature()
    }

    /// Current positions as `[x0, y0, z0, x1, ...]`.
    pub fn positions(&self) -> Float32Array {
        to_float32_array(self.simulation.positions())
    }
}
