//! Tests for the JavaScript-facing API. Run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use geo_compute_layout::{ForceSimulationWasm, GeoComputeWasm};
use wasm_bindgen::{JsError, JsValue};
use wasm_bindgen_test::*;

fn ok<T>(result: Result<T, JsError>) -> T {
    result.map_err(JsValue::from).unwrap()
}

fn adjacency(lists: &[&[u32]]) -> JsValue {
    let lists: Vec<Vec<u32>> = lists.iter().map(|l| l.to_vec()).collect();
    serde_wasm_bindgen::to_value(&lists).unwrap()
}

#[wasm_bindgen_test]
fn is_tree_from_js() {
    let engine = ok(GeoComputeWasm::new(JsValue::UNDEFINED));
    let positions = [0.0f32; 9];

    assert!(ok(engine.is_tree(&positions, adjacency(&[&[1], &[0, 2], &[1]]))));
    assert!(!ok(engine.is_tree(&positions, adjacency(&[&[1, 2], &[0, 2], &[1, 0]]))));
}

#[wasm_bindgen_test]
fn radial_layout_from_js() {
    let engine = ok(GeoComputeWasm::new(JsValue::UNDEFINED));
    let positions = [0.0f32; 9];

    let result = ok(engine.radial_layout(&positions, adjacency(&[&[1, 2], &[0], &[0]]), 0)).to_vec();

    assert_eq!(result.len(), 9);
    assert_eq!(&result[0..3], &[0.0, 0.0, 0.0]);
}

#[wasm_bindgen_test]
fn compute_layout_from_js() {
    let engine = ok(GeoComputeWasm::new(JsValue::UNDEFINED));
    let positions = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let request = js_sys::JSON::parse(r#"{ "kind": "force", "iterations": 50 }"#).unwrap();

    let result =
        ok(engine.compute_layout(&positions, adjacency(&[&[1], &[0, 2], &[1]]), request)).to_vec();

    assert!(result.iter().all(|v| v.abs() <= 4.0 + 1e-4));
}

#[wasm_bindgen_test]
fn force_simulation_steps_from_js() {
    let positions = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut sim = ok(ForceSimulationWasm::new(
        &positions,
        adjacency(&[&[], &[]]),
        10,
        JsValue::NULL,
    ));

    assert!(sim.step_many(4));
    assert_eq!(sim.iteration(), 4);
    while sim.step() {}
    assert!(sim.is_finished());
    assert_eq!(sim.positions().length(), 6);
}

#[wasm_bindgen_test]
fn invalid_adjacency_is_an_error() {
    let engine = ok(GeoComputeWasm::new(JsValue::UNDEFINED));
    assert!(engine
        .force_layout(&[0.0; 6], adjacency(&[&[1], &[5]]), 10)
        .is_err());
}

#[wasm_bindgen_test]
fn non_positive_iterations_are_errors() {
    let engine = ok(GeoComputeWasm::new(JsValue::UNDEFINED));
    let positions = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0];

    for iterations in [0, -1] {
        assert!(engine
            .force_layout(&positions, adjacency(&[&[1], &[0]]), iterations)
            .is_err());
        assert!(engine
            .available_layouts(&positions, adjacency(&[&[1], &[0]]), iterations)
            .is_err());
        assert!(ForceSimulationWasm::new(
            &positions,
            adjacency(&[&[1], &[0]]),
            iterations,
            JsValue::NULL
        )
        .is_err());
    }
}

#[wasm_bindgen_test]
fn connectivity_from_js() {
    let engine = ok(GeoComputeWasm::new(JsValue::UNDEFINED));
    let positions = [0.0f32; 12];
    let two_pairs = adjacency(&[&[1], &[0], &[3], &[2]]);

    assert!(!ok(engine.is_connected(&positions, two_pairs.clone())));
    assert_eq!(ok(engine.component_count(&positions, two_pairs)), 2);
}

#[wasm_bindgen_test]
fn non_finite_positions_are_errors() {
    let engine = ok(GeoComputeWasm::new(JsValue::UNDEFINED));
    let positions = [f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0];

    assert!(engine
        .force_layout(&positions, adjacency(&[&[1], &[0]]), 10)
        .is_err());
    assert!(engine.recalibrate(&positions).is_err());
}
