//! Fruchterman-Reingold force-directed layout.
//!
//! Each iteration accumulates a displacement per node from pairwise repulsion
//! (`k² / d` for every ordered pair) and edge attraction (`d² / k` per edge),
//! then moves every node along its displacement by at most the current
//! temperature. The temperature follows a quadratic cooling schedule
//! `t · (1 - iter / iterations)²`, so step sizes shrink towards the end of the
//! run.
//!
//! Repulsion is O(V²) per iteration. There is no spatial partitioning and no
//! randomness: identical inputs give bit-identical outputs.
//!
//! # Running
//!
//! - [`ForceLayout::run`] computes a full layout in one call.
//! - [`ForceLayout::run_cancellable`] checks an [`AtomicBool`] between
//!   iterations, for layouts running on a worker thread.
//! - [`ForceSimulation`] owns its buffers and advances one iteration per
//!   [`step`](ForceSimulation::step), for callers that spread the work across
//!   animation frames.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::{Graph, Position};

/// Configuration for the force-directed layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceLayoutConfig {
    /// Ideal distance `k` between connected nodes (default: 2.0).
    pub ideal_distance: f32,
    /// Maximum per-iteration movement at the first iteration (default: 5.0).
    pub initial_temperature: f32,
    /// Substitute for a zero distance in every division (default: 0.001).
    pub min_distance: f32,
}

impl Default for ForceLayoutConfig {
    fn default() -> Self {
        Self {
            ideal_distance: 2.0,
            initial_temperature: 5.0,
            min_distance: 0.001,
        }
    }
}

impl ForceLayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.ideal_distance.is_finite() && self.ideal_distance > 0.0) {
            return Err(Error::parameter("ideal_distance", self.ideal_distance));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature >= 0.0) {
            return Err(Error::parameter(
                "initial_temperature",
                self.initial_temperature,
            ));
        }
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(Error::parameter("min_distance", self.min_distance));
        }
        Ok(())
    }
}

/// The force-directed layout engine.
#[derive(Debug, Clone, Default)]
pub struct ForceLayout {
    config: ForceLayoutConfig,
}

impl ForceLayout {
    /// Create a force layout with the given configuration.
    pub fn new(config: ForceLayoutConfig) -> Self {
        Self { config }
    }

    /// Create a force layout with the reference constants.
    pub fn with_defaults() -> Self {
        Self::new(ForceLayoutConfig::default())
    }

    pub fn config(&self) -> &ForceLayoutConfig {
        &self.config
    }

    /// Run `iterations` iterations and return the final positions.
    ///
    /// The graph is not modified. Fails with `InvalidParameter` when
    /// `iterations` is zero or the configuration is out of range.
    pub fn run(&self, graph: &Graph, iterations: usize) -> Result<Vec<Position>> {
        let mut simulation = ForceSimulation::new(graph, iterations, self.config.clone())?;
        while simulation.step() {}
        Ok(simulation.into_positions())
    }

    /// Like [`run`](Self::run), but stops between iterations once `cancel`
    /// is set.
    pub fn run_cancellable(
        &self,
        graph: &Graph,
        iterations: usize,
        cancel: &AtomicBool,
    ) -> Result<Vec<Position>> {
        let mut simulation = ForceSimulation::new(graph, iterations, self.config.clone())?;
        loop {
            if cancel.load(Ordering::Relaxed) {
                debug!(
                    completed = simulation.iteration(),
                    iterations, "force layout cancelled"
                );
                return Err(Error::Cancelled {
                    completed: simulation.iteration(),
                    iterations,
                });
            }
            if !simulation.step() {
                break;
            }
        }
        Ok(simulation.into_positions())
    }
}

/// An in-progress force-directed layout.
///
/// Owns a copy of the positions and the edge list, so it can outlive the
/// [`Graph`] it was created from.
#[derive(Debug, Clone)]
pub struct ForceSimulation {
    config: ForceLayoutConfig,
    positions: Vec<Position>,
    /// Edges as `(a, b)` slot pairs with `a < b`.
    edges: Vec<(usize, usize)>,
    /// Per-node (dx, dy) accumulator, reset every iteration.
    displacements: Vec<(f32, f32)>,
    iteration: usize,
    iterations: usize,
}

impl ForceSimulation {
    pub fn new(graph: &Graph, iterations: usize, config: ForceLayoutConfig) -> Result<Self> {
        if iterations == 0 {
            return Err(Error::parameter("iterations", iterations as f64));
        }
        config.validate()?;

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            iterations,
            k = config.ideal_distance,
            temperature = config.initial_temperature,
            "starting force layout"
        );

        Ok(Self {
            config,
            positions: graph.positions(),
            edges: graph.edges().map(|e| e.indices()).collect(),
            displacements: vec![(0.0, 0.0); graph.node_count()],
            iteration: 0,
            iterations,
        })
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Total iterations this simulation will run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.iterations
    }

    /// Current positions.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }

    /// Maximum movement allowed in the next iteration.
    pub fn temperature(&self) -> f32 {
        let progress = 1.0 - self.iteration as f32 / self.iterations as f32;
        self.config.initial_temperature * progress * progress
    }

    /// Advance one iteration.
    ///
    /// Returns `false` without doing anything once all iterations have run.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let cooling = self.temperature();
        self.displacements.fill((0.0, 0.0));
        self.apply_repulsion();
        self.apply_attraction();
        self.apply_displacements(cooling);

        trace!(iteration = self.iteration, cooling, "force iteration");
        self.iteration += 1;

        if self.is_finished() {
            debug!(iterations = self.iterations, "force layout finished");
        }
        true
    }

    /// Advance up to `count` iterations. Returns whether iterations remain.
    pub fn step_many(&mut self, count: usize) -> bool {
        for _ in 0..count {
            if !self.step() {
                break;
            }
        }
        !self.is_finished()
    }

    fn floored(&self, distance: f32) -> f32 {
        // Also catches NaN.
        if distance > 0.0 {
            distance
        } else {
            self.config.min_distance
        }
    }

    fn apply_repulsion(&mut self) {
        let k_squared = self.config.ideal_distance * self.config.ideal_distance;
        let n = self.positions.len();

        for i in 0..n {
            let pi = self.positions[i];
            let (mut acc_x, mut acc_y) = self.displacements[i];
            for j in 0..n {
                if i == j {
                    continue;
                }
                let pj = self.positions[j];
                let dx = pi.x - pj.x;
                let dy = pi.y - pj.y;
                let distance = self.floored((dx * dx + dy * dy).sqrt());
                let force = k_squared / distance;

                acc_x += dx / distance * force;
                acc_y += dy / distance * force;
            }
            self.displacements[i] = (acc_x, acc_y);
        }
    }

    fn apply_attraction(&mut self) {
        let k = self.config.ideal_distance;

        for &(a, b) in &self.edges {
            let pa = self.positions[a];
            let pb = self.positions[b];
            let dx = pa.x - pb.x;
            let dy = pa.y - pb.y;
            let distance = self.floored((dx * dx + dy * dy).sqrt());
            let force = distance * distance / k;
            let fx = dx / distance * force;
            let fy = dy / distance * force;

            self.displacements[a].0 -= fx;
            self.displacements[a].1 -= fy;
            self.displacements[b].0 += fx;
            self.displacements[b].1 += fy;
        }
    }

    fn apply_displacements(&mut self, cooling: f32) {
        for i in 0..self.positions.len() {
            let (dx, dy) = self.displacements[i];
            let length = self.floored((dx * dx + dy * dy).sqrt());
            let limited = length.min(cooling);

            let p = &mut self.positions[i];
            p.x += dx / length * limited;
            p.y += dy / length * limited;
            p.z = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes(a: (f32, f32), b: (f32, f32), connected: bool) -> Graph {
        let pairs: &[(u32, u32)] = if connected { &[(0, 1)] } else { &[] };
        Graph::from_edges(vec![Position::planar(a.0, a.1), Position::planar(b.0, b.1)], pairs)
            .unwrap()
    }

    fn distances_per_step(graph: &Graph, iterations: usize, config: ForceLayoutConfig) -> Vec<f32> {
        let mut sim = ForceSimulation::new(graph, iterations, config).unwrap();
        let mut distances = vec![sim.positions()[0].planar_distance(sim.positions()[1])];
        while sim.step() {
            distances.push(sim.positions()[0].planar_distance(sim.positions()[1]));
        }
        distances
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let graph = two_nodes((0.0, 0.0), (1.0, 0.0), true);
        let err = ForceLayout::with_defaults().run(&graph, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "iterations", .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let graph = two_nodes((0.0, 0.0), (1.0, 0.0), true);
        let layout = ForceLayout::new(ForceLayoutConfig {
            ideal_distance: 0.0,
            ..Default::default()
        });
        let err = layout.run(&graph, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "ideal_distance", .. }));

        let layout = ForceLayout::new(ForceLayoutConfig {
            initial_temperature: f32::NAN,
            ..Default::default()
        });
        assert!(layout.run(&graph, 10).is_err());
    }

    #[test]
    fn test_deterministic() {
        let positions = vec![
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.5, 2.0),
            Position::new(-0.5, 1.5, 0.0),
            Position::new(2.0, -1.0, 0.0),
        ];
        let graph = Graph::from_edges(positions, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let layout = ForceLayout::with_defaults();

        let first = layout.run(&graph, 200).unwrap();
        let second = layout.run(&graph, 200).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_untouched_and_z_flattened() {
        let positions = vec![Position::new(0.0, 0.0, 3.0), Position::new(1.0, 1.0, -3.0)];
        let graph = Graph::from_edges(positions.clone(), &[(0, 1)]).unwrap();

        let result = ForceLayout::with_defaults().run(&graph, 5).unwrap();

        assert_eq!(graph.positions(), positions);
        assert_eq!(result.len(), positions.len());
        assert!(result.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_unconnected_pair_moves_apart() {
        let graph = two_nodes((0.0, 0.0), (1.0, 0.0), false);
        let distances = distances_per_step(&graph, 50, ForceLayoutConfig::default());

        for pair in distances.windows(2) {
            assert!(
                pair[1] > pair[0],
                "distance should strictly increase: {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_connected_pair_pulls_together() {
        let graph = two_nodes((0.0, 0.0), (6.0, 0.0), true);
        let config = ForceLayoutConfig {
            initial_temperature: 0.5,
            ..Default::default()
        };
        let k = config.ideal_distance;
        let distances = distances_per_step(&graph, 200, config);

        // While the pair is farther apart than k, attraction dominates.
        for pair in distances.windows(2) {
            if pair[0] > k + 1e-3 {
                assert!(
                    pair[1] < pair[0],
                    "distance should decrease above k: {} -> {}",
                    pair[0],
                    pair[1]
                );
            }
        }

        // Equilibrium of k²/d = d²/k is d = k.
        let last = *distances.last().unwrap();
        assert!((last - k).abs() < 0.25, "expected ~{k}, got {last}");
    }

    #[test]
    fn test_coincident_nodes_stay_finite() {
        let graph = two_nodes((1.0, 1.0), (1.0, 1.0), true);
        let result = ForceLayout::with_defaults().run(&graph, 20).unwrap();
        assert!(result.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_temperature_schedule() {
        let graph = two_nodes((0.0, 0.0), (1.0, 0.0), false);
        let mut sim = ForceSimulation::new(&graph, 4, ForceLayoutConfig::default()).unwrap();

        assert!((sim.temperature() - 5.0).abs() < 1e-6);
        sim.step();
        assert!((sim.temperature() - 5.0 * 0.75 * 0.75).abs() < 1e-6);
        sim.step_many(10);
        assert!(sim.is_finished());
        assert_eq!(sim.iteration(), 4);
        assert!(!sim.step());
    }

    #[test]
    fn test_cancellation() {
        let graph = two_nodes((0.0, 0.0), (1.0, 0.0), true);
        let cancel = AtomicBool::new(true);
        let err = ForceLayout::with_defaults()
            .run_cancellable(&graph, 100, &cancel)
            .unwrap_err();
        assert_eq!(
            err,
            Error::Cancelled {
                completed: 0,
                iterations: 100
            }
        );

        let cancel = AtomicBool::new(false);
        let result = ForceLayout::with_defaults()
            .run_cancellable(&graph, 100, &cancel)
            .unwrap();
        assert_eq!(result, ForceLayout::with_defaults().run(&graph, 100).unwrap());
    }

    #[test]
    fn test_runs_on_worker_thread() {
        use std::sync::Arc;

        let graph = Graph::from_edges(
            (0..10).map(|i| Position::planar(i as f32, (i * i) as f32 * 0.1)).collect(),
            &[(0, 1), (1, 2), (2, 3), (3, 4), (5, 6), (6, 7), (8, 9)],
        )
        .unwrap();
        let cancel = Arc::new(AtomicBool::new(false));

        let worker = {
            let graph = graph.clone();
            let cancel = Arc::clone(&cancel);
            std::thread::spawn(move || {
                ForceLayout::with_defaults().run_cancellable(&graph, 50, &cancel)
            })
        };

        let result = worker.join().unwrap().unwrap();
        assert_eq!(result, ForceLayout::with_defaults().run(&graph, 50).unwrap());
    }
}
