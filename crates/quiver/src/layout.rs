//! Force-directed layout for automaton graphs.
//!
//! The engine seeds nodes on a circle, then repeatedly applies pairwise
//! repulsion and link spring attraction until no node moves further than
//! the configured threshold. Link routing (auxiliary point placement) runs
//! once after convergence in [`routing`].

pub(crate) mod routing;

use std::f32::consts::TAU;

use log::{debug, warn};

use quiver_core::geometry::Vec2;

use crate::{config::PhysicsConfig, graph::Graph};

/// Radius of the circle nodes are seeded on before the first iteration.
///
/// The even circular spread breaks symmetry deterministically given the
/// node order and guarantees distinct starting positions.
const INITIAL_RADIUS: f32 = 10.0;

/// Force-directed layout engine.
///
/// One engine drives one graph to convergence; the physics constants are
/// immutable for the run.
pub struct Engine {
    physics: PhysicsConfig,
}

impl Engine {
    /// Creates an engine with the given physics constants.
    pub fn new(physics: PhysicsConfig) -> Self {
        Self { physics }
    }

    /// Runs the simulation until convergence or the iteration cap.
    ///
    /// Returns the number of iterations executed. When the cap is reached
    /// before convergence the last positions are kept and a warning is
    /// logged; rendering proceeds with the degraded layout.
    pub fn run(&self, graph: &mut Graph) -> usize {
        Self::seed_positions(graph);

        for iteration in 1..=self.physics.max_iterations() {
            let max_displacement = self.step(graph);

            if max_displacement <= self.physics.stop_threshold() {
                debug!(
                    iteration,
                    max_displacement;
                    "Layout converged"
                );
                return iteration;
            }
        }

        warn!(
            max_iterations = self.physics.max_iterations(),
            stop_threshold = self.physics.stop_threshold();
            "Layout did not converge within the iteration cap; keeping last positions"
        );
        self.physics.max_iterations()
    }

    /// Places nodes evenly on a fixed-radius circle.
    fn seed_positions(graph: &mut Graph) {
        let count = graph.node_count();
        let step_angle = TAU / count as f32;

        for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
            let angle = index as f32 * step_angle;
            node.set_position(Vec2::new(
                INITIAL_RADIUS * angle.cos(),
                INITIAL_RADIUS * angle.sin(),
            ));
        }
    }

    /// Runs one simulation iteration and returns the maximum displacement.
    fn step(&self, graph: &mut Graph) -> f32 {
        // Accumulators are cleared in a dedicated pass before any force is
        // applied.
        for node in graph.nodes_mut() {
            node.reset_displacement();
        }

        // Pairwise repulsion over all unordered node pairs.
        let nodes = graph.nodes_mut();
        for i in 0..nodes.len() {
            let (head, tail) = nodes.split_at_mut(i + 1);
            let node = &mut head[i];
            for other in tail {
                node.interact(other, &self.physics);
            }
        }

        // Spring attraction along standard links.
        let (nodes, links) = graph.parts_mut();
        for link in links {
            link.pull(nodes, &self.physics);
        }

        graph
            .nodes_mut()
            .iter_mut()
            .map(|node| node.displace())
            .fold(0.0, f32::max)
    }
}
