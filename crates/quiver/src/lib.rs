//! Quiver - force-directed SVG rendering for finite automata.
//!
//! Quiver takes an automaton snapshot (states, labeled transitions, and an
//! initial state), lays it out with a force-directed simulation, routes
//! the transition links around the settled nodes, and renders the result
//! as an SVG diagram.

pub mod config;
pub mod draw;
pub mod export;
pub mod graph;
pub mod layout;

mod error;

pub use quiver_core::{automaton, geometry};

pub use error::QuiverError;

use log::{debug, info};

use automaton::Automaton;
use config::AppConfig;
use graph::Graph;

/// Builder for laying out and rendering automaton diagrams.
///
/// # Examples
///
/// ```
/// use quiver::{DiagramBuilder, config::AppConfig};
/// use quiver::automaton::{Automaton, State, Transition};
///
/// let automaton = Automaton::new(
///     vec![State::new("s0", true), State::new("s1", false)],
///     vec![Transition::new("s0", "s1", "a")],
///     "s0",
/// );
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let svg = builder.render_svg(&automaton)
///     .expect("Failed to render");
///
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Creates a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Builds and lays out the graph for an automaton snapshot.
    ///
    /// The returned graph has converged node positions and routed link
    /// auxiliary points, ready for shape classification and emission.
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError`] for invalid configuration, malformed
    /// snapshots, or degenerate geometry.
    pub fn layout(&self, automaton: &Automaton) -> Result<Graph, QuiverError> {
        self.config.validate().map_err(QuiverError::Config)?;

        info!(
            states_count = automaton.states().len(),
            transitions_count = automaton.transitions().len();
            "Building diagram graph"
        );
        let mut graph = Graph::from_automaton(automaton)?;

        info!("Running force simulation");
        let engine = layout::Engine::new(*self.config.physics());
        let iterations = engine.run(&mut graph);
        debug!(iterations; "Simulation finished");

        layout::routing::route_links(&mut graph, self.config.drawing())?;

        Ok(graph)
    }

    /// Renders an automaton snapshot to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError`] for any layout or rendering failure.
    pub fn render_svg(&self, automaton: &Automaton) -> Result<String, QuiverError> {
        let graph = self.layout(automaton)?;

        info!("Rendering diagram to SVG");
        let document = export::svg::Svg::render(&graph, &self.config)?;

        Ok(document.to_string())
    }
}
