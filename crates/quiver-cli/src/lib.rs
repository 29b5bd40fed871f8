//! CLI logic for the Quiver automaton renderer.
//!
//! This module contains the core CLI logic: loading the configuration,
//! reading the automaton snapshot, and writing the rendered SVG.

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use quiver::{
    DiagramBuilder, QuiverError,
    automaton::Automaton,
    export::{Exporter, svg::Svg},
};

/// Run the Quiver CLI application
///
/// This function reads the automaton snapshot from the input file, runs it
/// through the layout and rendering pipeline, and writes the resulting SVG
/// to the output file.
///
/// # Errors
///
/// Returns `QuiverError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed automaton snapshots
/// - Layout or rendering errors
pub fn run(args: &Args) -> Result<(), QuiverError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing automaton"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and decode the automaton snapshot
    let source = fs::read_to_string(&args.input)?;
    let automaton: Automaton = serde_json::from_str(&source)
        .map_err(|err| QuiverError::Graph(format!("invalid automaton file: {err}")))?;

    // Lay out through the DiagramBuilder API, then write via the SVG exporter
    let builder = DiagramBuilder::new(app_config.clone());
    let graph = builder.layout(&automaton)?;

    let exporter = Svg::new(&args.output);
    exporter.export_graph(&graph, &app_config)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
