//! Export layer for laid-out graphs.
//!
//! This module owns the mapping from simulation space into the output
//! canvas and defines the [`Exporter`] seam the rendering backends
//! implement. The only backend currently shipped is [`svg`].

pub mod svg;

use thiserror::Error;

use quiver_core::geometry::{Bounds, GeometryError, Vec2};

use crate::{config::AppConfig, graph::Graph};

/// Errors raised while rendering or writing a diagram.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("render error: {0}")]
    Render(String),
}

/// Renders a laid-out graph to its output destination.
pub trait Exporter {
    /// Renders the graph and writes the result.
    fn export_graph(&self, graph: &Graph, config: &AppConfig) -> Result<(), Error>;
}

/// Maps simulation coordinates onto the output canvas.
///
/// The simulation runs Y-up with an arbitrary origin; the canvas is Y-down
/// with its origin at the top-left corner of the diagram bounds. This is
/// the sole coordinate transform applied during emission.
#[derive(Debug, Clone, Copy)]
pub struct Canvas {
    origin: Vec2,
    width: f32,
    height: f32,
}

impl Canvas {
    /// Derives the canvas from the diagram bounds.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            origin: bounds.top_left(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    /// Returns the canvas width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Maps a simulation-space point into canvas coordinates.
    pub fn to_canvas(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x() - self.origin.x(), self.origin.y() - point.y())
    }
}
