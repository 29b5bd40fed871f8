//! Error types for Quiver operations.
//!
//! This module provides the main error type [`QuiverError`] which wraps
//! the error conditions that can occur while building, laying out, and
//! rendering an automaton diagram.

use std::io;

use thiserror::Error;

use quiver_core::geometry::GeometryError;

/// The main error type for Quiver operations.
///
/// Rendering is deterministic pure computation, so there is no retry
/// policy: any failure is fatal to that rendering attempt and is surfaced
/// to the caller.
#[derive(Debug, Error)]
pub enum QuiverError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for QuiverError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
