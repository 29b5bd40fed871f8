//! Quiver Core Types and Definitions
//!
//! This crate provides the foundational types for the Quiver automaton
//! renderer. It includes:
//!
//! - **Geometry**: 2D vectors, angles, circle geometry, and bounding boxes
//!   ([`geometry`] module)
//! - **Automaton**: the state-machine snapshot consumed by the renderer
//!   ([`automaton`] module)

pub mod automaton;
pub mod geometry;
