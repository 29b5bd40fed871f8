//! Configuration types for Quiver diagram rendering.
//!
//! This module provides the configuration structures that control the
//! physics simulation, the drawing geometry, and the visual style of
//! rendered diagrams. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources, and all are immutable per
//! rendering run: they are passed explicitly into the layout and geometry
//! calls, never held in process-wide state.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`PhysicsConfig`] - Force simulation constants and the iteration cap.
//! - [`DrawingConfig`] - Geometric constants consumed by the link engine.
//! - [`StyleConfig`] - Colors applied at emission time.

use serde::Deserialize;

use color::DynamicColor;

/// Top-level configuration combining physics, drawing, and style sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Physics simulation section.
    #[serde(default)]
    physics: PhysicsConfig,

    /// Drawing geometry section.
    #[serde(default)]
    drawing: DrawingConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(physics: PhysicsConfig, drawing: DrawingConfig, style: StyleConfig) -> Self {
        Self {
            physics,
            drawing,
            style,
        }
    }

    /// Returns the physics configuration.
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Returns the drawing configuration.
    pub fn drawing(&self) -> &DrawingConfig {
        &self.drawing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every section for out-of-range or unparseable values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending value.
    pub fn validate(&self) -> Result<(), String> {
        self.physics.validate()?;
        self.drawing.validate()?;
        self.style.validate()
    }
}

fn default_stop_threshold() -> f32 {
    0.005
}

fn default_attenuation() -> f32 {
    0.1
}

fn default_repulsion() -> f32 {
    1000.0
}

fn default_spring() -> f32 {
    0.005
}

fn default_max_iterations() -> usize {
    10_000
}

/// Constants of the force simulation.
///
/// The simulation loop stops once no node moves further than
/// `stop_threshold` in one iteration, or after `max_iterations`
/// iterations, whichever comes first.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PhysicsConfig {
    /// Maximum node displacement below which the layout counts as converged.
    #[serde(default = "default_stop_threshold")]
    stop_threshold: f32,

    /// Force damping factor in `[0, 1)`; both repulsion and spring forces
    /// are scaled by `1 - attenuation`.
    #[serde(default = "default_attenuation")]
    attenuation: f32,

    /// Coulomb-like repulsion coefficient between every pair of nodes.
    #[serde(default = "default_repulsion")]
    repulsion: f32,

    /// Hookean spring coefficient pulling linked nodes together.
    #[serde(default = "default_spring")]
    spring: f32,

    /// Hard cap on simulation iterations for non-convergent configurations.
    #[serde(default = "default_max_iterations")]
    max_iterations: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            stop_threshold: default_stop_threshold(),
            attenuation: default_attenuation(),
            repulsion: default_repulsion(),
            spring: default_spring(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl PhysicsConfig {
    /// Creates a new [`PhysicsConfig`] from explicit constants.
    ///
    /// Values are range-checked by [`AppConfig::validate`], not here.
    pub fn new(
        stop_threshold: f32,
        attenuation: f32,
        repulsion: f32,
        spring: f32,
        max_iterations: usize,
    ) -> Self {
        Self {
            stop_threshold,
            attenuation,
            repulsion,
            spring,
            max_iterations,
        }
    }

    /// Returns the convergence threshold.
    pub fn stop_threshold(&self) -> f32 {
        self.stop_threshold
    }

    /// Returns the attenuation factor.
    pub fn attenuation(&self) -> f32 {
        self.attenuation
    }

    /// Returns the repulsion coefficient.
    pub fn repulsion(&self) -> f32 {
        self.repulsion
    }

    /// Returns the spring coefficient.
    pub fn spring(&self) -> f32 {
        self.spring
    }

    /// Returns the iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn validate(&self) -> Result<(), String> {
        if !self.stop_threshold.is_finite() || self.stop_threshold <= 0.0 {
            return Err(format!(
                "stop_threshold must be positive, got {}",
                self.stop_threshold
            ));
        }
        if !(0.0..1.0).contains(&self.attenuation) {
            return Err(format!(
                "attenuation must be in [0, 1), got {}",
                self.attenuation
            ));
        }
        if !self.repulsion.is_finite() || self.repulsion < 0.0 {
            return Err(format!("repulsion must be non-negative, got {}", self.repulsion));
        }
        if !self.spring.is_finite() || self.spring < 0.0 {
            return Err(format!("spring must be non-negative, got {}", self.spring));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_node_radius() -> f32 {
    30.0
}

fn default_border_width() -> f32 {
    4.0
}

fn default_marked_ring_ratio() -> f32 {
    0.8
}

fn default_link_ratio() -> f32 {
    0.25
}

fn default_clip_ratio() -> f32 {
    0.1
}

fn default_loop_radius() -> f32 {
    20.0
}

fn default_loop_overlap() -> f32 {
    0.25
}

fn default_initial_marker_length() -> f32 {
    40.0
}

fn default_arrow_length() -> f32 {
    10.0
}

fn default_arrow_width() -> f32 {
    7.0
}

fn default_text_size() -> f32 {
    16.0
}

fn default_text_distance() -> f32 {
    10.0
}

fn default_link_stroke_width() -> f32 {
    1.0
}

fn default_node_stroke_width() -> f32 {
    2.0
}

/// Geometric constants consumed by the link geometry engine.
///
/// These are purely geometric parameters; colors live in [`StyleConfig`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DrawingConfig {
    /// Radius of a state circle.
    #[serde(default = "default_node_radius")]
    node_radius: f32,

    /// Extra clearance around a state circle, included in layout margins.
    #[serde(default = "default_border_width")]
    border_width: f32,

    /// Inner ring radius of a marked state, as a fraction of `node_radius`.
    #[serde(default = "default_marked_ring_ratio")]
    marked_ring_ratio: f32,

    /// Perpendicular offset of bidirectional link pairs, as a fraction of
    /// the endpoint distance.
    #[serde(default = "default_link_ratio")]
    link_ratio: f32,

    /// Deviation threshold (fraction of half the endpoint distance) under
    /// which a link is drawn straight instead of as an arc.
    #[serde(default = "default_clip_ratio")]
    clip_ratio: f32,

    /// Radius of a self-loop circle.
    #[serde(default = "default_loop_radius")]
    loop_radius: f32,

    /// Fraction of the loop radius tucked under the state circle.
    #[serde(default = "default_loop_overlap")]
    loop_overlap: f32,

    /// Length of the initial-state marker.
    #[serde(default = "default_initial_marker_length")]
    initial_marker_length: f32,

    /// Arrowhead length along the link direction.
    #[serde(default = "default_arrow_length")]
    arrow_length: f32,

    /// Arrowhead width across the link direction.
    #[serde(default = "default_arrow_width")]
    arrow_width: f32,

    /// Label font size.
    #[serde(default = "default_text_size")]
    text_size: f32,

    /// Distance between a link and its label.
    #[serde(default = "default_text_distance")]
    text_distance: f32,

    /// Stroke width of link lines and arcs.
    #[serde(default = "default_link_stroke_width")]
    link_stroke_width: f32,

    /// Stroke width of state circles.
    #[serde(default = "default_node_stroke_width")]
    node_stroke_width: f32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            node_radius: default_node_radius(),
            border_width: default_border_width(),
            marked_ring_ratio: default_marked_ring_ratio(),
            link_ratio: default_link_ratio(),
            clip_ratio: default_clip_ratio(),
            loop_radius: default_loop_radius(),
            loop_overlap: default_loop_overlap(),
            initial_marker_length: default_initial_marker_length(),
            arrow_length: default_arrow_length(),
            arrow_width: default_arrow_width(),
            text_size: default_text_size(),
            text_distance: default_text_distance(),
            link_stroke_width: default_link_stroke_width(),
            node_stroke_width: default_node_stroke_width(),
        }
    }
}

impl DrawingConfig {
    /// Returns the state circle radius.
    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    /// Returns the clearance width around a state circle.
    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    /// Returns the marked-state inner ring ratio.
    pub fn marked_ring_ratio(&self) -> f32 {
        self.marked_ring_ratio
    }

    /// Returns the bidirectional offset ratio.
    pub fn link_ratio(&self) -> f32 {
        self.link_ratio
    }

    /// Returns the straight-versus-arc threshold ratio.
    pub fn clip_ratio(&self) -> f32 {
        self.clip_ratio
    }

    /// Returns the self-loop circle radius.
    pub fn loop_radius(&self) -> f32 {
        self.loop_radius
    }

    /// Returns the self-loop overlap fraction.
    pub fn loop_overlap(&self) -> f32 {
        self.loop_overlap
    }

    /// Returns the initial-marker length.
    pub fn initial_marker_length(&self) -> f32 {
        self.initial_marker_length
    }

    /// Returns the arrowhead length.
    pub fn arrow_length(&self) -> f32 {
        self.arrow_length
    }

    /// Returns the arrowhead width.
    pub fn arrow_width(&self) -> f32 {
        self.arrow_width
    }

    /// Returns the label font size.
    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Returns the link-to-label distance.
    pub fn text_distance(&self) -> f32 {
        self.text_distance
    }

    /// Returns the link stroke width.
    pub fn link_stroke_width(&self) -> f32 {
        self.link_stroke_width
    }

    /// Returns the state circle stroke width.
    pub fn node_stroke_width(&self) -> f32 {
        self.node_stroke_width
    }

    /// Returns the full footprint radius of a state: circle plus clearance.
    pub fn total_radius(&self) -> f32 {
        self.node_radius + self.border_width
    }

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("node_radius", self.node_radius),
            ("loop_radius", self.loop_radius),
            ("arrow_length", self.arrow_length),
            ("arrow_width", self.arrow_width),
            ("initial_marker_length", self.initial_marker_length),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        if !(0.0..1.0).contains(&self.loop_overlap) {
            return Err(format!(
                "loop_overlap must be in [0, 1), got {}",
                self.loop_overlap
            ));
        }
        Ok(())
    }
}

fn default_stroke_color() -> String {
    "black".to_string()
}

fn default_fill_color() -> String {
    "white".to_string()
}

fn default_text_color() -> String {
    "black".to_string()
}

fn default_arrow_color() -> String {
    "black".to_string()
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are stored as CSS color strings and validated through the
/// `color` crate; emission passes them to SVG attributes verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Stroke color for state circles, links, and arcs.
    #[serde(default = "default_stroke_color")]
    stroke_color: String,

    /// Fill color for state circles.
    #[serde(default = "default_fill_color")]
    fill_color: String,

    /// Label text color.
    #[serde(default = "default_text_color")]
    text_color: String,

    /// Arrowhead fill color.
    #[serde(default = "default_arrow_color")]
    arrow_color: String,

    /// Optional background color; transparent when unset.
    #[serde(default)]
    background_color: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            fill_color: default_fill_color(),
            text_color: default_text_color(),
            arrow_color: default_arrow_color(),
            background_color: None,
        }
    }
}

impl StyleConfig {
    /// Returns the stroke color.
    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    /// Returns the state fill color.
    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    /// Returns the text color.
    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    /// Returns the arrowhead color.
    pub fn arrow_color(&self) -> &str {
        &self.arrow_color
    }

    /// Returns the background color, if one is configured.
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    fn validate(&self) -> Result<(), String> {
        let named = [
            ("stroke_color", Some(self.stroke_color.as_str())),
            ("fill_color", Some(self.fill_color.as_str())),
            ("text_color", Some(self.text_color.as_str())),
            ("arrow_color", Some(self.arrow_color.as_str())),
            ("background_color", self.background_color.as_deref()),
        ];

        for (name, value) in named {
            let Some(value) = value else { continue };
            value
                .parse::<DynamicColor>()
                .map_err(|err| format!("invalid {name} `{value}`: {err}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_physics_defaults() {
        let physics = PhysicsConfig::default();
        assert_eq!(physics.stop_threshold(), 0.005);
        assert_eq!(physics.attenuation(), 0.1);
        assert_eq!(physics.repulsion(), 1000.0);
        assert_eq!(physics.spring(), 0.005);
        assert_eq!(physics.max_iterations(), 10_000);
    }

    #[test]
    fn test_attenuation_out_of_range_rejected() {
        let mut physics = PhysicsConfig::default();
        physics.attenuation = 1.0;
        assert!(physics.validate().is_err());

        physics.attenuation = -0.1;
        assert!(physics.validate().is_err());
    }

    #[test]
    fn test_total_radius() {
        let drawing = DrawingConfig::default();
        assert_eq!(
            drawing.total_radius(),
            drawing.node_radius() + drawing.border_width()
        );
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut style = StyleConfig::default();
        style.stroke_color = "not-a-color".to_string();
        assert!(style.validate().is_err());
    }
}
