//! Link and node shape geometry.
//!
//! This module turns routed links into concrete drawable shapes: straight
//! segments, circular arcs, self-loop arcs, and the initial marker, each
//! with its arrowhead and label placement. Everything here is computed in
//! simulation space; the export layer applies the canvas transform when
//! emitting markup.

use quiver_core::geometry::{
    Bounds, GeometryError, Vec2, angle_from_sides, circumcenter,
};

use crate::{
    config::DrawingConfig,
    graph::{Graph, Link, LinkKind, Node},
};

/// A filled triangular arrowhead.
#[derive(Debug, Clone, Copy)]
pub struct ArrowHead {
    tip: Vec2,
    left: Vec2,
    right: Vec2,
}

impl ArrowHead {
    /// Builds the arrowhead pointing from `base` to `tip`.
    ///
    /// # Errors
    ///
    /// Fails when tip and base coincide, leaving the direction undefined.
    pub fn between(tip: Vec2, base: Vec2, width: f32) -> Result<Self, GeometryError> {
        let across = tip.sub(base).perpendicular()?.scale(width / 2.0);

        Ok(Self {
            tip,
            left: base.add(across),
            right: base.sub(across),
        })
    }

    /// Returns the three corners: tip first, then the base corners.
    pub fn points(&self) -> [Vec2; 3] {
        [self.tip, self.left, self.right]
    }
}

/// A label attached to a link.
///
/// `direction` points from the link toward the label and drives the text
/// anchoring decision at emission time.
#[derive(Debug, Clone)]
pub struct Label {
    position: Vec2,
    direction: Vec2,
    text: String,
}

impl Label {
    /// Returns the label position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns the direction from the link toward the label.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Returns the label text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A link classified into its drawable form.
///
/// Arc sweep and large-arc flags are expressed in terms of the SVG path
/// `A` command of the Y-flipped output space, matching what the export
/// layer emits.
#[derive(Debug, Clone)]
pub enum LinkShape {
    /// A straight segment with an arrowhead.
    Line {
        start: Vec2,
        end: Vec2,
        arrow: ArrowHead,
        label: Option<Label>,
    },
    /// A circular arc with an arrowhead.
    Arc {
        start: Vec2,
        end: Vec2,
        radius: f32,
        large_arc: bool,
        sweep: bool,
        arrow: ArrowHead,
        label: Option<Label>,
    },
}

/// Classifies a routed link and computes its drawable geometry.
///
/// # Errors
///
/// Returns [`GeometryError`] when the underlying positions are degenerate
/// (coincident endpoints or an auxiliary point on top of its node).
pub fn link_shape(
    link: &Link,
    graph: &Graph,
    drawing: &DrawingConfig,
) -> Result<LinkShape, GeometryError> {
    match link.kind() {
        LinkKind::SelfLoop => loop_shape(link, graph, drawing),
        LinkKind::InitialMarker => marker_shape(link, graph, drawing),
        LinkKind::Standard => {
            let start = graph.node(link.start()).position();
            let end = graph.node(link.end()).position();
            let middle = start.midpoint(end);

            let deviation = link.aux_point().distance(middle);
            if deviation < drawing.clip_ratio() * start.distance(end) / 2.0 {
                straight_shape(link, graph, drawing)
            } else {
                arc_shape(link, graph, drawing)
            }
        }
    }
}

fn straight_shape(
    link: &Link,
    graph: &Graph,
    drawing: &DrawingConfig,
) -> Result<LinkShape, GeometryError> {
    let start = graph.node(link.start()).position();
    let end = graph.node(link.end()).position();

    let direction = end.sub(start).normalized()?;
    let tip = end.sub(direction.scale(drawing.node_radius()));
    let base = end.sub(direction.scale(drawing.node_radius() + drawing.arrow_length()));

    Ok(LinkShape::Line {
        start: start.add(direction.scale(drawing.node_radius())),
        end: base,
        arrow: ArrowHead::between(tip, base, drawing.arrow_width())?,
        label: Some(side_label(link, direction, drawing)?),
    })
}

fn arc_shape(
    link: &Link,
    graph: &Graph,
    drawing: &DrawingConfig,
) -> Result<LinkShape, GeometryError> {
    let start = graph.node(link.start()).position();
    let end = graph.node(link.end()).position();
    let aux = link.aux_point();
    let middle = start.midpoint(end);

    let center = circumcenter(start, end, aux)?;
    let radius = aux.distance(center);

    // Angles subtended at the arc center by the node circle and by the
    // arrowhead, used to trim the arc back from the node boundaries.
    let node_angle = angle_from_sides(drawing.node_radius(), radius, radius)?;
    let arrow_angle = angle_from_sides(drawing.arrow_length(), radius, radius)?;

    // Orientation of the sweep from start to end in simulation space;
    // trimming has to walk backwards along it at the destination and
    // forwards at the origin.
    let orientation = end.sub(start).cross(aux.sub(end));
    let trim = if orientation < 0.0 { 1.0 } else { -1.0 };

    let tip = center.add(end.sub(center).rotated(-trim * node_angle));
    let base = center.add(
        end.sub(center)
            .rotated(-trim * (node_angle + arrow_angle)),
    );
    let origin = center.add(start.sub(center).rotated(trim * node_angle));

    let direction = end.sub(start).normalized()?;

    Ok(LinkShape::Arc {
        start: origin,
        end: base,
        radius,
        large_arc: aux.distance(middle) > radius,
        sweep: orientation >= 0.0,
        arrow: ArrowHead::between(tip, base, drawing.arrow_width())?,
        label: Some(side_label(link, direction, drawing)?),
    })
}

fn loop_shape(
    link: &Link,
    graph: &Graph,
    drawing: &DrawingConfig,
) -> Result<LinkShape, GeometryError> {
    let node = graph.node(link.start()).position();
    let direction = link.aux_point().sub(node).normalized()?;

    // The loop circle is tucked partially under the state circle.
    let center_distance = drawing.loop_radius() + drawing.node_radius()
        - drawing.loop_radius() * drawing.loop_overlap();
    let center = node.add(direction.scale(center_distance));

    // Angle at the state center between the loop direction and the two
    // points where the loop circle crosses the state circle.
    let alpha = angle_from_sides(drawing.loop_radius(), center_distance, drawing.node_radius())?;
    let entry = node.add(direction.rotated(alpha).scale(drawing.node_radius()));
    let exit = node.add(direction.rotated(-alpha).scale(drawing.node_radius()));

    // The arc stops short of the exit point by the arrowhead's coverage.
    let coverage = angle_from_sides(
        drawing.arrow_length(),
        drawing.loop_radius(),
        drawing.loop_radius(),
    )?;
    let arc_end = center.add(
        exit.sub(center)
            .normalized()?
            .rotated(coverage)
            .scale(drawing.loop_radius()),
    );

    let text_position = center.add(
        direction.scale(drawing.text_distance() + drawing.loop_radius()),
    );

    Ok(LinkShape::Arc {
        start: entry,
        end: arc_end,
        radius: drawing.loop_radius(),
        large_arc: true,
        sweep: true,
        arrow: ArrowHead::between(exit, arc_end, drawing.arrow_width())?,
        label: Some(Label {
            position: text_position,
            direction,
            text: link.label().to_string(),
        }),
    })
}

fn marker_shape(
    link: &Link,
    graph: &Graph,
    drawing: &DrawingConfig,
) -> Result<LinkShape, GeometryError> {
    let node = graph.node(link.end()).position();
    let anchor = link.aux_point();

    let direction = node.sub(anchor).normalized()?;
    let tip = node.sub(direction.scale(drawing.node_radius()));
    let base = node.sub(direction.scale(drawing.node_radius() + drawing.arrow_length()));

    Ok(LinkShape::Line {
        start: anchor,
        end: base,
        arrow: ArrowHead::between(tip, base, drawing.arrow_width())?,
        label: None,
    })
}

/// Places a standard link's label beside its auxiliary point.
fn side_label(
    link: &Link,
    direction: Vec2,
    drawing: &DrawingConfig,
) -> Result<Label, GeometryError> {
    let side = direction.perpendicular()?;

    Ok(Label {
        position: link.aux_point().add(side.scale(drawing.text_distance())),
        direction: side,
        text: link.label().to_string(),
    })
}

/// Returns the bounding box of a node's visual footprint.
pub fn node_bounds(node: &Node, drawing: &DrawingConfig) -> Bounds {
    Bounds::around(node.position(), drawing.total_radius())
}

/// Returns a conservative bounding box of a link's visual footprint,
/// label allowance included.
pub fn link_bounds(
    link: &Link,
    graph: &Graph,
    drawing: &DrawingConfig,
) -> Result<Bounds, GeometryError> {
    match link.kind() {
        LinkKind::SelfLoop => Ok(Bounds::around(link.aux_point(), drawing.loop_radius())),
        LinkKind::InitialMarker => Ok(Bounds::enclosing([
            link.aux_point(),
            graph.node(link.end()).position(),
        ])),
        LinkKind::Standard => {
            let start = graph.node(link.start()).position();
            let end = graph.node(link.end()).position();

            let side = end.sub(start).perpendicular()?;
            let reach = link.aux_point().add(
                side.scale(drawing.link_stroke_width() + 2.0 * drawing.text_size()),
            );

            Ok(Bounds::enclosing([start, reach, end]))
        }
    }
}

/// Returns the bounding box of the whole diagram.
///
/// Folds the node boxes with every link box, each padded by the state
/// footprint radius, mirroring the canvas sizing of the emission layer.
pub fn diagram_bounds(graph: &Graph, drawing: &DrawingConfig) -> Result<Bounds, GeometryError> {
    let mut bounds: Option<Bounds> = None;
    let mut include = |next: Bounds| {
        bounds = Some(match bounds {
            Some(current) => current.merge(&next),
            None => next,
        });
    };

    for node in graph.nodes() {
        include(node_bounds(node, drawing));
    }

    for link in graph.links() {
        include(link_bounds(link, graph, drawing)?.expand(drawing.total_radius()));
    }

    Ok(bounds.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use quiver_core::automaton::{Automaton, State, Transition};

    use super::*;
    use crate::{
        config::{AppConfig, PhysicsConfig},
        layout::{Engine, routing},
    };

    fn rendered_graph(automaton: &Automaton) -> (Graph, DrawingConfig) {
        let config = AppConfig::default();
        let mut graph = Graph::from_automaton(automaton).unwrap();
        Engine::new(PhysicsConfig::default()).run(&mut graph);
        routing::route_links(&mut graph, config.drawing()).unwrap();
        (graph, *config.drawing())
    }

    #[test]
    fn test_lone_link_is_straight() {
        let automaton = Automaton::new(
            vec![State::new("s0", false), State::new("s1", false)],
            vec![Transition::new("s0", "s1", "go")],
            "s0",
        );
        let (graph, drawing) = rendered_graph(&automaton);

        let shape = link_shape(&graph.links()[0], &graph, &drawing).unwrap();
        let LinkShape::Line { start, end, label, .. } = shape else {
            panic!("midpoint-routed link must render straight");
        };

        // The segment stays clear of both state circles.
        let s0 = graph.node(graph.links()[0].start()).position();
        let s1 = graph.node(graph.links()[0].end()).position();
        assert!(start.distance(s0) >= drawing.node_radius() - 1e-3);
        assert!(end.distance(s1) >= drawing.node_radius() - 1e-3);

        assert_eq!(label.unwrap().text(), "go");
    }

    #[test]
    fn test_bidirectional_links_classify_identically() {
        let automaton = Automaton::new(
            vec![State::new("s0", false), State::new("s1", false)],
            vec![
                Transition::new("s0", "s1", "a"),
                Transition::new("s1", "s0", "b"),
            ],
            "s0",
        );
        let (graph, drawing) = rendered_graph(&automaton);

        let forward = link_shape(&graph.links()[0], &graph, &drawing).unwrap();
        let backward = link_shape(&graph.links()[1], &graph, &drawing).unwrap();

        // Symmetric topology: both must pick the same shape, and with the
        // default ratios the offset midpoints put both on arcs.
        match (&forward, &backward) {
            (
                LinkShape::Arc { radius: forward_radius, large_arc: fl, .. },
                LinkShape::Arc { radius: backward_radius, large_arc: bl, .. },
            ) => {
                assert!((forward_radius - backward_radius).abs() < 1e-2);
                assert_eq!(fl, bl);
            }
            _ => panic!("offset bidirectional links must both be arcs"),
        }
    }

    #[test]
    fn test_mirrored_arcs_share_sweep() {
        let automaton = Automaton::new(
            vec![State::new("s0", false), State::new("s1", false)],
            vec![
                Transition::new("s0", "s1", "a"),
                Transition::new("s1", "s0", "b"),
            ],
            "s0",
        );
        let (graph, drawing) = rendered_graph(&automaton);

        let LinkShape::Arc { sweep: forward_sweep, .. } =
            link_shape(&graph.links()[0], &graph, &drawing).unwrap()
        else {
            panic!("expected an arc");
        };
        let LinkShape::Arc { sweep: backward_sweep, .. } =
            link_shape(&graph.links()[1], &graph, &drawing).unwrap()
        else {
            panic!("expected an arc");
        };

        // Each arc bulges to its own side of the chord and is drawn from
        // its own start node, which lands both on the same orientation.
        assert_eq!(forward_sweep, backward_sweep);
    }

    #[test]
    fn test_arc_endpoints_lie_on_circle() {
        let automaton = Automaton::new(
            vec![State::new("s0", false), State::new("s1", false)],
            vec![
                Transition::new("s0", "s1", "a"),
                Transition::new("s1", "s0", "b"),
            ],
            "s0",
        );
        let (graph, drawing) = rendered_graph(&automaton);

        let link = &graph.links()[0];
        let LinkShape::Arc { start, end, radius, .. } =
            link_shape(link, &graph, &drawing).unwrap()
        else {
            panic!("expected an arc");
        };

        let a = graph.node(link.start()).position();
        let b = graph.node(link.end()).position();
        let center = circumcenter(a, b, link.aux_point()).unwrap();

        assert!((start.distance(center) - radius).abs() < 1e-2);
        assert!((end.distance(center) - radius).abs() < 1e-2);

        // Trimmed endpoints sit outside both state circles.
        assert!(start.distance(a) >= drawing.node_radius() - 1e-2);
        assert!(end.distance(b) >= drawing.node_radius() - 1e-2);
    }

    #[test]
    fn test_self_loop_arc_touches_state_circle() {
        let automaton = Automaton::new(
            vec![State::new("s0", false)],
            vec![Transition::new("s0", "s0", "spin")],
            "s0",
        );
        let (graph, drawing) = rendered_graph(&automaton);

        let link = &graph.links()[0];
        let LinkShape::Arc { start, radius, large_arc, sweep, label, .. } =
            link_shape(link, &graph, &drawing).unwrap()
        else {
            panic!("self-loops always render as arcs");
        };

        assert_eq!(radius, drawing.loop_radius());
        assert!(large_arc);
        assert!(sweep);
        assert_eq!(label.unwrap().text(), "spin");

        let node = graph.node(link.start()).position();
        assert!((start.distance(node) - drawing.node_radius()).abs() < 1e-3);
    }

    #[test]
    fn test_marker_is_unlabeled_line_into_node() {
        let automaton = Automaton::new(
            vec![State::new("s0", false)],
            vec![],
            "s0",
        );
        let (graph, drawing) = rendered_graph(&automaton);

        let marker = &graph.links()[0];
        assert_eq!(marker.kind(), LinkKind::InitialMarker);

        let LinkShape::Line { start, arrow, label, .. } =
            link_shape(marker, &graph, &drawing).unwrap()
        else {
            panic!("markers always render straight");
        };

        assert!(label.is_none());
        assert_eq!(start, marker.aux_point());

        // The arrow tip rests on the state circle.
        let node = graph.node(marker.end()).position();
        assert!((arrow.points()[0].distance(node) - drawing.node_radius()).abs() < 1e-3);
    }

    #[test]
    fn test_arrow_head_is_isosceles() {
        let arrow =
            ArrowHead::between(Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.0), 4.0).unwrap();
        let [tip, left, right] = arrow.points();

        assert_eq!(left.distance(right), 4.0);
        assert!((tip.distance(left) - tip.distance(right)).abs() < 1e-4);
    }

    #[test]
    fn test_diagram_bounds_contain_all_nodes() {
        let automaton = Automaton::new(
            vec![
                State::new("s0", true),
                State::new("s1", false),
                State::new("s2", false),
            ],
            vec![
                Transition::new("s0", "s1", "a"),
                Transition::new("s1", "s2", "b"),
                Transition::new("s2", "s2", "c"),
            ],
            "s0",
        );
        let (graph, drawing) = rendered_graph(&automaton);

        let bounds = diagram_bounds(&graph, &drawing).unwrap();
        assert!(bounds.width() > 0.0);
        assert!(bounds.height() > 0.0);

        for node in graph.nodes() {
            let footprint = node_bounds(node, &drawing);
            let merged = bounds.merge(&footprint);
            // Merging a contained box changes nothing.
            assert_eq!(merged, bounds);
        }
    }
}
