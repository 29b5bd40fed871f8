//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the full pipeline, from automaton snapshot to SVG
//! string, through the public API.

use quiver::{
    DiagramBuilder,
    automaton::{Automaton, State, Transition},
    config::AppConfig,
    draw::{self, LinkShape},
    graph::LinkKind,
};

fn two_state_automaton() -> Automaton {
    Automaton::new(
        vec![State::new("S0", true), State::new("S1", false)],
        vec![
            Transition::new("S0", "S1", "a"),
            Transition::new("S1", "S0", "b"),
        ],
        "S0",
    )
}

#[test]
fn test_layout_two_state_scenario() {
    let builder = DiagramBuilder::default();
    let graph = builder.layout(&two_state_automaton()).unwrap();

    assert_eq!(graph.node_count(), 2);

    let standard: Vec<_> = graph
        .links()
        .iter()
        .filter(|link| link.kind() == LinkKind::Standard)
        .collect();
    let markers: Vec<_> = graph
        .links()
        .iter()
        .filter(|link| link.kind() == LinkKind::InitialMarker)
        .collect();

    assert_eq!(standard.len(), 2);
    assert_eq!(markers.len(), 1);
    assert_eq!(graph.node(markers[0].start()).name(), "S0");

    // The bidirectional pair's aux points mirror each other across the
    // segment midpoint.
    let middle = graph
        .node(standard[0].start())
        .position()
        .midpoint(graph.node(standard[0].end()).position());
    let mirrored = middle.add(middle.sub(standard[1].aux_point()));
    assert!(standard[0].aux_point().distance(mirrored) < 1e-3);
}

#[test]
fn test_bounding_box_contains_expanded_nodes() {
    let builder = DiagramBuilder::default();
    let config = AppConfig::default();
    let graph = builder.layout(&two_state_automaton()).unwrap();

    let bounds = draw::diagram_bounds(&graph, config.drawing()).unwrap();

    for node in graph.nodes() {
        let footprint = draw::node_bounds(node, config.drawing());
        assert!(bounds.contains(footprint.top_left()));
        assert!(bounds.contains(
            quiver::geometry::Vec2::new(footprint.max_x(), footprint.min_y())
        ));
    }
}

#[test]
fn test_symmetric_topology_classifies_consistently() {
    let builder = DiagramBuilder::default();
    let config = AppConfig::default();
    let graph = builder.layout(&two_state_automaton()).unwrap();

    let shapes: Vec<LinkShape> = graph
        .links()
        .iter()
        .filter(|link| link.kind() == LinkKind::Standard)
        .map(|link| draw::link_shape(link, &graph, config.drawing()).unwrap())
        .collect();

    // Both straight or both curved, never one of each.
    let arcs = shapes
        .iter()
        .filter(|shape| matches!(shape, LinkShape::Arc { .. }))
        .count();
    assert!(arcs == 0 || arcs == shapes.len());
}

#[test]
fn test_render_svg_end_to_end() {
    let builder = DiagramBuilder::default();
    let svg = builder.render_svg(&two_state_automaton()).unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains(">S0</text>"));
    assert!(svg.contains(">S1</text>"));
    assert!(svg.contains(">a</text>"));
    assert!(svg.contains(">b</text>"));
}

#[test]
fn test_malformed_snapshot_fails_before_layout() {
    let automaton = Automaton::new(
        vec![State::new("S0", false)],
        vec![Transition::new("S0", "missing", "a")],
        "S0",
    );

    let builder = DiagramBuilder::default();
    assert!(builder.layout(&automaton).is_err());
}

#[test]
fn test_invalid_config_rejected() {
    use quiver::config::{DrawingConfig, PhysicsConfig, StyleConfig};

    let physics = PhysicsConfig::new(0.005, 1.5, 1000.0, 0.005, 10_000);
    let config = AppConfig::new(physics, DrawingConfig::default(), StyleConfig::default());
    let builder = DiagramBuilder::new(config);

    let err = builder.layout(&two_state_automaton()).unwrap_err();
    assert!(matches!(err, quiver::QuiverError::Config(_)));
}
