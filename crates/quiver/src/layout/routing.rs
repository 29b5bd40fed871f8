//! Auxiliary point placement for links.
//!
//! Runs once after the force simulation has converged. Standard links get
//! their curve control point (offset midpoints for bidirectional pairs),
//! self-loops and the initial marker get a direction anchor placed in the
//! widest free angular sector around their node.

use std::f32::consts::PI;

use log::debug;

use quiver_core::geometry::{EPSILON, GeometryError, Vec2};

use crate::{
    config::DrawingConfig,
    graph::{Graph, LinkKind},
};

/// Computes every link's auxiliary point from the final node positions.
///
/// Standard links are routed first so that loop and marker placement can
/// see their directions. Each bidirectional pair is processed exactly
/// once.
///
/// # Errors
///
/// Returns [`GeometryError`] when two linked nodes ended the simulation at
/// the same position, leaving the offset direction undefined.
pub(crate) fn route_links(
    graph: &mut Graph,
    drawing: &DrawingConfig,
) -> Result<(), GeometryError> {
    let mut routed = vec![false; graph.link_count()];

    route_standard_links(graph, drawing, &mut routed)?;

    // Self-loops next, the initial marker last; later placements see the
    // directions of everything already routed.
    route_radial_links(graph, drawing, &mut routed, LinkKind::SelfLoop)?;
    route_radial_links(graph, drawing, &mut routed, LinkKind::InitialMarker)?;

    debug!(links_count = graph.link_count(); "Link routing complete");
    Ok(())
}

fn route_standard_links(
    graph: &mut Graph,
    drawing: &DrawingConfig,
    routed: &mut [bool],
) -> Result<(), GeometryError> {
    for index in 0..graph.link_count() {
        if routed[index] {
            continue;
        }

        let link = &graph.links()[index];
        if link.kind() != LinkKind::Standard {
            continue;
        }

        let start = graph.node(link.start()).position();
        let end = graph.node(link.end()).position();
        let middle = start.midpoint(end);

        match graph.reverse_of(link) {
            Some(reverse) => {
                let distance = start.distance(end);
                let offset = end
                    .sub(start)
                    .perpendicular()?
                    .scale(distance * drawing.link_ratio());

                let reverse_index = reverse.index();
                graph.links_mut()[index].set_aux_point(middle.add(offset));
                graph.links_mut()[reverse_index].set_aux_point(middle.sub(offset));
                routed[index] = true;
                routed[reverse_index] = true;
            }
            None => {
                graph.links_mut()[index].set_aux_point(middle);
                routed[index] = true;
            }
        }
    }

    Ok(())
}

fn route_radial_links(
    graph: &mut Graph,
    drawing: &DrawingConfig,
    routed: &mut [bool],
    kind: LinkKind,
) -> Result<(), GeometryError> {
    let reach = match kind {
        LinkKind::SelfLoop => drawing.loop_radius() + drawing.total_radius(),
        LinkKind::InitialMarker => drawing.initial_marker_length() + drawing.total_radius(),
        LinkKind::Standard => unreachable!("standard links are not radial"),
    };

    for index in 0..graph.link_count() {
        let link = &graph.links()[index];
        if link.kind() != kind {
            continue;
        }

        let node = link.start();
        let node_position = graph.node(node).position();

        // Directions of every already-routed link around this node.
        let directions: Vec<Vec2> = graph
            .links_touching(node, link.id())
            .filter(|adjacent| routed[adjacent.id().index()])
            .map(|adjacent| adjacent.aux_point().sub(node_position))
            .filter(|direction| direction.length() > EPSILON)
            .collect();

        let direction = widest_gap_direction(&directions)?;
        graph.links_mut()[index].set_aux_point(node_position.add(direction.scale(reach)));
        routed[index] = true;
    }

    Ok(())
}

/// Returns the unit direction bisecting the widest free angular sector
/// among the given directions.
///
/// With no occupied directions the sector is the whole circle and the
/// result defaults to +x; with a single occupied direction the result
/// points the opposite way.
fn widest_gap_direction(directions: &[Vec2]) -> Result<Vec2, GeometryError> {
    match directions {
        [] => Ok(Vec2::new(1.0, 0.0)),
        [single] => single.rotated(PI).normalized(),
        _ => {
            let mut sorted = directions.to_vec();
            sorted.sort_by(|a, b| a.unsigned_angle().total_cmp(&b.unsigned_angle()));

            let mut gap_start = sorted[0];
            let mut gap_angle = f32::MIN;

            for (index, current) in sorted.iter().enumerate() {
                let next = sorted[(index + 1) % sorted.len()];
                let angle = current.unsigned_rotation_angle(next)?;

                if angle > gap_angle {
                    gap_angle = angle;
                    gap_start = *current;
                }
            }

            gap_start.rotated(gap_angle / 2.0).normalized()
        }
    }
}
