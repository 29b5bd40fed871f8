//! SVG document assembly for laid-out graphs.

use std::{
    f32::consts::{PI, TAU},
    fs::File,
    io::Write,
};

use log::{debug, error, info};
use svg::{
    Document,
    node::element::{Circle, Element, Group, Line, Path, Polygon, Rectangle, Text},
};

use crate::{
    config::{AppConfig, DrawingConfig, StyleConfig},
    draw::{self, ArrowHead, Label, LinkShape},
    export::{self, Canvas, Exporter},
    graph::{Graph, Node},
};

/// Angular half-width of the sectors that switch a label to start/end
/// anchoring, in radians.
const ANCHOR_SECTOR: f32 = PI / 3.0;

/// SVG exporter writing to a file.
pub struct Svg {
    file_name: String,
}

impl Svg {
    /// Creates an exporter targeting the given file.
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    /// Renders a laid-out graph into an SVG document.
    pub fn render(graph: &Graph, config: &AppConfig) -> Result<Document, export::Error> {
        let bounds = draw::diagram_bounds(graph, config.drawing())?;
        let canvas = Canvas::new(bounds);
        debug!(
            width = canvas.width(),
            height = canvas.height();
            "Canvas dimensions derived"
        );

        let mut document = Document::new()
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = config.style().background_color() {
            document = document.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background),
            );
        }

        for link in graph.links() {
            document = document.add(render_link(link, graph, &canvas, config)?);
        }
        for node in graph.nodes() {
            document = document.add(render_node(node, &canvas, config.drawing(), config.style()));
        }

        Ok(document)
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, document: Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");

        let file = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&file, "{document}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for Svg {
    fn export_graph(&self, graph: &Graph, config: &AppConfig) -> Result<(), export::Error> {
        let document = Svg::render(graph, config)?;
        debug!("SVG document rendered");

        self.write_document(document)
    }
}

fn render_node(node: &Node, canvas: &Canvas, drawing: &DrawingConfig, style: &StyleConfig) -> Group {
    let position = canvas.to_canvas(node.position());

    let circle = Circle::new()
        .set("cx", position.x())
        .set("cy", position.y())
        .set("r", drawing.node_radius())
        .set("stroke", style.stroke_color())
        .set("stroke-width", drawing.node_stroke_width())
        .set("fill", style.fill_color());

    let mut group = Group::new().add(circle);

    if node.marked() {
        group = group.add(
            Circle::new()
                .set("cx", position.x())
                .set("cy", position.y())
                .set("r", drawing.node_radius() * drawing.marked_ring_ratio())
                .set("stroke", style.stroke_color())
                .set("stroke-width", drawing.node_stroke_width())
                .set("fill", "none"),
        );
    }

    let label: Element = Text::new(node.name())
        .set("x", position.x())
        .set("y", position.y())
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-size", drawing.text_size())
        .set("fill", style.text_color())
        .into();
    group.add(label)
}

fn render_link(
    link: &crate::graph::Link,
    graph: &Graph,
    canvas: &Canvas,
    config: &AppConfig,
) -> Result<Group, export::Error> {
    let drawing = config.drawing();
    let style = config.style();
    let shape = draw::link_shape(link, graph, drawing)?;

    let mut group = Group::new();

    match &shape {
        LinkShape::Line { start, end, arrow, label } => {
            let from = canvas.to_canvas(*start);
            let to = canvas.to_canvas(*end);

            group = group.add(
                Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y())
                    .set("stroke", style.stroke_color())
                    .set("stroke-width", drawing.link_stroke_width()),
            );
            group = group.add(render_arrow(arrow, canvas, style));

            if let Some(label) = label {
                group = group.add(render_label(label, canvas, drawing, style));
            }
        }
        LinkShape::Arc {
            start,
            end,
            radius,
            large_arc,
            sweep,
            arrow,
            label,
        } => {
            let from = canvas.to_canvas(*start);
            let to = canvas.to_canvas(*end);

            let data = format!(
                "M {} {} A {} {} 0 {} {} {} {}",
                from.x(),
                from.y(),
                radius,
                radius,
                u8::from(*large_arc),
                u8::from(*sweep),
                to.x(),
                to.y(),
            );

            group = group.add(
                Path::new()
                    .set("d", data)
                    .set("stroke", style.stroke_color())
                    .set("stroke-width", drawing.link_stroke_width())
                    .set("fill", "none"),
            );
            group = group.add(render_arrow(arrow, canvas, style));

            if let Some(label) = label {
                group = group.add(render_label(label, canvas, drawing, style));
            }
        }
    }

    Ok(group)
}

fn render_arrow(arrow: &ArrowHead, canvas: &Canvas, style: &StyleConfig) -> Polygon {
    let points = arrow
        .points()
        .map(|point| {
            let mapped = canvas.to_canvas(point);
            format!("{} {}", mapped.x(), mapped.y())
        })
        .join(", ");

    Polygon::new()
        .set("fill", style.arrow_color())
        .set("stroke-width", 1)
        .set("points", points)
}

/// Renders a link label, anchored away from the link.
///
/// The anchor follows the direction from the link toward the label in
/// simulation space: labels to the right of their link are start-anchored,
/// labels to the left end-anchored, everything else centered; labels below
/// the link hang from their baseline.
fn render_label(label: &Label, canvas: &Canvas, drawing: &DrawingConfig, style: &StyleConfig) -> Element {
    let angle = label.direction().unsigned_angle();

    let anchor = if angle >= TAU - ANCHOR_SECTOR || angle <= ANCHOR_SECTOR {
        "start"
    } else if (PI - ANCHOR_SECTOR..=PI + ANCHOR_SECTOR).contains(&angle) {
        "end"
    } else {
        "middle"
    };
    let baseline = if angle > PI { "hanging" } else { "auto" };

    let position = canvas.to_canvas(label.position());

    Text::new(label.text())
        .set("x", position.x())
        .set("y", position.y())
        .set("text-anchor", anchor)
        .set("dominant-baseline", baseline)
        .set("font-size", drawing.text_size())
        .set("fill", style.text_color())
        .into()
}
