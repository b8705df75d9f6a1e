use crate::{
    geometry::{BoundingBox, Polyline},
    pattern::Layer,
    render::LayerRenderer,
};
use svg::{
    node::{
        element::{Group, Polyline as SvgPolyline, Rectangle},
        Comment,
    },
    Document,
};

/// Render a layer as an SVG. This will be a 2D top-down rendering of every
/// traced path, one SVG polyline per row.
pub fn layer_to_svg(layer: &Layer, renderer: &LayerRenderer) -> Document {
    let config = renderer.render_config();
    let view_box = renderer.view_box(layer);
    let phase = layer.phase();

    let mut document = Document::new()
        .set(
            "viewBox",
            (
                // Top-left corner
                view_box.min().x,
                view_box.min().y,
                // Width and height
                view_box.width(),
                view_box.height(),
            ),
        )
        .add(Comment::new(format!(
            "\nheight: {}\nphase: {}\nz: {}\ntri_frac: {}\npermutation: {}\n",
            layer.height(),
            phase.phase,
            phase.z,
            phase.tri_frac,
            phase.permutation,
        )));

    if config.show_bounds {
        document = document.add(draw_bounds(renderer, layer.bounds()));
    }

    let num_rows = layer.polylines().len();
    let mut paths = Group::new()
        .set("fill", "none")
        .set("stroke-width", config.stroke_width)
        .set("stroke-linejoin", "round")
        .set("stroke-linecap", "round");
    for (row, polyline) in layer.polylines().iter().enumerate() {
        paths = paths.add(draw_row(renderer, row, num_rows, polyline));
    }

    document.add(paths)
}

/// Generate an SVG polyline for a single row
fn draw_row(
    renderer: &LayerRenderer,
    row: usize,
    num_rows: usize,
    polyline: &Polyline,
) -> SvgPolyline {
    SvgPolyline::new()
        .set(
            "points",
            polyline
                .iter()
                .map(|point| renderer.draw_point(*point))
                .collect::<Vec<_>>(),
        )
        .set("stroke", renderer.path_color(row, num_rows).to_html())
}

/// Outline the requested bounds with a dashed rectangle
fn draw_bounds(renderer: &LayerRenderer, bounds: BoundingBox) -> Rectangle {
    let stroke_width = renderer.render_config().stroke_width / 2.0;
    let (x, y) = renderer.draw_point(bounds.min());
    Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", "none")
        .set("stroke", LayerRenderer::BOUNDS_COLOR.to_html())
        .set("stroke-width", stroke_width)
        .set(
            "stroke-dasharray",
            format!("{} {}", stroke_width * 4.0, stroke_width * 2.0),
        )
}
