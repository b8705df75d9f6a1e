pub mod config;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

use crate::{
    geometry::{BoundingBox, Point2, Vector2},
    pattern::{Layer, RowDirection},
    render::{
        config::{PathLens, RenderConfig},
        unit::Color3,
    },
    NumRange,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A layer renderer is used to convert generated layers into visual output
/// formats. A renderer is created using a particular [RenderConfig], and from
/// there can be used to render any number of layers any number of times.
///
/// Config options cannot be changed after creating a renderer, but renderers
/// are very cheap to create so if you need to change the config, just create
/// a new renderer.
///
/// ## Supported Formats
/// - SVG (2D, top-down)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayerRenderer {
    /// Config that determines how rendering is done
    ///
    /// **This is different from the pattern config.** The pattern config
    /// controls what paths get traced, the render config just controls how
    /// they're visually presented _after_ generation.
    render_config: RenderConfig,
}

impl LayerRenderer {
    /// Color of ascending (even) rows under [PathLens::Direction]
    pub const ASCENDING_COLOR: Color3 = Color3::new_int(214, 69, 65);
    /// Color of descending (odd) rows under [PathLens::Direction]
    pub const DESCENDING_COLOR: Color3 = Color3::new_int(52, 101, 164);
    /// Color of every path under [PathLens::Plain], and the start of the
    /// gradient under [PathLens::Row]
    pub const PATH_COLOR: Color3 = Color3::new_int(33, 33, 33);
    /// Color of the bounding box outline
    pub const BOUNDS_COLOR: Color3 = Color3::new_int(136, 136, 136);

    /// Initialize a new renderer with the given options. Returns an error if
    /// the render config is invalid.
    pub fn new(render_config: RenderConfig) -> anyhow::Result<Self> {
        render_config
            .validate()
            .context("invalid render config")?;
        Ok(Self { render_config })
    }

    /// Get a reference to the config that this renderer uses
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Compute the color of one row's path based on the current path lens
    pub fn path_color(&self, row: usize, num_rows: usize) -> Color3 {
        match self.render_config.path_lens {
            PathLens::Plain => Self::PATH_COLOR,
            PathLens::Direction => match RowDirection::for_row(row) {
                RowDirection::Ascending => Self::ASCENDING_COLOR,
                RowDirection::Descending => Self::DESCENDING_COLOR,
            },
            PathLens::Row => {
                // First row -> path color
                // Last row -> ascending color
                let last_row = num_rows.saturating_sub(1) as f32;
                let t = NumRange::new(0.0, last_row).normalize(row as f32);
                Self::PATH_COLOR.mix(Self::ASCENDING_COLOR, t)
            }
        }
    }

    /// Get the region that a rendering of this layer should show. This covers
    /// every traced point as well as the requested bounds, plus the
    /// configured margin on each side.
    pub fn view_box(&self, layer: &Layer) -> BoundingBox {
        let bounds = layer.bounds();
        let content = match layer.bounding_box() {
            Some(points) => points.merge(bounds.min()).merge(bounds.max()),
            None => bounds,
        };
        let margin = Vector2::new(
            self.render_config.margin,
            self.render_config.margin,
        );
        BoundingBox::new(content.min() - margin, content.max() + margin)
    }

    /// Convert a point into the coordinates used for drawing. Layers already
    /// use screen orientation (`+y` is down), so this is just a conversion to
    /// a tuple.
    pub fn draw_point(&self, point: Point2) -> (f64, f64) {
        point.into()
    }

    /// Render this layer as a 2D SVG, from a top-down perspective. Returns the
    /// SVG in a string.
    #[cfg(feature = "svg")]
    pub fn render_as_svg(&self, layer: &Layer) -> String {
        let svg = svg::layer_to_svg(layer, self);
        svg.to_string()
    }
}
