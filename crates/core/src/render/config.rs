use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Configuration specific to visually rendering a layer. These options have
/// absolutely no bearing on pattern _generation_, only on the visual
/// presentation. In other words, if you generate a layer then output to a
/// non-visual format (e.g. JSON), these options will **never** affect that
/// output.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of each drawn path, in the same units as the layer. Set this to
    /// the extrusion width to get a rough preview of the printed layer.
    #[validate(range(min = 0.001))]
    pub stroke_width: f64,

    /// Extra space around the drawn content, on every side
    #[validate(range(min = 0.0))]
    pub margin: f64,

    /// Should the requested bounding box be outlined? Handy for checking that
    /// the traced paths cover it with margin to spare.
    pub show_bounds: bool,

    /// Controls how each path is colored
    pub path_lens: PathLens,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stroke_width: 0.2,
            margin: 1.0,
            show_bounds: true,
            path_lens: PathLens::Direction,
        }
    }
}

/// A definition of what data is used to compute a path's color.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PathLens {
    /// Every path is the same color
    Plain,
    /// Color is based on the row's print direction, so you can see the
    /// alternating back-and-forth
    Direction,
    /// Color is a gradient from the first row to the last
    Row,
}
