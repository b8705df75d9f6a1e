//! Rhodo traces rhombic dodecahedron infill for 3D printing. For any layer
//! height, it generates a set of continuous paths that fill a rectangular
//! region with a triangulated hexagon lattice. The lattice morphs as height
//! increases, so that consecutive layers interlock into true rhombic
//! dodecahedra rather than stacked flat hexagons. This crate contains all the
//! core generation logic, and optionally rendering/export of generated
//! layers. Slicing, clipping, and toolpath conversion happen elsewhere.
//!
//! ```
//! use rhodo::{BoundingBox, PatternConfig, RhodoPattern};
//!
//! let pattern = RhodoPattern::new(PatternConfig::default()).unwrap();
//! let layer = pattern
//!     .generate(0.2, BoundingBox::from_extents(0.0, 0.0, 50.0, 50.0))
//!     .unwrap();
//! println!("{} paths", layer.polylines().len());
//! // From here you can clip and print the paths however you like.
//! ```
//!
//! See [PatternConfig] for details on how the lattice can be customized.

mod config;
mod geometry;
mod pattern;
mod render;
mod util;

pub use crate::{
    config::PatternConfig,
    geometry::{
        align_to_grid, BoundingBox, Point2, Polyline, Rotation, Vector2,
    },
    pattern::{
        generate, Layer, LatticeGrid, LatticeScale, Permutation, Phase,
        PhaseState, RhodoPattern, RowDirection, RowTracer, Rows, Spike,
    },
    render::{
        config::{PathLens, RenderConfig},
        unit::Color3,
        LayerRenderer,
    },
    util::range::{NumRange, RangeValue, Rangeable},
};
