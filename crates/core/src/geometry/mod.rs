//! This module holds the basic planar types the pattern is traced with.
//!
//! ## Coordinate System
//!
//! All coordinates live in the slicing plane of a single layer, in whatever
//! unit the caller uses for spacing and height (typically millimeters). The
//! axes follow screen convention: `+x` is right and `+y` is **down**.
//! So wherever the docs say "top" of a hexagon, that means its smallest `y`.
//!
//! +-------------------+
//! |        -y         |
//! |         ^         |
//! |         |         |
//! | -x <----o----> +x |
//! |         |         |
//! |         v         |
//! |        +y         |
//! +-------------------+
//!
//! The lattice itself is anchored to the origin of this plane, not to any
//! particular surface. Every surface snaps its bounding box down to the
//! lattice grid (see [align_to_grid]) before tracing, which is what makes two
//! independently filled regions line up seamlessly.

mod bounds;
mod polyline;
mod unit;

pub use self::{bounds::*, polyline::*, unit::*};

/// `sqrt(3)`, the ratio between a hexagon's width (flat side to flat side)
/// and its edge length. `f64::consts` doesn't have a stable version of this.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Round a coordinate **down** to the nearest multiple of `period`. This uses
/// floor semantics, so negative coordinates move further from zero:
/// `align_to_grid(-0.5, 2.0) == -2.0`.
pub fn align_to_grid(coordinate: f64, period: f64) -> f64 {
    (coordinate / period).floor() * period
}
