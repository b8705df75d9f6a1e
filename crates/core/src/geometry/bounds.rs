use crate::geometry::{align_to_grid, Point2, Rotation};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the slicing plane. This is how callers tell
/// the pattern what region needs to be covered. The box is a superset of the
/// real surface; clipping the generated paths to the true surface outline is
/// the caller's job.
///
/// The constructor normalizes its corners, so `min` is always component-wise
/// less than or equal to `max`. A zero-width or zero-height box is valid, it
/// just produces a minimal pattern.
#[derive(Copy, Clone, Debug, Display, PartialEq, Serialize, Deserialize)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct BoundingBox {
    min: Point2,
    max: Point2,
}

impl BoundingBox {
    /// Create a box from any two opposite corners
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a box from the `(xmin, ymin, xmax, ymax)` extents that slicers
    /// usually pass around.
    pub fn from_extents(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(Point2::new(xmin, ymin), Point2::new(xmax, ymax))
    }

    /// Get the smallest box that contains every given point. Returns `None`
    /// if the iterator is empty.
    pub fn from_points(
        points: impl IntoIterator<Item = Point2>,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |bounds, point| {
            bounds.merge(point)
        }))
    }

    pub fn min(&self) -> Point2 {
        self.min
    }

    pub fn max(&self) -> Point2 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Are all four extents finite numbers?
    pub fn is_finite(&self) -> bool {
        self.min.x.is_finite()
            && self.min.y.is_finite()
            && self.max.x.is_finite()
            && self.max.y.is_finite()
    }

    /// Get the four corners, in order around the box starting at `min`
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Get the smallest axis-aligned box that contains this box after it's
    /// been rotated
    pub fn rotate(&self, rotation: &Rotation) -> Self {
        let [first, rest @ ..] =
            self.corners().map(|corner| rotation.apply(corner));
        rest.into_iter().fold(Self::new(first, first), |bounds, point| {
            bounds.merge(point)
        })
    }

    /// Grow this box (if necessary) so that it includes the given point
    pub fn merge(self, point: Point2) -> Self {
        Self {
            min: Point2::new(self.min.x.min(point.x), self.min.y.min(point.y)),
            max: Point2::new(self.max.x.max(point.x), self.max.y.max(point.y)),
        }
    }

    /// Does this box contain the point? Edges count as inside.
    pub fn contains(&self, point: Point2) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }

    /// Does this box contain the other box, with a gap on every side? Boxes
    /// that share an edge do **not** count.
    pub fn strictly_contains(&self, other: &Self) -> bool {
        self.min.x < other.min.x
            && self.min.y < other.min.y
            && self.max.x > other.max.x
            && self.max.y > other.max.y
    }

    /// Snap the minimum corner of this box down onto a global grid with the
    /// given periods. The maximum corner stays put, so the aligned box always
    /// covers the original.
    pub fn align_to_grid(&self, x_period: f64, y_period: f64) -> Self {
        Self {
            min: Point2::new(
                align_to_grid(self.min.x, x_period),
                align_to_grid(self.min.y, y_period),
            ),
            max: self.max,
        }
    }
}
