use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign,
};
use serde::{Deserialize, Serialize};
use std::ops;

/// A point in the slicing plane. See the module-level docs for a description
/// of the coordinate system. Points have no identity, they're plain values.
///
/// Subtracting two points gives a [Vector2], and points can be shifted by
/// adding/subtracting vectors.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Are these two points within `epsilon` of each other on both axes?
    /// Pattern points are computed with a handful of float ops, so exact
    /// comparison is rarely what you want.
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
    }
}

impl ops::Add<Vector2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vector2) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::AddAssign<Vector2> for Point2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = *self + rhs;
    }
}

impl ops::Sub<Vector2> for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Vector2) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Sub<Point2> for Point2 {
    type Output = Vector2;

    fn sub(self, rhs: Point2) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A vector in the slicing plane, i.e. an offset between two [Point2]s.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "<{}, {}>", x, y)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Mirror this vector across the x axis (negate `y`)
    pub fn flip_y(self) -> Self {
        Self::new(self.x, -self.y)
    }
}

/// A rotation by a fixed angle around a fixed center point. The sine and
/// cosine are computed once up front, since the same rotation gets applied
/// to every point of a layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rotation {
    center: Point2,
    sin: f64,
    cos: f64,
}

impl Rotation {
    /// Rotate by `radians` around `center`. Positive angles turn `+x` toward
    /// `+y`.
    pub fn new(center: Point2, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { center, sin, cos }
    }

    /// Get the rotation that undoes this one
    pub fn inverse(self) -> Self {
        Self {
            sin: -self.sin,
            ..self
        }
    }

    pub fn apply(&self, point: Point2) -> Point2 {
        let offset = point - self.center;
        self.center
            + Vector2::new(
                offset.x * self.cos - offset.y * self.sin,
                offset.x * self.sin + offset.y * self.cos,
            )
    }
}
