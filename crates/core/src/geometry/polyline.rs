use crate::geometry::Point2;
use serde::{Deserialize, Serialize};
use std::{iter::FromIterator, slice, vec};

/// An open path through an ordered list of points. Consecutive points are
/// connected in print order; there is no implicit segment from the last
/// point back to the first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Point2>,
}

impl Polyline {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Vec::with_capacity(capacity))
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point2> {
        self.points.last().copied()
    }

    /// Iterate over each segment of the path, as `(start, end)` pairs. A path
    /// with fewer than two points has no segments.
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Total length of the path
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance_to(b)).sum()
    }

    pub fn iter(&self) -> slice::Iter<'_, Point2> {
        self.points.iter()
    }
}

impl From<Vec<Point2>> for Polyline {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point2> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Point2> for Polyline {
    fn extend<I: IntoIterator<Item = Point2>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl IntoIterator for Polyline {
    type Item = Point2;
    type IntoIter = vec::IntoIter<Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point2;
    type IntoIter = slice::Iter<'a, Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
