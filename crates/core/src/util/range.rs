use derive_more::Display;
use std::{
    fmt::{Debug, Display},
    ops,
};

/// A type of value that we can create ranges of, where a range has a min and
/// max. Phase thresholds and spike fractions are plain floats, but keeping
/// this as a trait lets the range math stay agnostic of the float width.
pub trait Rangeable:
    Copy
    + Debug
    + Display
    + PartialOrd
    + ops::Add<Self, Output = Self>
    + ops::Sub<Self, Output = Self>
    + ops::Mul<Self, Output = Self>
    + ops::Div<Self, Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
}

impl Rangeable for f32 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

impl Rangeable for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

/// A range between two numeric values, inclusive on both ends. The bounds are
/// allowed to be "backwards" (min > max), which is handy as a mapping target
/// when a value should run downhill, e.g. a spike that shrinks as height
/// increases.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange<T: Rangeable> {
    pub min: T,
    pub max: T,
}

impl<T: Rangeable> NumRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Get a [0,1] range for this type.
    pub fn normal_range() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Create a [RangeValue] in this range, which is convenient for chaining
    /// operations on a single value.
    pub fn value(self, value: T) -> RangeValue<T> {
        RangeValue { value, range: self }
    }

    /// Max minus min
    pub fn span(&self) -> T {
        self.max - self.min
    }

    /// Check if a value is in the half-open range `[min, max)`. This is the
    /// convention used for phase selection, where each threshold belongs to
    /// the phase above it.
    pub fn contains_half_open(&self, value: T) -> bool {
        self.min <= value && value < self.max
    }

    /// Map a value from this range to the target range. If the span of this
    /// range is zero, we can't properly map the value because we don't know
    /// where on the target range it should fall. In that case, we just always
    /// return the **minimum** of the target range.
    pub fn map_to(&self, dest_range: &Self, value: T) -> T {
        let span = self.span();
        if span > T::zero() {
            // Map down to [0,1], then map back up to the target range
            let normalized = (value - self.min) / span;
            dest_range.min + (normalized * dest_range.span())
        } else {
            dest_range.min
        }
    }

    /// Map a value from this range to the range [0, 1]
    pub fn normalize(&self, value: T) -> T {
        self.map_to(&Self::normal_range(), value)
    }

    /// Force a value into this range. If it's already in the range, return
    /// that value. If it's outside the range, return the bound (lower or upper)
    /// that's closest to the value.
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// An alternative interface for [NumRange] that makes it easy to chain
/// operations on a single value.
///
/// ```
/// use rhodo::NumRange;
///
/// let range: NumRange<f64> = NumRange::new(10.0, 20.0);
/// let value = range.value(12.5).normalize().invert().inner();
/// assert_eq!(value, 0.75);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct RangeValue<T: Rangeable> {
    value: T,
    range: NumRange<T>,
}

impl<T: Rangeable> RangeValue<T> {
    /// Get the value from this struct
    pub fn inner(self) -> T {
        self.value
    }

    /// Map this value to the range [0,1]
    pub fn normalize(self) -> Self {
        self.map_to(NumRange::normal_range())
    }

    /// Invert this value in the range, so that its distance from the min
    /// becomes its distance from the max, and vice versa. For example,
    /// inverting `0.7` in the range `[0,1]` returns `0.3`.
    pub fn invert(mut self) -> Self {
        let flipped = NumRange::new(self.range.max, self.range.min);
        self.value = self.range.map_to(&flipped, self.value);
        self
    }

    /// Map this value from the current range to a new range.
    pub fn map_to(self, range: NumRange<T>) -> Self {
        let new_value = self.range.map_to(&range, self.value);
        Self {
            range,
            value: new_value,
        }
    }

    /// Force the given value into this range. If it falls outside the range,
    /// it will be set to the nearer of the two bounds.
    pub fn clamp(self) -> Self {
        Self {
            value: self.range.clamp(self.value),
            range: self.range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_normal_range() {
        let range: NumRange<f64> = NumRange::normal_range();
        assert_approx_eq!(range.min, 0.0);
        assert_approx_eq!(range.max, 1.0);
    }

    #[test]
    fn test_contains_half_open() {
        let range: NumRange<f64> = NumRange::new(1.0, 1.25);
        assert!(!range.contains_half_open(0.9));
        assert!(!range.contains_half_open(1.3));

        // Half-open excludes the upper threshold, which belongs to the next
        // phase up
        assert!(range.contains_half_open(1.0));
        assert!(range.contains_half_open(1.249));
        assert!(!range.contains_half_open(1.25));
    }

    #[test]
    fn test_map_to() {
        let input_range: NumRange<f64> = NumRange::new(1.0, 3.0);
        let output_range: NumRange<f64> = NumRange::new(20.0, 40.0);
        assert_approx_eq!(input_range.map_to(&output_range, 0.0), 10.0);
        assert_approx_eq!(input_range.map_to(&output_range, 1.0), 20.0);
        assert_approx_eq!(input_range.map_to(&output_range, 2.0), 30.0);
        assert_approx_eq!(input_range.map_to(&output_range, 3.0), 40.0);

        // Zero-length span always maps to the min of the output range
        let input_range: NumRange<f64> = NumRange::new(1.0, 1.0);
        assert_approx_eq!(input_range.map_to(&output_range, 1.5), 20.0);
    }

    #[test]
    fn test_normalize_quarter_unit() {
        // The transition phases are a quarter unit wide, so normalizing is
        // the same as scaling by 4
        let range: NumRange<f64> = NumRange::new(2.5, 2.75);
        assert_approx_eq!(range.normalize(2.5), 0.0);
        assert_approx_eq!(range.normalize(2.625), 0.5);
        assert_approx_eq!(range.normalize(2.75), 1.0);
    }

    #[test]
    fn test_invert() {
        let range: NumRange<f64> = NumRange::new(1.25, 1.5);
        let value = range.value(1.3).normalize().invert().inner();
        assert_approx_eq!(value, (1.5 - 1.3) * 4.0);
    }

    #[test]
    fn test_clamp() {
        let range: NumRange<f64> = NumRange::new(0.0, 1.0);
        assert_approx_eq!(range.clamp(-0.5), 0.0);
        assert_approx_eq!(range.clamp(0.5), 0.5);
        assert_approx_eq!(range.clamp(1.5), 1.0);
        assert_approx_eq!(range.value(1.0000001).clamp().inner(), 1.0);
    }
}
