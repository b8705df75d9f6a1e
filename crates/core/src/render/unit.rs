use crate::NumRange;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An RGB color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
#[derive(Copy, Clone, Debug, Display, PartialEq, Serialize, Deserialize)]
#[display(fmt = "rgb({}, {}, {})", red, green, blue)]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    /// The valid range of values for each component in RGB
    const COMPONENT_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);

    pub const BLACK: Self = Self::new_int(0, 0, 0);
    pub const WHITE: Self = Self::new_int(255, 255, 255);

    /// Create a new RGB color. Components outside `[0.0, 1.0]` are clamped
    /// into range.
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: Self::COMPONENT_RANGE.clamp(red),
            green: Self::COMPONENT_RANGE.clamp(green),
            blue: Self::COMPONENT_RANGE.clamp(blue),
        }
    }

    /// Create a new RGB color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Linearly blend between this color and another. `t = 0` gives this
    /// color, `t = 1` gives the other. `t` is clamped to `[0, 1]`.
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = Self::COMPONENT_RANGE.value(t).clamp();
        let blend = |a: f32, b: f32| t.map_to(NumRange::new(a, b)).inner();
        Self::new(
            blend(self.red, other.red),
            blend(self.green, other.green),
            blend(self.blue, other.blue),
        )
    }

    /// Convert this number to a set of 3 bytes: `(red, green, blue)`
    pub fn to_ints(self) -> (u8, u8, u8) {
        (
            (self.red * 255.0).round() as u8,
            (self.green * 255.0).round() as u8,
            (self.blue * 255.0).round() as u8,
        )
    }

    /// Convert this color to an HTML color code: `#rrggbb`
    pub fn to_html(self) -> String {
        let (r, g, b) = self.to_ints();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_to_html() {
        assert_eq!(Color3::BLACK.to_html(), "#000000");
        assert_eq!(Color3::WHITE.to_html(), "#ffffff");
        assert_eq!(Color3::new_int(214, 69, 65).to_html(), "#d64541");
    }

    #[test]
    fn test_new_clamps() {
        let color = Color3::new(-1.0, 0.5, 2.0);
        assert_approx_eq!(color.red, 0.0);
        assert_approx_eq!(color.green, 0.5);
        assert_approx_eq!(color.blue, 1.0);
    }

    #[test]
    fn test_mix() {
        let a = Color3::new(0.0, 1.0, 0.2);
        let b = Color3::new(1.0, 0.0, 0.2);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        let mid = a.mix(b, 0.5);
        assert_approx_eq!(mid.red, 0.5);
        assert_approx_eq!(mid.green, 0.5);
        assert_approx_eq!(mid.blue, 0.2);
        // Out of range blend factors are clamped
        assert_eq!(a.mix(b, 7.0), b);
    }
}
