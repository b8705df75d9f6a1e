use crate::{geometry::Vector2, util::range::NumRange};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Which of the two mirrored triangulations a layer uses. Stacking layers
/// that alternate between these is what turns flat hexagons into the
/// rhombic dodecahedron's slanted facets.
#[derive(
    Copy, Clone, Debug, Display, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Permutation {
    /// Spikes grow from the hexagon's top center and bottom-left/right
    /// vertices, pointing up (toward `-y`)
    Upright,
    /// The vertical mirror of [Permutation::Upright], shifted half an edge
    /// down. Spikes grow from the other vertex class and point toward `+y`.
    Inverted,
}

impl Permutation {
    /// Orient an offset that's written for the upright triangulation. The
    /// inverted triangulation is a vertical mirror of the upright one, so
    /// flipping `y` is all it takes to swap between them.
    pub fn orient(self, offset: Vector2) -> Vector2 {
        match self {
            Self::Upright => offset,
            Self::Inverted => offset.flip_y(),
        }
    }
}

/// One of the six sub-phases that the lattice cycles through as height
/// increases. Each phase covers a half-open slice `[min, max)` of the
/// normalized phase coordinate `z = (height / hex_side) mod 3`, and defines
/// how big the triangular spikes are within that slice.
///
/// Over one full period, the spikes grow from nothing to a full triangle and
/// back, then flip to the mirrored triangulation and do it again. The value
/// of `tri_frac` is continuous across every phase boundary, which is what
/// keeps neighboring layers stacked on each other.
///
/// | phase             | z range      | tri_frac    | permutation |
/// |-------------------|--------------|-------------|-------------|
/// | `HexHold`         | [0, 1)       | 0           | upright     |
/// | `Grow`            | [1, 1.25)    | (z-1)*4     | upright     |
/// | `InvertedShrink`  | [1.25, 1.5)  | (1.5-z)*4   | inverted    |
/// | `InvertedHexHold` | [1.5, 2.5)   | 0           | inverted    |
/// | `InvertedGrow`    | [2.5, 2.75)  | (z-2.5)*4   | inverted    |
/// | `Shrink`          | [2.75, 3)    | (3-z)*4     | upright     |
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Plain hexagons, no spikes
    HexHold,
    /// Upright spikes growing to full size
    Grow,
    /// Inverted spikes shrinking from full size. At the boundary with
    /// [Phase::Grow], the upright and inverted full-size triangles trace
    /// the same facets.
    InvertedShrink,
    /// Plain hexagons on the inverted (half-edge shifted) grid
    InvertedHexHold,
    /// Inverted spikes growing to full size
    InvertedGrow,
    /// Upright spikes shrinking back to plain hexagons, wrapping around to
    /// [Phase::HexHold]
    Shrink,
}

impl Phase {
    /// Length of one full cycle, in units of hexagon edge length
    pub const PERIOD: f64 = 3.0;

    /// The slice of the normalized phase coordinate that this phase covers.
    /// Lower bound is inclusive, upper bound is exclusive.
    pub fn z_range(self) -> NumRange<f64> {
        match self {
            Self::HexHold => NumRange::new(0.0, 1.0),
            Self::Grow => NumRange::new(1.0, 1.25),
            Self::InvertedShrink => NumRange::new(1.25, 1.5),
            Self::InvertedHexHold => NumRange::new(1.5, 2.5),
            Self::InvertedGrow => NumRange::new(2.5, 2.75),
            Self::Shrink => NumRange::new(2.75, Self::PERIOD),
        }
    }

    pub fn permutation(self) -> Permutation {
        match self {
            Self::HexHold | Self::Grow | Self::Shrink => Permutation::Upright,
            Self::InvertedShrink
            | Self::InvertedHexHold
            | Self::InvertedGrow => Permutation::Inverted,
        }
    }

    /// Select the phase for a normalized phase coordinate. Each phase owns
    /// the half-open slice `[min, max)`, so each threshold belongs to the
    /// phase above it. Anything that doesn't land in any slice falls back to
    /// [Phase::Shrink]; this covers `z == 3.0`, which float modulo can
    /// produce for tiny negative heights.
    pub fn from_z(z: f64) -> Self {
        Self::iter()
            .find(|phase| phase.z_range().contains_half_open(z))
            .unwrap_or(Self::Shrink)
    }

    /// How far the spikes have grown at the given phase coordinate, as a
    /// fraction in `[0, 1]` of the full hexagon width. `z` should be in this
    /// phase's range.
    pub fn tri_frac(self, z: f64) -> f64 {
        let range = self.z_range();
        match self {
            Self::HexHold | Self::InvertedHexHold => 0.0,
            Self::Grow | Self::InvertedGrow => {
                range.value(z).normalize().clamp().inner()
            }
            Self::InvertedShrink | Self::Shrink => {
                range.value(z).normalize().clamp().invert().inner()
            }
        }
    }
}

/// The full phase state of the lattice at one particular height. This is
/// computed fresh for every layer, there's no state carried between layers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    pub phase: Phase,
    /// Normalized phase coordinate, in `[0, 3]`
    pub z: f64,
    /// Spike size as a fraction of hexagon width, in `[0, 1]`
    pub tri_frac: f64,
    pub permutation: Permutation,
}

impl PhaseState {
    /// Compute the phase state for an absolute height. Negative heights are
    /// folded into the period the same way as positive ones (floor modulo),
    /// so the pattern is periodic over the entire number line.
    pub fn at_height(height: f64, hex_side: f64) -> Self {
        Self::at_z((height / hex_side).rem_euclid(Phase::PERIOD))
    }

    /// Compute the phase state for an already-normalized phase coordinate
    pub fn at_z(z: f64) -> Self {
        let phase = Phase::from_z(z);
        Self {
            phase,
            z,
            tri_frac: phase.tri_frac(z),
            permutation: phase.permutation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    /// Straight port of the chained conditional the phase table came from,
    /// to check the enum against
    fn reference(z: f64) -> (f64, Permutation) {
        if z < 1.0 {
            (0.0, Permutation::Upright)
        } else if z < 1.25 {
            ((z - 1.0) * 4.0, Permutation::Upright)
        } else if z < 1.5 {
            ((1.5 - z) * 4.0, Permutation::Inverted)
        } else if z < 2.5 {
            (0.0, Permutation::Inverted)
        } else if z < 2.75 {
            ((z - 2.5) * 4.0, Permutation::Inverted)
        } else {
            ((3.0 - z) * 4.0, Permutation::Upright)
        }
    }

    #[test]
    fn test_orient() {
        let offset = Vector2::new(0.5, -2.0);
        assert_eq!(Permutation::Upright.orient(offset), offset);
        assert_eq!(
            Permutation::Inverted.orient(offset),
            Vector2::new(0.5, 2.0)
        );
    }

    #[test]
    fn test_phase_ranges_tile_the_period() {
        let phases: Vec<Phase> = Phase::iter().collect();
        assert_eq!(phases.len(), 6);
        assert_approx_eq!(phases[0].z_range().min, 0.0);
        assert_approx_eq!(phases[5].z_range().max, Phase::PERIOD);
        for pair in phases.windows(2) {
            assert_eq!(
                pair[0].z_range().max,
                pair[1].z_range().min,
                "gap between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_from_z_thresholds() {
        assert_eq!(Phase::from_z(0.0), Phase::HexHold);
        assert_eq!(Phase::from_z(0.999), Phase::HexHold);
        assert_eq!(Phase::from_z(1.0), Phase::Grow);
        assert_eq!(Phase::from_z(1.25), Phase::InvertedShrink);
        assert_eq!(Phase::from_z(1.5), Phase::InvertedHexHold);
        assert_eq!(Phase::from_z(2.5), Phase::InvertedGrow);
        assert_eq!(Phase::from_z(2.75), Phase::Shrink);
        assert_eq!(Phase::from_z(2.999), Phase::Shrink);
        assert_eq!(Phase::from_z(3.0), Phase::Shrink);
    }

    #[test]
    fn test_each_phase_contains_its_own_range() {
        for phase in Phase::iter() {
            let range = phase.z_range();
            assert_eq!(Phase::from_z(range.min), phase);
            assert!(range.contains_half_open(range.min));
            let mid = (range.min + range.max) / 2.0;
            assert_eq!(Phase::from_z(mid), phase);
        }
    }

    #[test]
    fn test_matches_reference() {
        for i in 0..=3000 {
            let z = i as f64 * 0.001;
            let state = PhaseState::at_z(z);
            let (tri_frac, permutation) = reference(z);
            assert_approx_eq!(state.tri_frac, tri_frac, 1e-9);
            assert_eq!(state.permutation, permutation, "z = {}", z);
        }
    }

    #[test]
    fn test_tri_frac_bounds() {
        for i in 0..3000 {
            let state = PhaseState::at_z(i as f64 * 0.001);
            assert!((0.0..=1.0).contains(&state.tri_frac), "{:?}", state);
        }
    }

    #[test]
    fn test_tri_frac_continuous_at_thresholds() {
        let epsilon = 1e-9;
        for phase in Phase::iter() {
            let threshold = phase.z_range().max;
            let below = PhaseState::at_z(threshold - epsilon).tri_frac;
            // The top of the period wraps back around to zero
            let above = PhaseState::at_z((threshold + epsilon) % Phase::PERIOD)
                .tri_frac;
            assert_approx_eq!(below, above, 1e-6);
        }
    }

    #[test]
    fn test_at_height() {
        // hex_side = 2, so z = height / 2
        let state = PhaseState::at_height(2.25, 2.0);
        assert_eq!(state.phase, Phase::Grow);
        assert_approx_eq!(state.z, 1.125);
        assert_approx_eq!(state.tri_frac, 0.5);

        // Period is 3 * hex_side = 6
        let wrapped = PhaseState::at_height(2.25 + 6.0 * 7.0, 2.0);
        assert_eq!(wrapped.phase, Phase::Grow);
        assert_approx_eq!(wrapped.tri_frac, 0.5);
    }

    #[test]
    fn test_negative_height() {
        // -1 / 1 mod 3 == 2 (floor modulo, not truncation)
        let state = PhaseState::at_height(-1.0, 1.0);
        assert_approx_eq!(state.z, 2.0);
        assert_eq!(state.phase, Phase::InvertedHexHold);

        let state = PhaseState::at_height(-0.1, 1.0);
        assert_eq!(state.phase, Phase::Shrink);
        assert_approx_eq!(state.tri_frac, 0.4);
    }

    #[test]
    fn test_ground_floor() {
        let state = PhaseState::at_height(0.0, 1.0);
        assert_eq!(state.phase, Phase::HexHold);
        assert_eq!(state.permutation, Permutation::Upright);
        assert_approx_eq!(state.tri_frac, 0.0);
    }
}
