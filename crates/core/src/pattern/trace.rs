//! Point emission for a single row of the lattice.
//!
//! Every row is one continuous path that zigzags along the boundary between
//! two rows of hexagons. At each lattice vertex on the path's spike class,
//! the vertex is truncated by a small equilateral triangle (the "spike"),
//! whose size comes from the layer's phase. At full size, neighboring spikes
//! meet and the hexagons turn into the triangular facets of a rhombic
//! dodecahedron slice.
//!
//! There are four row rules: two permutations times two traversal
//! directions. Even rows run left to right and odd rows right to left, and
//! each rule is laid out so that the end of one column's points is exactly
//! where the next column's points begin. The last column of a row stops
//! halfway through its sequence, so a row never backtracks past its final
//! hexagon.

use crate::{
    geometry::{Point2, Polyline, Vector2, SQRT_3},
    pattern::{
        lattice::{LatticeGrid, LatticeScale},
        phase::{Permutation, PhaseState},
    },
};
use strum::Display;

/// The order in which a row visits its columns
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum RowDirection {
    /// Columns are visited left to right (increasing `x`)
    Ascending,
    /// Columns are visited right to left (decreasing `x`)
    Descending,
}

impl RowDirection {
    /// Even rows ascend, odd rows descend
    pub fn for_row(row: usize) -> Self {
        if row % 2 == 0 {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// The triangle that truncates one lattice vertex. All three corners sit on
/// the three edges that meet at the vertex, at distance `2t / sqrt(3)` from
/// it (where `t` is the triangle's half width), so the triangle is equilateral
/// with side `2t` and its centroid is the vertex itself.
///
/// The apex is the corner on the vertex's vertical edge; the left and right
/// corners sit on the two slanted edges.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spike {
    pub apex: Point2,
    pub left: Point2,
    pub right: Point2,
}

impl Spike {
    /// Build the spike around a vertex. For [Permutation::Upright] the apex
    /// points toward `-y`, for [Permutation::Inverted] it's mirrored to point
    /// toward `+y`.
    pub fn new(
        vertex: Point2,
        tri_half_w: f64,
        permutation: Permutation,
    ) -> Self {
        let base_y = tri_half_w / SQRT_3;
        let corner = |x, y| vertex + permutation.orient(Vector2::new(x, y));
        Self {
            apex: corner(0.0, -2.0 * base_y),
            left: corner(-tri_half_w, base_y),
            right: corner(tri_half_w, base_y),
        }
    }
}

/// Traces individual rows for one layer. This holds everything that's fixed
/// across the rows of a layer, so tracing any row is a pure function of its
/// index.
#[derive(Copy, Clone, Debug)]
pub struct RowTracer {
    scale: LatticeScale,
    permutation: Permutation,
    tri_half_w: f64,
    origin: Point2,
    num_cols: usize,
}

impl RowTracer {
    pub fn new(
        scale: LatticeScale,
        permutation: Permutation,
        tri_half_w: f64,
        origin: Point2,
        num_cols: usize,
    ) -> Self {
        Self {
            scale,
            permutation,
            tri_half_w,
            origin,
            num_cols,
        }
    }

    /// Build a tracer for one layer's phase over an aligned grid
    pub fn for_layer(
        scale: LatticeScale,
        phase: &PhaseState,
        grid: &LatticeGrid,
    ) -> Self {
        Self::new(
            scale,
            phase.permutation,
            scale.tri_half_width(phase.tri_frac),
            grid.origin(),
            grid.num_cols,
        )
    }

    pub fn tri_half_w(&self) -> f64 {
        self.tri_half_w
    }

    /// Trace one full row of the lattice into a continuous path
    pub fn trace_row(&self, row: usize) -> Polyline {
        let direction = RowDirection::for_row(row);
        let y = self.row_offset(row);
        // Every column but the last emits 8 points, the last one 4 or fewer
        let mut polyline =
            Polyline::with_capacity(self.num_cols.saturating_mul(8));

        if self.num_cols == 0 {
            return polyline;
        }
        let last_col = self.num_cols - 1;
        for step in 0..self.num_cols {
            let col = match direction {
                RowDirection::Ascending => step,
                RowDirection::Descending => last_col - step,
            };
            let is_last = step == last_col;
            self.trace_column(&mut polyline, direction, y, col, is_last);
        }
        polyline
    }

    /// Vertical offset of a row. Row 0 sits one row above the grid origin,
    /// and the inverted permutation is shifted down by half an edge.
    fn row_offset(&self, row: usize) -> f64 {
        let offset = self.origin.y
            + (row as f64 - 1.0) * self.scale.pattern_height;
        match self.permutation {
            Permutation::Upright => offset,
            Permutation::Inverted => offset + self.scale.hex_side / 2.0,
        }
    }

    /// Get a lattice vertex relative to an anchor, in units of half hexagon
    /// widths (`x`) and edge lengths (`y`). All hexagon corners sit on this
    /// half-width/half-edge grid.
    fn hex_corner(
        &self,
        anchor: Point2,
        half_widths: f64,
        sides: f64,
    ) -> Point2 {
        anchor
            + Vector2::new(
                half_widths * self.scale.hex_width / 2.0,
                sides * self.scale.hex_side,
            )
    }

    /// Get the spike that truncates the vertex at the given offset from an
    /// anchor. See [Self::hex_corner] for the offset units.
    fn spike(&self, anchor: Point2, half_widths: f64, sides: f64) -> Spike {
        Spike::new(
            self.hex_corner(anchor, half_widths, sides),
            self.tri_half_w,
            self.permutation,
        )
    }

    /// Emit the points for one column of one row. `is_last` marks the final
    /// column in traversal order, which only gets the first half of its
    /// sequence.
    fn trace_column(
        &self,
        polyline: &mut Polyline,
        direction: RowDirection,
        y: f64,
        col: usize,
        is_last: bool,
    ) {
        let x = self.origin.x + col as f64 * self.scale.hex_width;
        let half_width = self.scale.hex_width / 2.0;
        match (self.permutation, direction) {
            (Permutation::Upright, RowDirection::Ascending) => {
                // Anchored on the top-left vertical edge of the hexagon below
                let anchor = Point2::new(x, y);
                let bottom = self.spike(anchor, 0.0, 1.0);
                polyline.extend([
                    self.spike(anchor, -1.0, -0.5).right,
                    anchor,
                    bottom.apex,
                    bottom.left,
                ]);
                if is_last {
                    return;
                }
                polyline.extend([
                    bottom.right,
                    bottom.apex,
                    anchor,
                    self.spike(anchor, 1.0, -0.5).left,
                ]);
            }
            (Permutation::Upright, RowDirection::Descending) => {
                let anchor = Point2::new(x - half_width, y);
                let bottom = self.spike(anchor, 0.0, 1.0);
                polyline.extend([anchor, bottom.apex, bottom.right]);
                if is_last {
                    return;
                }
                let top = self.spike(anchor, -1.0, -0.5);
                polyline.extend([
                    bottom.left,
                    bottom.apex,
                    anchor,
                    top.right,
                    top.left,
                ]);
            }
            (Permutation::Inverted, RowDirection::Ascending) => {
                // Anchored on the top vertex between this hexagon and the
                // previous one
                let anchor = Point2::new(x - half_width, y);
                let top = self.spike(anchor, 0.0, 0.0);
                let bottom = self.spike(anchor, 1.0, 1.5);
                polyline.extend([
                    top.right,
                    top.apex,
                    self.hex_corner(anchor, 0.0, 1.0),
                    bottom.left,
                ]);
                if is_last {
                    return;
                }
                let next_top = self.spike(anchor, 2.0, 0.0);
                polyline.extend([
                    bottom.right,
                    self.hex_corner(anchor, 2.0, 1.0),
                    next_top.apex,
                    next_top.left,
                ]);
            }
            (Permutation::Inverted, RowDirection::Descending) => {
                let anchor = Point2::new(x, y);
                let top = self.spike(anchor, 0.0, 0.0);
                let bottom = self.spike(anchor, -1.0, 1.5);
                polyline.extend([
                    top.left,
                    top.apex,
                    self.hex_corner(anchor, 0.0, 1.0),
                    bottom.right,
                ]);
                if is_last {
                    return;
                }
                let next_top = self.spike(anchor, -2.0, 0.0);
                polyline.extend([
                    bottom.left,
                    self.hex_corner(anchor, -2.0, 1.0),
                    next_top.apex,
                    next_top.right,
                ]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const EPSILON: f64 = 1e-9;

    fn tracer(
        permutation: Permutation,
        tri_frac: f64,
        num_cols: usize,
    ) -> RowTracer {
        let scale = LatticeScale::new(1.0);
        RowTracer::new(
            scale,
            permutation,
            scale.tri_half_width(tri_frac),
            Point2::ORIGIN,
            num_cols,
        )
    }

    /// Row rules written out coordinate by coordinate, with the grid origin
    /// at zero and an edge length of 1
    fn reference_row(
        permutation: Permutation,
        tri_frac: f64,
        num_cols: usize,
        row: usize,
    ) -> Vec<Point2> {
        let l = 1.0;
        let w = SQRT_3;
        let t = w * tri_frac / 2.0;
        let d = t / SQRT_3;
        let p = Point2::new;
        let mut points = Vec::new();
        let mut r = (row as f64 - 1.0) * 1.5 * l;

        match (permutation, row % 2 == 0) {
            (Permutation::Upright, true) => {
                for j in 0..num_cols {
                    let cx = j as f64 * w;
                    points.push(p(cx - w / 2.0 + t, r - l / 2.0 + d));
                    points.push(p(cx, r));
                    points.push(p(cx, r + l - 2.0 * d));
                    points.push(p(cx - t, r + l + d));
                    if j == num_cols - 1 {
                        break;
                    }
                    points.push(p(cx + t, r + l + d));
                    points.push(p(cx, r + l - 2.0 * d));
                    points.push(p(cx, r));
                    points.push(p(cx + w / 2.0 - t, r - l / 2.0 + d));
                }
            }
            (Permutation::Upright, false) => {
                for j in (0..num_cols).rev() {
                    let co = j as f64 * w - w / 2.0;
                    points.push(p(co, r));
                    points.push(p(co, r + l - 2.0 * d));
                    points.push(p(co + t, r + l + d));
                    if j == 0 {
                        break;
                    }
                    points.push(p(co - t, r + l + d));
                    points.push(p(co, r + l - 2.0 * d));
                    points.push(p(co, r));
                    points.push(p(co - w / 2.0 + t, r - l / 2.0 + d));
                    points.push(p(co - w / 2.0 - t, r - l / 2.0 + d));
                }
            }
            (Permutation::Inverted, true) => {
                r += l / 2.0;
                for j in 0..num_cols {
                    let co = j as f64 * w - w / 2.0;
                    points.push(p(co + t, r - d));
                    points.push(p(co, r + 2.0 * d));
                    points.push(p(co, r + l));
                    points.push(p(co + w / 2.0 - t, r + 1.5 * l - d));
                    if j == num_cols - 1 {
                        break;
                    }
                    points.push(p(co + w / 2.0 + t, r + 1.5 * l - d));
                    points.push(p(co + w, r + l));
                    points.push(p(co + w, r + 2.0 * d));
                    points.push(p(co + w - t, r - d));
                }
            }
            (Permutation::Inverted, false) => {
                r += l / 2.0;
                for j in (0..num_cols).rev() {
                    let cx = j as f64 * w;
                    points.push(p(cx - t, r - d));
                    points.push(p(cx, r + 2.0 * d));
                    points.push(p(cx, r + l));
                    points.push(p(cx - w / 2.0 + t, r + 1.5 * l - d));
                    if j == 0 {
                        break;
                    }
                    points.push(p(cx - w / 2.0 - t, r + 1.5 * l - d));
                    points.push(p(cx - w, r + l));
                    points.push(p(cx - w, r + 2.0 * d));
                    points.push(p(cx - w + t, r - d));
                }
            }
        }
        points
    }

    fn assert_points_eq(actual: &[Point2], expected: &[Point2]) {
        assert_eq!(actual.len(), expected.len(), "point count mismatch");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                a.approx_eq(*e, EPSILON),
                "point {}: expected {}, got {}",
                i,
                e,
                a
            );
        }
    }

    #[test]
    fn test_spike_is_equilateral() {
        let vertex = Point2::new(3.0, -2.0);
        for &permutation in &[Permutation::Upright, Permutation::Inverted] {
            let spike = Spike::new(vertex, 0.5, permutation);
            assert_approx_eq!(spike.left.distance_to(spike.right), 1.0);
            assert_approx_eq!(spike.apex.distance_to(spike.left), 1.0);
            assert_approx_eq!(spike.apex.distance_to(spike.right), 1.0);
            // Centroid is the vertex
            assert_approx_eq!(
                (spike.apex.x + spike.left.x + spike.right.x) / 3.0,
                vertex.x
            );
            assert_approx_eq!(
                (spike.apex.y + spike.left.y + spike.right.y) / 3.0,
                vertex.y
            );
        }

        let upright = Spike::new(vertex, 0.5, Permutation::Upright);
        let inverted = Spike::new(vertex, 0.5, Permutation::Inverted);
        assert!(upright.apex.y < vertex.y);
        assert!(inverted.apex.y > vertex.y);
    }

    #[test]
    fn test_zero_spike_collapses() {
        let vertex = Point2::new(1.0, 1.0);
        let spike = Spike::new(vertex, 0.0, Permutation::Inverted);
        assert_eq!(spike.apex, vertex);
        assert_eq!(spike.left, vertex);
        assert_eq!(spike.right, vertex);
    }

    #[test]
    fn test_matches_reference_rows() {
        for &permutation in &[Permutation::Upright, Permutation::Inverted] {
            for &tri_frac in &[0.0, 0.25, 0.5, 1.0] {
                let tracer = tracer(permutation, tri_frac, 5);
                for row in 0..4 {
                    assert_points_eq(
                        tracer.trace_row(row).points(),
                        &reference_row(permutation, tri_frac, 5, row),
                    );
                }
            }
        }
    }

    #[test]
    fn test_minimal_row() {
        // Two columns, no spikes: the first column is a full 8 points and the
        // truncated last column is 4
        let w = SQRT_3;
        let row = tracer(Permutation::Upright, 0.0, 2).trace_row(0);
        let expected = [
            (-w / 2.0, -2.0),
            (0.0, -1.5),
            (0.0, -0.5),
            (0.0, -0.5),
            (0.0, -0.5),
            (0.0, -0.5),
            (0.0, -1.5),
            (w / 2.0, -2.0),
            (w / 2.0, -2.0),
            (w, -1.5),
            (w, -0.5),
            (w, -0.5),
        ]
        .iter()
        .map(|&(x, y)| Point2::new(x, y))
        .collect::<Vec<_>>();
        assert_points_eq(row.points(), &expected);
    }

    #[test]
    fn test_point_counts() {
        let n = 6;
        let full = 8 * (n - 1);
        let upright = tracer(Permutation::Upright, 0.5, n);
        assert_eq!(upright.trace_row(0).len(), full + 4);
        assert_eq!(upright.trace_row(1).len(), full + 3);
        let inverted = tracer(Permutation::Inverted, 0.5, n);
        assert_eq!(inverted.trace_row(0).len(), full + 4);
        assert_eq!(inverted.trace_row(1).len(), full + 4);
    }

    #[test]
    fn test_row_direction() {
        assert_eq!(RowDirection::for_row(0), RowDirection::Ascending);
        assert_eq!(RowDirection::for_row(1), RowDirection::Descending);
        assert_eq!(RowDirection::for_row(6), RowDirection::Ascending);

        for &permutation in &[Permutation::Upright, Permutation::Inverted] {
            let tracer = tracer(permutation, 0.3, 4);
            let even = tracer.trace_row(2);
            let odd = tracer.trace_row(3);
            assert!(even.first().unwrap().x < even.last().unwrap().x);
            assert!(odd.first().unwrap().x > odd.last().unwrap().x);
        }
    }

    #[test]
    fn test_rows_are_continuous() {
        // Columns hand off to each other without any jumps, so no single step
        // is ever longer than one hexagon width
        let max_step = SQRT_3 + EPSILON;
        for &permutation in &[Permutation::Upright, Permutation::Inverted] {
            for &tri_frac in &[0.0, 0.1, 0.5, 0.9, 1.0] {
                let tracer = tracer(permutation, tri_frac, 7);
                for row in 0..6 {
                    for (a, b) in tracer.trace_row(row).segments() {
                        assert!(
                            a.distance_to(b) <= max_step,
                            "{} row {} at tri_frac {}: step {} -> {}",
                            permutation,
                            row,
                            tri_frac,
                            a,
                            b
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_permutations_are_mirrored() {
        // Away from the row ends, every upright point reflected across the
        // row's horizontal center line (and shifted half a hexagon) lands on
        // an inverted point
        let n = 8;
        let w = SQRT_3;
        for &tri_frac in &[0.0, 0.4, 1.0] {
            let upright = tracer(Permutation::Upright, tri_frac, n);
            let inverted = tracer(Permutation::Inverted, tri_frac, n);
            for row in 0..4 {
                let r0 = (row as f64 - 1.0) * 1.5;
                let inverted_row = inverted.trace_row(row);
                for point in upright.trace_row(row).iter() {
                    if point.x < w || point.x > (n - 2) as f64 * w {
                        continue;
                    }
                    let mirrored = Point2::new(
                        point.x - w / 2.0,
                        2.0 * r0 + 1.5 - point.y,
                    );
                    assert!(
                        inverted_row
                            .iter()
                            .any(|p| p.approx_eq(mirrored, EPSILON)),
                        "row {} at tri_frac {}: no match for {} (from {})",
                        row,
                        tri_frac,
                        mirrored,
                        point
                    );
                }
            }
        }
    }

    #[test]
    fn test_for_layer() {
        let scale = LatticeScale::new(1.0);
        let phase = PhaseState::at_z(1.125);
        let grid = LatticeGrid::new(
            &scale,
            crate::geometry::BoundingBox::from_extents(0.0, 0.0, 4.0, 4.0),
        )
        .unwrap();
        let tracer = RowTracer::for_layer(scale, &phase, &grid);
        assert_approx_eq!(tracer.tri_half_w(), SQRT_3 / 4.0);
        assert_eq!(
            tracer.trace_row(0).points(),
            RowTracer::new(
                scale,
                Permutation::Upright,
                SQRT_3 / 4.0,
                Point2::ORIGIN,
                grid.num_cols
            )
            .trace_row(0)
            .points()
        );
    }
}
