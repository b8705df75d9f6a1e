use crate::geometry::{BoundingBox, Point2, SQRT_3};
use anyhow::{anyhow, ensure};
use serde::{Deserialize, Serialize};

/// All the derived dimensions of the lattice. These are a pure function of
/// the hexagon edge length, so they're the same for every layer generated
/// from one config.
///
/// Hexagons are "pointy topped": two vertical edges on the left and right,
/// and a vertex at the top and bottom center.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeScale {
    /// Length of one hexagon edge
    pub hex_side: f64,
    /// Distance between the two vertical edges of a hexagon, which is also
    /// the horizontal period of the lattice
    pub hex_width: f64,
    /// Vertical distance covered by one row of hexagons. Consecutive rows
    /// interlock, so this is less than the full hexagon height.
    pub pattern_height: f64,
    /// Vertical period of the lattice. Rows alternate between two layouts, so
    /// the lattice only repeats every second row.
    pub tile_height: f64,
}

impl LatticeScale {
    pub fn new(hex_side: f64) -> Self {
        Self {
            hex_side,
            hex_width: hex_side * SQRT_3,
            pattern_height: hex_side * 1.5,
            tile_height: hex_side * 3.0,
        }
    }

    /// The fixed point that rotated patterns turn around. It's the center of
    /// the hexagon at the lattice origin, so it's shared by every surface and
    /// every layer.
    pub fn hex_center(&self) -> Point2 {
        Point2::new(self.hex_width / 2.0, self.hex_side)
    }

    /// Half the width of the spike triangle's base for the given spike
    /// fraction. At `tri_frac = 1` the triangle spans an entire hexagon width.
    pub fn tri_half_width(&self, tri_frac: f64) -> f64 {
        self.hex_width * tri_frac / 2.0
    }
}

/// The grid of rows and columns that covers one bounding box. The origin is
/// snapped onto the global lattice, so any two grids built from the same
/// scale trace the exact same lines wherever they overlap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatticeGrid {
    /// The requested bounds with the minimum corner aligned to the lattice
    pub bounds: BoundingBox,
    /// Number of rows to trace. Includes one extra row of margin past each
    /// edge of the bounds.
    pub num_rows: usize,
    /// Number of columns to trace per row. Includes one extra column of margin
    /// past each edge of the bounds.
    pub num_cols: usize,
}

impl LatticeGrid {
    /// Most rows or columns a single grid can have. Anything bigger is either
    /// a nonsense bounding box or an edge length far below any printable
    /// line width.
    pub const MAX_CELLS: usize = 1 << 20;

    /// Align the bounds to the lattice and count the cells needed to cover
    /// them. Returns an error if the bounds aren't finite, or if covering
    /// them would take more than [Self::MAX_CELLS] cells along either axis.
    pub fn new(
        scale: &LatticeScale,
        bounds: BoundingBox,
    ) -> anyhow::Result<Self> {
        ensure!(bounds.is_finite(), "bounds {} are not finite", bounds);
        let bounds = bounds.align_to_grid(scale.hex_width, scale.tile_height);
        Ok(Self {
            bounds,
            num_rows: Self::cell_count(bounds.height(), scale.pattern_height)?,
            num_cols: Self::cell_count(bounds.width(), scale.hex_width)?,
        })
    }

    /// The aligned origin that row/column offsets are measured from
    pub fn origin(&self) -> Point2 {
        self.bounds.min()
    }

    /// Number of cells of size `period` needed to cover `extent`, plus one
    /// on either side so that clipping against the real surface never
    /// exposes an unfilled edge. Always at least 2.
    fn cell_count(extent: f64, period: f64) -> anyhow::Result<usize> {
        let cells = (extent.max(0.0) / period).ceil();
        // Also catches NaN and infinity, which fail every comparison but !=
        if !(cells <= Self::MAX_CELLS as f64) {
            return Err(anyhow!(
                "covering {} with cells of size {} takes {} cells, the limit \
                 is {}",
                extent,
                period,
                cells,
                Self::MAX_CELLS
            ));
        }
        (cells as usize).checked_add(2).ok_or_else(|| {
            anyhow!("cell count overflowed for extent {}", extent)
        })
    }
}
