//! The rhombic lattice tracer. Given a height and a bounding box, this
//! traces one continuous path per lattice row. The lattice is a grid of
//! hexagons whose vertices are truncated by triangles that grow and shrink
//! with height, so that stacked layers form rhombic dodecahedra rather than
//! flat hexagonal prisms.
//!
//! Generation is a pure function of `(config, height, bounds)`. There is no
//! state carried between calls, so layers (or multiple surfaces within one
//! layer) can be generated independently and in any order.

mod lattice;
mod phase;
mod trace;

pub use self::{
    lattice::{LatticeGrid, LatticeScale},
    phase::{Permutation, Phase, PhaseState},
    trace::{RowDirection, RowTracer, Spike},
};

use crate::{
    config::PatternConfig,
    geometry::{BoundingBox, Polyline, Rotation},
    timed,
};
use anyhow::{ensure, Context};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{iter::FusedIterator, ops::Range};
use validator::Validate;

/// A validated pattern, ready to generate layers. Construction is the only
/// fallible step for the config; once you have one of these, the only things
/// that can be rejected are a non-finite height, and bounds that are
/// non-finite or too big to cover with this lattice.
///
/// ```
/// use rhodo::{BoundingBox, PatternConfig, RhodoPattern};
///
/// let pattern = RhodoPattern::new(PatternConfig::default()).unwrap();
/// let bounds = BoundingBox::from_extents(0.0, 0.0, 20.0, 20.0);
/// let layer = pattern.generate(0.2, bounds).unwrap();
/// assert_eq!(layer.polylines().len(), pattern.grid(bounds)?.num_rows);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RhodoPattern {
    config: PatternConfig,
    scale: LatticeScale,
    /// Maps surface coordinates into the lattice's own frame. `None` when
    /// the lattice isn't rotated, so unrotated output is exactly the traced
    /// points.
    rotation: Option<Rotation>,
}

impl RhodoPattern {
    /// Validate the config and derive the lattice scale from it. Returns an
    /// error if the config is invalid. The underlying
    /// [ValidationErrors](validator::ValidationErrors) can be recovered by
    /// downcasting the error.
    pub fn new(config: PatternConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        let scale = LatticeScale::new(config.hex_side());
        let rotation = if config.angle == 0.0 {
            None
        } else {
            Some(Rotation::new(scale.hex_center(), config.angle_radians()))
        };
        Ok(Self {
            config,
            scale,
            rotation,
        })
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn scale(&self) -> &LatticeScale {
        &self.scale
    }

    /// Get the phase state that governs the layer at the given height
    pub fn phase_at(&self, height: f64) -> PhaseState {
        PhaseState::at_height(height, self.scale.hex_side)
    }

    /// Get the aligned grid that generation would trace over the given
    /// bounds. For a rotated lattice, the grid lives in the lattice's frame
    /// and covers the rotated bounds. Returns an error if the bounds can't be
    /// covered, see [LatticeGrid::new].
    pub fn grid(&self, bounds: BoundingBox) -> anyhow::Result<LatticeGrid> {
        let bounds = match &self.rotation {
            Some(rotation) => bounds.rotate(rotation),
            None => bounds,
        };
        LatticeGrid::new(&self.scale, bounds)
            .with_context(|| format!("cannot cover bounds {}", bounds))
    }

    /// Get a lazy iterator over the rows of one layer. Each call to `next`
    /// traces exactly one row, so callers that stream paths straight into
    /// another stage never need to hold the whole layer in memory.
    pub fn rows(
        &self,
        height: f64,
        bounds: BoundingBox,
    ) -> anyhow::Result<Rows> {
        ensure!(
            height.is_finite(),
            "cannot generate a layer at non-finite height {}",
            height
        );
        ensure!(
            bounds.is_finite(),
            "cannot generate a layer over non-finite bounds {}",
            bounds
        );
        let phase = self.phase_at(height);
        let grid = self.grid(bounds)?;
        debug!(
            "Layer at height {}: {:?}, {}x{} grid over {}",
            height, phase, grid.num_cols, grid.num_rows, grid.bounds
        );
        Ok(Rows {
            tracer: RowTracer::for_layer(self.scale, &phase, &grid),
            phase,
            grid,
            to_surface: self.rotation.map(Rotation::inverse),
            remaining: 0..grid.num_rows,
        })
    }

    /// Generate a full layer at the given height, covering the given bounds.
    /// The traced paths extend past the bounds by at least one lattice cell
    /// on every side, so clipping them to any surface inside the bounds never
    /// exposes an unfilled edge.
    pub fn generate(
        &self,
        height: f64,
        bounds: BoundingBox,
    ) -> anyhow::Result<Layer> {
        let rows = self.rows(height, bounds)?;
        let phase = rows.phase();
        let polylines: Vec<Polyline> =
            timed!("Layer generation", log::Level::Debug, rows.collect());

        let layer = Layer {
            height,
            phase,
            bounds,
            polylines,
        };
        info!(
            "Generated layer at height {} ({}, tri_frac {:.3}): {} rows, {} \
             points, {:.1} total length",
            height,
            phase.phase,
            phase.tri_frac,
            layer.polylines.len(),
            layer.point_count(),
            layer.path_length()
        );
        Ok(layer)
    }
}

/// Generate the paths for one layer, in row order. This is a shortcut for
/// building a [RhodoPattern] and calling [RhodoPattern::generate] on it, for
/// callers that only need a single layer. Returns an error if `spacing` or
/// `density` doesn't describe a valid lattice, or if `height` isn't finite.
pub fn generate(
    height: f64,
    spacing: f64,
    density: f64,
    bounds: BoundingBox,
) -> anyhow::Result<Vec<Polyline>> {
    let pattern = RhodoPattern::new(PatternConfig {
        spacing,
        density,
        ..Default::default()
    })?;
    Ok(pattern.generate(height, bounds)?.into_polylines())
}

/// Lazy iterator over the rows of one layer, in row order. Created by
/// [RhodoPattern::rows].
#[derive(Clone, Debug)]
pub struct Rows {
    tracer: RowTracer,
    phase: PhaseState,
    grid: LatticeGrid,
    /// Maps traced points from the lattice frame back onto the surface
    to_surface: Option<Rotation>,
    remaining: Range<usize>,
}

impl Rows {
    /// The phase state that every row of this layer is traced with
    pub fn phase(&self) -> PhaseState {
        self.phase
    }

    /// The aligned grid being traced. For a rotated lattice, this is in the
    /// lattice's frame rather than the surface's.
    pub fn grid(&self) -> &LatticeGrid {
        &self.grid
    }

    fn trace_row(&self, row: usize) -> Polyline {
        let polyline = self.tracer.trace_row(row);
        match &self.to_surface {
            Some(rotation) => {
                polyline.into_iter().map(|p| rotation.apply(p)).collect()
            }
            None => polyline,
        }
    }
}

impl Iterator for Rows {
    type Item = Polyline;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.remaining.next()?;
        Some(self.trace_row(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining.size_hint()
    }
}

impl DoubleEndedIterator for Rows {
    fn next_back(&mut self) -> Option<Self::Item> {
        let row = self.remaining.next_back()?;
        Some(self.trace_row(row))
    }
}

impl ExactSizeIterator for Rows {}

impl FusedIterator for Rows {}

/// One fully generated layer. Holds the traced paths, along with the inputs
/// and phase state that produced them.
///
/// With the `json` feature, layers can be exported via [Layer::to_json] and
/// reloaded via [Layer::from_json]. All fields and enum values are snake
/// cased, and each polyline is a plain array of `{"x", "y"}` points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    height: f64,
    phase: PhaseState,
    /// The bounds that were requested, **not** the aligned ones
    bounds: BoundingBox,
    polylines: Vec<Polyline>,
}

impl Layer {
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn phase(&self) -> &PhaseState {
        &self.phase
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// One path per row, in row order. Even rows run toward `+x`, odd rows
    /// toward `-x`.
    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn into_polylines(self) -> Vec<Polyline> {
        self.polylines
    }

    /// Total number of points across all paths
    pub fn point_count(&self) -> usize {
        self.polylines.iter().map(Polyline::len).sum()
    }

    /// Total length of all paths, i.e. how far the nozzle travels while
    /// extruding this layer (before clipping)
    pub fn path_length(&self) -> f64 {
        self.polylines.iter().map(Polyline::length).sum()
    }

    /// Get the smallest box that contains every traced point. This always
    /// covers the requested bounds, with margin. `None` only if there are no
    /// points at all, which generation never produces.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.polylines
                .iter()
                .flat_map(|polyline| polyline.iter().copied()),
        )
    }

    /// Serialize this layer into JSON. Can be loaded back with
    /// [Layer::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing layer")
    }

    /// Deserialize a layer from JSON. Will fail if the input is malformed.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("error deserializing layer")
    }
}
