use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration that defines the lattice a pattern is traced from. Two
/// patterns generated with the same config at the same height over the same
/// bounds will always be identical.
///
/// The lattice edge length (the side of each hexagon) is derived as
/// `spacing / density`, so this config must describe a positive, finite edge.
/// Anything else is rejected during validation, before any tracing happens.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_lattice"))]
#[serde(default)]
pub struct PatternConfig {
    /// Minimum spacing between neighboring lines, in the same unit as layer
    /// heights and surface coordinates (usually mm). This is typically the
    /// extrusion width.
    #[validate(range(min = 0.0))]
    pub spacing: f64,

    /// Fraction of the spacing that's actually used as lattice edge length.
    /// Lower densities give bigger cells and sparser infill. Must be in
    /// `(0, 1]`. A density of 1.0 makes the hexagon edge exactly one spacing
    /// long.
    #[validate(range(min = 0.0, max = 1.0))]
    pub density: f64,

    /// Rotation of the lattice in the slicing plane, in degrees. The lattice
    /// turns around a fixed point (the center of the hexagon at the origin),
    /// so every surface and every layer with the same angle still lines up.
    /// Slicers typically rotate infill per region or per layer.
    pub angle: f64,
}

impl PatternConfig {
    /// Length of one hexagon edge, the fundamental scale of the lattice. Only
    /// meaningful for a validated config.
    pub fn hex_side(&self) -> f64 {
        self.spacing / self.density
    }

    pub fn angle_radians(&self) -> f64 {
        self.angle.to_radians()
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        // A 0.45mm line at 20% gives a 2.25mm hexagon edge, which is a
        // pretty standard sparse infill
        Self {
            spacing: 0.45,
            density: 0.2,
            angle: 0.0,
        }
    }
}

/// The range checks above are inclusive, so they can't catch a zero spacing or
/// density (or NaN, which passes every range check). This catches any config
/// that doesn't yield a usable edge length, or a rotation that isn't a real
/// angle.
fn validate_lattice(config: &PatternConfig) -> Result<(), ValidationError> {
    if !config.angle.is_finite() {
        let mut error = ValidationError::new("angle");
        error.message =
            Some(format!("angle must be finite, got {}", config.angle).into());
        error.add_param("angle".into(), &config.angle);
        return Err(error);
    }

    let hex_side = config.hex_side();
    if config.spacing > 0.0 && config.density > 0.0 && hex_side.is_finite() {
        Ok(())
    } else {
        let mut error = ValidationError::new("hex_side");
        error.message = Some(
            format!(
                "spacing ({}) and density ({}) must both be positive",
                config.spacing, config.density
            )
            .into(),
        );
        error.add_param("hex_side".into(), &hex_side);
        Err(error)
    }
}
