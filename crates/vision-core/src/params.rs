//! Runtime parameter sets for beams and models.
//!
//! Every set has a `Default` built from `constants.rs` and a `validate` step
//! that model constructors run before building anything.

use crate::constants::*;
use crate::error::{ConfigError, Result};
use glam::Vec2;

/// Spatial extent and photon motion of one beam.
///
/// - `length`: x of the light source; photons travel from here to the eye at x = 0
/// - `height`: photons must stay strictly inside (0, height) vertically
/// - `x_velocity`: constant horizontal speed (negative, towards the eye)
/// - `fan_factor`: width of the random y-velocity fan
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamGeometry {
    pub length: f32,
    pub height: f32,
    pub x_velocity: f32,
    pub fan_factor: f32,
}

impl BeamGeometry {
    pub fn with_length(length: f32) -> Self {
        Self {
            length,
            height: BEAM_HEIGHT,
            x_velocity: X_VELOCITY,
            fan_factor: FAN_FACTOR,
        }
    }

    /// True while a position is still inside the beam.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > 0.0 && p.y > 0.0 && p.y < self.height
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Shortest length at which a photon back-dated by up to `MAX_DT` still
    /// spawns inside the beam.
    pub fn min_length(&self) -> f32 {
        self.x_velocity.abs() * MAX_DT
    }

    /// Smallest height that holds the widest fan draw back-dated by `MAX_DT`.
    pub fn min_height(&self) -> f32 {
        let max_y_velocity = self.fan_factor.abs() / 2.0 * FAN_SPEED_SCALE;
        2.0 * max_y_velocity * (FAN_ORIGIN_LEAD + MAX_DT)
    }

    pub fn validate(&self) -> Result<()> {
        if !positive(self.length) {
            return Err(ConfigError::InvalidBeamLength(self.length));
        }
        if !positive(self.height) {
            return Err(ConfigError::InvalidBeamHeight(self.height));
        }
        if !positive(-self.x_velocity) {
            return Err(ConfigError::InvalidVelocity(self.x_velocity));
        }
        let min = self.min_length();
        if self.length <= min {
            return Err(ConfigError::BeamTooShort {
                length: self.length,
                min,
            });
        }
        let min = self.min_height();
        if !min.is_finite() || self.height <= min {
            return Err(ConfigError::BeamTooNarrow {
                height: self.height,
                min,
            });
        }
        Ok(())
    }
}

/// Placement and transmission model of the wavelength filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParams {
    pub offset: f32,
    pub half_width: f32,
    pub white_transmission: f32,
    pub min_passed_intensity: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            offset: FILTER_OFFSET,
            half_width: GAUSSIAN_WIDTH / 2.0,
            white_transmission: WHITE_TRANSMISSION,
            min_passed_intensity: MIN_PASSED_INTENSITY,
        }
    }
}

impl FilterParams {
    pub fn validate(&self, geometry: &BeamGeometry) -> Result<()> {
        if !positive(self.half_width) {
            return Err(ConfigError::InvalidHalfWidth(self.half_width));
        }
        if !positive(self.offset) || self.offset >= geometry.length {
            return Err(ConfigError::FilterOutsideBeam {
                offset: self.offset,
                length: geometry.length,
            });
        }
        Ok(())
    }
}

/// Parameters of the single bulb (filtered) screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingleBulbParams {
    pub geometry: BeamGeometry,
    pub filter: FilterParams,
    pub creation_rate: f32,
    pub max_per_tick: usize,
    pub pool_capacity: usize,
}

impl Default for SingleBulbParams {
    fn default() -> Self {
        Self {
            geometry: BeamGeometry::with_length(SINGLE_BEAM_LENGTH),
            filter: FilterParams::default(),
            creation_rate: PHOTON_CREATION_RATE,
            max_per_tick: MAX_PHOTONS_PER_TICK,
            pool_capacity: POOL_CAPACITY,
        }
    }
}

impl SingleBulbParams {
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.filter.validate(&self.geometry)?;
        if !positive(self.creation_rate) || self.max_per_tick == 0 {
            return Err(ConfigError::InvalidCreationBudget {
                rate: self.creation_rate,
                max_per_tick: self.max_per_tick,
            });
        }
        Ok(())
    }
}

/// Parameters of the RGB screen, shared by all three channel beams.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbParams {
    pub geometry: BeamGeometry,
    pub emission_rate: f64,
    pub pool_capacity: usize,
    pub pool_prefill: usize,
}

impl Default for RgbParams {
    fn default() -> Self {
        Self {
            geometry: BeamGeometry::with_length(RGB_BEAM_LENGTH),
            emission_rate: RGB_EMISSION_RATE,
            pool_capacity: POOL_CAPACITY,
            pool_prefill: RGB_POOL_PREFILL,
        }
    }
}

impl RgbParams {
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        if !(self.emission_rate.is_finite() && self.emission_rate > 0.0) {
            return Err(ConfigError::InvalidRate(self.emission_rate));
        }
        Ok(())
    }
}

#[inline]
fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
