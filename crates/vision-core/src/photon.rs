//! Photon records for both beam kinds.
//!
//! The RGB beam carries plain photons (motion plus a 0-255 channel intensity).
//! The single bulb beam carries filtered photons, which add color, wavelength
//! and the white/filter bookkeeping. Both share `Motion`, and each beam knows
//! statically which kind it owns.

use crate::color::Color;
use crate::constants::{FAN_ORIGIN_LEAD, FAN_SPEED_SCALE, X_VELOCITY};
use crate::params::BeamGeometry;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

/// Position and velocity (units per second) of a photon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::new(X_VELOCITY, 0.0),
        }
    }
}

impl Motion {
    #[inline]
    pub fn next_position(&self, dt: f32) -> Vec2 {
        self.position + self.velocity * dt
    }

    /// Commit the move for `dt` if the photon stays inside the beam.
    ///
    /// Returns false (position unchanged) when the candidate position leaves it.
    #[inline]
    pub fn advance_within(&mut self, dt: f32, geometry: &BeamGeometry) -> bool {
        let next = self.next_position(dt);
        if geometry.contains(next) {
            self.position = next;
            true
        } else {
            false
        }
    }
}

/// Random fan draw for a new photon: y-velocity and the matching spawn y.
///
/// The spawn y is shifted along the velocity so photons spread out from a
/// point behind the source rather than from a vertical line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fan {
    pub y_velocity: f32,
    pub y: f32,
}

impl Fan {
    pub fn draw(rng: &mut impl Rng, geometry: &BeamGeometry) -> Self {
        let spread = geometry.fan_factor;
        let y_velocity = (rng.gen::<f32>() * spread - spread / 2.0) * FAN_SPEED_SCALE;
        Self {
            y_velocity,
            y: y_velocity * FAN_ORIGIN_LEAD + geometry.center_y(),
        }
    }
}

/// Photon of one RGB channel. `intensity` is the channel level in \[0, 255\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RgbPhoton {
    pub motion: Motion,
    pub intensity: f32,
}

impl RgbPhoton {
    /// Zero-intensity photons only drive the perceived intensity to black.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.intensity == 0.0
    }

    pub fn record(&self) -> RgbPhotonRecord {
        RgbPhotonRecord {
            position: self.motion.position.to_array(),
            velocity: self.motion.velocity.to_array(),
            intensity: self.intensity,
        }
    }

    pub fn from_record(r: &RgbPhotonRecord) -> Self {
        Self {
            motion: Motion {
                position: Vec2::from_array(r.position),
                velocity: Vec2::from_array(r.velocity),
            },
            intensity: r.intensity,
        }
    }
}

/// Photon of the single bulb beam.
///
/// `intensity` is an alpha-like fraction in \[0, 1\]. `was_white` remembers that
/// the photon left the bulb white even after the filter recolors it, because
/// recolored white light keeps full intensity while colored light is dimmed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilteredPhoton {
    pub motion: Motion,
    pub intensity: f32,
    pub color: Color,
    pub wavelength: f32,
    pub is_white: bool,
    pub was_white: bool,
    pub passed_filter: bool,
}

impl Default for FilteredPhoton {
    fn default() -> Self {
        Self {
            motion: Motion::default(),
            intensity: 1.0,
            color: Color::TRANSPARENT_BLACK,
            wavelength: 0.0,
            is_white: false,
            was_white: false,
            passed_filter: false,
        }
    }
}

impl FilteredPhoton {
    /// Fully transparent photons only drive the perceived color to black.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.color.is_transparent()
    }

    pub fn record(&self) -> FilteredPhotonRecord {
        let mut flags = 0;
        if self.is_white {
            flags |= FilteredPhotonRecord::IS_WHITE;
        }
        if self.was_white {
            flags |= FilteredPhotonRecord::WAS_WHITE;
        }
        if self.passed_filter {
            flags |= FilteredPhotonRecord::PASSED_FILTER;
        }
        FilteredPhotonRecord {
            position: self.motion.position.to_array(),
            velocity: self.motion.velocity.to_array(),
            intensity: self.intensity,
            color: self.color.to_rgba_f32(),
            wavelength: self.wavelength,
            flags,
        }
    }

    pub fn from_record(r: &FilteredPhotonRecord) -> Self {
        Self {
            motion: Motion {
                position: Vec2::from_array(r.position),
                velocity: Vec2::from_array(r.velocity),
            },
            intensity: r.intensity,
            color: Color::from_rgba_f32(r.color),
            wavelength: r.wavelength,
            is_white: r.flags & FilteredPhotonRecord::IS_WHITE != 0,
            was_white: r.flags & FilteredPhotonRecord::WAS_WHITE != 0,
            passed_filter: r.flags & FilteredPhotonRecord::PASSED_FILTER != 0,
        }
    }
}

/// Flat snapshot of an `RgbPhoton`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RgbPhotonRecord {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub intensity: f32,
}

/// Flat snapshot of a `FilteredPhoton`; color is normalized RGBA.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FilteredPhotonRecord {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub intensity: f32,
    pub color: [f32; 4],
    pub wavelength: f32,
    pub flags: u32,
}

impl FilteredPhotonRecord {
    pub const IS_WHITE: u32 = 1;
    pub const WAS_WHITE: u32 = 1 << 1;
    pub const PASSED_FILTER: u32 = 1 << 2;
}
