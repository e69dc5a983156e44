//! Colors and the visible-spectrum mapping used to tint photons and beams.

use crate::constants::{MAX_WAVELENGTH, MIN_WAVELENGTH};

/// 8-bit RGB color with a fractional alpha in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT_BLACK: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha replaced (clamped to \[0, 1\]).
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// True when all color channels are zero; alpha is ignored.
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Fully transparent colors are never painted.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Normalized \[r, g, b, a\] for GPU-side consumers.
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }

    pub fn from_rgba_f32(c: [f32; 4]) -> Self {
        Self {
            r: unit_to_byte(c[0]),
            g: unit_to_byte(c[1]),
            b: unit_to_byte(c[2]),
            a: c[3].clamp(0.0, 1.0),
        }
    }
}

const GAMMA: f32 = 0.8;

/// Clamp a wavelength in nm into the visible range.
#[inline]
pub fn clamp_wavelength(nm: f32) -> f32 {
    if nm.is_nan() {
        return MIN_WAVELENGTH;
    }
    nm.clamp(MIN_WAVELENGTH, MAX_WAVELENGTH)
}

/// Map a wavelength (nm) to an opaque color.
///
/// The hue runs violet → blue → cyan → green → yellow → red as piecewise-linear
/// ramps that meet at their endpoints, so the gradient has no jumps. Brightness
/// rolls off towards both ends of the visible range. Out-of-range input is
/// clamped rather than rejected.
pub fn wavelength_to_color(nm: f32) -> Color {
    let w = clamp_wavelength(nm);
    let (r, g, b) = spectrum_rgb(w);
    let f = edge_falloff(w);
    Color::rgb(
        channel_byte(r, f),
        channel_byte(g, f),
        channel_byte(b, f),
    )
}

fn spectrum_rgb(w: f32) -> (f32, f32, f32) {
    if w < 440.0 {
        ((440.0 - w) / (440.0 - 380.0), 0.0, 1.0)
    } else if w < 490.0 {
        (0.0, (w - 440.0) / (490.0 - 440.0), 1.0)
    } else if w < 510.0 {
        (0.0, 1.0, (510.0 - w) / (510.0 - 490.0))
    } else if w < 580.0 {
        ((w - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if w < 645.0 {
        (1.0, (645.0 - w) / (645.0 - 580.0), 0.0)
    } else {
        (1.0, 0.0, 0.0)
    }
}

// eyes are less sensitive near the ends of the range
fn edge_falloff(w: f32) -> f32 {
    if w < 420.0 {
        0.3 + 0.7 * (w - MIN_WAVELENGTH) / (420.0 - MIN_WAVELENGTH)
    } else if w <= 700.0 {
        1.0
    } else {
        0.3 + 0.7 * (MAX_WAVELENGTH - w) / (MAX_WAVELENGTH - 700.0)
    }
}

fn channel_byte(c: f32, falloff: f32) -> u8 {
    if c <= 0.0 {
        0
    } else {
        unit_to_byte((c * falloff).powf(GAMMA))
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
