//! The color the virtual eye perceives.
//!
//! These are pure functions of their inputs. Models call them again after
//! every input change (settings setters, or a photon reaching the eye) and
//! cache the result.

use crate::color::{wavelength_to_color, Color};
use crate::filter::transmission_probability;
use crate::settings::{BeamMode, LightType, SingleBulbSettings};

/// Perceived color on the single bulb screen.
///
/// In photon mode the beam owns the simulated truth, so the color of the last
/// photon to reach the eye is returned as is. In beam mode the same filter
/// transmission the photons use is applied analytically.
pub fn perceived_color(
    settings: &SingleBulbSettings,
    last_photon_color: Color,
    half_width: f32,
) -> Color {
    if settings.display == BeamMode::Photon {
        return last_photon_color;
    }
    if !settings.source_on {
        return Color::BLACK;
    }
    match (settings.filter_enabled, settings.light) {
        (true, LightType::Colored) => {
            let alpha = transmission_probability(
                settings.source_wavelength,
                settings.filter_wavelength,
                half_width,
            );
            wavelength_to_color(settings.source_wavelength).with_alpha(alpha)
        }
        (true, LightType::White) => wavelength_to_color(settings.filter_wavelength),
        (false, LightType::White) => Color::WHITE,
        (false, LightType::Colored) => wavelength_to_color(settings.source_wavelength),
    }
}

/// Perceived color on the RGB screen from the three channel intensities (0-255).
pub fn perceived_rgb(intensities: [f32; 3]) -> Color {
    let [r, g, b] = intensities.map(|v| v.clamp(0.0, 255.0).floor() as u8);
    Color::rgb(r, g, b)
}
