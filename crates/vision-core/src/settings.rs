//! Control settings supplied by the UI layer of the single bulb screen.

use crate::color::clamp_wavelength;
use crate::constants::DEFAULT_WAVELENGTH;

/// Kind of light leaving the bulb.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightType {
    White,
    #[default]
    Colored,
}

/// How the beam is shown: a solid analytic beam or individual photons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BeamMode {
    #[default]
    Beam,
    Photon,
}

/// Every input of the single bulb screen that the model reacts to.
///
/// Wavelengths are in nm. Setters on the model clamp them into the visible
/// range; fields assigned directly are clamped by `clamped`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingleBulbSettings {
    pub source_on: bool,
    pub source_wavelength: f32,
    pub light: LightType,
    pub filter_enabled: bool,
    pub filter_wavelength: f32,
    pub display: BeamMode,
}

impl Default for SingleBulbSettings {
    fn default() -> Self {
        Self {
            source_on: false,
            source_wavelength: DEFAULT_WAVELENGTH,
            light: LightType::Colored,
            filter_enabled: false,
            filter_wavelength: DEFAULT_WAVELENGTH,
            display: BeamMode::Beam,
        }
    }
}

impl SingleBulbSettings {
    pub fn clamped(self) -> Self {
        Self {
            source_wavelength: clamp_wavelength(self.source_wavelength),
            filter_wavelength: clamp_wavelength(self.filter_wavelength),
            ..self
        }
    }

    #[inline]
    pub fn is_white(&self) -> bool {
        self.light == LightType::White
    }
}
