use crate::color::{clamp_wavelength, Color};
use crate::constants::{clamp_dt, MANUAL_STEP_DT};
use crate::error::Result;
use crate::filtered_beam::FilteredPhotonBeam;
use crate::params::SingleBulbParams;
use crate::perception::perceived_color;
use crate::photon::{FilteredPhoton, FilteredPhotonRecord};
use crate::settings::{BeamMode, LightType, SingleBulbSettings};
use rand::prelude::*;

/// Model of the single bulb screen.
///
/// Owns the settings, the filtered photon beam, the last-photon color signal
/// and the cached perceived color. Every setter recomputes the perceived color
/// before returning, so readers always see a value consistent with the inputs.
///
/// Typical usage:
/// - Construct with `SingleBulbModel::new(params, seed)`
/// - Push UI changes through the setters
/// - Call `step(dt)` once per frame, then read `perceived_color()` and
///   `beam().renderable_photons()`
pub struct SingleBulbModel {
    params: SingleBulbParams,
    settings: SingleBulbSettings,
    beam: FilteredPhotonBeam,
    last_photon_color: Color,
    perceived_color: Color,
    playing: bool,
    rng: StdRng,
}

impl SingleBulbModel {
    pub fn new(params: SingleBulbParams, seed: u64) -> Result<Self> {
        params.validate()?;
        let settings = SingleBulbSettings::default();
        let last_photon_color = Color::TRANSPARENT_BLACK;
        log::debug!(
            "[single] model: beam={} filter@{} half_width={} seed={}",
            params.geometry.length,
            params.filter.offset,
            params.filter.half_width,
            seed
        );
        Ok(Self {
            params,
            settings,
            beam: FilteredPhotonBeam::new(&params),
            last_photon_color,
            perceived_color: perceived_color(
                &settings,
                last_photon_color,
                params.filter.half_width,
            ),
            playing: true,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn params(&self) -> &SingleBulbParams {
        &self.params
    }

    pub fn settings(&self) -> &SingleBulbSettings {
        &self.settings
    }

    pub fn beam(&self) -> &FilteredPhotonBeam {
        &self.beam
    }

    pub fn perceived_color(&self) -> Color {
        self.perceived_color
    }

    pub fn last_photon_color(&self) -> Color {
        self.last_photon_color
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn set_source_on(&mut self, on: bool) {
        if self.settings.source_on && !on {
            self.beam.emit_source_off_sentinel();
        }
        self.settings.source_on = on;
        self.refresh_perceived_color();
    }

    pub fn set_source_wavelength(&mut self, nm: f32) {
        self.settings.source_wavelength = clamp_wavelength(nm);
        self.refresh_perceived_color();
    }

    pub fn set_light_type(&mut self, light: LightType) {
        self.settings.light = light;
        self.refresh_perceived_color();
    }

    pub fn set_filter_enabled(&mut self, enabled: bool) {
        self.settings.filter_enabled = enabled;
        self.refresh_perceived_color();
    }

    pub fn set_filter_wavelength(&mut self, nm: f32) {
        self.settings.filter_wavelength = clamp_wavelength(nm);
        self.refresh_perceived_color();
    }

    pub fn set_display_mode(&mut self, display: BeamMode) {
        self.settings.display = display;
        self.refresh_perceived_color();
    }

    /// Replace all settings at once (wavelengths are clamped).
    pub fn apply_settings(&mut self, settings: SingleBulbSettings) {
        let settings = settings.clamped();
        if self.settings.source_on && !settings.source_on {
            self.beam.emit_source_off_sentinel();
        }
        self.settings = settings;
        self.refresh_perceived_color();
    }

    /// Advance by one frame while playing. `dt` is clamped to `MAX_DT`; a zero
    /// delta leaves the model untouched.
    pub fn step(&mut self, dt: f32) {
        let dt = clamp_dt(dt);
        if self.playing && dt > 0.0 {
            self.advance(dt);
        }
    }

    /// Advance by exactly one nominal frame, playing or not.
    pub fn manual_step(&mut self) {
        self.advance(MANUAL_STEP_DT);
    }

    fn advance(&mut self, dt: f32) {
        let arrived = self
            .beam
            .update(dt, &self.settings, self.perceived_color, &mut self.rng);
        if let Some(color) = arrived {
            self.last_photon_color = color;
            self.refresh_perceived_color();
        }
    }

    /// Restore default settings and clear the beam.
    pub fn reset(&mut self) {
        self.settings = SingleBulbSettings::default();
        self.last_photon_color = Color::TRANSPARENT_BLACK;
        self.playing = true;
        self.beam.reset();
        self.refresh_perceived_color();
        log::debug!("[single] model reset");
    }

    /// Flat snapshot of every live photon.
    pub fn snapshot(&self) -> Vec<FilteredPhotonRecord> {
        self.beam.photons().map(FilteredPhoton::record).collect()
    }

    fn refresh_perceived_color(&mut self) {
        self.perceived_color = perceived_color(
            &self.settings,
            self.last_photon_color,
            self.params.filter.half_width,
        );
    }
}
