use crate::color::Color;
use crate::constants::{clamp_dt, MANUAL_STEP_DT, RGB_MAX_INTENSITY};
use crate::error::Result;
use crate::event_timer::EventTimer;
use crate::params::RgbParams;
use crate::perception::perceived_rgb;
use crate::photon::{RgbPhoton, RgbPhotonRecord};
use crate::rgb_beam::{Channel, RgbPhotonBeam};
use rand::prelude::*;

/// Model of the RGB screen: three independent channel beams.
///
/// Each channel has its own event timer creating photons at a fixed rate and
/// its own perceived intensity, updated whenever a photon of that channel
/// reaches the eye. The perceived color combines the three intensities.
///
/// Typical usage:
/// - Construct with `RgbModel::new(params, seed)`
/// - Set channel levels with `set_intensity(channel, 0..=255)`
/// - Call `step(dt)` once per frame, then read `perceived_color()` and
///   `beam(channel).renderable_photons()`
pub struct RgbModel {
    params: RgbParams,
    intensities: [f32; 3],
    perceived_intensities: [f32; 3],
    perceived_color: Color,
    beams: [RgbPhotonBeam; 3],
    timers: [EventTimer; 3],
    playing: bool,
    rng: StdRng,
}

impl RgbModel {
    pub fn new(params: RgbParams, seed: u64) -> Result<Self> {
        params.validate()?;
        let timer = EventTimer::new(params.emission_rate)?;
        log::debug!(
            "[rgb] model: beam={} rate={}Hz seed={}",
            params.geometry.length,
            params.emission_rate,
            seed
        );
        Ok(Self {
            params,
            intensities: [0.0; 3],
            perceived_intensities: [0.0; 3],
            perceived_color: Color::BLACK,
            beams: Channel::ALL.map(|c| RgbPhotonBeam::new(c, &params)),
            timers: [timer.clone(), timer.clone(), timer],
            playing: true,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn params(&self) -> &RgbParams {
        &self.params
    }

    pub fn beam(&self, channel: Channel) -> &RgbPhotonBeam {
        &self.beams[channel.index()]
    }

    pub fn beams(&self) -> &[RgbPhotonBeam; 3] {
        &self.beams
    }

    pub fn intensity(&self, channel: Channel) -> f32 {
        self.intensities[channel.index()]
    }

    /// Source level of a channel, clamped to \[0, 255\].
    pub fn set_intensity(&mut self, channel: Channel, level: f32) {
        let level = if level.is_nan() { 0.0 } else { level };
        self.intensities[channel.index()] = level.clamp(0.0, RGB_MAX_INTENSITY);
    }

    pub fn perceived_intensity(&self, channel: Channel) -> f32 {
        self.perceived_intensities[channel.index()]
    }

    pub fn perceived_color(&self) -> Color {
        self.perceived_color
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Advance by one frame while playing. `dt` is clamped to `MAX_DT`; a zero
    /// delta leaves the model untouched.
    pub fn step(&mut self, dt: f32) {
        let dt = clamp_dt(dt);
        if !self.playing || dt == 0.0 {
            return;
        }
        self.propagate(dt);
        let Self {
            beams,
            timers,
            intensities,
            rng,
            ..
        } = self;
        for ((beam, timer), &level) in beams
            .iter_mut()
            .zip(timers.iter_mut())
            .zip(intensities.iter())
        {
            timer.step(dt, |since| beam.create_photon(since, level, rng));
        }
    }

    /// Advance by exactly one nominal frame with one emission per channel.
    pub fn manual_step(&mut self) {
        self.propagate(MANUAL_STEP_DT);
        let Self {
            beams,
            timers,
            intensities,
            rng,
            ..
        } = self;
        for ((beam, timer), &level) in beams
            .iter_mut()
            .zip(timers.iter_mut())
            .zip(intensities.iter())
        {
            timer.single_step(MANUAL_STEP_DT, |since| {
                beam.create_photon(since, level, rng)
            });
        }
    }

    fn propagate(&mut self, dt: f32) {
        let mut changed = false;
        for (i, beam) in self.beams.iter_mut().enumerate() {
            if let Some(level) = beam.update(dt, self.intensities[i]) {
                self.perceived_intensities[i] = level;
                changed = true;
            }
        }
        if changed {
            self.perceived_color = perceived_rgb(self.perceived_intensities);
        }
    }

    /// Zero every channel, clear the beams and drop timer backlog.
    pub fn reset(&mut self) {
        self.intensities = [0.0; 3];
        self.perceived_intensities = [0.0; 3];
        self.perceived_color = Color::BLACK;
        self.playing = true;
        for beam in &mut self.beams {
            beam.reset();
        }
        for timer in &mut self.timers {
            timer.reset();
        }
        log::debug!("[rgb] model reset");
    }

    /// Flat snapshot of every live photon, per channel.
    pub fn snapshot(&self) -> [Vec<RgbPhotonRecord>; 3] {
        self.beams
            .each_ref()
            .map(|beam| beam.photons().map(RgbPhoton::record).collect())
    }
}
