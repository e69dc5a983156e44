//! Photon beam of the single bulb screen: one source, an optional wavelength
//! filter part-way along the beam, and white or single-wavelength light.

use crate::color::{wavelength_to_color, Color};
use crate::filter::{cross_filter, Crossing, FilterState};
use crate::params::SingleBulbParams;
use crate::photon::{Fan, FilteredPhoton, Motion};
use crate::pool::Pool;
use crate::settings::SingleBulbSettings;
use glam::Vec2;
use rand::Rng;

/// Live photons of the single bulb beam, in creation order.
///
/// Each `update`:
/// 1. checks photons that just passed the filter plane (blocked ones retire),
/// 2. moves the rest, retiring those whose next position leaves the beam and
///    reporting the color of the last one to reach the eye,
/// 3. creates new photons while the source is on,
/// 4. emits a transparent black photon from the filter when the filter blocked
///    everything this tick and the eye still sees light.
///
/// Records are stored in the beam's `Pool`; `live` holds their slots.
#[derive(Clone, Debug)]
pub struct FilteredPhotonBeam {
    params: SingleBulbParams,
    live: Vec<usize>,
    pool: Pool<FilteredPhoton>,
}

impl FilteredPhotonBeam {
    pub fn new(params: &SingleBulbParams) -> Self {
        Self {
            params: *params,
            live: Vec::new(),
            pool: Pool::new(params.pool_capacity),
        }
    }

    pub fn params(&self) -> &SingleBulbParams {
        &self.params
    }

    /// Live photons in creation order, sentinels and parked photons included.
    pub fn photons(&self) -> impl ExactSizeIterator<Item = &FilteredPhoton> + '_ {
        self.live.iter().map(|&slot| self.pool.get(slot))
    }

    pub fn photon_count(&self) -> usize {
        self.live.len()
    }

    /// Photons a renderer should draw: no sentinels, nothing parked by `reset`.
    pub fn renderable_photons(&self) -> impl Iterator<Item = &FilteredPhoton> + '_ {
        let geometry = self.params.geometry;
        self.photons()
            .filter(move |p| !p.is_sentinel() && geometry.contains(p.motion.position))
    }

    pub fn pool(&self) -> &Pool<FilteredPhoton> {
        &self.pool
    }

    /// Advance the beam by `dt`.
    ///
    /// `perceived` is the color the eye currently sees; it decides whether a
    /// black sentinel is still needed. Returns the color signal of the last
    /// photon that reached the eye this tick, if any did.
    ///
    /// The number of photons created averages `creation_rate * dt` (capped at
    /// `max_per_tick`) whatever the frame rate.
    pub fn update(
        &mut self,
        dt: f32,
        settings: &SingleBulbSettings,
        perceived: Color,
        rng: &mut impl Rng,
    ) -> Option<Color> {
        let filter = FilterState {
            enabled: settings.filter_enabled,
            wavelength: settings.filter_wavelength,
        };
        let Self { params, live, pool } = self;
        let geometry = params.geometry;
        let mut arrived = None;
        let mut blocked_all = false;

        live.retain(|&slot| {
            let photon = pool.get_mut(slot);
            // parked at the eye by reset; sweep without signalling a color
            if photon.motion.position.x <= 0.0 {
                pool.release(slot);
                return false;
            }
            if let Crossing::Blocked { probability } =
                cross_filter(photon, filter, &params.filter, rng)
            {
                if probability == 0.0 {
                    blocked_all = true;
                }
                pool.release(slot);
                return false;
            }
            if photon.motion.advance_within(dt, &geometry) {
                return true;
            }
            arrived = Some(arrival_color(photon));
            pool.release(slot);
            false
        });

        if settings.source_on {
            let count = creation_count(params.creation_rate * dt, params.max_per_tick, rng);
            for _ in 0..count {
                self.spawn(dt, settings, rng);
            }
        }

        let eye_dark = perceived.is_black() || perceived.is_transparent();
        if blocked_all && settings.filter_enabled && !eye_dark {
            let at = Vec2::new(self.params.filter.offset, geometry.center_y());
            self.push_sentinel(at, true);
        }

        log::trace!(
            "[single] live={} pooled={} arrived={:?}",
            self.live.len(),
            self.pool.len(),
            arrived
        );
        arrived
    }

    fn spawn(&mut self, dt: f32, settings: &SingleBulbSettings, rng: &mut impl Rng) {
        let geometry = self.params.geometry;
        let white = settings.is_white();
        let color = if white {
            Color::rgb(rng.gen(), rng.gen(), rng.gen())
        } else {
            wavelength_to_color(settings.source_wavelength)
        };
        let fan = Fan::draw(rng, &geometry);
        // stagger spawn x across the frame so photons do not travel in bands
        let x = geometry.length + rng.gen::<f32>() * geometry.x_velocity * dt;
        let slot = self.pool.acquire(|p| {
            p.motion = Motion {
                position: Vec2::new(x, fan.y),
                velocity: Vec2::new(geometry.x_velocity, fan.y_velocity),
            };
            p.intensity = 1.0;
            p.color = color;
            p.wavelength = settings.source_wavelength;
            p.is_white = white;
            p.was_white = white;
            p.passed_filter = false;
        });
        self.live.push(slot);
    }

    /// Queue a transparent black photon at the bulb. Used when the source is
    /// switched off so the eye goes dark once the remaining light arrives.
    pub fn emit_source_off_sentinel(&mut self) {
        let at = Vec2::new(self.params.geometry.length, self.params.geometry.center_y());
        self.push_sentinel(at, false);
    }

    fn push_sentinel(&mut self, at: Vec2, passed_filter: bool) {
        let x_velocity = self.params.geometry.x_velocity;
        let black = self.pool.acquire(|p| {
            p.motion = Motion {
                position: at,
                velocity: Vec2::new(x_velocity, 0.0),
            };
            p.intensity = 1.0;
            p.color = Color::TRANSPARENT_BLACK;
            p.wavelength = 0.0;
            p.is_white = false;
            p.was_white = false;
            p.passed_filter = passed_filter;
        });
        self.live.push(black);
    }

    /// Park every live photon at the eye; the next `update` sweeps them back
    /// into the pool.
    pub fn reset(&mut self) {
        for &slot in &self.live {
            self.pool.get_mut(slot).motion.position.x = 0.0;
        }
        log::debug!("[single] reset, parked {} photons", self.live.len());
    }
}

/// Number of photons to create for an expected count of `expected`.
///
/// The fractional part becomes one extra photon with matching probability, so
/// the mean equals `expected` exactly and small frame deltas still emit at the
/// configured rate on average.
pub fn creation_count(expected: f32, max_per_tick: usize, rng: &mut impl Rng) -> usize {
    let expected = expected.clamp(0.0, max_per_tick as f32);
    let whole = expected.floor();
    whole as usize + usize::from(rng.gen::<f32>() < expected - whole)
}

/// Color the eye registers when `photon` arrives.
pub fn arrival_color(photon: &FilteredPhoton) -> Color {
    if photon.is_white {
        Color::WHITE
    } else if photon.was_white || photon.is_sentinel() {
        photon.color
    } else {
        photon.color.with_alpha(photon.intensity)
    }
}
