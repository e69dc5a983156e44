//! Photon beam of one RGB channel.

use crate::color::Color;
use crate::params::{BeamGeometry, RgbParams};
use crate::photon::{Fan, Motion, RgbPhoton};
use crate::pool::Pool;
use glam::Vec2;
use rand::Rng;

/// Which primary a beam carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Paint color of this channel's photons.
    pub fn color(self) -> Color {
        match self {
            Channel::Red => Color::rgb(255, 0, 0),
            Channel::Green => Color::rgb(0, 255, 0),
            Channel::Blue => Color::rgb(0, 0, 255),
        }
    }
}

/// Live photons of one channel, in creation order.
///
/// Photons are created by the channel's event timer through `create_photon`
/// and retired by `update` the moment their next position would leave the beam.
/// The intensity of every retired photon becomes the channel's perceived
/// intensity; a zero-intensity photon is emitted each tick the source is dark
/// so the perceived intensity falls to zero once the light already in flight
/// has arrived.
///
/// Records are stored in the beam's `Pool`; `live` holds their slots.
#[derive(Clone, Debug)]
pub struct RgbPhotonBeam {
    channel: Channel,
    geometry: BeamGeometry,
    live: Vec<usize>,
    pool: Pool<RgbPhoton>,
}

impl RgbPhotonBeam {
    pub fn new(channel: Channel, params: &RgbParams) -> Self {
        Self {
            channel,
            geometry: params.geometry,
            live: Vec::new(),
            pool: Pool::prefilled(params.pool_capacity, params.pool_prefill),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn geometry(&self) -> &BeamGeometry {
        &self.geometry
    }

    /// Live photons in creation order, sentinels included.
    pub fn photons(&self) -> impl ExactSizeIterator<Item = &RgbPhoton> + '_ {
        self.live.iter().map(|&slot| self.pool.get(slot))
    }

    pub fn photon_count(&self) -> usize {
        self.live.len()
    }

    /// Photons a renderer should draw; zero-intensity sentinels are skipped.
    pub fn renderable_photons(&self) -> impl Iterator<Item = &RgbPhoton> + '_ {
        self.photons().filter(|p| !p.is_sentinel())
    }

    pub fn pool(&self) -> &Pool<RgbPhoton> {
        &self.pool
    }

    /// Move every photon by `dt`, retiring the ones that leave the beam.
    ///
    /// Returns the intensity of the last photon to reach the eye this tick.
    pub fn update(&mut self, dt: f32, source_intensity: f32) -> Option<f32> {
        let Self {
            geometry,
            live,
            pool,
            ..
        } = self;
        let mut perceived = None;

        live.retain(|&slot| {
            let photon = pool.get_mut(slot);
            if photon.motion.advance_within(dt, geometry) {
                return true;
            }
            perceived = Some(photon.intensity);
            pool.release(slot);
            false
        });

        if source_intensity == 0.0 {
            let at = Vec2::new(geometry.length, geometry.center_y());
            let velocity = Vec2::new(geometry.x_velocity, 0.0);
            let black = pool.acquire(|p| {
                p.motion = Motion {
                    position: at,
                    velocity,
                };
                p.intensity = 0.0;
            });
            live.push(black);
        }

        log::trace!(
            "[rgb] {:?} live={} pooled={}",
            self.channel,
            self.live.len(),
            self.pool.len()
        );
        perceived
    }

    /// Emit one photon that has already travelled for `time_elapsed` seconds.
    ///
    /// Nothing is created while the source is dark.
    pub fn create_photon(&mut self, time_elapsed: f32, source_intensity: f32, rng: &mut impl Rng) {
        if source_intensity <= 0.0 {
            return;
        }
        let fan = Fan::draw(rng, &self.geometry);
        let position = Vec2::new(
            self.geometry.length + self.geometry.x_velocity * time_elapsed,
            fan.y + fan.y_velocity * time_elapsed,
        );
        let velocity = Vec2::new(self.geometry.x_velocity, fan.y_velocity);
        let slot = self.pool.acquire(|p| {
            p.motion = Motion { position, velocity };
            p.intensity = source_intensity;
        });
        self.live.push(slot);
    }

    /// Release every live photon back to the pool.
    pub fn reset(&mut self) {
        let retired = self.live.len();
        self.pool.release_all(self.live.drain(..));
        log::debug!("[rgb] {:?} reset, retired {} photons", self.channel, retired);
    }
}
