// Shared model tuning constants used by both screens and the native driver.

// Beam geometry (model units; the eye sits at x = 0, sources at the beam length)
pub const BEAM_HEIGHT: f32 = 130.0; // vertical extent of every photon beam
pub const RGB_BEAM_LENGTH: f32 = 180.0;
pub const SINGLE_BEAM_LENGTH: f32 = 180.0;
pub const FILTER_OFFSET: f32 = 100.0; // x-coordinate of the filter on the single bulb beam

// Photon motion
pub const X_VELOCITY: f32 = -240.0; // constant x-velocity, units per second
pub const FAN_FACTOR: f32 = 1.05; // width of the y-velocity fan
pub const FAN_SPEED_SCALE: f32 = 60.0; // maps the fan draw to a y-velocity
pub const FAN_ORIGIN_LEAD: f32 = 25.0 / 60.0; // seconds of travel baked into the spawn y

// Filter
pub const GAUSSIAN_WIDTH: f32 = 50.0; // full transmission width in nm
pub const WHITE_TRANSMISSION: f32 = 0.3; // pass probability of white photons at any filter
pub const MIN_PASSED_INTENSITY: f32 = 0.2; // passed colored photons never dimmer than this

// Emission
pub const PHOTON_CREATION_RATE: f32 = 312.5; // single bulb creation budget per second
pub const MAX_PHOTONS_PER_TICK: usize = 40;
pub const RGB_EMISSION_RATE: f64 = 120.0; // events per second per RGB channel
pub const RGB_MAX_INTENSITY: f32 = 255.0;

// Pooling
pub const POOL_CAPACITY: usize = 50; // retired records kept per beam
pub const RGB_POOL_PREFILL: usize = 50; // idle slots reserved up front in each RGB beam

// Timing
pub const MAX_DT: f32 = 0.5; // upstream clamp for stalled frames
pub const MANUAL_STEP_DT: f32 = 1.0 / 60.0;

// Visible spectrum
pub const MIN_WAVELENGTH: f32 = 380.0;
pub const MAX_WAVELENGTH: f32 = 780.0;
pub const DEFAULT_WAVELENGTH: f32 = 570.0; // yellow

/// Clamp a frame delta into `[0, MAX_DT]`; non-finite deltas count as zero.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_DT)
    } else {
        0.0
    }
}
