use thiserror::Error;

/// Rejected model configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("event rate must be positive and finite, got {0}")]
    InvalidRate(f64),

    #[error("beam length must be positive, got {0}")]
    InvalidBeamLength(f32),

    #[error("beam height must be positive, got {0}")]
    InvalidBeamHeight(f32),

    #[error("photon x-velocity must be negative and finite, got {0}")]
    InvalidVelocity(f32),

    #[error("beam length {length} is too short for photons spawned up to MAX_DT back (need more than {min})")]
    BeamTooShort { length: f32, min: f32 },

    #[error("beam height {height} is too narrow for the photon fan (need more than {min})")]
    BeamTooNarrow { height: f32, min: f32 },

    #[error("filter half-width must be positive, got {0}")]
    InvalidHalfWidth(f32),

    #[error("filter offset {offset} lies outside the beam (0, {length})")]
    FilterOutsideBeam { offset: f32, length: f32 },

    #[error("photon creation budget must be positive, got rate={rate} max_per_tick={max_per_tick}")]
    InvalidCreationBudget { rate: f32, max_per_tick: usize },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
