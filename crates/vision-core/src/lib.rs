pub mod color;
pub mod constants;
pub mod error;
pub mod event_timer;
pub mod filter;
pub mod filtered_beam;
pub mod params;
pub mod perception;
pub mod photon;
pub mod pool;
pub mod rgb;
pub mod rgb_beam;
pub mod settings;
pub mod single_bulb;

pub use color::*;
pub use constants::*;
pub use error::{ConfigError, Result};
pub use event_timer::*;
pub use filter::*;
pub use filtered_beam::*;
pub use params::*;
pub use perception::*;
pub use photon::*;
pub use pool::*;
pub use rgb::*;
pub use rgb_beam::*;
pub use settings::*;
pub use single_bulb::*;
