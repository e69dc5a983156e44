//! Wavelength filter transmission, shared by photon filtering and the
//! analytic perceived color so both modes settle on the same result.

use crate::color::wavelength_to_color;
use crate::params::FilterParams;
use crate::photon::FilteredPhoton;
use rand::Rng;

/// Probability that light at `source_nm` passes a filter centered on `filter_nm`.
///
/// Zero outside `[filter_nm - half_width, filter_nm + half_width]`, one at the
/// center, linear in between.
#[inline]
pub fn transmission_probability(source_nm: f32, filter_nm: f32, half_width: f32) -> f32 {
    let distance = (filter_nm - source_nm).abs();
    if distance > half_width {
        0.0
    } else {
        1.0 - distance / half_width
    }
}

/// Outcome of checking one photon against the filter plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Crossing {
    /// Still on the bulb side of the filter.
    NotReached,
    /// Already evaluated on an earlier tick.
    AlreadyPassed,
    /// Crossed while the filter was disabled.
    Unfiltered,
    Blocked { probability: f32 },
    Passed { probability: f32 },
}

/// Filter state the crossing check needs from the current settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterState {
    pub enabled: bool,
    pub wavelength: f32,
}

/// Evaluate the filter for a photon whose x is past the filter offset.
///
/// Runs at most once per photon: the first evaluation sets `passed_filter`,
/// after which the photon is reported as `AlreadyPassed` and left untouched.
/// A `Blocked` photon must be retired by the caller.
pub fn cross_filter(
    photon: &mut FilteredPhoton,
    filter: FilterState,
    params: &FilterParams,
    rng: &mut impl Rng,
) -> Crossing {
    if photon.passed_filter {
        return Crossing::AlreadyPassed;
    }
    if photon.motion.position.x >= params.offset {
        return Crossing::NotReached;
    }
    photon.passed_filter = true;
    if !filter.enabled {
        return Crossing::Unfiltered;
    }

    let probability = if photon.was_white {
        params.white_transmission
    } else {
        transmission_probability(photon.wavelength, filter.wavelength, params.half_width)
    };

    if rng.gen::<f32>() >= probability {
        return Crossing::Blocked { probability };
    }

    if photon.is_white {
        // the filter imposes its own color on white light
        photon.color = wavelength_to_color(filter.wavelength);
        photon.is_white = false;
    } else {
        photon.intensity = probability.max(params.min_passed_intensity);
    }
    Crossing::Passed { probability }
}
