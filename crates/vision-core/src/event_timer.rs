use crate::error::{ConfigError, Result};

/// Fixed-rate scheduler that turns elapsed frame time into discrete events.
///
/// The time left until the next event carries across calls, so the event count
/// over a long run matches `rate * elapsed` no matter how the elapsed time was
/// split into frames. Each event receives the time that has passed since it
/// fired within the current step, which beams use to back-date new photons.
///
/// Typical usage:
/// - Construct with `EventTimer::new(rate_hz)`
/// - Call `step(dt, |since_event| ...)` once per frame
/// - Call `reset()` when the simulation resets, `single_step` for manual stepping
#[derive(Clone, Debug)]
pub struct EventTimer {
    period: f64,
    time_before_next: f64,
}

impl EventTimer {
    pub fn new(rate_hz: f64) -> Result<Self> {
        if !(rate_hz.is_finite() && rate_hz > 0.0) {
            return Err(ConfigError::InvalidRate(rate_hz));
        }
        let period = 1.0 / rate_hz;
        Ok(Self {
            period,
            time_before_next: period,
        })
    }

    pub fn rate_hz(&self) -> f64 {
        1.0 / self.period
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Time remaining until the next event fires.
    pub fn time_before_next(&self) -> f64 {
        self.time_before_next
    }

    pub fn step(&mut self, dt: f32, mut on_event: impl FnMut(f32)) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let mut remaining = dt as f64;
        while remaining >= self.time_before_next {
            remaining -= self.time_before_next;
            self.time_before_next = self.period;
            on_event(remaining as f32);
        }
        self.time_before_next -= remaining;
    }

    /// Fire exactly one event with a nominal `interval`, dropping any backlog.
    pub fn single_step(&mut self, interval: f32, mut on_event: impl FnMut(f32)) {
        self.reset();
        on_event(interval);
    }

    /// Drop the partial interval accumulated so far.
    pub fn reset(&mut self) {
        self.time_before_next = self.period;
    }
}
