//! Time sources for task execution.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Where the sequencer reads timestamps from and how it lets a duration pass.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Let `duration` elapse on this clock.
    fn wait(&mut self, duration: Duration);
}

/// Real-time clock; `wait` blocks the calling thread.
///
/// `time_scale` compresses the blocking: 1.0 is real time, 0.1 runs ten times
/// faster, 0.0 never sleeps. Scales are capped at [`MAX_TIME_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallClock {
    time_scale: f64,
}

pub const MAX_TIME_SCALE: f64 = 100.0;

impl Default for WallClock {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative or non-finite scales fall back to real time.
    pub fn with_time_scale(time_scale: f64) -> Self {
        let time_scale = if time_scale.is_finite() && time_scale >= 0.0 {
            time_scale.min(MAX_TIME_SCALE)
        } else {
            1.0
        };
        Self { time_scale }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// How long `wait` blocks for `duration`; `None` when the scaled span
    /// does not fit in a `Duration`.
    pub fn scaled(&self, duration: Duration) -> Option<Duration> {
        Duration::try_from_secs_f64(duration.as_secs_f64() * self.time_scale).ok()
    }
}

impl Clock for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn wait(&mut self, duration: Duration) {
        match self.scaled(duration) {
            Some(scaled) if !scaled.is_zero() => std::thread::sleep(scaled),
            Some(_) => {}
            None => tracing::warn!(?duration, "scaled wait out of range, skipping"),
        }
    }
}

/// Virtual clock; `wait` advances the reading instantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedClock {
    now: DateTime<Utc>,
}

impl SimulatedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: start }
    }

    /// Virtual clock starting at the current wall-clock time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn wait(&mut self, duration: Duration) {
        let delta = TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX);
        self.now = self.now.checked_add_signed(delta).unwrap_or(self.now);
    }
}
