//! Fixed-cadence pacing for auto-refresh.
//!
//! The core never sleeps. A frontend that wants the dashboard's 1000 ms
//! auto-refresh keeps a `TickClock` and asks it whether a tick is due.
//! Times are seconds since the caller's own reference point.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vw_core::limits::REFRESH_INTERVAL_MS;

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Tick period in seconds.
    pub period_s: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period_s: REFRESH_INTERVAL_MS as f64 / 1000.0,
        }
    }
}

impl TickConfig {
    /// `period_s` must be positive and finite.
    pub fn new(period_s: f64) -> SimResult<Self> {
        if !(period_s.is_finite() && period_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "tick period must be positive",
            });
        }
        Ok(Self { period_s })
    }

    pub fn from_interval_ms(interval_ms: u64) -> SimResult<Self> {
        Self::new(interval_ms as f64 / 1000.0)
    }

    pub fn frequency(&self) -> f64 {
        1.0 / self.period_s
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(self.period_s)
    }
}

/// Tracks when the next refresh tick is due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickClock {
    pub config: TickConfig,
    /// Time of next scheduled tick.
    pub next_tick_time: f64,
}

impl TickClock {
    /// First tick is due immediately at `initial_time`.
    pub fn new(config: TickConfig, initial_time: f64) -> Self {
        Self {
            config,
            next_tick_time: initial_time,
        }
    }

    pub fn should_tick(&self, current_time: f64) -> bool {
        current_time >= self.next_tick_time
    }

    /// Schedule the following tick. Call after a tick has been handled.
    pub fn advance(&mut self) {
        self.next_tick_time += self.config.period_s;
    }

    pub fn reset(&mut self, current_time: f64) {
        self.next_tick_time = current_time + self.config.period_s;
    }

    pub fn time_until_tick(&self, current_time: f64) -> f64 {
        (self.next_tick_time - current_time).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_is_one_second() {
        let config = TickConfig::default();
        assert_eq!(config.period_s, 1.0);
        assert_eq!(config.period(), Duration::from_millis(1000));
    }

    #[test]
    fn config_rejects_non_positive() {
        assert!(TickConfig::new(0.0).is_err());
        assert!(TickConfig::new(f64::NAN).is_err());
        assert!((TickConfig::from_interval_ms(250).unwrap().frequency() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn tick_clock_basic() {
        let mut clock = TickClock::new(TickConfig::new(1.0).unwrap(), 0.0);

        assert!(clock.should_tick(0.0));
        clock.advance();
        assert!(!clock.should_tick(0.5));
        assert!(clock.should_tick(1.0));
        assert!((clock.time_until_tick(0.25) - 0.75).abs() < 1e-12);
        assert_eq!(clock.time_until_tick(3.0), 0.0);
    }

    #[test]
    fn reset_schedules_one_period_ahead() {
        let mut clock = TickClock::new(TickConfig::default(), 0.0);
        clock.reset(10.0);
        assert!(!clock.should_tick(10.5));
        assert!(clock.should_tick(11.0));
    }
}
