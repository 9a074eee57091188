//! Configuration bounds shared by the config layer, the session and the CLI.
//!
//! One set of bounds for every frontend: 1..=20 cells and 1..=5 tasks.

use crate::numeric::Real;

pub const MIN_CELLS: usize = 1;
pub const MAX_CELLS: usize = 20;
pub const DEFAULT_CELLS: usize = 3;

pub const MIN_TASKS: usize = 1;
pub const MAX_TASKS: usize = 5;

pub const MIN_HISTORY: usize = 10;
pub const MAX_HISTORY: usize = 1000;
pub const DEFAULT_HISTORY: usize = 100;

/// Task durations in whole seconds.
pub const MIN_TASK_DURATION_S: u32 = 5;
pub const MAX_TASK_DURATION_S: u32 = 60;
pub const DEFAULT_TASK_DURATION_S: u32 = 10;

pub const TEMP_THRESHOLD_RANGE: (Real, Real) = (0.0, 100.0);
pub const VOLT_THRESHOLD_RANGE: (Real, Real) = (0.0, 5.0);
pub const DEFAULT_TEMP_THRESHOLD: Real = 40.0;
pub const DEFAULT_VOLT_THRESHOLD: Real = 3.5;

pub const CAPACITY_RANGE: (Real, Real) = (0.0, 100.0);

/// Auto-refresh cadence of the dashboard.
pub const REFRESH_INTERVAL_MS: u64 = 1000;

pub fn clamp_history(max_history: usize) -> usize {
    max_history.clamp(MIN_HISTORY, MAX_HISTORY)
}

pub fn clamp_task_duration(seconds: u32) -> u32 {
    seconds.clamp(MIN_TASK_DURATION_S, MAX_TASK_DURATION_S)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_clamp() {
        assert_eq!(clamp_history(0), MIN_HISTORY);
        assert_eq!(clamp_history(250), 250);
        assert_eq!(clamp_history(5000), MAX_HISTORY);
    }

    #[test]
    fn task_duration_clamp() {
        assert_eq!(clamp_task_duration(1), 5);
        assert_eq!(clamp_task_duration(30), 30);
        assert_eq!(clamp_task_duration(600), 60);
    }
}
