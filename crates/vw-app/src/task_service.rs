//! Task-sequence execution.

use vw_project::DashboardConfig;
use vw_tasks::{SimulatedClock, TaskLog, TaskProgressEvent, TaskSequencer, WallClock};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskRunOptions {
    /// Block for each task's duration instead of advancing a virtual clock.
    pub realtime: bool,
    /// Compression of real-time waits; 1.0 is real time.
    pub time_scale: f64,
}

impl Default for TaskRunOptions {
    fn default() -> Self {
        Self {
            realtime: false,
            time_scale: 1.0,
        }
    }
}

pub fn build_sequencer(config: &DashboardConfig) -> AppResult<TaskSequencer> {
    Ok(TaskSequencer::new(config.tasks())?)
}

/// Run the configured tasks once, in order.
///
/// Without `realtime` the run is instantaneous: a virtual clock starting now
/// advances by each task's duration.
pub fn run_tasks(
    config: &DashboardConfig,
    options: TaskRunOptions,
    progress_cb: Option<&mut dyn FnMut(TaskProgressEvent)>,
) -> AppResult<TaskLog> {
    let mut sequencer = build_sequencer(config)?;
    let log = if options.realtime {
        let mut clock = WallClock::with_time_scale(options.time_scale);
        sequencer.run_with_progress(&mut clock, progress_cb)
    } else {
        let mut clock = SimulatedClock::starting_now();
        sequencer.run_with_progress(&mut clock, progress_cb)
    };
    tracing::info!(
        tasks = log.len(),
        realtime = options.realtime,
        span_s = log.span().map(|d| d.num_seconds()).unwrap_or(0),
        "task sequence complete"
    );
    Ok(log)
}
