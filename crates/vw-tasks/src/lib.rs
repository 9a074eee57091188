//! Scripted charge/discharge/idle task sequencing.
//!
//! A [`TaskSequencer`] runs its tasks strictly in list order, one at a time.
//! Each task goes Pending -> Running -> Completed; the start timestamp is taken
//! when it starts running and the end timestamp once its declared duration has
//! passed on the supplied [`Clock`]. With a [`SimulatedClock`] the duration is
//! a contract on the timestamps only and nothing blocks.

pub mod clock;
pub mod error;
pub mod log;
pub mod progress;
pub mod sequencer;
pub mod task;

pub use clock::{Clock, MAX_TIME_SCALE, SimulatedClock, WallClock};
pub use error::{TaskError, TaskResult};
pub use log::{TaskLog, TaskLogEntry};
pub use progress::{TaskProgressEvent, TaskStage};
pub use sequencer::{SequencerState, TaskSequencer, TaskState};
pub use task::{Task, TaskKind};
