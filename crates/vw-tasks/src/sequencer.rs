//! Ordered task execution.

use vw_core::limits::MAX_TASKS;

use crate::clock::Clock;
use crate::error::{TaskError, TaskResult};
use crate::log::{TaskLog, TaskLogEntry};
use crate::progress::{TaskProgressEvent, TaskStage};
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Not yet invoked.
    Idle,
    /// The last task of the most recent run has completed.
    Finished,
}

#[derive(Debug, Clone)]
pub struct TaskSequencer {
    tasks: Vec<Task>,
    states: Vec<TaskState>,
    state: SequencerState,
}

impl TaskSequencer {
    /// Between 1 and 5 tasks, each with finite numeric fields.
    pub fn new(tasks: Vec<Task>) -> TaskResult<Self> {
        if tasks.is_empty() {
            return Err(TaskError::Empty);
        }
        if tasks.len() > MAX_TASKS {
            return Err(TaskError::TooMany {
                count: tasks.len(),
                max: MAX_TASKS,
            });
        }
        for (i, task) in tasks.iter().enumerate() {
            task.validate().map_err(|e| TaskError::InvalidTask {
                number: i + 1,
                what: e.to_string(),
            })?;
        }
        let states = vec![TaskState::Pending; tasks.len()];
        Ok(Self {
            tasks,
            states,
            state: SequencerState::Idle,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_states(&self) -> &[TaskState] {
        &self.states
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Run every task in order and return this run's log.
    pub fn run<C: Clock + ?Sized>(&mut self, clock: &mut C) -> TaskLog {
        self.run_with_progress(clock, None)
    }

    /// Run every task in order, reporting each transition.
    ///
    /// A repeated call starts over from the first task; the returned log only
    /// covers this run.
    pub fn run_with_progress<C: Clock + ?Sized>(
        &mut self,
        clock: &mut C,
        mut progress_cb: Option<&mut dyn FnMut(TaskProgressEvent)>,
    ) -> TaskLog {
        let total = self.tasks.len();
        self.states.fill(TaskState::Pending);
        let mut log = TaskLog::with_capacity(total);
        tracing::info!(tasks = total, "task run started");

        for (i, task) in self.tasks.iter().enumerate() {
            let number = i + 1;
            let kind = task.kind();

            self.states[i] = TaskState::Running;
            let start = clock.now();
            tracing::debug!(task = number, %kind, duration_s = task.duration_s(), "task running");
            emit(&mut progress_cb, TaskStage::Started, Some(number), Some(kind), start, i, total);

            clock.wait(task.duration());

            let end = clock.now().max(start);
            self.states[i] = TaskState::Completed;
            log.push(TaskLogEntry {
                number,
                kind,
                start,
                end,
            });
            tracing::debug!(task = number, %kind, "task completed");
            emit(&mut progress_cb, TaskStage::Completed, Some(number), Some(kind), end, number, total);
        }

        self.state = SequencerState::Finished;
        let finished_at = log.entries().last().map(|e| e.end).unwrap_or_else(|| clock.now());
        emit(&mut progress_cb, TaskStage::Finished, None, None, finished_at, total, total);
        tracing::info!(tasks = total, "task run finished");
        log
    }
}

fn emit(
    progress_cb: &mut Option<&mut dyn FnMut(TaskProgressEvent)>,
    stage: TaskStage,
    task_number: Option<usize>,
    kind: Option<crate::task::TaskKind>,
    at: chrono::DateTime<chrono::Utc>,
    completed: usize,
    total: usize,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(TaskProgressEvent {
            stage,
            task_number,
            kind,
            at,
            completed,
            total,
        });
    }
}
