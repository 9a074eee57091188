use chrono::{DateTime, Utc};

use crate::task::TaskKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStage {
    Started,
    Completed,
    Finished,
}

impl TaskStage {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStage::Started => "running",
            TaskStage::Completed => "completed",
            TaskStage::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskProgressEvent {
    pub stage: TaskStage,
    /// 1-based task number; `None` for the run-level `Finished` event.
    pub task_number: Option<usize>,
    pub kind: Option<TaskKind>,
    pub at: DateTime<Utc>,
    pub completed: usize,
    pub total: usize,
}

impl TaskProgressEvent {
    pub fn fraction_complete(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}
