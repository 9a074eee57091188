//! Execution log of one sequencer run.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TaskKind;

/// One completed task. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLogEntry {
    /// 1-based position in the task list.
    pub number: usize,
    pub kind: TaskKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TaskLogEntry {
    pub fn label(&self) -> String {
        format!("Task {}", self.number)
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Entries in task order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLog {
    entries: Vec<TaskLogEntry>,
}

impl TaskLog {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, entry: TaskLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TaskLogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskLogEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// From the first start to the last end.
    pub fn span(&self) -> Option<TimeDelta> {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => Some(last.end - first.start),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a TaskLog {
    type Item = &'a TaskLogEntry;
    type IntoIter = std::slice::Iter<'a, TaskLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
