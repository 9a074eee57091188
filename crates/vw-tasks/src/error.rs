use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    #[error("Task list is empty")]
    Empty,

    #[error("Too many tasks: {count} (at most {max})")]
    TooMany { count: usize, max: usize },

    #[error("Invalid task {number}: {what}")]
    InvalidTask { number: usize, what: String },

    #[error("Unknown task type: {0}")]
    UnknownKind(String),
}
