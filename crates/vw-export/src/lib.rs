//! vw-export: CSV downloads of simulation history, cell series and task runs.
//!
//! Every writer emits its header row even when there is nothing to export.

pub mod series;
pub mod simulation;
pub mod tasks;

pub use series::{SERIES_HEADER, series_to_string, write_series};
pub use simulation::{
    PER_CELL_HEADER, SIMULATION_HEADER, per_cell_to_string, simulation_to_string, write_per_cell,
    write_simulation,
};
pub use tasks::{TASK_HEADER, tasks_to_string, write_tasks};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Headerless CSV writer; callers write their own header record first.
pub(crate) fn writer<W: std::io::Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(out)
}

