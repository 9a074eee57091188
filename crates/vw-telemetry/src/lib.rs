//! vw-telemetry: per-tick samples and the bounded in-memory history.

pub mod history;
pub mod sample;
pub mod series;

pub use history::HistoryStore;
pub use sample::MetricSample;
pub use series::{Metric, SeriesPoint};

pub type TelemetryResult<T> = Result<T, TelemetryError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
    #[error("A sample needs at least one cell")]
    EmptySample,

    #[error("Invalid reading for {cell}: {source}")]
    InvalidReading {
        cell: vw_core::CellId,
        source: vw_core::CoreError,
    },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
}
