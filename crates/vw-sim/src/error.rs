//! Error types for simulation operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Cell count {count} outside {min}..={max}")]
    CellCount { count: usize, min: usize, max: usize },

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] vw_telemetry::TelemetryError),
}

pub type SimResult<T> = Result<T, SimError>;
