//! Error types for the vw-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives every frontend one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Threshold error: {0}")]
    Threshold(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vw-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<vw_project::ConfigError> for AppError {
    fn from(err: vw_project::ConfigError) -> Self {
        match err {
            vw_project::ConfigError::Validation(e) => e.into(),
            other => AppError::Config(other.to_string()),
        }
    }
}

impl From<vw_project::ValidationError> for AppError {
    fn from(err: vw_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<vw_core::CoreError> for AppError {
    fn from(err: vw_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<vw_telemetry::TelemetryError> for AppError {
    fn from(err: vw_telemetry::TelemetryError) -> Self {
        AppError::Telemetry(err.to_string())
    }
}

impl From<vw_monitor::MonitorError> for AppError {
    fn from(err: vw_monitor::MonitorError) -> Self {
        AppError::Threshold(err.to_string())
    }
}

impl From<vw_tasks::TaskError> for AppError {
    fn from(err: vw_tasks::TaskError) -> Self {
        AppError::Task(err.to_string())
    }
}

impl From<vw_sim::SimError> for AppError {
    fn from(err: vw_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<vw_export::ExportError> for AppError {
    fn from(err: vw_export::ExportError) -> Self {
        match err {
            vw_export::ExportError::Io(e) => AppError::Io(e),
            other => AppError::Export(other.to_string()),
        }
    }
}
