//! Per-tick derived values: threshold alerts and cell averages.
//!
//! Both are pure functions of the latest [`MetricSample`](vw_telemetry::MetricSample);
//! nothing here retains state between ticks.

pub mod aggregate;
pub mod alerts;
pub mod thresholds;

pub use aggregate::{Aggregate, aggregate};
pub use alerts::{Alert, evaluate};
pub use thresholds::AlertThresholds;

pub type MonitorResult<T> = Result<T, MonitorError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    #[error("Invalid threshold: {0}")]
    Threshold(#[from] vw_core::CoreError),
}
