//! Query helpers for extracting data from the history.

use chrono::{DateTime, Utc};
use vw_core::CellId;
use vw_telemetry::{HistoryStore, Metric, SeriesPoint};

use crate::error::{AppError, AppResult};

/// Summary of the history's time range and shape.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub time_range: (DateTime<Utc>, DateTime<Utc>),
    pub sample_count: usize,
    pub cell_count: usize,
    pub max_history: usize,
}

pub fn get_history_summary(history: &HistoryStore) -> AppResult<HistorySummary> {
    let (Some(oldest), Some(latest)) = (history.oldest(), history.latest()) else {
        return Err(AppError::InvalidInput("No samples in history".to_string()));
    };

    Ok(HistorySummary {
        time_range: (oldest.timestamp(), latest.timestamp()),
        sample_count: history.len(),
        cell_count: latest.cell_count(),
        max_history: history.capacity(),
    })
}

/// Cells of the latest sample.
pub fn list_cell_ids(history: &HistoryStore) -> Vec<CellId> {
    history
        .latest()
        .map(|s| s.iter().map(|(id, _)| id).collect())
        .unwrap_or_default()
}

/// Time series of one metric for one cell (1-based `cell_number`).
pub fn extract_cell_series(
    history: &HistoryStore,
    cell_number: u32,
    metric: &str,
) -> AppResult<Vec<SeriesPoint>> {
    let metric: Metric = metric.parse()?;
    let cell = CellId::from_number(cell_number)
        .filter(|id| list_cell_ids(history).contains(id))
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown cell: {cell_number}")))?;
    Ok(history.cell_series(cell, metric))
}
