//! CSV downloads written to files.

use std::fs::File;
use std::path::Path;

use vw_tasks::TaskLog;
use vw_telemetry::{HistoryStore, SeriesPoint};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportKind {
    /// One row per tick with cell means.
    #[default]
    Means,
    /// One row per cell per tick.
    PerCell,
}

pub fn export_history(path: &Path, history: &HistoryStore, kind: ExportKind) -> AppResult<()> {
    let file = File::create(path)?;
    match kind {
        ExportKind::Means => vw_export::write_simulation(file, history.iter())?,
        ExportKind::PerCell => vw_export::write_per_cell(file, history.iter())?,
    }
    tracing::info!(path = %path.display(), rows = history.len(), ?kind, "history exported");
    Ok(())
}

pub fn export_task_log(path: &Path, log: &TaskLog) -> AppResult<()> {
    let file = File::create(path)?;
    vw_export::write_tasks(file, log)?;
    tracing::info!(path = %path.display(), tasks = log.len(), "task log exported");
    Ok(())
}

pub fn export_series(path: &Path, points: &[SeriesPoint]) -> AppResult<()> {
    let file = File::create(path)?;
    vw_export::write_series(file, points)?;
    tracing::info!(path = %path.display(), points = points.len(), "series exported");
    Ok(())
}

pub fn series_csv(points: &[SeriesPoint]) -> AppResult<String> {
    Ok(vw_export::series_to_string(points)?)
}
