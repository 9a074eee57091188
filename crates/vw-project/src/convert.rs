//! Conversion from configuration into the core types.
//!
//! Out-of-range history lengths and task durations are clamped here with a
//! warning rather than rejected.

use vw_core::limits::{clamp_history, clamp_task_duration};
use vw_core::{CellChemistry, CellReading};
use vw_monitor::{AlertThresholds, MonitorResult};
use vw_tasks::Task;

use crate::schema::{DashboardConfig, TaskDef};

impl DashboardConfig {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn thresholds(&self) -> MonitorResult<AlertThresholds> {
        AlertThresholds::new(self.alerts.temp_threshold, self.alerts.volt_threshold)
    }

    /// `history.max_history` clamped to `[10, 1000]`.
    pub fn max_history(&self) -> usize {
        let requested = self.history.max_history;
        let clamped = clamp_history(requested);
        if clamped != requested {
            tracing::warn!(requested, clamped, "max_history out of range, clamped");
        }
        clamped
    }

    /// Per-cell chemistry; `None` for manual cells without one.
    pub fn chemistries(&self) -> Vec<Option<CellChemistry>> {
        self.cells.iter().map(|c| c.chemistry()).collect()
    }

    /// Per-cell fixed reading; `None` for generated cells.
    pub fn manual_readings(&self) -> Vec<Option<CellReading>> {
        self.cells.iter().map(|c| c.manual_reading()).collect()
    }

    /// Task list in configured order with durations clamped to `[5, 60]`.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, def)| to_task(i + 1, def))
            .collect()
    }
}

fn to_task(number: usize, def: &TaskDef) -> Task {
    let requested = def.duration_s();
    let clamped = clamp_task_duration(requested);
    if clamped != requested {
        tracing::warn!(task = number, requested, clamped, "task duration out of range, clamped");
    }
    match def {
        TaskDef::CcCv {
            cc_cp,
            cv_voltage,
            current,
            capacity,
            ..
        } => Task::cc_cv(cc_cp.clone(), *cv_voltage, *current, *capacity, clamped),
        TaskDef::Idle { .. } => Task::idle(clamped),
        TaskDef::CcCd {
            cc_cp,
            voltage,
            capacity,
            ..
        } => Task::cc_cd(cc_cp.clone(), *voltage, *capacity, clamped),
    }
}
