//! Configuration validation logic.

use vw_core::limits::{
    MAX_CELLS, MAX_TASKS, MIN_CELLS, MIN_TASKS, TEMP_THRESHOLD_RANGE, VOLT_THRESHOLD_RANGE,
};

use crate::schema::{CellDef, DashboardConfig, TaskDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid count: {field} = {count} (expected {min}..={max})")]
    InvalidCount {
        field: &'static str,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &DashboardConfig) -> Result<(), ValidationError> {
    if config.version != crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    check_count("cells", config.cells.len(), MIN_CELLS, MAX_CELLS)?;
    for (i, cell) in config.cells.iter().enumerate() {
        validate_cell(cell, i + 1)?;
    }

    check_range(
        "alerts.temp_threshold",
        config.alerts.temp_threshold,
        TEMP_THRESHOLD_RANGE,
    )?;
    check_range(
        "alerts.volt_threshold",
        config.alerts.volt_threshold,
        VOLT_THRESHOLD_RANGE,
    )?;

    if config.refresh.interval_ms == 0 {
        return Err(invalid("refresh.interval_ms", 0, "must be positive"));
    }

    check_count("tasks", config.tasks.len(), MIN_TASKS, MAX_TASKS)?;
    for (i, task) in config.tasks.iter().enumerate() {
        validate_task(task, i + 1)?;
    }

    Ok(())
}

fn validate_cell(cell: &CellDef, number: usize) -> Result<(), ValidationError> {
    let Some(reading) = cell.manual_reading() else {
        return Ok(());
    };
    let prefix = format!("cells[{number}]");
    check_finite(&format!("{prefix}.voltage"), reading.voltage)?;
    check_finite(&format!("{prefix}.current"), reading.current)?;
    check_finite(&format!("{prefix}.temperature"), reading.temperature)?;
    check_range(&format!("{prefix}.capacity"), reading.capacity, (0.0, 100.0))?;
    Ok(())
}

fn validate_task(task: &TaskDef, number: usize) -> Result<(), ValidationError> {
    let prefix = format!("tasks[{number}]");
    match task {
        TaskDef::CcCv {
            cv_voltage,
            current,
            capacity,
            ..
        } => {
            check_finite(&format!("{prefix}.cv_voltage"), *cv_voltage)?;
            check_finite(&format!("{prefix}.current"), *current)?;
            check_finite(&format!("{prefix}.capacity"), *capacity)?;
        }
        TaskDef::Idle { .. } => {}
        TaskDef::CcCd {
            voltage, capacity, ..
        } => {
            check_finite(&format!("{prefix}.voltage"), *voltage)?;
            check_finite(&format!("{prefix}.capacity"), *capacity)?;
        }
    }
    Ok(())
}

fn check_count(
    field: &'static str,
    count: usize,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if count < min || count > max {
        return Err(ValidationError::InvalidCount {
            field,
            count,
            min,
            max,
        });
    }
    Ok(())
}

fn check_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid(field, value, "must be finite"));
    }
    Ok(())
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(invalid(field, value, &format!("must be within [{min}, {max}]")));
    }
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
