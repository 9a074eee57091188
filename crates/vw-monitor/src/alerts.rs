use core::fmt;

use serde::{Deserialize, Serialize};
use vw_core::{CellId, Real};
use vw_telemetry::MetricSample;

use crate::thresholds::AlertThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Alert {
    Overheating { cell: CellId, temperature: Real },
    LowVoltage { cell: CellId, voltage: Real },
}

impl Alert {
    pub fn cell(&self) -> CellId {
        match self {
            Alert::Overheating { cell, .. } | Alert::LowVoltage { cell, .. } => *cell,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::Overheating { cell, temperature } => {
                write!(f, "{cell} Overheating: {temperature:.1} °C")
            }
            Alert::LowVoltage { cell, voltage } => {
                write!(f, "Low Voltage on {cell}: {voltage:.2} V")
            }
        }
    }
}

/// Threshold alerts for one sample.
///
/// Cells ascending; per cell the temperature check comes before the voltage check.
/// Both comparisons are strict.
pub fn evaluate(sample: &MetricSample, thresholds: &AlertThresholds) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for (cell, reading) in sample.iter() {
        if reading.temperature > thresholds.temp_threshold {
            alerts.push(Alert::Overheating {
                cell,
                temperature: reading.temperature,
            });
        }
        if reading.voltage < thresholds.volt_threshold {
            alerts.push(Alert::LowVoltage {
                cell,
                voltage: reading.voltage,
            });
        }
    }
    alerts
}
