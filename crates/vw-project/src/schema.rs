//! Dashboard configuration schema.

use serde::{Deserialize, Serialize};
use vw_core::limits::{
    DEFAULT_CELLS, DEFAULT_HISTORY, DEFAULT_TASK_DURATION_S, DEFAULT_TEMP_THRESHOLD,
    DEFAULT_VOLT_THRESHOLD, REFRESH_INTERVAL_MS,
};
use vw_core::{CellChemistry, CellMode, CellReading};

/// The only file format version this crate reads or writes.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    pub version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    pub cells: Vec<CellDef>,
    #[serde(default)]
    pub alerts: AlertsDef,
    #[serde(default)]
    pub history: HistoryDef,
    #[serde(default)]
    pub refresh: RefreshDef,
    #[serde(default)]
    pub tasks: Vec<TaskDef>,
    #[serde(default)]
    pub simulation: SimulationDef,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: default_name(),
            cells: vec![
                CellDef::Chemistry {
                    chemistry: CellChemistry::Lfp,
                };
                DEFAULT_CELLS
            ],
            alerts: AlertsDef::default(),
            history: HistoryDef::default(),
            refresh: RefreshDef::default(),
            tasks: vec![
                TaskDef::CcCv {
                    cc_cp: "5A".to_string(),
                    cv_voltage: 0.0,
                    current: 0.0,
                    capacity: 0.0,
                    duration_s: DEFAULT_TASK_DURATION_S,
                },
                TaskDef::Idle {
                    duration_s: DEFAULT_TASK_DURATION_S,
                },
            ],
            simulation: SimulationDef::default(),
        }
    }
}

fn default_name() -> String {
    "Battery Dashboard".to_string()
}

/// Where a cell's readings come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CellDef {
    /// Generated readings around the chemistry's nominal voltage.
    Chemistry { chemistry: CellChemistry },
    /// Operator-entered values, repeated every tick.
    Manual {
        #[serde(default = "default_voltage")]
        voltage: f64,
        #[serde(default)]
        current: f64,
        #[serde(default = "default_temperature")]
        temperature: f64,
        #[serde(default = "default_capacity")]
        capacity: f64,
        #[serde(default)]
        mode: CellMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chemistry: Option<CellChemistry>,
    },
}

impl CellDef {
    pub fn manual(reading: CellReading) -> Self {
        CellDef::Manual {
            voltage: reading.voltage,
            current: reading.current,
            temperature: reading.temperature,
            capacity: reading.capacity,
            mode: reading.mode,
            chemistry: None,
        }
    }

    pub fn chemistry(&self) -> Option<CellChemistry> {
        match self {
            CellDef::Chemistry { chemistry } => Some(*chemistry),
            CellDef::Manual { chemistry, .. } => *chemistry,
        }
    }

    /// The fixed reading of a manual cell.
    pub fn manual_reading(&self) -> Option<CellReading> {
        match self {
            CellDef::Chemistry { .. } => None,
            CellDef::Manual {
                voltage,
                current,
                temperature,
                capacity,
                mode,
                ..
            } => Some(CellReading::new(*voltage, *current, *temperature, *capacity, *mode)),
        }
    }
}

fn default_voltage() -> f64 {
    CellReading::default().voltage
}

fn default_temperature() -> f64 {
    CellReading::default().temperature
}

fn default_capacity() -> f64 {
    CellReading::default().capacity
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlertsDef {
    #[serde(default = "default_temp_threshold")]
    pub temp_threshold: f64,
    #[serde(default = "default_volt_threshold")]
    pub volt_threshold: f64,
}

impl Default for AlertsDef {
    fn default() -> Self {
        Self {
            temp_threshold: DEFAULT_TEMP_THRESHOLD,
            volt_threshold: DEFAULT_VOLT_THRESHOLD,
        }
    }
}

fn default_temp_threshold() -> f64 {
    DEFAULT_TEMP_THRESHOLD
}

fn default_volt_threshold() -> f64 {
    DEFAULT_VOLT_THRESHOLD
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoryDef {
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for HistoryDef {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_HISTORY,
        }
    }
}

fn default_max_history() -> usize {
    DEFAULT_HISTORY
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RefreshDef {
    #[serde(default)]
    pub auto_refresh: bool,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for RefreshDef {
    fn default() -> Self {
        Self {
            auto_refresh: false,
            interval_ms: REFRESH_INTERVAL_MS,
        }
    }
}

fn default_interval_ms() -> u64 {
    REFRESH_INTERVAL_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum TaskDef {
    #[serde(rename = "CC_CV")]
    CcCv {
        #[serde(default)]
        cc_cp: String,
        #[serde(default)]
        cv_voltage: f64,
        #[serde(default)]
        current: f64,
        #[serde(default)]
        capacity: f64,
        #[serde(default = "default_duration_s")]
        duration_s: u32,
    },
    #[serde(rename = "IDLE")]
    Idle {
        #[serde(default = "default_duration_s")]
        duration_s: u32,
    },
    #[serde(rename = "CC_CD")]
    CcCd {
        #[serde(default)]
        cc_cp: String,
        #[serde(default)]
        voltage: f64,
        #[serde(default)]
        capacity: f64,
        #[serde(default = "default_duration_s")]
        duration_s: u32,
    },
}

impl TaskDef {
    pub fn duration_s(&self) -> u32 {
        match self {
            TaskDef::CcCv { duration_s, .. }
            | TaskDef::Idle { duration_s }
            | TaskDef::CcCd { duration_s, .. } => *duration_s,
        }
    }
}

fn default_duration_s() -> u32 {
    DEFAULT_TASK_DURATION_S
}

/// Defaults for simulation runs started from this config.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    /// Fixed seed for reproducible runs; fresh entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            seed: None,
        }
    }
}

fn default_ticks() -> usize {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_defs_are_tagged_by_source() {
        let yaml = "- source: chemistry\n  chemistry: nmc\n- source: manual\n  voltage: 3.1\n  mode: Charging\n";
        let cells: Vec<CellDef> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cells[0].chemistry(), Some(CellChemistry::Nmc));
        assert_eq!(cells[0].manual_reading(), None);

        let manual = cells[1].manual_reading().unwrap();
        assert_eq!(manual.voltage, 3.1);
        assert_eq!(manual.temperature, 25.0);
        assert_eq!(manual.capacity, 100.0);
        assert_eq!(manual.mode, CellMode::Charging);
    }

    #[test]
    fn tasks_are_tagged_by_type() {
        let yaml = "- type: IDLE\n- type: CC_CD\n  cc_cp: 2A\n  voltage: 2.8\n  duration_s: 30\n";
        let tasks: Vec<TaskDef> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(tasks[0], TaskDef::Idle { duration_s: 10 });
        assert_eq!(tasks[1].duration_s(), 30);
        assert!(matches!(&tasks[1], TaskDef::CcCd { cc_cp, .. } if cc_cp == "2A"));
    }

    #[test]
    fn sections_default_when_missing() {
        let yaml = "version: 1\ncells:\n  - source: chemistry\n    chemistry: lfp\n";
        let config: DashboardConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.alerts, AlertsDef::default());
        assert_eq!(config.history.max_history, 100);
        assert_eq!(config.refresh.interval_ms, 1000);
        assert!(!config.refresh.auto_refresh);
        assert!(config.tasks.is_empty());
        assert_eq!(config.simulation.seed, None);
    }
}
