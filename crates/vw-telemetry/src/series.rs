//! Per-cell series extraction for chart consumers.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vw_core::{CellId, CellReading, Real};

use crate::history::HistoryStore;
use crate::TelemetryError;

/// Plotted quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Voltage,
    Current,
    Temperature,
    Capacity,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Voltage,
        Metric::Current,
        Metric::Temperature,
        Metric::Capacity,
    ];

    pub fn value(self, reading: &CellReading) -> Real {
        match self {
            Metric::Voltage => reading.voltage,
            Metric::Current => reading.current,
            Metric::Temperature => reading.temperature,
            Metric::Capacity => reading.capacity,
        }
    }

    /// Axis label used by the graphs.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Voltage => "Voltage (V)",
            Metric::Current => "Current (A)",
            Metric::Temperature => "Temperature (°C)",
            Metric::Capacity => "Capacity (%)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v" | "voltage" | "voltages" => Ok(Metric::Voltage),
            "a" | "current" | "currents" => Ok(Metric::Current),
            "t" | "temp" | "temperature" | "temperatures" => Ok(Metric::Temperature),
            "cap" | "capacity" | "capacities" => Ok(Metric::Capacity),
            other => Err(TelemetryError::UnknownMetric(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: Real,
}

impl HistoryStore {
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.iter().map(|s| s.timestamp()).collect()
    }

    /// One cell's values over time. Samples without that cell are skipped.
    pub fn cell_series(&self, cell: CellId, metric: Metric) -> Vec<SeriesPoint> {
        self.iter()
            .filter_map(|s| {
                s.cell(cell).map(|r| SeriesPoint {
                    timestamp: s.timestamp(),
                    value: metric.value(r),
                })
            })
            .collect()
    }

    /// One line per cell of the latest sample, the way the graphs tab draws them.
    pub fn metric_series(&self, metric: Metric) -> Vec<(CellId, Vec<SeriesPoint>)> {
        let cell_count = self.latest().map(|s| s.cell_count()).unwrap_or(0);
        (0..cell_count)
            .map(CellId::from_index)
            .map(|id| (id, self.cell_series(id, metric)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricSample;
    use chrono::{Duration, TimeZone};

    fn reading(voltage: Real, temperature: Real) -> CellReading {
        CellReading {
            voltage,
            temperature,
            ..CellReading::default()
        }
    }

    fn history() -> HistoryStore {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let mut store = HistoryStore::default();
        store.append(MetricSample::new(t0, vec![reading(3.30, 30.0)]).unwrap());
        store.append(
            MetricSample::new(
                t0 + Duration::seconds(1),
                vec![reading(3.31, 31.0), reading(3.60, 28.0)],
            )
            .unwrap(),
        );
        store
    }

    #[test]
    fn metric_parses_aliases() {
        assert_eq!("temps".parse::<Metric>().ok(), None);
        assert_eq!("Temperature".parse::<Metric>().unwrap(), Metric::Temperature);
        assert_eq!("voltages".parse::<Metric>().unwrap(), Metric::Voltage);
        assert!(matches!(
            "soc".parse::<Metric>(),
            Err(TelemetryError::UnknownMetric(_))
        ));
    }

    #[test]
    fn cell_series_skips_missing_cells() {
        let store = history();
        let second = CellId::from_number(2).unwrap();
        let series = store.cell_series(second, Metric::Voltage);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 3.60);

        let first = store.cell_series(CellId::from_index(0), Metric::Temperature);
        let values: Vec<Real> = first.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![30.0, 31.0]);
    }

    #[test]
    fn metric_series_follows_latest_cell_count() {
        let store = history();
        let lines = store.metric_series(Metric::Voltage);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0.number(), 1);
        assert_eq!(store.timestamps().len(), 2);
        assert!(HistoryStore::default().metric_series(Metric::Current).is_empty());
    }
}
