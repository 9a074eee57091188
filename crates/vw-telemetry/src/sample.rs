//! Immutable snapshot of one reading tick across all cells.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vw_core::{CellId, CellReading, Real, mean};

use crate::{TelemetryError, TelemetryResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    timestamp: DateTime<Utc>,
    cells: Vec<CellReading>,
}

impl MetricSample {
    /// Build a sample. Fails on zero cells or on a non-finite reading.
    pub fn new(timestamp: DateTime<Utc>, cells: Vec<CellReading>) -> TelemetryResult<Self> {
        if cells.is_empty() {
            return Err(TelemetryError::EmptySample);
        }
        for (i, reading) in cells.iter().enumerate() {
            reading
                .validate()
                .map_err(|source| TelemetryError::InvalidReading {
                    cell: CellId::from_index(i),
                    source,
                })?;
        }
        Ok(Self { timestamp, cells })
    }

    /// Sample stamped with the current wall-clock time.
    pub fn now(cells: Vec<CellReading>) -> TelemetryResult<Self> {
        Self::new(Utc::now(), cells)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[CellReading] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&CellReading> {
        self.cells.get(id.index())
    }

    /// Readings paired with their cell ids, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &CellReading)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, r)| (CellId::from_index(i), r))
    }

    pub fn voltages(&self) -> impl Iterator<Item = Real> + '_ {
        self.cells.iter().map(|r| r.voltage)
    }

    pub fn currents(&self) -> impl Iterator<Item = Real> + '_ {
        self.cells.iter().map(|r| r.current)
    }

    pub fn temperatures(&self) -> impl Iterator<Item = Real> + '_ {
        self.cells.iter().map(|r| r.temperature)
    }

    pub fn capacities(&self) -> impl Iterator<Item = Real> + '_ {
        self.cells.iter().map(|r| r.capacity)
    }

    /// Mean of one field across cells. Never `None` since a sample has at least one cell.
    pub fn mean_of(&self, field: impl Fn(&CellReading) -> Real) -> Real {
        mean(self.cells.iter().map(field)).unwrap_or_default()
    }
}
