//! Read-only snapshot handed to renderers.

use serde::Serialize;
use uuid::Uuid;
use vw_core::{CellChemistry, CellId, CellReading, Real};
use vw_monitor::{Aggregate, Alert, AlertThresholds};
use vw_telemetry::HistoryStore;

/// One cell of the latest sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellCard {
    pub id: CellId,
    pub chemistry: Option<CellChemistry>,
    pub reading: CellReading,
    /// Estimated from the chemistry's voltage window; `None` without a chemistry.
    pub charge_percent: Option<Real>,
}

impl CellCard {
    pub fn new(id: CellId, chemistry: Option<CellChemistry>, reading: CellReading) -> Self {
        Self {
            id,
            chemistry,
            reading,
            charge_percent: chemistry.map(|c| c.voltage_bounds().charge_percent(reading.voltage)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub session_id: Uuid,
    pub history: &'a HistoryStore,
    pub thresholds: AlertThresholds,
    pub aggregate: Option<Aggregate>,
    pub alerts: &'a [Alert],
    pub cells: Vec<CellCard>,
}

impl DashboardView<'_> {
    /// Nothing has been sampled yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn all_normal(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn alerts_for(&self, cell: CellId) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts.iter().filter(move |a| a.cell() == cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vw_core::CellMode;

    #[test]
    fn charge_percent_needs_a_chemistry() {
        let reading = CellReading::new(3.2, 0.0, 25.0, 100.0, CellMode::Idle);
        let lfp = CellCard::new(CellId::from_index(0), Some(CellChemistry::Lfp), reading);
        let unknown = CellCard::new(CellId::from_index(1), None, reading);

        let pct = lfp.charge_percent.unwrap();
        assert!((0.0..=100.0).contains(&pct));
        assert_eq!(unknown.charge_percent, None);
    }
}
