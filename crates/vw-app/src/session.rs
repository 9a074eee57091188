//! Explicit dashboard state owned by the frontend.
//!
//! Every user action is one method call; after each call the frontend polls
//! [`DashboardSession::view`] and redraws.

use std::time::Instant;

use uuid::Uuid;
use vw_core::limits::clamp_history;
use vw_core::{CellChemistry, CellId, CellReading};
use vw_monitor::{Aggregate, Alert, AlertThresholds, aggregate, evaluate};
use vw_project::DashboardConfig;
use vw_sim::{DataSource, ManualSource, SimulationRunner, TickClock, TickConfig};
use vw_telemetry::{HistoryStore, MetricSample};

use crate::dashboard::{CellCard, DashboardView};
use crate::error::{AppError, AppResult};
use crate::progress::SimProgressEvent;
use crate::source::ConfiguredSource;

/// Initial manual entry form: fixed readings as configured, chemistry cells
/// at their resting voltage.
fn form_seed(config: &DashboardConfig) -> Vec<CellReading> {
    config
        .cells
        .iter()
        .map(|cell| match (cell.manual_reading(), cell.chemistry()) {
            (Some(reading), _) => reading,
            (None, Some(chemistry)) => CellReading {
                voltage: chemistry.nominal_voltage(),
                ..CellReading::default()
            },
            (None, None) => CellReading::default(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    id: Uuid,
    config: DashboardConfig,
    history: HistoryStore,
    thresholds: AlertThresholds,
    chemistries: Vec<Option<CellChemistry>>,
    manual: ManualSource,
    latest_aggregate: Option<Aggregate>,
    latest_alerts: Vec<Alert>,
    auto_refresh: bool,
    refresh_clock: TickClock,
}

impl DashboardSession {
    /// Fresh session with empty history. The config must validate.
    pub fn new(config: DashboardConfig) -> AppResult<Self> {
        vw_project::validate_config(&config)?;
        let thresholds = config.thresholds()?;
        let history = HistoryStore::new(config.max_history());
        let manual = ManualSource::new(form_seed(&config));
        let refresh_clock = TickClock::new(TickConfig::from_interval_ms(config.refresh.interval_ms)?, 0.0);
        let id = Uuid::new_v4();
        tracing::info!(session = %id, cells = config.cell_count(), "dashboard session created");

        Ok(Self {
            id,
            chemistries: config.chemistries(),
            auto_refresh: config.refresh.auto_refresh,
            config,
            history,
            thresholds,
            manual,
            latest_aggregate: None,
            latest_alerts: Vec::new(),
            refresh_clock,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Config as currently applied, including threshold and history edits.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn cell_count(&self) -> usize {
        self.config.cell_count()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn thresholds(&self) -> AlertThresholds {
        self.thresholds
    }

    pub fn manual_readings(&self) -> &[CellReading] {
        self.manual.readings()
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Edit one cell of the manual entry form.
    pub fn set_reading(&mut self, cell: CellId, reading: CellReading) -> AppResult<()> {
        if cell.index() >= self.cell_count() {
            return Err(AppError::InvalidInput(format!(
                "{cell} does not exist ({} cells configured)",
                self.cell_count()
            )));
        }
        reading.validate()?;
        self.manual.set(cell, reading);
        Ok(())
    }

    /// Sample the manual entry form now and refresh alerts and averages.
    pub fn update_now(&mut self) -> AppResult<&MetricSample> {
        let readings = read_cells(&mut self.manual, self.config.cell_count());
        self.ingest(MetricSample::now(readings)?)
    }

    /// Sample `source` now and refresh alerts and averages.
    pub fn update_from<S: DataSource + ?Sized>(&mut self, source: &mut S) -> AppResult<&MetricSample> {
        let readings = read_cells(source, self.cell_count());
        self.ingest(MetricSample::now(readings)?)
    }

    /// Append an externally produced sample.
    pub fn ingest(&mut self, sample: MetricSample) -> AppResult<&MetricSample> {
        if sample.cell_count() != self.cell_count() {
            return Err(AppError::InvalidInput(format!(
                "sample has {} cells, session has {}",
                sample.cell_count(),
                self.cell_count()
            )));
        }
        self.latest_aggregate = Some(aggregate(&sample));
        self.latest_alerts = evaluate(&sample, &self.thresholds);
        if !self.latest_alerts.is_empty() {
            tracing::debug!(alerts = self.latest_alerts.len(), "thresholds exceeded");
        }
        self.history.append(sample);
        self.history
            .latest()
            .ok_or_else(|| AppError::InvalidInput("history dropped the new sample".to_string()))
    }

    /// Replace the thresholds and re-evaluate the latest sample against them.
    pub fn apply_thresholds(&mut self, temp_threshold: f64, volt_threshold: f64) -> AppResult<()> {
        let thresholds = AlertThresholds::new(temp_threshold, volt_threshold)?;
        self.thresholds = thresholds;
        self.config.alerts.temp_threshold = temp_threshold;
        self.config.alerts.volt_threshold = volt_threshold;
        self.latest_alerts = self
            .history
            .latest()
            .map(|s| evaluate(s, &thresholds))
            .unwrap_or_default();
        Ok(())
    }

    /// Resize the history, evicting the oldest samples if it shrinks.
    /// Returns the applied capacity, clamped to `[10, 1000]`.
    pub fn set_max_history(&mut self, max_history: usize) -> usize {
        let applied = clamp_history(max_history);
        if applied != max_history {
            tracing::warn!(requested = max_history, applied, "max_history out of range, clamped");
        }
        self.history.set_capacity(applied);
        self.config.history.max_history = applied;
        applied
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.latest_aggregate = None;
        self.latest_alerts.clear();
        tracing::info!(session = %self.id, "history cleared");
    }

    /// Turn auto-refresh on or off. The first refresh is due at `now_s`.
    pub fn set_auto_refresh(&mut self, enabled: bool, now_s: f64) {
        self.auto_refresh = enabled;
        self.config.refresh.auto_refresh = enabled;
        self.refresh_clock = TickClock::new(self.refresh_clock.config, now_s);
    }

    /// Seconds until the next auto-refresh; `None` when auto-refresh is off.
    pub fn time_until_refresh(&self, now_s: f64) -> Option<f64> {
        self.auto_refresh
            .then(|| self.refresh_clock.time_until_tick(now_s))
    }

    /// Refresh from `source` if auto-refresh is on and a tick is due.
    pub fn poll_refresh<S: DataSource + ?Sized>(&mut self, now_s: f64, source: &mut S) -> AppResult<bool> {
        if !self.auto_refresh || !self.refresh_clock.should_tick(now_s) {
            return Ok(false);
        }
        self.update_from(source)?;
        self.refresh_clock.advance();
        Ok(true)
    }

    /// Run `ticks` simulation ticks from `source` into a fresh history.
    ///
    /// Alerts and averages follow the last produced tick. Returns the number of
    /// ticks produced.
    pub fn run_simulation<S: DataSource + ?Sized>(
        &mut self,
        source: &mut S,
        ticks: usize,
        mut progress_cb: Option<&mut dyn FnMut(SimProgressEvent)>,
    ) -> AppResult<usize> {
        let runner = SimulationRunner::new(self.cell_count())?;
        let started = Instant::now();
        self.latest_aggregate = None;
        self.latest_alerts.clear();

        let mut produced = 0;
        for tick in runner.run(&mut self.history, ticks, source) {
            let tick = tick?;
            produced += 1;
            self.latest_aggregate = Some(aggregate(&tick.sample));
            self.latest_alerts = evaluate(&tick.sample, &self.thresholds);
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(SimProgressEvent {
                    tick: produced,
                    total: ticks,
                    alert_count: self.latest_alerts.len(),
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                });
            }
        }

        tracing::info!(
            session = %self.id,
            ticks = produced,
            history_len = self.history.len(),
            "simulation finished"
        );
        Ok(produced)
    }

    /// Simulate from the configured cells. `ticks` and `seed` fall back to the
    /// config's simulation defaults.
    pub fn simulate(
        &mut self,
        ticks: Option<usize>,
        seed: Option<u64>,
        progress_cb: Option<&mut dyn FnMut(SimProgressEvent)>,
    ) -> AppResult<usize> {
        let ticks = ticks.unwrap_or(self.config.simulation.ticks);
        let seed = seed.or(self.config.simulation.seed);
        let mut source = ConfiguredSource::from_config(&self.config, seed);
        self.run_simulation(&mut source, ticks, progress_cb)
    }

    pub fn view(&self) -> DashboardView<'_> {
        let cells = self
            .history
            .latest()
            .map(|sample| {
                sample
                    .iter()
                    .map(|(id, reading)| {
                        let chemistry = self.chemistries.get(id.index()).copied().flatten();
                        CellCard::new(id, chemistry, *reading)
                    })
                    .collect()
            })
            .unwrap_or_default();

        DashboardView {
            session_id: self.id,
            history: &self.history,
            thresholds: self.thresholds,
            aggregate: self.latest_aggregate,
            alerts: &self.latest_alerts,
            cells,
        }
    }
}

fn read_cells<S: DataSource + ?Sized>(source: &mut S, cell_count: usize) -> Vec<CellReading> {
    (0..cell_count)
        .map(|i| source.next_reading(CellId::from_index(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vw_core::CellMode;
    use vw_sim::FixedSource;

    fn session() -> DashboardSession {
        DashboardSession::new(DashboardConfig::default()).unwrap()
    }

    fn reading(voltage: f64, temperature: f64) -> CellReading {
        CellReading::new(voltage, 1.0, temperature, 80.0, CellMode::Charging)
    }

    #[test]
    fn manual_update_appends_and_evaluates() {
        let mut s = session();
        s.set_reading(CellId::from_index(0), reading(3.7, 41.0)).unwrap();
        s.set_reading(CellId::from_index(1), reading(3.7, 39.9)).unwrap();
        s.set_reading(CellId::from_index(2), reading(3.7, 40.0)).unwrap();

        s.update_now().unwrap();
        let view = s.view();

        assert_eq!(view.history.len(), 1);
        assert_eq!(view.alerts.len(), 1);
        assert_eq!(view.alerts[0].cell(), CellId::from_index(0));
        assert_eq!(view.cells.len(), 3);
        assert!(view.cells.iter().all(|c| c.chemistry == Some(CellChemistry::Lfp)));
    }

    #[test]
    fn chemistry_cells_start_at_their_resting_voltage() {
        let mut s = session();
        assert!(s.manual_readings().iter().all(|r| r.voltage == 3.2));

        s.update_now().unwrap();
        let view = s.view();
        for card in &view.cells {
            assert_eq!(card.reading.voltage, CellChemistry::Lfp.nominal_voltage());
            let pct = card.charge_percent.unwrap();
            assert!((pct - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn manual_cells_keep_their_configured_reading() {
        let mut config = DashboardConfig::default();
        config.cells[1] = vw_project::CellDef::manual(reading(3.4, 30.0));
        let s = DashboardSession::new(config).unwrap();
        assert_eq!(s.manual_readings()[0].voltage, 3.2);
        assert_eq!(s.manual_readings()[1], reading(3.4, 30.0));
    }

    #[test]
    fn rejects_unknown_cells_and_bad_readings() {
        let mut s = session();
        assert!(matches!(
            s.set_reading(CellId::from_index(3), CellReading::default()),
            Err(AppError::InvalidInput(_))
        ));
        let bad = CellReading {
            capacity: 140.0,
            ..CellReading::default()
        };
        assert!(s.set_reading(CellId::from_index(0), bad).is_err());
    }

    #[test]
    fn thresholds_reevaluate_the_latest_sample() {
        let mut s = session();
        s.set_reading(CellId::from_index(1), reading(3.3, 30.0)).unwrap();
        s.update_now().unwrap();
        // LFP cells rest at 3.2 V, under the default 3.5 V threshold
        assert_eq!(s.view().alerts.len(), 3);

        s.apply_thresholds(40.0, 3.0).unwrap();
        assert!(s.view().all_normal());
        assert!(s.apply_thresholds(140.0, 3.0).is_err());
        assert_eq!(s.thresholds().volt_threshold, 3.0);
    }

    #[test]
    fn max_history_is_clamped_and_evicts() {
        let mut s = session();
        for _ in 0..30 {
            s.update_now().unwrap();
        }
        assert_eq!(s.set_max_history(2), 10);
        assert_eq!(s.history().len(), 10);
        assert_eq!(s.config().history.max_history, 10);
    }

    #[test]
    fn clear_history_resets_latest_values() {
        let mut s = session();
        s.update_now().unwrap();
        s.clear_history();
        let view = s.view();
        assert!(view.is_empty());
        assert!(view.aggregate.is_none());
        assert!(view.cells.is_empty());
    }

    #[test]
    fn auto_refresh_follows_the_tick_clock() {
        let mut s = session();
        let mut source = FixedSource::constant(3, CellReading::default());

        assert!(!s.poll_refresh(0.0, &mut source).unwrap());
        assert_eq!(s.time_until_refresh(0.0), None);

        s.set_auto_refresh(true, 0.0);
        assert!(s.poll_refresh(0.0, &mut source).unwrap());
        assert!(!s.poll_refresh(0.5, &mut source).unwrap());
        assert_eq!(s.time_until_refresh(0.5), Some(0.5));
        assert!(s.poll_refresh(1.0, &mut source).unwrap());
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn simulation_replaces_history_and_reports_progress() {
        let mut s = session();
        s.update_now().unwrap();

        let mut events = Vec::new();
        let mut cb = |e: SimProgressEvent| events.push(e.tick);
        let produced = s.simulate(Some(15), Some(1), Some(&mut cb)).unwrap();

        assert_eq!(produced, 15);
        assert_eq!(s.history().len(), 15);
        assert_eq!(events, (1..=15).collect::<Vec<_>>());
        assert!(s.view().aggregate.is_some());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn history_never_exceeds_the_applied_capacity(
            requested in 0_usize..40,
            updates in 0_usize..60,
        ) {
            let mut s = DashboardSession::new(DashboardConfig::default()).unwrap();
            let applied = s.set_max_history(requested);
            for _ in 0..updates {
                s.update_now().unwrap();
                prop_assert!(s.history().len() <= applied);
            }
            prop_assert_eq!(s.history().len(), updates.min(applied));
        }
    }
}
