//! Finite tick sequence feeding the history store.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use vw_core::CellId;
use vw_core::limits::{MAX_CELLS, MIN_CELLS};
use vw_telemetry::{HistoryStore, MetricSample};

use crate::error::{SimError, SimResult};
use crate::source::DataSource;

/// How samples are timestamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timestamping {
    /// Current wall-clock time when the tick is pulled.
    WallClock,
    /// `start + index * interval`, independent of when the tick is pulled.
    Virtual { start: DateTime<Utc>, interval: Duration },
}

/// One produced tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// 0-based.
    pub index: usize,
    pub sample: MetricSample,
}

#[derive(Debug, Clone)]
pub struct SimulationRunner {
    cell_count: usize,
    timestamping: Timestamping,
}

impl SimulationRunner {
    /// Runner for 1..=20 cells stamping ticks with wall-clock time.
    pub fn new(cell_count: usize) -> SimResult<Self> {
        if !(MIN_CELLS..=MAX_CELLS).contains(&cell_count) {
            return Err(SimError::CellCount {
                count: cell_count,
                min: MIN_CELLS,
                max: MAX_CELLS,
            });
        }
        Ok(Self {
            cell_count,
            timestamping: Timestamping::WallClock,
        })
    }

    pub fn with_timestamping(mut self, timestamping: Timestamping) -> Self {
        self.timestamping = timestamping;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Start a fresh run of `tick_count` ticks.
    ///
    /// `history` is cleared up front. Each pulled tick reads every cell from
    /// `source`, appends the sample to `history`, and yields it. Dropping the
    /// iterator early leaves the ticks pulled so far in `history`. A source
    /// reading that fails validation ends the sequence after yielding the error.
    pub fn run<'a, S>(
        &self,
        history: &'a mut HistoryStore,
        tick_count: usize,
        source: &'a mut S,
    ) -> Ticks<'a, S>
    where
        S: DataSource + ?Sized,
    {
        history.clear();
        tracing::info!(ticks = tick_count, cells = self.cell_count, "simulation started");
        Ticks {
            history,
            source,
            cell_count: self.cell_count,
            timestamping: self.timestamping,
            tick_count,
            next_index: 0,
            failed: false,
        }
    }
}

/// Lazy, finite tick iterator returned by [`SimulationRunner::run`].
pub struct Ticks<'a, S: DataSource + ?Sized> {
    history: &'a mut HistoryStore,
    source: &'a mut S,
    cell_count: usize,
    timestamping: Timestamping,
    tick_count: usize,
    next_index: usize,
    failed: bool,
}

impl<S: DataSource + ?Sized> Ticks<'_, S> {
    /// Read access to the history filled so far.
    pub fn history(&self) -> &HistoryStore {
        self.history
    }

    pub fn remaining(&self) -> usize {
        if self.failed {
            0
        } else {
            self.tick_count - self.next_index
        }
    }

    fn timestamp(&self, index: usize) -> DateTime<Utc> {
        match self.timestamping {
            Timestamping::WallClock => Utc::now(),
            Timestamping::Virtual { start, interval } => {
                let step = TimeDelta::from_std(interval).unwrap_or(TimeDelta::zero());
                let offset = step
                    .checked_mul(i32::try_from(index).unwrap_or(i32::MAX))
                    .unwrap_or(TimeDelta::zero());
                start.checked_add_signed(offset).unwrap_or(start)
            }
        }
    }
}

impl<S: DataSource + ?Sized> Iterator for Ticks<'_, S> {
    type Item = SimResult<Tick>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.tick_count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;

        let readings = (0..self.cell_count)
            .map(|i| self.source.next_reading(CellId::from_index(i)))
            .collect();
        let sample = match MetricSample::new(self.timestamp(index), readings) {
            Ok(sample) => sample,
            Err(e) => {
                self.failed = true;
                tracing::warn!(tick = index, error = %e, "simulation stopped on invalid reading");
                return Some(Err(e.into()));
            }
        };

        self.history.append(sample.clone());
        tracing::debug!(tick = index, history_len = self.history.len(), "tick appended");
        Some(Ok(Tick { index, sample }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FixedSource, RandomSource};
    use chrono::TimeZone;
    use vw_core::{CellChemistry, CellReading};

    #[test]
    fn rejects_cell_counts_outside_range() {
        assert!(matches!(
            SimulationRunner::new(0),
            Err(SimError::CellCount { count: 0, .. })
        ));
        assert!(SimulationRunner::new(21).is_err());
        assert!(SimulationRunner::new(20).is_ok());
    }

    #[test]
    fn yields_exactly_tick_count() {
        let runner = SimulationRunner::new(3).unwrap();
        let mut history = HistoryStore::default();
        let mut source = RandomSource::new(vec![CellChemistry::Nmc; 3], 3);

        let ticks: Vec<Tick> = runner
            .run(&mut history, 12, &mut source)
            .collect::<SimResult<_>>()
            .unwrap();

        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks.iter().map(|t| t.index).collect::<Vec<_>>(), (0..12).collect::<Vec<_>>());
        assert!(ticks.iter().all(|t| t.sample.cell_count() == 3));
        assert_eq!(history.len(), 12);
        assert_eq!(history.latest(), Some(&ticks[11].sample));
    }

    #[test]
    fn virtual_timestamps_are_spaced() {
        let start = Utc.with_ymd_and_hms(2025, 2, 2, 2, 0, 0).unwrap();
        let runner = SimulationRunner::new(1).unwrap().with_timestamping(Timestamping::Virtual {
            start,
            interval: Duration::from_millis(1000),
        });
        let mut history = HistoryStore::default();
        let mut source = FixedSource::constant(1, CellReading::default());

        let stamps: Vec<DateTime<Utc>> = runner
            .run(&mut history, 3, &mut source)
            .map(|t| t.unwrap().sample.timestamp())
            .collect();

        assert_eq!(
            stamps,
            vec![start, start + TimeDelta::seconds(1), start + TimeDelta::seconds(2)]
        );
    }

    #[test]
    fn invalid_reading_ends_the_sequence() {
        let runner = SimulationRunner::new(1).unwrap();
        let mut history = HistoryStore::default();
        let bad = CellReading {
            voltage: f64::NAN,
            ..CellReading::default()
        };
        let mut source = FixedSource::from_rows(vec![vec![CellReading::default()], vec![bad]]);

        let results: Vec<SimResult<Tick>> = runner.run(&mut history, 5, &mut source).collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SimError::Telemetry(_))));
        assert_eq!(history.len(), 1);
    }
}
