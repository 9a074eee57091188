//! Injectable telemetry sources.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vw_core::{CellChemistry, CellId, CellMode, CellReading, round_to};

/// Produces one reading for one cell per call.
///
/// The runner asks for cells in ascending order once per tick, so a source may
/// rely on that order to advance its own state.
pub trait DataSource {
    fn next_reading(&mut self, cell: CellId) -> CellReading;
}

impl<F> DataSource for F
where
    F: FnMut(CellId) -> CellReading,
{
    fn next_reading(&mut self, cell: CellId) -> CellReading {
        self(cell)
    }
}

/// Synthetic readings driven by each cell's chemistry.
///
/// Voltage sits at the chemistry's nominal value, current is uniform in
/// `[0.5, 2.0]` A, temperature uniform in `[25, 40]` °C, and capacity is
/// `voltage * current`.
#[derive(Debug, Clone)]
pub struct RandomSource {
    chemistries: Vec<CellChemistry>,
    rng: StdRng,
}

impl RandomSource {
    /// Deterministic source. Cells beyond `chemistries` are treated as LFP.
    pub fn new(chemistries: Vec<CellChemistry>, seed: u64) -> Self {
        Self {
            chemistries,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy(chemistries: Vec<CellChemistry>) -> Self {
        Self {
            chemistries,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn chemistry(&self, cell: CellId) -> CellChemistry {
        self.chemistries
            .get(cell.index())
            .copied()
            .unwrap_or(CellChemistry::Lfp)
    }
}

impl DataSource for RandomSource {
    fn next_reading(&mut self, cell: CellId) -> CellReading {
        let voltage = self.chemistry(cell).nominal_voltage();
        let current = round_to(self.rng.gen_range(0.5..=2.0), 2);
        let temperature = round_to(self.rng.gen_range(25.0..=40.0), 1);
        CellReading {
            voltage,
            current,
            temperature,
            capacity: round_to(voltage * current, 2),
            mode: CellMode::Idle,
        }
    }
}

/// Replays explicit test vectors, cycling per cell.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    per_cell: Vec<Vec<CellReading>>,
    cursors: Vec<usize>,
}

impl FixedSource {
    /// `rows[tick][cell]`. Ragged rows leave the missing cells out of that cell's cycle.
    pub fn from_rows(rows: Vec<Vec<CellReading>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut per_cell = vec![Vec::with_capacity(rows.len()); width];
        for row in rows {
            for (cell, reading) in row.into_iter().enumerate() {
                per_cell[cell].push(reading);
            }
        }
        Self {
            cursors: vec![0; width],
            per_cell,
        }
    }

    /// The same reading for every cell on every tick.
    pub fn constant(cell_count: usize, reading: CellReading) -> Self {
        Self::from_rows(vec![vec![reading; cell_count]])
    }
}

impl DataSource for FixedSource {
    /// Cells without vectors report the default reading.
    fn next_reading(&mut self, cell: CellId) -> CellReading {
        let i = cell.index();
        match self.per_cell.get(i) {
            Some(readings) if !readings.is_empty() => {
                let reading = readings[self.cursors[i] % readings.len()];
                self.cursors[i] += 1;
                reading
            }
            _ => CellReading::default(),
        }
    }
}

/// Operator-entered values, reported unchanged until edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualSource {
    readings: Vec<CellReading>,
}

impl ManualSource {
    pub fn new(readings: Vec<CellReading>) -> Self {
        Self { readings }
    }

    /// `cell_count` cells at the form defaults (3.7 V, 0 A, 25 °C, 100 %, Idle).
    pub fn with_defaults(cell_count: usize) -> Self {
        Self::new(vec![CellReading::default(); cell_count])
    }

    pub fn readings(&self) -> &[CellReading] {
        &self.readings
    }

    /// Edit one cell; grows the form with defaults when needed.
    pub fn set(&mut self, cell: CellId, reading: CellReading) {
        let i = cell.index();
        if i >= self.readings.len() {
            self.readings.resize(i + 1, CellReading::default());
        }
        self.readings[i] = reading;
    }
}

impl DataSource for ManualSource {
    fn next_reading(&mut self, cell: CellId) -> CellReading {
        self.readings
            .get(cell.index())
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_source_stays_in_dashboard_ranges() {
        let mut source = RandomSource::new(vec![CellChemistry::Lfp, CellChemistry::Nmc], 7);
        for _ in 0..200 {
            let lfp = source.next_reading(CellId::from_index(0));
            let nmc = source.next_reading(CellId::from_index(1));
            assert_eq!(lfp.voltage, 3.2);
            assert_eq!(nmc.voltage, 3.6);
            for r in [lfp, nmc] {
                assert!((0.5..=2.0).contains(&r.current));
                assert!((25.0..=40.0).contains(&r.temperature));
                assert!((r.capacity - round_to(r.voltage * r.current, 2)).abs() < 1e-12);
                assert_eq!(r.mode, CellMode::Idle);
            }
        }
    }

    #[test]
    fn random_source_is_reproducible_per_seed() {
        let mut a = RandomSource::new(vec![CellChemistry::Nmc], 42);
        let mut b = RandomSource::new(vec![CellChemistry::Nmc], 42);
        let cell = CellId::from_index(0);
        for _ in 0..10 {
            assert_eq!(a.next_reading(cell), b.next_reading(cell));
        }
    }

    #[test]
    fn unknown_cells_default_to_lfp() {
        let source = RandomSource::new(Vec::new(), 1);
        assert_eq!(source.chemistry(CellId::from_index(4)), CellChemistry::Lfp);
    }

    #[test]
    fn fixed_source_cycles_per_cell() {
        let r = |v: f64| CellReading {
            voltage: v,
            ..CellReading::default()
        };
        let mut source = FixedSource::from_rows(vec![vec![r(3.0), r(3.5)], vec![r(3.1)]]);
        let c1 = CellId::from_index(0);
        let c2 = CellId::from_index(1);

        assert_eq!(source.next_reading(c1).voltage, 3.0);
        assert_eq!(source.next_reading(c2).voltage, 3.5);
        assert_eq!(source.next_reading(c1).voltage, 3.1);
        assert_eq!(source.next_reading(c2).voltage, 3.5);
        assert_eq!(source.next_reading(c1).voltage, 3.0);
        assert_eq!(source.next_reading(CellId::from_index(5)), CellReading::default());
    }

    #[test]
    fn manual_source_reports_edits() {
        let mut source = ManualSource::with_defaults(2);
        let hot = CellReading {
            temperature: 48.0,
            ..CellReading::default()
        };
        source.set(CellId::from_index(3), hot);
        assert_eq!(source.readings().len(), 4);
        assert_eq!(source.next_reading(CellId::from_index(3)).temperature, 48.0);
        assert_eq!(source.next_reading(CellId::from_index(0)), CellReading::default());
    }

    #[test]
    fn closures_are_sources() {
        let mut calls = 0;
        let mut source = |cell: CellId| {
            calls += 1;
            CellReading {
                voltage: 3.0 + cell.index() as f64,
                ..CellReading::default()
            }
        };
        assert_eq!(source.next_reading(CellId::from_index(1)).voltage, 4.0);
        assert_eq!(calls, 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn random_readings_stay_in_band(seed in any::<u64>(), nmc in any::<bool>(), cell in 0_usize..20) {
            let chemistry = if nmc { CellChemistry::Nmc } else { CellChemistry::Lfp };
            let mut source = RandomSource::new(vec![chemistry; 20], seed);
            let reading = source.next_reading(CellId::from_index(cell));

            prop_assert_eq!(reading.voltage, chemistry.nominal_voltage());
            prop_assert!((0.5..=2.0).contains(&reading.current));
            prop_assert!((25.0..=40.0).contains(&reading.temperature));
            prop_assert!(reading.validate().is_ok());
        }
    }
}
