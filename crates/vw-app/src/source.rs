//! Data source built from the configured cells.

use vw_core::{CellChemistry, CellId, CellReading};
use vw_project::DashboardConfig;
use vw_sim::{DataSource, RandomSource};

/// Manual cells repeat their configured reading; every other cell is
/// generated from its chemistry.
#[derive(Debug, Clone)]
pub struct ConfiguredSource {
    manual: Vec<Option<CellReading>>,
    generator: RandomSource,
}

impl ConfiguredSource {
    /// `seed` makes the generated cells reproducible; `None` draws from entropy.
    pub fn from_config(config: &DashboardConfig, seed: Option<u64>) -> Self {
        let chemistries: Vec<CellChemistry> = config
            .chemistries()
            .into_iter()
            .map(|c| c.unwrap_or(CellChemistry::Lfp))
            .collect();
        let generator = match seed {
            Some(seed) => RandomSource::new(chemistries, seed),
            None => RandomSource::from_entropy(chemistries),
        };
        Self {
            manual: config.manual_readings(),
            generator,
        }
    }
}

impl DataSource for ConfiguredSource {
    fn next_reading(&mut self, cell: CellId) -> CellReading {
        match self.manual.get(cell.index()).copied().flatten() {
            Some(reading) => reading,
            None => self.generator.next_reading(cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vw_core::CellMode;
    use vw_project::CellDef;

    #[test]
    fn manual_cells_repeat_and_others_generate() {
        let fixed = CellReading::new(3.0, 0.0, 22.0, 50.0, CellMode::Idle);
        let mut config = DashboardConfig::default();
        config.cells = vec![
            CellDef::Chemistry {
                chemistry: CellChemistry::Nmc,
            },
            CellDef::manual(fixed),
        ];

        let mut source = ConfiguredSource::from_config(&config, Some(9));
        for _ in 0..5 {
            let generated = source.next_reading(CellId::from_index(0));
            assert_eq!(generated.voltage, 3.6);
            assert!((0.5..=2.0).contains(&generated.current));
            assert_eq!(source.next_reading(CellId::from_index(1)), fixed);
        }
    }
}
