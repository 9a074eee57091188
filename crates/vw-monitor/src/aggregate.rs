use serde::{Deserialize, Serialize};
use vw_core::Real;
use vw_telemetry::MetricSample;

/// Cell averages shown on the dashboard summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub avg_voltage: Real,
    pub avg_temperature: Real,
    pub avg_capacity: Real,
}

/// Arithmetic means across every cell of the sample.
pub fn aggregate(sample: &MetricSample) -> Aggregate {
    Aggregate {
        avg_voltage: sample.mean_of(|r| r.voltage),
        avg_temperature: sample.mean_of(|r| r.temperature),
        avg_capacity: sample.mean_of(|r| r.capacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vw_core::{CellMode, CellReading};

    #[test]
    fn means_across_cells() {
        let sample = MetricSample::new(
            Utc::now(),
            vec![
                CellReading::new(3.0, 1.0, 20.0, 50.0, CellMode::Charging),
                CellReading::new(4.0, 1.0, 30.0, 100.0, CellMode::Discharging),
            ],
        )
        .unwrap();
        let agg = aggregate(&sample);
        assert!((agg.avg_voltage - 3.5).abs() < 1e-12);
        assert!((agg.avg_temperature - 25.0).abs() < 1e-12);
        assert!((agg.avg_capacity - 75.0).abs() < 1e-12);
    }

    #[test]
    fn single_cell_is_its_own_average() {
        let reading = CellReading::new(3.3, 0.4, 33.3, 66.0, CellMode::Idle);
        let sample = MetricSample::new(Utc::now(), vec![reading]).unwrap();
        let agg = aggregate(&sample);
        assert_eq!(agg.avg_voltage, 3.3);
        assert_eq!(agg.avg_temperature, 33.3);
        assert_eq!(agg.avg_capacity, 66.0);
    }
}
