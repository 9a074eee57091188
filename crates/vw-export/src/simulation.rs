//! History exports: per-tick cell means, or one row per cell per tick.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use vw_core::round_to;
use vw_telemetry::MetricSample;

use crate::{ExportResult, writer};

pub const SIMULATION_HEADER: [&str; 4] = ["Time", "Voltage", "Current", "Temperature"];
pub const PER_CELL_HEADER: [&str; 7] = [
    "Time",
    "Cell",
    "Voltage",
    "Current",
    "Temperature",
    "Capacity",
    "Mode",
];

#[derive(Serialize)]
struct MeanRow {
    time: String,
    voltage: f64,
    current: f64,
    temperature: f64,
}

#[derive(Serialize)]
struct CellRow<'a> {
    time: &'a str,
    cell: u32,
    voltage: f64,
    current: f64,
    temperature: f64,
    capacity: f64,
    mode: &'static str,
}

pub(crate) fn format_time(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One row per sample holding the mean of each metric across cells.
pub fn write_simulation<'a, W, I>(out: W, samples: I) -> ExportResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a MetricSample>,
{
    let mut wtr = writer(out);
    wtr.write_record(SIMULATION_HEADER)?;
    for sample in samples {
        wtr.serialize(MeanRow {
            time: format_time(sample.timestamp()),
            voltage: round_to(sample.mean_of(|c| c.voltage), 3),
            current: round_to(sample.mean_of(|c| c.current), 3),
            temperature: round_to(sample.mean_of(|c| c.temperature), 2),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per cell per sample, cells in ascending order.
pub fn write_per_cell<'a, W, I>(out: W, samples: I) -> ExportResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a MetricSample>,
{
    let mut wtr = writer(out);
    wtr.write_record(PER_CELL_HEADER)?;
    for sample in samples {
        let time = format_time(sample.timestamp());
        for (id, reading) in sample.iter() {
            wtr.serialize(CellRow {
                time: &time,
                cell: id.number(),
                voltage: reading.voltage,
                current: reading.current,
                temperature: reading.temperature,
                capacity: reading.capacity,
                mode: reading.mode.label(),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn simulation_to_string<'a, I>(samples: I) -> ExportResult<String>
where
    I: IntoIterator<Item = &'a MetricSample>,
{
    let mut buf = Vec::new();
    write_simulation(&mut buf, samples)?;
    Ok(String::from_utf8(buf)?)
}

pub fn per_cell_to_string<'a, I>(samples: I) -> ExportResult<String>
where
    I: IntoIterator<Item = &'a MetricSample>,
{
    let mut buf = Vec::new();
    write_per_cell(&mut buf, samples)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vw_core::{CellMode, CellReading};

    fn sample(secs: u32, cells: Vec<CellReading>) -> MetricSample {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, secs).unwrap();
        MetricSample::new(ts, cells).unwrap()
    }

    #[test]
    fn empty_history_still_has_headers() {
        let none: Vec<MetricSample> = Vec::new();
        assert_eq!(
            simulation_to_string(&none).unwrap(),
            "Time,Voltage,Current,Temperature\n"
        );
        assert_eq!(
            per_cell_to_string(&none).unwrap(),
            "Time,Cell,Voltage,Current,Temperature,Capacity,Mode\n"
        );
    }

    #[test]
    fn mean_rows_average_the_cells() {
        let a = CellReading::new(3.0, 1.0, 30.0, 90.0, CellMode::Charging);
        let b = CellReading::new(4.0, 2.0, 40.0, 80.0, CellMode::Charging);
        let samples = vec![sample(0, vec![a, b])];

        let text = simulation_to_string(&samples).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2025-06-01T12:00:00.000Z,3.5,1.5,35.0");
    }

    #[test]
    fn per_cell_rows_follow_cell_order() {
        let a = CellReading::new(3.2, 0.5, 25.0, 100.0, CellMode::Idle);
        let b = CellReading::new(3.6, -1.0, 31.5, 42.0, CellMode::Discharging);
        let samples = vec![sample(0, vec![a, b]), sample(1, vec![a, b])];

        let text = per_cell_to_string(&samples).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "2025-06-01T12:00:00.000Z,1,3.2,0.5,25.0,100.0,Idle");
        assert_eq!(lines[2], "2025-06-01T12:00:00.000Z,2,3.6,-1.0,31.5,42.0,Discharging");
        assert!(lines[4].starts_with("2025-06-01T12:00:01.000Z,2,"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use vw_core::CellReading;

    proptest! {
        #[test]
        fn row_counts_follow_ticks_and_cells(ticks in 0_usize..20, cells in 1_usize..=20) {
            let samples: Vec<MetricSample> = (0..ticks)
                .map(|_| MetricSample::now(vec![CellReading::default(); cells]).unwrap())
                .collect();

            let means = simulation_to_string(&samples).unwrap();
            let per_cell = per_cell_to_string(&samples).unwrap();
            prop_assert_eq!(means.lines().count(), 1 + ticks);
            prop_assert_eq!(per_cell.lines().count(), 1 + ticks * cells);
        }
    }
}
