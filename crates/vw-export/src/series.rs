//! Single-metric export: one row per point of a cell's time series.

use std::io::Write;

use vw_telemetry::SeriesPoint;

use crate::simulation::format_time;
use crate::{ExportResult, writer};

pub const SERIES_HEADER: [&str; 2] = ["time", "value"];

pub fn write_series<W: Write>(out: W, points: &[SeriesPoint]) -> ExportResult<()> {
    let mut wtr = writer(out);
    wtr.write_record(SERIES_HEADER)?;
    for point in points {
        wtr.write_record([format_time(point.timestamp), point.value.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn series_to_string(points: &[SeriesPoint]) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_series(&mut buf, points)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn points_become_time_value_rows() {
        let start = Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap();
        let points = [
            SeriesPoint { timestamp: start, value: 3.25 },
            SeriesPoint { timestamp: start + TimeDelta::milliseconds(1500), value: -0.5 },
        ];
        assert_eq!(
            series_to_string(&points).unwrap(),
            "time,value\n2025-03-04T09:30:00.000Z,3.25\n2025-03-04T09:30:01.500Z,-0.5\n"
        );
    }

    #[test]
    fn empty_series_is_just_the_header() {
        assert_eq!(series_to_string(&[]).unwrap(), "time,value\n");
    }
}
