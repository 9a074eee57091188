//! Task-run export: one row per executed task.

use std::io::Write;

use vw_tasks::TaskLog;

use crate::{ExportResult, writer};

pub const TASK_HEADER: [&str; 4] = ["Task", "Type", "Start", "End"];

const TIME_FORMAT: &str = "%H:%M:%S";

pub fn write_tasks<W: Write>(out: W, log: &TaskLog) -> ExportResult<()> {
    let mut wtr = writer(out);
    wtr.write_record(TASK_HEADER)?;
    for entry in log {
        wtr.write_record([
            entry.label(),
            entry.kind.label().to_string(),
            entry.start.format(TIME_FORMAT).to_string(),
            entry.end.format(TIME_FORMAT).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn tasks_to_string(log: &TaskLog) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_tasks(&mut buf, log)?;
    Ok(String::from_utf8(buf)?)
}
