//! CSV and JSON export of sweep results.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::types::SimulationResult;

/// Column header for CSV export.
const HEADER: &str = "rate,mean_wait_s,served,wait_total_s,peak_queue,backlog";

/// One exported point, with the mean wait resolved.
///
/// `mean_wait_s` is `None` when no request was served; CSV writes an empty
/// cell and JSON writes `null`.
#[derive(Debug, Serialize)]
pub struct SweepRecord {
    pub rate: u64,
    pub mean_wait_s: Option<f64>,
    pub served: u64,
    pub wait_total_s: u64,
    pub peak_queue: u64,
    pub backlog: u64,
}

impl From<&SimulationResult> for SweepRecord {
    fn from(r: &SimulationResult) -> Self {
        Self {
            rate: r.service_rate,
            mean_wait_s: r.mean_wait_seconds(),
            served: r.served_total,
            wait_total_s: r.wait_time_total,
            peak_queue: r.peak_queue,
            backlog: r.backlog,
        }
    }
}

/// Exports sweep results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[SimulationResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_csv(results, BufWriter::new(file))
}

/// Writes sweep results as CSV to any writer, one row per rate.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[SimulationResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;
    for r in results {
        wtr.write_record(&[
            r.service_rate.to_string(),
            r.mean_wait_seconds()
                .map(|w| format!("{w:.6}"))
                .unwrap_or_default(),
            r.served_total.to_string(),
            r.wait_time_total.to_string(),
            r.peak_queue.to_string(),
            r.backlog.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports sweep results to a JSON file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_json(results: &[SimulationResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = BufWriter::new(file);
    write_json(results, &mut buf)?;
    buf.flush()
}

/// Writes sweep results as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(results: &[SimulationResult], writer: impl Write) -> io::Result<()> {
    let records: Vec<SweepRecord> = results.iter().map(SweepRecord::from).collect();
    serde_json::to_writer_pretty(writer, &records).map_err(io::Error::other)
}
