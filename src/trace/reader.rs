//! Whole-file extraction of log records with diagnostic counters.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::record::{LogRecord, Rejection, classify_line};

/// Failure to read a trace source.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("cannot read trace \"{}\"", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-file extraction counters.
///
/// Returned alongside the records instead of being accumulated in shared
/// state, so extraction stays a pure function of its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Lines read, including blank ones.
    pub lines: u64,
    /// Lines containing only whitespace.
    pub blank: u64,
    /// Lines that did not match the record shape.
    pub malformed: u64,
    /// Lines whose arrival second was not a time of day.
    pub out_of_range: u64,
    /// Records emitted.
    pub records: u64,
    /// Records emitted, per zone.
    pub zones: BTreeMap<String, u64>,
}

impl ExtractStats {
    /// Lines dropped for any reason other than being blank.
    pub fn rejected(&self) -> u64 {
        self.malformed + self.out_of_range
    }

    /// Zones ordered by descending record count, ties by name.
    pub fn busiest_zones(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut zones: Vec<(&str, u64)> = self.zones.iter().map(|(z, n)| (z.as_str(), *n)).collect();
        zones.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        zones.truncate(limit);
        zones
    }
}

/// Records and counters produced by one pass over a trace.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<LogRecord>,
    pub stats: ExtractStats,
}

/// Extracts every record from `reader`, skipping lines that do not parse.
///
/// A bad line never aborts the pass. Lines that are not valid UTF-8 count as
/// malformed; only I/O failures end the pass early.
///
/// # Errors
///
/// Returns an `io::Error` if reading from `reader` fails.
pub fn extract_records(mut reader: impl BufRead) -> io::Result<Extraction> {
    let mut out = Extraction::default();
    let mut buf = Vec::new();
    let mut lineno = 0_u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lineno += 1;
        let stats = &mut out.stats;
        stats.lines += 1;

        let Ok(line) = std::str::from_utf8(strip_newline(&buf)) else {
            stats.malformed += 1;
            debug!(line = lineno, "skipping line that is not valid UTF-8");
            continue;
        };

        if line.trim().is_empty() {
            stats.blank += 1;
            continue;
        }

        match classify_line(line) {
            Ok(record) => {
                stats.records += 1;
                *stats.zones.entry(record.zone.clone()).or_default() += 1;
                out.records.push(record);
            }
            Err(Rejection::Malformed) => {
                stats.malformed += 1;
                debug!(line = lineno, "skipping malformed line");
            }
            Err(Rejection::OutOfRange) => {
                stats.out_of_range += 1;
                debug!(line = lineno, "skipping line with arrival outside the day");
            }
        }
    }

    Ok(out)
}

fn strip_newline(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Opens `path` and runs [`extract_records`] over it.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened or read.
pub fn read_trace_file(path: &Path) -> Result<Extraction, TraceError> {
    let wrap = |source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(wrap)?;
    let extraction = extract_records(BufReader::new(file)).map_err(wrap)?;
    info!(
        path = %path.display(),
        lines = extraction.stats.lines,
        records = extraction.stats.records,
        rejected = extraction.stats.rejected(),
        "trace read"
    );
    Ok(extraction)
}
