//! End-to-end pipeline: extract, aggregate, sweep, summarise.

use std::io::{self, BufRead};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::SweepConfig;
use crate::sim::arrivals::ArrivalSeries;
use crate::sim::error::SimError;
use crate::sim::report::SweepReport;
use crate::sim::sweep::{RateGrid, sweep};
use crate::sim::types::SimulationResult;
use crate::trace::{ExtractStats, LogRecord, TraceError, extract_records, read_trace_file};

/// Zones listed when the requested one has no records.
const ZONE_HINT_LIMIT: usize = 5;

/// Pipeline failure, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration: no trace path given")]
    MissingTrace,

    #[error("configuration")]
    Grid(#[source] SimError),

    #[error("reading trace")]
    Trace(#[from] TraceError),

    #[error("reading trace")]
    Io(#[from] io::Error),

    #[error("aggregating arrivals")]
    Aggregate(#[source] SimError),

    #[error("simulating")]
    Simulate(#[source] SimError),
}

/// Everything one sweep produced.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// Extraction counters for the input trace.
    pub stats: ExtractStats,
    /// Arrival series of the selected zone.
    pub series: ArrivalSeries,
    /// One result per rate, ascending.
    pub results: Vec<SimulationResult>,
    /// Summary of the curve.
    pub report: SweepReport,
}

/// Runs the sweep over the trace at `config.trace.path`.
///
/// # Errors
///
/// Returns [`RunError::MissingTrace`] if no path is configured, otherwise as
/// [`run_sweep`].
pub fn run_sweep_file(config: &SweepConfig) -> Result<SweepOutcome, RunError> {
    let path = config.trace.path.as_deref().ok_or(RunError::MissingTrace)?;
    let grid = config.rates.grid().map_err(RunError::Grid)?;
    let extraction = read_trace_file(path)?;
    finish(config, grid, extraction.records.as_slice(), extraction.stats)
}

/// Runs the sweep over a trace supplied as a reader.
///
/// The rate grid is validated before any input is read, and the input is
/// consumed completely before aggregation starts.
///
/// # Errors
///
/// Returns a [`RunError`] naming the failed stage: an invalid grid, an I/O
/// failure, a zone with no records, or a simulator rejection.
pub fn run_sweep(config: &SweepConfig, reader: impl BufRead) -> Result<SweepOutcome, RunError> {
    let grid = config.rates.grid().map_err(RunError::Grid)?;
    let extraction = extract_records(reader)?;
    finish(config, grid, extraction.records.as_slice(), extraction.stats)
}

fn finish(
    config: &SweepConfig,
    grid: RateGrid,
    records: &[LogRecord],
    stats: ExtractStats,
) -> Result<SweepOutcome, RunError> {
    if stats.rejected() > 0 {
        warn!(
            malformed = stats.malformed,
            out_of_range = stats.out_of_range,
            "skipped lines that did not yield a record"
        );
    }

    let zone = config.trace.zone.as_str();
    let series = ArrivalSeries::from_records(records, zone, config.trace.request_multiplier)
        .inspect_err(|e| {
            if matches!(e, SimError::EmptySeries { .. }) {
                let seen: Vec<String> = stats
                    .busiest_zones(ZONE_HINT_LIMIT)
                    .into_iter()
                    .map(|(z, n)| format!("{z} ({n})"))
                    .collect();
                warn!(zone, seen = %seen.join(", "), "zone not present in trace");
            }
        })
        .map_err(RunError::Aggregate)?;

    info!(
        start = grid.start(),
        stop = grid.stop(),
        step = grid.step(),
        rates = grid.len(),
        "sweeping service rates"
    );
    let results = sweep(&series, &grid).map_err(RunError::Simulate)?;
    let report = SweepReport::from_results(&series, &results, config.report.target_wait_seconds);

    Ok(SweepOutcome {
        stats,
        series,
        results,
        report,
    })
}
