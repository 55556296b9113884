//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SweepConfig;

/// Trace-driven queueing-delay simulator.
///
/// Reads a request log, builds the per-second arrival signal of one zone and
/// reports the mean wait of a single rate-limited server for each service
/// rate in a grid.
#[derive(Debug, Parser)]
#[command(name = "qdelay-sim", version, about)]
pub struct Cli {
    /// Request log to read (one bracketed record per line).
    #[arg(value_name = "TRACE")]
    pub trace: Option<PathBuf>,

    /// Load sweep settings from a TOML file; flags override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Zone to simulate.
    #[arg(long)]
    pub zone: Option<String>,

    /// First service rate (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Last service rate (exclusive).
    #[arg(long, allow_negative_numbers = true)]
    pub stop: Option<i64>,

    /// Service-rate increment.
    #[arg(long, allow_negative_numbers = true)]
    pub step: Option<i64>,

    /// Individual requests represented by one log record.
    #[arg(long)]
    pub multiplier: Option<u64>,

    /// Report the smallest rate whose mean wait is at or below this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub target_wait: Option<f64>,

    /// Write the curve as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv_out: Option<PathBuf>,

    /// Write the curve as JSON.
    #[arg(long, value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors on stderr.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    pub fn apply_to(&self, config: &mut SweepConfig) {
        if let Some(path) = &self.trace {
            config.trace.path = Some(path.clone());
        }
        if let Some(zone) = &self.zone {
            config.trace.zone = zone.clone();
        }
        if let Some(m) = self.multiplier {
            config.trace.request_multiplier = m;
        }
        if let Some(start) = self.start {
            config.rates.start = start;
        }
        if let Some(stop) = self.stop {
            config.rates.stop = stop;
        }
        if let Some(step) = self.step {
            config.rates.step = step;
        }
        if let Some(target) = self.target_wait {
            config.report.target_wait_seconds = Some(target);
        }
    }
}
