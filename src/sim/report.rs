//! Post-hoc summary of a rate sweep.

use std::fmt;

use super::arrivals::ArrivalSeries;
use super::types::SimulationResult;

/// Aggregate figures derived from a series and its sweep results.
///
/// Computed after the sweep so the figures always agree with the reported
/// points. The threshold search lives here, on top of the raw curve; the
/// sweep itself does not interpret its results.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// Requests in the arrival series.
    pub total_requests: u64,
    /// Seconds with at least one arrival.
    pub active_seconds: usize,
    /// Largest single-second arrival count.
    pub peak_arrivals: u64,
    /// Rates simulated.
    pub rates_simulated: usize,
    /// Rates whose mean wait was undefined.
    pub undefined_points: usize,
    /// Rates that left requests queued at the end of the day.
    pub saturated_points: usize,
    /// Smallest defined mean wait, in seconds.
    pub min_mean_wait_seconds: Option<f64>,
    /// Largest defined mean wait, in seconds.
    pub max_mean_wait_seconds: Option<f64>,
    /// Mean-wait threshold the report was asked about.
    pub target_wait_seconds: Option<f64>,
    /// Smallest simulated rate whose mean wait is at or below the target.
    pub first_rate_within_target: Option<u64>,
}

impl SweepReport {
    /// Summarises `results` for `series`.
    ///
    /// # Arguments
    ///
    /// * `series` - Arrival series the sweep ran over
    /// * `results` - Sweep results in ascending rate order
    /// * `target_wait_seconds` - Optional mean-wait threshold to search for
    pub fn from_results(
        series: &ArrivalSeries,
        results: &[SimulationResult],
        target_wait_seconds: Option<f64>,
    ) -> Self {
        let mut undefined = 0_usize;
        let mut saturated = 0_usize;
        let mut min_wait: Option<f64> = None;
        let mut max_wait: Option<f64> = None;

        for r in results {
            if r.is_saturated() {
                saturated += 1;
            }
            match r.mean_wait_seconds() {
                Some(w) => {
                    min_wait = Some(min_wait.map_or(w, |m| m.min(w)));
                    max_wait = Some(max_wait.map_or(w, |m| m.max(w)));
                }
                None => undefined += 1,
            }
        }

        Self {
            total_requests: series.total_requests(),
            active_seconds: series.active_seconds(),
            peak_arrivals: series.peak(),
            rates_simulated: results.len(),
            undefined_points: undefined,
            saturated_points: saturated,
            min_mean_wait_seconds: min_wait,
            max_mean_wait_seconds: max_wait,
            target_wait_seconds,
            first_rate_within_target: target_wait_seconds
                .and_then(|target| first_rate_within(results, target)),
        }
    }
}

/// Smallest rate in `results` whose defined mean wait is `<= target`.
pub fn first_rate_within(results: &[SimulationResult], target: f64) -> Option<u64> {
    results
        .iter()
        .filter(|r| r.mean_wait_seconds().is_some_and(|w| w <= target))
        .map(|r| r.service_rate)
        .min()
}

fn fmt_wait(w: Option<f64>) -> String {
    w.map_or_else(|| "n/a".to_string(), |w| format!("{w:.2} s"))
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sweep Report ---")?;
        writeln!(f, "Total requests:        {}", self.total_requests)?;
        writeln!(f, "Active seconds:        {}", self.active_seconds)?;
        writeln!(f, "Peak arrivals:         {} req/s", self.peak_arrivals)?;
        writeln!(
            f,
            "Rates simulated:       {} ({} undefined, {} saturated)",
            self.rates_simulated, self.undefined_points, self.saturated_points
        )?;
        writeln!(f, "Min mean wait:         {}", fmt_wait(self.min_mean_wait_seconds))?;
        write!(f, "Max mean wait:         {}", fmt_wait(self.max_mean_wait_seconds))?;
        if let Some(target) = self.target_wait_seconds {
            match self.first_rate_within_target {
                Some(rate) => write!(f, "\nFirst rate <= {target:.2} s: {rate} req/s")?,
                None => write!(f, "\nFirst rate <= {target:.2} s: none in grid")?,
            }
        }
        Ok(())
    }
}
