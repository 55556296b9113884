//! Rate-sweep driver: one simulation per candidate service rate.

use std::iter::StepBy;
use std::ops::Range;

use tracing::debug;

use super::arrivals::ArrivalSeries;
use super::error::SimError;
use super::queue::simulate;
use super::types::SimulationResult;

/// Ascending range of service rates, `start` inclusive and `stop` exclusive.
///
/// # Examples
///
/// ```
/// use qdelay_sim::sim::sweep::RateGrid;
///
/// let grid = RateGrid::new(10, 40, 10).unwrap();
/// assert_eq!(grid.rates().collect::<Vec<_>>(), vec![10, 20, 30]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateGrid {
    start: u64,
    stop: u64,
    step: u64,
}

impl RateGrid {
    /// Validates a `(start, stop, step)` triple.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] unless `start > 0`, `step > 0`
    /// and `stop > start`.
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self, SimError> {
        let start = u64::try_from(start)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| SimError::invalid("rate start", format!("must be > 0, got {start}")))?;
        let step = u64::try_from(step)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| SimError::invalid("rate step", format!("must be > 0, got {step}")))?;
        let stop = u64::try_from(stop)
            .ok()
            .filter(|s| *s > start)
            .ok_or_else(|| {
                SimError::invalid("rate stop", format!("must be > start ({start}), got {stop}"))
            })?;
        Ok(Self { start, stop, step })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn stop(&self) -> u64 {
        self.stop
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Rates in ascending order.
    pub fn rates(&self) -> StepBy<Range<u64>> {
        (self.start..self.stop).step_by(self.step as usize)
    }

    /// Number of rates in the grid.
    pub fn len(&self) -> usize {
        ((self.stop - self.start).div_ceil(self.step)) as usize
    }

    /// Always `false`; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Simulates `series` once per rate in `grid`, in ascending rate order.
///
/// Points are reported as simulated, with no smoothing. Runs share nothing
/// but the read-only series.
///
/// # Errors
///
/// Propagates [`SimError`] from the simulator; a validated grid never
/// contains a zero rate, so in practice this does not fail.
pub fn sweep(series: &ArrivalSeries, grid: &RateGrid) -> Result<Vec<SimulationResult>, SimError> {
    let mut results = Vec::with_capacity(grid.len());
    for rate in grid.rates() {
        let result = simulate(series, rate)?;
        debug!(
            rate,
            mean_wait = result.mean_wait_or_nan(),
            backlog = result.backlog,
            "rate simulated"
        );
        results.push(result);
    }
    Ok(results)
}
