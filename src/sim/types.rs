//! Result types shared by the simulator, sweep driver, and exporters.

use std::fmt;

/// Outcome of draining one arrival series at one service rate.
///
/// # Examples
///
/// ```
/// use qdelay_sim::sim::types::SimulationResult;
///
/// let r = SimulationResult {
///     service_rate: 5,
///     served_total: 10,
///     wait_time_total: 5,
///     peak_queue: 5,
///     backlog: 0,
/// };
/// assert_eq!(r.mean_wait_seconds(), Some(0.5));
/// assert_eq!(r.to_string(), "rate=5 mean_wait=0.50s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// Maximum requests drained per second.
    pub service_rate: u64,
    /// Requests served within the horizon.
    pub served_total: u64,
    /// Sum over seconds of the queue depth seen before that second's arrivals.
    pub wait_time_total: u64,
    /// Largest queue depth left after draining in any second.
    pub peak_queue: u64,
    /// Requests still queued when the horizon ends.
    pub backlog: u64,
}

impl SimulationResult {
    /// Mean seconds a served request spent queued.
    ///
    /// `None` when nothing was served, which is the "undefined" outcome of an
    /// idle series rather than an error.
    pub fn mean_wait_seconds(&self) -> Option<f64> {
        (self.served_total > 0).then(|| self.wait_time_total as f64 / self.served_total as f64)
    }

    /// Mean wait as a float, `NaN` when undefined.
    pub fn mean_wait_or_nan(&self) -> f64 {
        self.mean_wait_seconds().unwrap_or(f64::NAN)
    }

    /// `true` when at least one request was left queued at the end of the day.
    pub fn is_saturated(&self) -> bool {
        self.backlog > 0
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mean_wait_seconds() {
            Some(w) => write!(f, "rate={} mean_wait={w:.2}s", self.service_rate),
            None => write!(f, "rate={} mean_wait=nans", self.service_rate),
        }
    }
}
