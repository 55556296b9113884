//! Single-server queue drained at a fixed rate.

use super::arrivals::ArrivalSeries;
use super::clock::Clock;
use super::error::SimError;
use super::types::SimulationResult;

/// Drains `series` through one queue serving at most `rate` requests a second.
///
/// Each second, in order:
/// 1. the queue depth carried over from earlier seconds is added to the
///    wait total (one second of wait per queued request),
/// 2. that second's arrivals join the queue,
/// 3. up to `rate` requests are served.
///
/// The buffer is unbounded and the whole horizon is always simulated. Every
/// call starts from an empty queue, so results depend only on the inputs.
///
/// # Errors
///
/// Returns [`SimError::InvalidParameter`] if `rate` is zero, or if the series
/// is so large that the wait total could overflow a `u64`.
///
/// # Examples
///
/// ```
/// use qdelay_sim::sim::arrivals::ArrivalSeries;
/// use qdelay_sim::sim::queue::simulate;
///
/// let series = ArrivalSeries::from_sparse(&[(0, 10)]);
/// let result = simulate(&series, 5).unwrap();
/// assert_eq!(result.served_total, 10);
/// assert_eq!(result.wait_time_total, 5);
/// assert_eq!(result.mean_wait_seconds(), Some(0.5));
/// ```
pub fn simulate(series: &ArrivalSeries, rate: u64) -> Result<SimulationResult, SimError> {
    if rate == 0 {
        return Err(SimError::invalid("service rate", "must be > 0"));
    }

    let arrivals = series.as_slice();
    // Queue depth never exceeds the total, so this bounds every accumulator.
    let horizon = u64::try_from(arrivals.len()).unwrap_or(u64::MAX);
    if series.total_requests().checked_mul(horizon).is_none() {
        return Err(SimError::invalid(
            "arrival series",
            "too many requests to simulate without overflow",
        ));
    }

    let mut queue = 0_u64;
    let mut wait_time_total = 0_u64;
    let mut served_total = 0_u64;
    let mut peak_queue = 0_u64;

    Clock::new(arrivals.len()).run(|t| {
        wait_time_total += queue;
        queue += arrivals[t];
        let serve = queue.min(rate);
        queue -= serve;
        served_total += serve;
        peak_queue = peak_queue.max(queue);
    });

    Ok(SimulationResult {
        service_rate: rate,
        served_total,
        wait_time_total,
        peak_queue,
        backlog: queue,
    })
}
