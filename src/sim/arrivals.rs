//! Per-second arrival signal for one zone.

use std::collections::HashMap;

use tracing::info;

use super::error::SimError;
use crate::trace::{LogRecord, SECONDS_PER_DAY};

/// Individual requests represented by one log record.
pub const REQUEST_MULTIPLIER: u64 = 30;

const DAY_LEN: usize = SECONDS_PER_DAY as usize;

/// Dense count of requests arriving in each second of one day.
///
/// Always exactly [`SECONDS_PER_DAY`] entries long and immutable once built.
///
/// # Examples
///
/// ```
/// use qdelay_sim::sim::arrivals::ArrivalSeries;
///
/// let series = ArrivalSeries::from_sparse(&[(0, 10), (5, 3)]);
/// assert_eq!(series.len(), 86_400);
/// assert_eq!(series.total_requests(), 13);
/// assert_eq!(series.peak(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalSeries {
    counts: Vec<u64>,
    matched_records: u64,
}

impl ArrivalSeries {
    /// A series with no arrivals at all.
    pub fn zeroed() -> Self {
        Self {
            counts: vec![0; DAY_LEN],
            matched_records: 0,
        }
    }

    /// Builds a series from `(second, requests)` pairs, summing duplicates.
    ///
    /// # Panics
    ///
    /// Panics if a second is outside the day or the total overflows `u64`.
    pub fn from_sparse(points: &[(u32, u64)]) -> Self {
        let mut series = Self::zeroed();
        let mut total = 0_u64;
        for &(second, requests) in points {
            assert!(second < SECONDS_PER_DAY, "second {second} outside the day");
            total = total
                .checked_add(requests)
                .unwrap_or_else(|| panic!("series total overflows u64"));
            series.counts[second as usize] += requests;
        }
        series
    }

    /// Folds the records of `zone` into a series, scaling each by `multiplier`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] if `multiplier` is zero, if a
    /// matching record's second is outside the day, or if the scaled total
    /// does not fit in a `u64`. Returns [`SimError::EmptySeries`] if no record
    /// belongs to `zone`.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a LogRecord>,
        zone: &str,
        multiplier: u64,
    ) -> Result<Self, SimError> {
        if multiplier == 0 {
            return Err(SimError::invalid("request multiplier", "must be > 0"));
        }

        let mut per_second: HashMap<u32, u64> = HashMap::new();
        let mut matched = 0_u64;
        for rec in records {
            if rec.zone != zone {
                continue;
            }
            if rec.arrival_second >= SECONDS_PER_DAY {
                return Err(SimError::invalid(
                    "arrival second",
                    format!("{} is outside the day", rec.arrival_second),
                ));
            }
            *per_second.entry(rec.arrival_second).or_default() += 1;
            matched += 1;
        }

        if matched == 0 {
            return Err(SimError::EmptySeries {
                zone: zone.to_string(),
            });
        }

        matched
            .checked_mul(multiplier)
            .ok_or_else(|| SimError::invalid("request multiplier", "too large for trace"))?;

        let mut counts = vec![0; DAY_LEN];
        for (second, n) in per_second {
            // Each count is at most the checked total above.
            counts[second as usize] = n * multiplier;
        }

        let series = Self {
            counts,
            matched_records: matched,
        };
        info!(
            zone,
            records = matched,
            requests = series.total_requests(),
            active_seconds = series.active_seconds(),
            "arrival series built"
        );
        Ok(series)
    }

    /// Per-second request counts, indexed by second of day.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Horizon length in seconds.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always `false`; the horizon is a full day.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all per-second counts.
    ///
    /// Both constructors bound this total to a `u64`.
    pub fn total_requests(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest single-second arrival count.
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of seconds with at least one arrival.
    pub fn active_seconds(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Log records that contributed to this series (0 for synthetic series).
    pub fn matched_records(&self) -> u64 {
        self.matched_records
    }
}
