//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use qdelay_sim::sim::arrivals::ArrivalSeries;
use qdelay_sim::trace::SECONDS_PER_DAY;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One well-formed log line in the reference shape.
pub fn log_line(second: i64, zone: &str) -> String {
    format!("['placeholder', 'Alabama', {second}, 'default prompt', [12, '{zone}']]")
}

/// Same record shape with double quotes and loose spacing.
pub fn log_line_double_quoted(second: i64, zone: &str) -> String {
    format!("[ \"placeholder\" , \"Texas\",{second} , \"a, b\" ,[ 7 , \"{zone}\" ] ]")
}

/// Writes `lines` to `name` inside `dir` and returns the path.
pub fn write_trace(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").expect("trace file should be writable");
    path
}

/// Random sparse arrival series: `active` busy seconds, up to `max_burst` each.
pub fn random_series(seed: u64, active: usize, max_burst: u64) -> ArrivalSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(u32, u64)> = (0..active)
        .map(|_| {
            (
                rng.random_range(0..SECONDS_PER_DAY),
                rng.random_range(1..=max_burst),
            )
        })
        .collect();
    ArrivalSeries::from_sparse(&points)
}

/// Random zone-tagged log lines, roughly a quarter of them malformed.
///
/// Returns `(lines, matching_records)` for `zone`.
pub fn random_trace(seed: u64, n: usize, zone: &str) -> (Vec<String>, u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let zones = [zone, "DE", "US-CAL-CISO", "FR"];
    let mut matching = 0;
    let lines: Vec<String> = (0..n)
        .map(|_| {
            let second = rng.random_range(0..i64::from(SECONDS_PER_DAY));
            let z = zones[rng.random_range(0..zones.len())];
            match rng.random_range(0..4) {
                0 => format!("['broken', {second}, [1, '{z}']"),
                1 => {
                    matching += u64::from(z == zone);
                    log_line_double_quoted(second, z)
                }
                _ => {
                    matching += u64::from(z == zone);
                    log_line(second, z)
                }
            }
        })
        .collect();
    (lines, matching)
}
