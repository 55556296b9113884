//! Runs the built binary against trace files on disk.

mod common;

use std::fs;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qdelay-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("qdelay-sim process should run")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

#[test]
fn prints_one_line_per_rate_then_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let lines = vec![
        common::log_line(0, "SE-SE3"),
        "this line is not a record".to_string(),
        common::log_line(0, "DE"),
    ];
    let trace = common::write_trace(dir.path(), "requests.txt", &lines);

    let output = run_cli(&[
        trace.to_str().expect("utf-8 path"),
        "--start",
        "10",
        "--stop",
        "40",
        "--step",
        "10",
    ]);
    let stdout = stdout_of(&output);
    let rate_lines: Vec<&str> = stdout.lines().filter(|l| l.starts_with("rate=")).collect();

    // 30 requests at second 0: rate 10 leaves 20 then 10 queued.
    assert_eq!(
        rate_lines,
        vec![
            "rate=10 mean_wait=1.00s",
            "rate=20 mean_wait=0.33s",
            "rate=30 mean_wait=0.00s",
        ]
    );
    assert!(stdout.contains("--- Sweep Report ---"));
}

#[test]
fn config_file_and_exports() {
    let dir = tempfile::tempdir().expect("temp dir");
    let lines: Vec<String> = (0..20).map(|s| common::log_line(s * 2, "FR")).collect();
    let trace = common::write_trace(dir.path(), "requests.txt", &lines);
    let config = dir.path().join("sweep.toml");
    fs::write(
        &config,
        format!(
            "[trace]\npath = {:?}\nzone = \"FR\"\nrequest_multiplier = 4\n\n[rates]\nstart = 1\nstop = 6\nstep = 1\n",
            trace.to_str().expect("utf-8 path")
        ),
    )
    .expect("config writable");
    let csv = dir.path().join("sweep.csv");
    let json = dir.path().join("sweep.json");

    let output = run_cli(&[
        "--config",
        config.to_str().expect("utf-8 path"),
        "--csv-out",
        csv.to_str().expect("utf-8 path"),
        "--json-out",
        json.to_str().expect("utf-8 path"),
        "--target-wait",
        "0",
    ]);
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("rate=")).count(), 5);
    assert!(stdout.contains("First rate <= 0.00 s: 4 req/s"));

    let csv_text = fs::read_to_string(&csv).expect("csv written");
    assert_eq!(csv_text.lines().count(), 6);
    let json_value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).expect("json written"))
            .expect("json parses");
    assert_eq!(json_value.as_array().map(Vec::len), Some(5));
}

#[test]
fn unknown_zone_fails_with_stage() {
    let dir = tempfile::tempdir().expect("temp dir");
    let trace = common::write_trace(dir.path(), "requests.txt", &[common::log_line(5, "DE")]);

    let output = run_cli(&[trace.to_str().expect("utf-8 path"), "--zone", "SE-SE3"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("aggregating arrivals") && stderr.contains("SE-SE3"),
        "stderr={stderr}"
    );
}

#[test]
fn non_positive_step_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let trace = common::write_trace(dir.path(), "requests.txt", &[common::log_line(5, "SE-SE3")]);

    let output = run_cli(&[trace.to_str().expect("utf-8 path"), "--step", "-5"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rates.step"), "stderr={stderr}");
}

#[test]
fn missing_trace_argument_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no trace path"), "stderr={stderr}");
}
