use assert_cmd::Command;
use predicates::str::{contains, diff};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("counter-sim-{}.{}", nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

const SINGLE_WINDOW_TOML: &str = r#"
duration_min = 20.0
priority_ratio = 0.0
seed = 1

[windows]
initial = 1
min = 1
max = 1
open_threshold = 1000
close_threshold = 0

[[arrivals]]
id = 1
class = "normal"
arrival_min = 0.0
service_min = 5.0

[[arrivals]]
id = 2
class = "normal"
arrival_min = 1.0
service_min = 5.0

[[arrivals]]
id = 3
class = "normal"
arrival_min = 2.0
service_min = 5.0
"#;

const SINGLE_WINDOW_SUMMARY: &str = concat!(
    "Simulation time: 20.00 min\n",
    "Total served: 3\n",
    "Throughput: 9.00 customers/hour\n",
    "normal: served 3, avg wait 4.00 min, max wait 8.00 min\n",
    "priority: served 0, avg wait 0.00 min, max wait 0.00 min\n",
    "window 0: utilization 75.00%, idle 25.00%, served 3, open\n",
    "Leftover: normal 0, priority 0\n",
);

#[test]
fn summary_of_single_window_backlog_is_stable() {
    let path = write_temp_config(SINGLE_WINDOW_TOML, "toml");
    let mut cmd = Command::cargo_bin("counter-sim").unwrap();
    cmd.args(["--config", path.to_str().unwrap(), "--format", "summary"]);
    cmd.assert().success().stdout(diff(SINGLE_WINDOW_SUMMARY));
}

#[test]
fn human_output_includes_event_log() {
    let path = write_temp_config(SINGLE_WINDOW_TOML, "toml");
    let mut cmd = Command::cargo_bin("counter-sim").unwrap();
    cmd.args(["--config", path.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(contains(
            "time 0.00: customer 1 (normal) arrived, estimated service 5.00 min",
        ))
        .stdout(contains(
            "time 5.00: customer 2 (normal) started at window 0, waited 4.00 min",
        ))
        .stdout(contains(
            "time 15.00: customer 3 finished at window 0, service 5.00 min",
        ))
        .stdout(contains("Total served: 3"));
}

#[test]
fn json_output_is_valid_json() {
    let path = write_temp_config(SINGLE_WINDOW_TOML, "toml");
    let mut cmd = Command::cargo_bin("counter-sim").unwrap();
    cmd.args(["--config", path.to_str().unwrap(), "--format", "json"]);
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(value["stats"]["total_served"], 3);
    assert_eq!(value["leftover_normal"], 0);
    assert!(value["events"].as_array().unwrap().len() >= 9);
}

#[test]
fn seeded_random_run_is_reproducible() {
    let run = || {
        let mut cmd = Command::cargo_bin("counter-sim").unwrap();
        cmd.args([
            "--customers",
            "40",
            "--seed",
            "42",
            "--duration",
            "120",
            "--format",
            "summary",
        ]);
        let assert = cmd.assert().success();
        String::from_utf8(assert.get_output().stdout.clone()).unwrap()
    };
    let first = run();
    assert!(first.contains("Simulation time: 120.00 min"));
    assert_eq!(first, run());
}
