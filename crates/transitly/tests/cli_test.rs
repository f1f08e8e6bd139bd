//! Integration tests for the `transitly` CLI binary.
//!
//! Every test runs against an isolated, initially empty config directory.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `transitly` binary with env isolation.
///
/// Clears all `TRANSITLY_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn transitly_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("transitly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TRANSITLY_CITY")
        .env_remove("TRANSITLY_SEED")
        .env_remove("TRANSITLY_OUTPUT")
        .env_remove("TRANSITLY_DEFAULT_CITY");
    cmd
}

fn config_file(home: &Path) -> PathBuf {
    home.join(".config").join("transitly").join("config.toml")
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn json_stdout(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = transitly_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("transit")
                .and(predicate::str::contains("buses"))
                .and(predicate::str::contains("stops"))
                .and(predicate::str::contains("watch")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("transitly"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    let output = transitly_cmd(home.path())
        .args(["--output", "xml", "status"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("xml"));
}

// ── Snapshot commands ───────────────────────────────────────────────

#[test]
fn test_status_after_handshake() {
    let home = tempfile::tempdir().unwrap();
    let status = json_stdout(transitly_cmd(home.path()).args(["status", "-o", "json"]));
    assert_eq!(status["city"], "sf");
    assert_eq!(status["connectionStatus"], "connected");
    assert_eq!(status["label"], "Live data connected");
    assert_eq!(status["updateCount"], 0);
    assert_eq!(status["buses"], 2);
    assert_eq!(status["stops"], 3);
    assert_eq!(status["isLoading"], false);
}

#[test]
fn test_ticks_advance_update_count() {
    let home = tempfile::tempdir().unwrap();
    let status = json_stdout(
        transitly_cmd(home.path()).args(["--seed", "3", "--ticks", "4", "status", "-o", "json"]),
    );
    assert_eq!(status["updateCount"], 4);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let home = tempfile::tempdir().unwrap();
    let run = || {
        let buses = json_stdout(
            transitly_cmd(home.path()).args(["--seed", "11", "-t", "5", "buses", "list", "-o", "json"]),
        );
        buses
            .as_array()
            .unwrap()
            .iter()
            .map(|b| (b["position"].clone(), b["speed"].clone(), b["occupancy"].clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_buses_list_plain() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["buses", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("bus1\nbus2\n");
}

#[test]
fn test_buses_list_filtered_by_route() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["buses", "list", "--route", "30", "-o", "plain"])
        .assert()
        .success()
        .stdout("bus2\n");
}

#[test]
fn test_bus_get_shows_arrivals() {
    let home = tempfile::tempdir().unwrap();
    let bus = json_stdout(transitly_cmd(home.path()).args(["buses", "get", "bus1", "-o", "json"]));
    assert_eq!(bus["id"], "bus1");
    assert_eq!(bus["routeName"], "14 Mission");
    assert_eq!(bus["loadPercent"], 65);
    assert_eq!(bus["arrivals"][0]["stopId"], "stop1");
    assert_eq!(bus["arrivals"][0]["eta"], "2 min");
}

#[test]
fn test_bus_get_unknown_is_not_found() {
    let home = tempfile::tempdir().unwrap();
    let output = transitly_cmd(home.path())
        .args(["buses", "get", "bus9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("not found"), "{text}");
    assert!(text.contains("buses list"), "{text}");
}

#[test]
fn test_stop_get_json() {
    let home = tempfile::tempdir().unwrap();
    let stop = json_stdout(transitly_cmd(home.path()).args(["stops", "get", "stop1", "-o", "json"]));
    assert_eq!(stop["name"], "Market & 3rd St");
    assert_eq!(stop["nextArrivals"].as_array().unwrap().len(), 3);
    assert_eq!(stop["nextArrivals"][2]["eta"], "12 min");
}

#[test]
fn test_stops_serving_route() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["stops", "list", "--route", "30", "-o", "plain"])
        .assert()
        .success()
        .stdout("stop1\nstop3\n");
}

#[test]
fn test_stop_table_shows_badges() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["stops", "get", "stop2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Mission & 1st St")
                .and(predicate::str::contains("Live"))
                .and(predicate::str::contains("Schedule")),
        );
}

#[test]
fn test_routes_list_plain() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["routes", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("14\n30\n");
}

#[test]
fn test_cities_list() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["cities"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Portland").and(predicate::str::contains("schedule only")),
        );
}

#[test]
fn test_other_city_uses_seed_dataset() {
    let home = tempfile::tempdir().unwrap();
    let status = json_stdout(
        transitly_cmd(home.path()).args(["--city", "boston", "status", "-o", "json"]),
    );
    assert_eq!(status["city"], "boston");
    assert_eq!(status["cityName"], "Boston");
    assert_eq!(status["buses"], 2);
}

// ── Watch ───────────────────────────────────────────────────────────

#[test]
fn test_watch_zero_duration_starts_and_stops() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["watch", "--duration", "0", "-o", "plain"])
        .assert()
        .success()
        .stdout("connecting 0\ndisconnected 0\n");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    let home = tempfile::tempdir().unwrap();
    let cfg = json_stdout(transitly_cmd(home.path()).args(["config", "show", "-o", "json"]));
    assert_eq!(cfg["default_city"], "sf");
    assert_eq!(cfg["simulation"]["update_interval_ms"], 5000);
}

#[test]
fn test_config_init_then_refuses_overwrite() {
    let home = tempfile::tempdir().unwrap();
    transitly_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config_file(home.path()).exists());

    let output = transitly_cmd(home.path())
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("--force"));

    transitly_cmd(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_default_city_is_used() {
    let home = tempfile::tempdir().unwrap();
    let path = config_file(home.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "default_city = \"seattle\"\n[defaults]\noutput = \"json\"\n").unwrap();

    let status = json_stdout(transitly_cmd(home.path()).args(["status"]));
    assert_eq!(status["city"], "seattle");
}

#[test]
fn test_broken_config_exits_with_config_code() {
    let home = tempfile::tempdir().unwrap();
    let path = config_file(home.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "default_city = [").unwrap();

    let output = transitly_cmd(home.path()).args(["status"]).output().unwrap();
    assert_eq!(output.status.code(), Some(9));
}

#[test]
fn test_invalid_tuning_exits_with_config_code() {
    let home = tempfile::tempdir().unwrap();
    let path = config_file(home.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[simulation.tuning]\ndelay_probability = 3.0\n").unwrap();

    let output = transitly_cmd(home.path()).args(["status"]).output().unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("delay_probability"));
}
