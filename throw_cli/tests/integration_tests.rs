//! Integration tests for the throwlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Session logging and validation
//! - Listing, showing and deleting sessions
//! - Load, risk and streak reporting
//! - CSV and JSON export
//!
//! Every run pins `--today` so week and streak logic is reproducible.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Wednesday; its week starts Sunday 2024-03-10
const TODAY: &str = "2024-03-13";

fn setup_test_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("config.toml"), "").expect("Failed to write config");
    dir
}

/// CLI command bound to a temp data dir, an empty config and a fixed day
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("throwlog"));
    cmd.arg("--data-dir")
        .arg(dir.join("data"))
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--today")
        .arg(TODAY);
    cmd
}

/// Log a shot put technique session and return its id
fn log_session(dir: &Path, date: &str, throws: u32, rpe: u8) -> String {
    let output = cli(dir)
        .args(["log", "--event", "shot-put", "--type", "technique"])
        .args(["--date", date])
        .args(["--throws", &throws.to_string()])
        .args(["--rpe", &rpe.to_string()])
        .output()
        .expect("Failed to run log");
    assert!(output.status.success(), "log failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID:"))
        .map(|id| id.trim().to_string())
        .expect("No session id in output")
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("throwlog"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Training log and load tracker for throwers",
        ));
}

#[test]
fn test_log_writes_session() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["log", "--event", "discus", "--type", "power"])
        .args(["--throws", "30", "--rpe", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session saved"))
        .stdout(predicate::str::contains("Load:  210"));

    let log_path = temp_dir.path().join("data/sessions.jsonl");
    let content = fs::read_to_string(&log_path).expect("Failed to read session log");
    assert_eq!(content.lines().count(), 1);

    let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(record["event"], "discus");
    assert_eq!(record["date"], TODAY);
    assert_eq!(record["implement_weight"], 2.0);
    assert_eq!(record["weight_unit"], "kg");
}

#[test]
fn test_log_rejects_invalid_rpe() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["log", "--event", "hammer", "--type", "power", "--rpe", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RPE must be between 1 and 10"));

    assert!(!temp_dir.path().join("data/sessions.jsonl").exists());
}

#[test]
fn test_log_rejects_unknown_event() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["log", "--event", "pole-vault", "--type", "power"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown event"));
}

#[test]
fn test_pr_distance_requires_pr_flag() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["log", "--event", "javelin", "--type", "competition"])
        .args(["--pr-distance", "61.2"])
        .assert()
        .failure();
}

#[test]
fn test_list_empty() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions found"));
}

#[test]
fn test_list_marks_rpe_intensity() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-11", 20, 3);
    log_session(temp_dir.path(), "2024-03-12", 20, 6);
    let hard = log_session(temp_dir.path(), "2024-03-13", 20, 9);

    cli(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("🟩 RPE  3"))
        .stdout(predicate::str::contains("🟨 RPE  6"))
        .stdout(predicate::str::contains("🟥 RPE  9"));

    cli(temp_dir.path())
        .args(["show", &hard])
        .assert()
        .success()
        .stdout(predicate::str::contains("🟥 9/10 (Very Hard)"));
}

#[test]
fn test_list_filters_by_event() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-12", 20, 5);

    cli(temp_dir.path())
        .args(["log", "--event", "javelin", "--type", "competition", "--season", "outdoor"])
        .args(["--pr", "--pr-distance", "61.2"])
        .assert()
        .success();

    cli(temp_dir.path())
        .args(["list", "--event", "javelin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Javelin"))
        .stdout(predicate::str::contains("Shot Put").not());

    cli(temp_dir.path())
        .args(["list", "--pr-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PR"))
        .stdout(predicate::str::contains("Shot Put").not());

    cli(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Javelin"))
        .stdout(predicate::str::contains("Shot Put"));
}

#[test]
fn test_show_and_delete() {
    let temp_dir = setup_test_dir();
    let id = log_session(temp_dir.path(), "2024-03-12", 25, 8);

    cli(temp_dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session Load:     200"))
        .stdout(predicate::str::contains("8/10 (Hard)"));

    cli(temp_dir.path())
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session deleted"));

    cli(temp_dir.path())
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));

    cli(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions found"));
}

#[test]
fn test_stats_flags_danger_above_twenty_percent() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-05", 100, 1); // last week: 100
    log_session(temp_dir.path(), "2024-03-11", 121, 1); // this week: 121

    cli(temp_dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("This week: 121"))
        .stdout(predicate::str::contains("Last week: 100"))
        .stdout(predicate::str::contains("+21%"))
        .stdout(predicate::str::contains("Injury risk elevated"))
        .stdout(predicate::str::contains("Consider reducing intensity"));
}

#[test]
fn test_stats_exactly_twenty_percent_is_warning() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-05", 100, 1);
    log_session(temp_dir.path(), "2024-03-11", 120, 1);

    cli(temp_dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("+20%"))
        .stdout(predicate::str::contains("Moderate load increase"))
        .stdout(predicate::str::contains("Consider reducing intensity").not());
}

#[test]
fn test_stats_empty_history() {
    let temp_dir = setup_test_dir();

    let output = cli(temp_dir.path()).arg("stats").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Load is within safe range"));
    assert!(stdout.contains("Avg RPE:  0.0"));
    assert_eq!(stdout.matches("weeks ago").count(), 7);
    assert_eq!(stdout.matches("this week").count(), 1);
}

#[test]
fn test_stats_custom_week_count() {
    let temp_dir = setup_test_dir();

    let output = cli(temp_dir.path())
        .args(["stats", "--weeks", "4"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("weeks ago").count(), 3);
}

#[test]
fn test_stats_rejects_out_of_range_week_count() {
    let temp_dir = setup_test_dir();

    for weeks in ["0", "521", "20000000"] {
        cli(temp_dir.path())
            .args(["stats", "--weeks", weeks])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("--weeks"));
    }

    cli(temp_dir.path())
        .args(["stats", "--weeks", "520"])
        .assert()
        .success()
        .stdout(predicate::str::contains("519 weeks ago"));
}

#[test]
fn test_streak_counts_consecutive_days() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-11", 10, 5);
    log_session(temp_dir.path(), "2024-03-12", 10, 5);
    log_session(temp_dir.path(), "2024-03-12", 15, 6);
    log_session(temp_dir.path(), "2024-03-13", 10, 5);

    cli(temp_dir.path())
        .arg("streak")
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 3 day(s)"));

    let cache = fs::read_to_string(temp_dir.path().join("data/streak.json")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&cache).unwrap();
    assert_eq!(record["current"], 3);
    assert_eq!(record["last_log_date"], "2024-03-13");
}

#[test]
fn test_streak_broken_after_gap() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-11", 10, 5);

    cli(temp_dir.path())
        .arg("streak")
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 0 day(s)"));
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-12", 20, 5);
    log_session(temp_dir.path(), "2024-03-13", 10, 4);
    let csv_path = temp_dir.path().join("out.csv");

    cli(temp_dir.path())
        .args(["export", "csv", "--output"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 sessions"));

    let content = fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("Date,Event,Session Type"));
    assert!(content.lines().next().unwrap().ends_with(",Load (Throws × RPE)"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_export_csv_nothing_to_export() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["export", "csv", "--output"])
        .arg(temp_dir.path().join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sessions to export"));
}

#[test]
fn test_export_json_backup() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-13", 20, 5);
    let json_path = temp_dir.path().join("backup.json");

    cli(temp_dir.path())
        .args(["export", "json", "--output"])
        .arg(&json_path)
        .assert()
        .success();

    let backup: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(backup["version"], "1.0.0");
    assert_eq!(backup["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(backup["streak"]["current"], 1);
}

#[test]
fn test_clear_requires_confirmation() {
    let temp_dir = setup_test_dir();
    log_session(temp_dir.path(), "2024-03-13", 20, 5);
    let log_path = temp_dir.path().join("data/sessions.jsonl");

    cli(temp_dir.path()).arg("clear").assert().failure();
    assert!(log_path.exists());

    cli(temp_dir.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All data cleared"));
    assert!(!log_path.exists());
    assert!(!temp_dir.path().join("data/streak.json").exists());
}
