//! Concurrency tests for throwlog.
//!
//! These tests verify that multiple processes can safely:
//! - Append to the session log simultaneously (file locking)
//! - Read while others write
//! - Refresh the streak cache without corrupting it

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("throwlog"));
    cmd.arg("--data-dir")
        .arg(dir.join("data"))
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--today")
        .arg("2024-03-13");
    cmd
}

fn setup_test_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("config.toml"), "").unwrap();
    dir
}

fn spawn_log(dir: PathBuf, date: &'static str) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        cli(&dir)
            .args(["log", "--event", "shot-put", "--type", "power", "--date", date])
            .assert()
            .success();
    })
}

#[test]
fn test_concurrent_session_logging() {
    let temp_dir = setup_test_dir();
    let dates = ["2024-03-09", "2024-03-10", "2024-03-11", "2024-03-12", "2024-03-13"];

    let handles: Vec<_> = dates
        .iter()
        .map(|&date| spawn_log(temp_dir.path().to_path_buf(), date))
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let log_path = temp_dir.path().join("data/sessions.jsonl");
    let content = std::fs::read_to_string(&log_path).expect("Failed to read session log");
    assert_eq!(content.lines().count(), 5, "Expected 5 sessions");

    for line in content.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("Corrupted log line");
    }
}

#[test]
fn test_concurrent_reads_and_writes() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["log", "--event", "discus", "--type", "technique"])
        .assert()
        .success();

    let writer = spawn_log(temp_dir.path().to_path_buf(), "2024-03-12");

    let reader_dir = temp_dir.path().to_path_buf();
    let reader = thread::spawn(move || {
        for _ in 0..3 {
            cli(&reader_dir).arg("stats").assert().success();
        }
    });

    writer.join().expect("Writer panicked");
    reader.join().expect("Reader panicked");

    // Streak cache must be valid JSON after concurrent refreshes
    let cache = std::fs::read_to_string(temp_dir.path().join("data/streak.json")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&cache).unwrap();
    assert_eq!(record["current"], 2);
}
