//! CLI end-to-end tests
//!
//! Runs the `mp4-reencode` binary without a real FFmpeg: only dry runs and
//! run-level failures are exercised here.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[allow(deprecated)]
fn reencode_cmd() -> Command {
    Command::cargo_bin("mp4-reencode").unwrap()
}

#[test]
fn test_cli_no_args_shows_usage() {
    reencode_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_lists_flags() {
    reencode_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--keep-original"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_cli_invalid_folder_fails() {
    let dir = tempdir().unwrap();
    reencode_cmd()
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid folder"));
}

#[test]
fn test_cli_invalid_suffix_fails() {
    let dir = tempdir().unwrap();
    reencode_cmd()
        .arg(dir.path())
        .args(["--keep-original", "--suffix", "x/y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_cli_dry_run_lists_targets_and_writes_nothing() {
    let dir = tempdir().unwrap();
    for name in ["a.mp4", "b.mp4", "c.MP4"] {
        fs::write(dir.path().join(name), name).unwrap();
    }

    reencode_cmd()
        .arg(dir.path())
        .args(["--dry-run", "--ffmpeg", "/nonexistent/ffmpeg"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Files to process: 3"))
        .stderr(predicate::str::contains("Succeeded: 3"));

    let mut names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a.mp4", "b.mp4", "c.MP4"]);
    assert_eq!(fs::read(dir.path().join("b.mp4")).unwrap(), b"b.mp4");
}

#[test]
fn test_cli_json_events() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("clip.mp4"), b"clip").unwrap();

    let output = reencode_cmd()
        .arg(dir.path())
        .args(["--dry-run", "--keep-original", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let types: Vec<_> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["start", "file_start", "file_complete", "complete"]);
    assert!(events[2]["output"]
        .as_str()
        .unwrap()
        .ends_with("clip_reencoded.mp4"));
    assert_eq!(events[3]["succeeded"], 1);
    assert_eq!(events[3]["dry_run"], true);
}

#[test]
fn test_cli_missing_ffmpeg_counts_each_file_as_failed() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp4"), b"original").unwrap();

    reencode_cmd()
        .arg(dir.path())
        .args(["--ffmpeg", "/nonexistent/ffmpeg"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Succeeded: 0"))
        .stderr(predicate::str::contains("Failed: 1"));

    assert!(!dir.path().join("a.mp4.tmp_transcode.mp4").exists());

    assert_eq!(fs::read(dir.path().join("a.mp4")).unwrap(), b"original");
}
