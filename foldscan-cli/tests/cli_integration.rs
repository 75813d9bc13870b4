//! Integration tests for the foldscan CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

#[test]
fn test_convert_writes_tables() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("processed");

    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("convert")
        .arg("-i")
        .arg(fixture_path("sample-scan.txt"))
        .arg("-o")
        .arg(&out_dir);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Video results: 6 rows"))
        .stdout(predicate::str::contains("Summary stats: 3 rows"));

    let video = fs::read_to_string(out_dir.join("video_results.csv")).unwrap();
    assert!(video.starts_with("window_size,video_id,video_name,identity,accuracy"));
    assert_eq!(video.lines().count(), 7);
    assert!(video.contains("mouse arena a.mp4"));

    let features = fs::read_to_string(out_dir.join("feature_importance.csv")).unwrap();
    assert!(features.contains("10,1,speed mean,0.5234"));
    assert!(features.contains("30,1,body angle,0.5107"));

    let metadata = fs::read_to_string(out_dir.join("metadata.txt")).unwrap();
    assert!(metadata.contains("Number of windows: 3"));
}

#[test]
fn test_convert_with_tab_delimiter() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("processed");

    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("convert")
        .arg("-i")
        .arg(fixture_path("sample-scan.txt"))
        .arg("-o")
        .arg(&out_dir)
        .arg("--delimiter")
        .arg("\t")
        .arg("--quiet");

    cmd.assert().success();

    let summary = fs::read_to_string(out_dir.join("summary_stats.csv")).unwrap();
    assert!(summary.starts_with("window_size\tmean_accuracy"));
}

#[test]
fn test_convert_missing_input() {
    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("convert").arg("-i").arg("nonexistent-scan.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_validate_clean_scan_passes() {
    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("validate")
        .arg("-i")
        .arg(fixture_path("sample-scan.txt"))
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ALL VALIDATION CHECKS PASSED"));
}

#[test]
fn test_validate_out_of_range_fails() {
    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("validate")
        .arg("-i")
        .arg(fixture_path("out-of-range-scan.txt"))
        .arg("--quiet");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("METRIC RANGE"))
        .stdout(predicate::str::contains("accuracy = 1.5"))
        .stderr(predicate::str::contains("validation failed"));
}

#[test]
fn test_validate_json_format() {
    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("validate")
        .arg("-i")
        .arg(fixture_path("sample-scan.txt"))
        .arg("-f")
        .arg("json")
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"passed\": true"));
}

#[test]
fn test_report_html_output() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("reports");

    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("report")
        .arg("-i")
        .arg(fixture_path("sample-scan.txt"))
        .arg("-o")
        .arg(&out_dir)
        .arg("--quiet");

    cmd.assert().success();

    let html = fs::read_to_string(out_dir.join("report.html")).unwrap();
    assert!(html.contains("Recommended Window Size: 20 frames"));
    assert!(html.contains("<svg"));
    assert!(html.contains("speed mean"));
}

#[test]
fn test_report_both_formats() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("reports");

    let mut cmd = Command::cargo_bin("foldscan").unwrap();
    cmd.arg("report")
        .arg("-i")
        .arg(fixture_path("sample-scan.txt"))
        .arg("-o")
        .arg(&out_dir)
        .arg("-f")
        .arg("both")
        .arg("--quiet");

    cmd.assert().success();
    assert!(out_dir.join("report.html").exists());
    assert!(out_dir.join("report.tex").exists());
}

#[test]
fn test_convert_then_validate_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");

    for out in [&first, &second] {
        let mut cmd = Command::cargo_bin("foldscan").unwrap();
        cmd.arg("convert")
            .arg("-i")
            .arg(fixture_path("sample-scan.txt"))
            .arg("-o")
            .arg(out)
            .arg("--quiet");
        cmd.assert().success();
    }

    for name in [
        "video_results.csv",
        "summary_stats.csv",
        "feature_importance.csv",
    ] {
        let a = fs::read_to_string(first.join(name)).unwrap();
        let b = fs::read_to_string(second.join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}
