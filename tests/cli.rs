//! Integration tests for the parkspot CLI

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn write_regions(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("parkspot-{}-{name}.json", std::process::id()));
    std::fs::write(&path, json).unwrap();
    path
}

const LOT: &str = r#"[
    {"bbox": [0, 0, 10, 10], "label": "free", "confidence": 0.9},
    {"bbox": [100, 100, 110, 110], "label": "free", "confidence": 0.8},
    {"bbox": [20, 20, 30, 30], "label": "occupied"}
]"#;

#[test]
fn test_assigns_nearest_spot() {
    let regions = write_regions("assign", LOT);
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.arg("--regions").arg(&regions).args(["-x", "1", "-y", "1"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"assigned_x":5,"assigned_y":5}"#));
}

#[test]
fn test_no_free_spot_is_success() {
    let regions = write_regions(
        "occupied",
        r#"[{"bbox": [0, 0, 10, 10], "label": "occupied", "confidence": 0.9}]"#,
    );
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.arg("--regions").arg(&regions).args(["-x", "5", "-y", "5"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No available parking spot found"));
}

#[test]
fn test_click_outside_frame_fails() {
    let regions = write_regions("frame", LOT);
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.arg("--regions")
        .arg(&regions)
        .args(["-x", "500", "-y", "5", "--width", "200", "--height", "200"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("outside"));
}

#[test]
fn test_nan_click_fails() {
    let regions = write_regions("nan", LOT);
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.arg("--regions").arg(&regions).args(["-x", "NaN", "-y", "5"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("finite"));
}

#[test]
fn test_missing_regions_file() {
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.args(["--regions", "/nonexistent/regions.json", "-x", "1", "-y", "1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("reading regions"));
}

#[test]
fn test_class_ids_named_from_config() {
    let regions = write_regions(
        "class-ids",
        r#"[
            {"bbox": [0, 0, 10, 10], "class_id": 1},
            {"bbox": [100, 100, 110, 110], "class_id": 0}
        ]"#,
    );
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.arg("--regions").arg(&regions).args(["-x", "1", "-y", "1"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"assigned_x":105,"assigned_y":105}"#));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("parkspot");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("parkspot "));
}
