#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const TRIANGLE: [[f64; 4]; 3] = [
    [400.0, 400.0, 300.0, 300.0],
    [600.0, 400.0, 700.0, 300.0],
    [440.0, 420.0, 380.0, 340.0],
];

fn write_segments(dir: &Path, name: &str, segments: &[[f64; 4]]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string(segments).unwrap()).unwrap();
    path
}

fn read_report(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("vanishing-point").unwrap();
    cmd.args(["--log-level", "warn"]);
    cmd
}

#[test]
fn reports_vanishing_point_for_converging_segments() {
    let dir = tempfile::tempdir().unwrap();
    let segs = write_segments(dir.path(), "segments.json", &TRIANGLE);
    let out = dir.path().join("report.json");

    cli()
        .arg("--segments")
        .arg(&segs)
        .args(["--width", "1000", "--height", "1000"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "vanishing point: (500.00, 500.00) weight=262",
        ));

    let report = read_report(&out);
    assert_eq!(report["vanishing_point"]["weight"], 262);
    assert_eq!(report["num_segments"], 3);
    assert_eq!(report["num_clusters"], 1);
    assert_eq!(report["extended_lines"].as_array().unwrap().len(), 3);
    assert!(report["error"].is_null());
}

#[test]
fn near_horizontal_segments_find_nothing_but_still_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let segs = write_segments(
        dir.path(),
        "flat.json",
        &[
            [0.0, 100.0, 900.0, 120.0],
            [0.0, 500.0, 900.0, 450.0],
        ],
    );
    let out = dir.path().join("report.json");

    cli()
        .arg("--segments")
        .arg(&segs)
        .args(["--width", "1000", "--height", "1000"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No vanishing point found."));

    let report = read_report(&out);
    assert!(report["vanishing_point"].is_null());
    assert_eq!(report["message"], "no vanishing point found");
    assert_eq!(report["extended_lines"].as_array().unwrap().len(), 2);
    assert_eq!(report["stats"]["skipped_near_horizontal"], 1);
}

#[test]
fn single_segment_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let segs = write_segments(dir.path(), "one.json", &TRIANGLE[..1]);
    let out = dir.path().join("report.json");

    cli()
        .arg("--segments")
        .arg(&segs)
        .args(["--width", "1000", "--height", "1000"])
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 line segments"));

    let report = read_report(&out);
    assert!(report["error"]
        .as_str()
        .unwrap()
        .contains("at least 2 line segments"));
}

#[test]
fn missing_frame_size_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let segs = write_segments(dir.path(), "segments.json", &TRIANGLE);

    cli()
        .arg("--segments")
        .arg(&segs)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no frame size"));
}

#[test]
fn zero_max_side_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let segs = write_segments(dir.path(), "segments.json", &TRIANGLE);

    cli()
        .arg("--segments")
        .arg(&segs)
        .args(["--width", "1000", "--height", "1000", "--max-side", "0"])
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid max_working_side"));
}

#[test]
fn zero_cluster_radius_is_reported_as_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let segs = write_segments(dir.path(), "segments.json", &TRIANGLE);
    let out = dir.path().join("report.json");

    cli()
        .arg("--segments")
        .arg(&segs)
        .args(["--width", "1000", "--height", "1000", "--cluster-radius", "0"])
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid parameter cluster_radius_px"));

    let report = read_report(&out);
    assert!(report["vanishing_point"].is_null());
    assert!(report["error"]
        .as_str()
        .unwrap()
        .contains("cluster_radius_px"));
}

#[test]
fn config_with_image_downscales_to_working_frame() {
    let dir = tempfile::tempdir().unwrap();
    image::GrayImage::new(2000, 1000)
        .save(dir.path().join("frame.png"))
        .unwrap();

    // Source-resolution segments: the triangle scaled by 2.
    let doubled: Vec<[f64; 4]> = TRIANGLE
        .iter()
        .map(|s| [s[0] * 2.0, s[1] * 2.0, s[2] * 2.0, s[3] * 2.0])
        .collect();
    write_segments(dir.path(), "segments.json", &doubled);

    let out = dir.path().join("out").join("report.json");
    let config = serde_json::json!({
        "image_path": "frame.png",
        "segments_path": "segments.json",
        "output_path": out.to_string_lossy(),
    });
    let cfg_path = dir.path().join("config.json");
    fs::write(&cfg_path, config.to_string()).unwrap();

    cli()
        .arg(&cfg_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "vanishing point: (1000.00, 1000.00) weight=262",
        ));

    let report = read_report(&out);
    assert_eq!(report["frame"]["scale"], 0.5);
    assert_eq!(report["frame"]["working"]["width"], 1000.0);
    assert_eq!(report["frame"]["working"]["height"], 500.0);
    let working = &report["vanishing_point"]["working"];
    assert_eq!(working[0], 500.0);
    assert_eq!(working[1], 500.0);
}
