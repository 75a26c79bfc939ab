//! Integration tests for the zones subcommands.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = tablesight_cli::run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn config_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("zones_config.json")
}

#[test]
fn reset_creates_config_with_requested_seats() {
    let dir = tempdir().unwrap();
    let path = config_path(&dir);

    let (code, out, err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "reset",
        "--seat-count",
        "5",
    ]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Configuration reset with 5 seats"));

    let contents = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let zones = parsed["zones"].as_array().unwrap();
    // 5 seats plus the dealer box.
    assert_eq!(zones.len(), 6);
    assert_eq!(zones[0]["id"], "seat_1");
    assert_eq!(zones[5]["id"], "dealer");
}

#[test]
fn show_prints_default_layout_when_file_missing() {
    let dir = tempdir().unwrap();
    let path = config_path(&dir);

    let (code, out, _err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "show",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("seat_1"));
    assert!(out.contains("dealer"));
    // Showing must not create the file.
    assert!(!path.exists());
}

#[test]
fn set_region_scales_existing_zones() {
    let dir = tempdir().unwrap();
    let path = config_path(&dir);

    let (code, _out, _err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "reset",
        "--seat-count",
        "3",
    ]);
    assert_eq!(code, 0);

    let (code, out, _err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "set-region",
        "100",
        "50",
        "640",
        "360",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Capture region updated to x=100, y=50, w=640, h=360."));

    let contents = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["region"]["x"], 100.0);
    assert_eq!(parsed["region"]["w"], 640.0);
    // Zone count preserved by scaling.
    assert_eq!(parsed["zones"].as_array().unwrap().len(), 4);
    for zone in parsed["zones"].as_array().unwrap() {
        for point in zone["polygon"].as_array().unwrap() {
            let x = point[0].as_f64().unwrap();
            let y = point[1].as_f64().unwrap();
            assert!((100.0..=740.0).contains(&x));
            assert!((50.0..=410.0).contains(&y));
        }
    }
}

#[test]
fn set_region_with_reset_zones_regenerates_default_layout() {
    let dir = tempdir().unwrap();
    let path = config_path(&dir);

    let (code, _out, _err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "reset",
        "--seat-count",
        "3",
    ]);
    assert_eq!(code, 0);

    let (code, _out, _err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "set-region",
        "0",
        "0",
        "1920",
        "1080",
        "--reset-zones",
    ]);
    assert_eq!(code, 0);

    let contents = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    // Default layout: 7 seats plus dealer.
    assert_eq!(parsed["zones"].as_array().unwrap().len(), 8);
}

#[test]
fn set_region_rejects_nonpositive_dimensions() {
    let dir = tempdir().unwrap();
    let path = config_path(&dir);

    let (code, _out, err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "set-region",
        "0",
        "0",
        "0",
        "720",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("width and height must be positive"));
    assert!(!path.exists());
}

#[test]
fn render_draws_border_and_legend() {
    let dir = tempdir().unwrap();
    let path = config_path(&dir);

    let (code, out, _err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "render",
        "--width",
        "40",
        "--height",
        "12",
    ]);
    assert_eq!(code, 0);

    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with('+'));
    assert!(lines[0].ends_with('+'));
    assert_eq!(lines[0].len(), 40);
    assert!(out.contains('#'));
    assert!(out.contains("Legend:"));
    assert!(out.contains("DE: dealer"));
    assert!(out.contains("1: seat_1"));
}

#[test]
fn render_clamps_tiny_canvas() {
    let dir = tempdir().unwrap();
    let path = config_path(&dir);

    let (code, out, _err) = run(&[
        "tablesight",
        "zones",
        "--config",
        path.to_str().unwrap(),
        "render",
        "--width",
        "2",
        "--height",
        "2",
    ]);
    assert_eq!(code, 0);
    // Minimum canvas is 10x10.
    assert_eq!(out.lines().next().unwrap().len(), 10);
}
