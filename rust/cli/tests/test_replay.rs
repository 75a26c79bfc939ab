//! Integration tests for the replay command.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

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

const BASIC_FIXTURE: &str = r#"{"events": [
  {"t": 0, "command": "configureCountProfile",
   "countProfile": {"name": "HiLo", "tags": {"5": 1.0, "K": -1.0}}},
  {"t": 1, "obs": {"zoneId": "seat_1", "rank": "5"}},
  {"t": 2, "obs": {"zoneId": "seat_1", "rank": "K"}}
]}"#;

#[test]
fn replay_summarizes_fixture() {
    let dir = tempdir().unwrap();
    let fixture = write_fixture(&dir, "basic.json", BASIC_FIXTURE);

    let (code, out, err) = run(&[
        "tablesight",
        "replay",
        fixture.to_str().unwrap(),
        "--unit-size",
        "10",
    ]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Replay complete for fixture:"));
    // 1 command + 2 observations, each observation derives cardAdded +
    // countSnapshot; one advice record per observation, one bet per seat.
    assert!(out.contains(
        "Observed 3 input events -> 7 output events, 2 advice entries, 1 bet entries."
    ));
    assert!(out.contains("Export summary:"));
    assert!(out.contains("  events: 7"));
    assert!(out.contains("  adviceCount: 2"));
    assert!(out.contains("  betCount: 1"));
    assert!(out.contains("Finished at "));
}

#[test]
fn replay_dump_events_prints_json_lines() {
    let dir = tempdir().unwrap();
    let fixture = write_fixture(&dir, "basic.json", BASIC_FIXTURE);

    let (code, out, _err) = run(&[
        "tablesight",
        "replay",
        fixture.to_str().unwrap(),
        "--unit-size",
        "10",
        "--dump-events",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("cardAdded"));
    assert!(out.contains("countSnapshot"));

    let first_line = out.lines().next().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(first_line).unwrap();
    assert_eq!(parsed["command"], "configureCountProfile");
}

#[test]
fn replay_warns_about_malformed_entries() {
    let dir = tempdir().unwrap();
    let fixture = write_fixture(
        &dir,
        "partial.json",
        r#"{"events": [
          {"t": 0, "obs": {"zoneId": "seat_1", "rank": "5"}},
          {"bogus": true}
        ]}"#,
    );

    let (code, out, err) = run(&[
        "tablesight",
        "replay",
        fixture.to_str().unwrap(),
        "--unit-size",
        "10",
    ]);
    assert_eq!(code, 0);
    assert!(err.contains("WARNING: skipped 1 malformed fixture entries"));
    assert!(out.contains("Observed 1 input events"));
}

#[test]
fn replay_missing_fixture_exits_2() {
    let (code, _out, err) = run(&[
        "tablesight",
        "replay",
        "no_such_fixture.json",
        "--unit-size",
        "10",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("Error:"));
    assert!(err.contains("no_such_fixture.json"));
}

#[test]
fn replay_rejects_document_without_events_array() {
    let dir = tempdir().unwrap();
    let fixture = write_fixture(&dir, "empty.json", r#"{"recordedAt": "nowhere"}"#);

    let (code, _out, err) = run(&[
        "tablesight",
        "replay",
        fixture.to_str().unwrap(),
        "--unit-size",
        "10",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("events"));
}

#[test]
fn replay_rejects_nonpositive_unit_size() {
    let dir = tempdir().unwrap();
    let fixture = write_fixture(&dir, "basic.json", BASIC_FIXTURE);

    let (code, _out, err) = run(&[
        "tablesight",
        "replay",
        fixture.to_str().unwrap(),
        "--unit-size",
        "0",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("unit size must be positive"));
}
