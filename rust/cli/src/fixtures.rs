//! Fixture file loading.
//!
//! A fixture is a JSON document with an `events` array of pipeline
//! entries, as recorded from the capture/vision side:
//!
//! ```json
//! {"events": [
//!   {"t": 0, "command": "beginRound"},
//!   {"t": 1, "obs": {"zoneId": "seat_1", "rank": "5"}}
//! ]}
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tablesight_engine::events::PipelineEvent;

use crate::error::CliError;

/// Loads a fixture file into typed pipeline events. Entries that do not
/// decode are skipped (the upstream recorder occasionally emits partial
/// data); the skip count is returned so callers can warn.
pub fn load_fixture(path: &Path) -> Result<(Vec<PipelineEvent>, usize), CliError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::Fixture(format!("failed to read {}: {}", path.display(), e)))?;
    let document: Value = serde_json::from_str(&contents)
        .map_err(|e| CliError::Fixture(format!("failed to parse {}: {}", path.display(), e)))?;
    let entries = document
        .get("events")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            CliError::Fixture(format!("{} has no \"events\" array", path.display()))
        })?;

    let mut events = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;
    for entry in entries {
        match PipelineEvent::from_value(entry) {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }
    Ok((events, skipped))
}
