//! Replay command handler.
//!
//! Feeds a recorded fixture stream through the round state tracker, runs
//! the downstream advisory helpers over the output, and prints an export
//! summary. This is the offline equivalent of the live capture pipeline.

use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use tablesight_engine::advice::{advise, recommend_bets};
use tablesight_engine::export::summarize;
use tablesight_engine::tracker::RoundStateTracker;

use crate::error::CliError;
use crate::fixtures::load_fixture;
use crate::{config, ui};

const DEFAULT_ACTION: &str = "Stand";

/// Handle the replay command.
///
/// # Arguments
///
/// * `fixture` - Path to the fixture JSON file
/// * `unit_size` - Optional bet unit override; falls back to configuration
/// * `dump_events` - Print every output event as a JSON line
/// * `out` - Output stream for the summary
/// * `err` - Error stream for warnings and errors
pub fn handle_replay_command(
    fixture: String,
    unit_size: Option<f64>,
    dump_events: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let unit_size = match unit_size {
        Some(value) if value <= 0.0 => {
            let msg = format!("unit size must be positive, got {}", value);
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
        Some(value) => value,
        None => match config::load() {
            Ok(cfg) => cfg.unit_size,
            Err(e) => {
                let msg = format!("Invalid configuration: {}", e);
                ui::write_error(err, &msg)?;
                return Err(CliError::Config(msg));
            }
        },
    };

    let path = Path::new(&fixture);
    let (events, skipped) = load_fixture(path).inspect_err(|e| {
        let _ = ui::write_error(err, &e.to_string());
    })?;
    if skipped > 0 {
        ui::display_warning(err, &format!("skipped {} malformed fixture entries", skipped))?;
    }

    let input_count = events.len();
    let mut tracker = RoundStateTracker::new();
    let output = tracker.ingest(events);

    let advice = advise(&output, DEFAULT_ACTION);
    let bets = recommend_bets(&output, unit_size);
    let export = summarize(&output, &advice, &bets);

    if dump_events {
        for event in &output {
            writeln!(out, "{}", event.to_value())?;
        }
    }

    writeln!(out, "Replay complete for fixture: {}", path.display())?;
    writeln!(
        out,
        "Observed {} input events -> {} output events, {} advice entries, {} bet entries.",
        input_count,
        output.len(),
        advice.len(),
        bets.len()
    )?;
    writeln!(out, "Export summary:")?;
    writeln!(out, "  events: {}", export.events)?;
    writeln!(out, "  adviceCount: {}", export.advice_count)?;
    writeln!(out, "  betCount: {}", export.bet_count)?;
    writeln!(
        out,
        "Finished at {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    Ok(())
}
