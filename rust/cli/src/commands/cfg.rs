//! Cfg command handler: prints the resolved configuration with the
//! source each value came from (default, file, or env).

use std::io::Write;

use serde_json::json;

use crate::config;
use crate::error::CliError;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    let cfg = &resolved.config;
    let sources = &resolved.sources;

    let document = json!({
        "unit_size": { "value": cfg.unit_size, "source": sources.unit_size },
        "seat_count": { "value": cfg.seat_count, "source": sources.seat_count },
        "zones_path": { "value": cfg.zones_path, "source": sources.zones_path },
    });
    let rendered = serde_json::to_string_pretty(&document)
        .map_err(|e| CliError::Config(e.to_string()))?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}
