//! Zone calibration command handlers.
//!
//! Manages the persisted capture region and seat polygons used by the
//! capture side of the monitor, including a coarse ASCII preview of the
//! layout for headless calibration checks.

use std::io::Write;
use std::path::PathBuf;

use tablesight_engine::zones::{Region, ZonesConfig, ZonesConfigStore};

use crate::cli::ZonesCommands;
use crate::error::CliError;
use crate::{config, ui};

const DEFAULT_ZONES_FILE: &str = "zones_config.json";

/// Handle the zones subcommands (set-region, show, render, reset).
pub fn handle_zones_command(
    cmd: ZonesCommands,
    config_path: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let settings = config::load()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;
    let path = config_path
        .or_else(|| settings.zones_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ZONES_FILE));
    let store = ZonesConfigStore::new(path);

    match cmd {
        ZonesCommands::SetRegion {
            x,
            y,
            width,
            height,
            reset_zones,
        } => {
            if width <= 0.0 || height <= 0.0 {
                let msg = "region width and height must be positive".to_string();
                ui::write_error(err, &msg)?;
                return Err(CliError::InvalidInput(msg));
            }
            let updated = store.set_region(Region::new(x, y, width, height), !reset_zones)?;
            writeln!(
                out,
                "Capture region updated to x={:.0}, y={:.0}, w={:.0}, h={:.0}.",
                updated.region.x, updated.region.y, updated.region.w, updated.region.h
            )?;
            writeln!(out, "Configuration saved to {}.", store.path.display())?;
        }
        ZonesCommands::Show => {
            let config = store.load()?;
            let rendered = serde_json::to_string_pretty(&config)
                .map_err(|e| CliError::Zones(e.to_string()))?;
            writeln!(out, "{}", rendered)?;
        }
        ZonesCommands::Render { width, height } => {
            let config = store.load()?;
            writeln!(out, "{}", render_preview(&config, width, height))?;
        }
        ZonesCommands::Reset { seat_count } => {
            let seats = seat_count.unwrap_or(settings.seat_count);
            let config = ZonesConfig::default_layout(None, seats);
            store.save(&config)?;
            writeln!(
                out,
                "Configuration reset with {} seats at {}.",
                seats,
                store.path.display()
            )?;
        }
    }
    Ok(())
}

/// Renders a coarse ASCII preview of the configured zones with a legend.
pub fn render_preview(config: &ZonesConfig, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(10);
    let mut canvas = vec![vec![' '; width]; height];
    draw_border(&mut canvas);

    let mut labels: Vec<String> = Vec::with_capacity(config.zones.len());
    for zone in &config.zones {
        let label = label_for(&zone.id, &labels);
        draw_zone(&mut canvas, config, zone, &label, width, height);
        labels.push(label);
    }

    let mut lines: Vec<String> = canvas
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect();
    lines.push(String::new());
    lines.push("Legend:".to_string());
    for (zone, label) in config.zones.iter().zip(&labels) {
        let ((min_x, min_y), (max_x, max_y)) = zone.bounds();
        lines.push(format!(
            "  {}: {} (x={:.0}..{:.0}, y={:.0}..{:.0})",
            label, zone.id, min_x, max_x, min_y, max_y
        ));
    }
    lines.join("\n")
}

fn draw_border(canvas: &mut [Vec<char>]) {
    let height = canvas.len();
    let width = canvas[0].len();
    for col in 0..width {
        canvas[0][col] = '-';
        canvas[height - 1][col] = '-';
    }
    for row in canvas.iter_mut() {
        row[0] = '|';
        row[width - 1] = '|';
    }
    canvas[0][0] = '+';
    canvas[0][width - 1] = '+';
    canvas[height - 1][0] = '+';
    canvas[height - 1][width - 1] = '+';
}

fn draw_zone(
    canvas: &mut [Vec<char>],
    config: &ZonesConfig,
    zone: &tablesight_engine::zones::Zone,
    label: &str,
    width: usize,
    height: usize,
) {
    if zone.polygon.is_empty() {
        return;
    }
    let region = &config.region;
    let xs: Vec<f64> = zone.polygon.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = zone.polygon.iter().map(|p| p.1).collect();
    let (min_col, max_col) = project_bounds(&xs, region.w, region.x, width);
    let (min_row, max_row) = project_bounds(&ys, region.h, region.y, height);

    for col in min_col..=max_col {
        canvas[min_row][col] = '#';
        canvas[max_row][col] = '#';
    }
    for row in canvas.iter_mut().take(max_row + 1).skip(min_row) {
        row[min_col] = '#';
        row[max_col] = '#';
    }

    let (cx, cy) = zone.centroid();
    let (col, row) = project_point(cx, cy, region, width, height);
    write_label(canvas, row, col, label, width);
}

fn project_bounds(values: &[f64], span: f64, offset: f64, size: usize) -> (usize, usize) {
    if values.is_empty() || span == 0.0 {
        return (1, (size - 2).max(1));
    }
    let min_v = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_v = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let clamp = |norm: f64| -> usize {
        let idx = (norm * (size - 1) as f64) as isize;
        idx.clamp(1, (size - 2) as isize) as usize
    };
    let mut min_idx = clamp((min_v - offset) / span);
    let mut max_idx = clamp((max_v - offset) / span);
    if min_idx > max_idx {
        std::mem::swap(&mut min_idx, &mut max_idx);
    }
    (min_idx, max_idx)
}

fn project_point(x: f64, y: f64, region: &Region, width: usize, height: usize) -> (usize, usize) {
    if region.w == 0.0 || region.h == 0.0 {
        return (width / 2, height / 2);
    }
    let norm_x = (x - region.x) / region.w;
    let norm_y = (y - region.y) / region.h;
    let col = (norm_x * (width - 1) as f64).round() as isize;
    let row = (norm_y * (height - 1) as f64).round() as isize;
    (
        col.clamp(1, (width - 2) as isize) as usize,
        row.clamp(1, (height - 2) as isize) as usize,
    )
}

fn write_label(canvas: &mut [Vec<char>], row: usize, col: usize, label: &str, width: usize) {
    for (index, ch) in label.chars().enumerate() {
        let target = col + index;
        if target >= width - 1 {
            break;
        }
        canvas[row][target] = ch;
    }
}

fn label_for(zone_id: &str, existing: &[String]) -> String {
    let base: String = if let Some(suffix) = zone_id.strip_prefix("seat_") {
        suffix.chars().take(2).collect()
    } else {
        zone_id.chars().take(2).collect::<String>().to_uppercase()
    };
    let mut attempt = base.clone();
    let mut counter = 1;
    while existing.contains(&attempt) {
        counter += 1;
        attempt = format!("{}{}", base, counter);
    }
    attempt
}
