//! Command-line argument definitions for the tablesight binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tablesight",
    version,
    about = "Blackjack table-monitoring toolkit: fixture replay and zone calibration"
)]
pub struct TablesightCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a recorded event fixture through the state tracker
    Replay {
        /// Path to a fixture JSON file
        fixture: String,
        /// Bet unit size, overriding the configured value
        #[arg(long)]
        unit_size: Option<f64>,
        /// Print every output event as a JSON line
        #[arg(long)]
        dump_events: bool,
    },
    /// Inspect or edit the calibrated capture region and seat zones
    Zones {
        /// Path to the zones_config.json file
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(subcommand)]
        cmd: ZonesCommands,
    },
    /// Display resolved configuration settings
    Cfg,
}

#[derive(Debug, Subcommand)]
pub enum ZonesCommands {
    /// Persist a new capture region (x, y, width, height)
    SetRegion {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// Regenerate seat polygons instead of scaling existing ones
        #[arg(long)]
        reset_zones: bool,
    },
    /// Print the stored configuration as JSON
    Show,
    /// Display an ASCII preview of the current zone layout
    Render {
        #[arg(long, default_value_t = 60)]
        width: usize,
        #[arg(long, default_value_t = 20)]
        height: usize,
    },
    /// Restore the configuration to the default layout
    Reset {
        /// Number of player seats to generate
        #[arg(long)]
        seat_count: Option<usize>,
    },
}
