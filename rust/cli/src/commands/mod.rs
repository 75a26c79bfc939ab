//! Command handler modules for the tablesight CLI.
//!
//! Each subcommand lives in its own module with a
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>` entry
//! point. Output streams are injected as `&mut dyn Write` so tests can
//! capture them.

mod cfg;
mod replay;
mod zones;

pub use cfg::handle_cfg_command;
pub use replay::handle_replay_command;
pub use zones::handle_zones_command;
