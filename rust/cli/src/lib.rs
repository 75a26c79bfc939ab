//! # Tablesight CLI Library
//!
//! Command-line interface for the tablesight table-monitoring engine.
//! It replays recorded event fixtures through the round state tracker
//! and manages the zone calibration used by the capture side.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["tablesight", "replay", "fixture.json"];
//! let code = tablesight_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `replay`: Replay a recorded event fixture and print an export summary
//! - `zones`: Inspect or edit the calibrated capture region and seat zones
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod fixtures;
pub mod ui;

use cli::{Commands, TablesightCli};
use commands::{handle_cfg_command, handle_replay_command, handle_zones_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["replay", "zones", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = TablesightCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return 2;
                    }
                    0
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Tablesight CLI").is_err()
                        || writeln!(err, "Usage: tablesight <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return 2;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return 2;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: tablesight --help").is_err() {
                        return 2;
                    }
                    2
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Replay {
                fixture,
                unit_size,
                dump_events,
            } => match handle_replay_command(fixture, unit_size, dump_events, out, err) {
                Ok(()) => 0,
                Err(_) => 2,
            },
            Commands::Zones { config, cmd } => match handle_zones_command(cmd, config, out, err) {
                Ok(()) => 0,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return 2;
                    }
                    2
                }
            },
            Commands::Cfg => match handle_cfg_command(out) {
                Ok(()) => 0,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return 2;
                    }
                    2
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cfg_command_dispatch() {
        let mut out = Vec::new();

        let result = handle_cfg_command(&mut out);
        assert!(result.is_ok());

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("unit_size"));
    }

    #[test]
    fn test_replay_missing_fixture_is_error() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_replay_command(
            "nonexistent_fixture.json".to_string(),
            Some(10.0),
            false,
            &mut out,
            &mut err,
        );
        assert!(result.is_err());

        let errors = String::from_utf8(err).unwrap();
        assert!(errors.contains("Error:"));
    }

    #[test]
    fn test_cli_module_exports_commands_enum() {
        let cli = TablesightCli::try_parse_from(["tablesight", "cfg"]).unwrap();
        match cli.cmd {
            Commands::Cfg => {}
            _ => panic!("Expected Commands::Cfg variant"),
        }
    }

    #[test]
    fn test_cli_parses_all_subcommands() {
        let commands = vec![
            vec!["tablesight", "cfg"],
            vec!["tablesight", "replay", "fixture.json"],
            vec!["tablesight", "replay", "fixture.json", "--unit-size", "25"],
            vec!["tablesight", "zones", "show"],
            vec!["tablesight", "zones", "render", "--width", "40"],
            vec!["tablesight", "zones", "reset", "--seat-count", "5"],
            vec![
                "tablesight",
                "zones",
                "set-region",
                "0",
                "0",
                "1280",
                "720",
            ],
        ];

        for cmd_args in commands {
            let result = TablesightCli::try_parse_from(&cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
    }

    #[test]
    fn test_unknown_command_exits_2() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = run(
            vec!["tablesight", "no-such-command"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 2);

        let errors = String::from_utf8(err).unwrap();
        assert!(errors.contains("For full help"));
    }

    #[test]
    fn test_help_exits_0() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = run(vec!["tablesight", "--help"], &mut out, &mut err);
        assert_eq!(code, 0);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("replay"));
    }
}
