//! Error types for the CLI application.

use std::fmt;

/// Custom error type for CLI operations, allowing error propagation with
/// the `?` operator across command handlers.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Malformed fixture file
    Fixture(String),

    /// Zones configuration load/save failure
    Zones(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Fixture(msg) => write!(f, "Fixture error: {}", msg),
            CliError::Zones(msg) => write!(f, "Zones error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<tablesight_engine::errors::ZonesError> for CliError {
    fn from(error: tablesight_engine::errors::ZonesError) -> Self {
        CliError::Zones(error.to_string())
    }
}
