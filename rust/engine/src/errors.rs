use thiserror::Error;

/// Errors raised by counting configuration calls. Malformed event payloads
/// are never errors; the tracker skips them by policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// Errors raised when loading or persisting a zones configuration file.
#[derive(Debug, Error)]
pub enum ZonesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid zones config: {0}")]
    Parse(#[from] serde_json::Error),
}
