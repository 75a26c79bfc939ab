use serde::{Deserialize, Serialize};
use std::fs;

/// Runtime configuration for the replay pipeline and zone tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub unit_size: f64,
    pub seat_count: usize,
    pub zones_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub unit_size: ValueSource,
    pub seat_count: ValueSource,
    pub zones_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            unit_size: ValueSource::Default,
            seat_count: ValueSource::Default,
            zones_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_size: 10.0,
            seat_count: 7,
            zones_path: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves the configuration with per-value source tracking. Precedence:
/// environment variables over the `TABLESIGHT_CONFIG` file over defaults.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("TABLESIGHT_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.unit_size {
            cfg.unit_size = v;
            sources.unit_size = ValueSource::File;
        }
        if let Some(v) = f.seat_count {
            cfg.seat_count = v;
            sources.seat_count = ValueSource::File;
        }
        if let Some(v) = f.zones_path {
            cfg.zones_path = Some(v);
            sources.zones_path = ValueSource::File;
        }
    }

    if let Ok(unit) = std::env::var("TABLESIGHT_UNIT_SIZE")
        && !unit.is_empty()
    {
        cfg.unit_size = unit
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid unit size".into()))?;
        sources.unit_size = ValueSource::Env;
    }
    if let Ok(seats) = std::env::var("TABLESIGHT_SEAT_COUNT")
        && !seats.is_empty()
    {
        cfg.seat_count = seats
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid seat count".into()))?;
        sources.seat_count = ValueSource::Env;
    }
    if let Ok(zones) = std::env::var("TABLESIGHT_ZONES")
        && !zones.is_empty()
    {
        cfg.zones_path = Some(zones);
        sources.zones_path = ValueSource::Env;
    }

    if cfg.unit_size <= 0.0 {
        return Err(ConfigError::Invalid("Unit size must be positive".into()));
    }
    if cfg.seat_count == 0 {
        return Err(ConfigError::Invalid(
            "Seat count must be at least one".into(),
        ));
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    unit_size: Option<f64>,
    seat_count: Option<usize>,
    zones_path: Option<String>,
}
