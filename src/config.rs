use serde::Deserialize;
use thiserror::Error;

const DEFAULT_MAX_CYCLES: u64 = 10_000;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level simulator configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General simulation settings.
#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    /// Emit a per-cycle pipeline stage diagram on stderr.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Maximum clock cycles before a run is abandoned.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Config {
    /// Loads a configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}
