// config.rs — Client configuration from telos.toml.
//
// Two knobs: where the backend lives and how long a request may take.
// The timeout is mandatory in spirit — a hung request must surface as a
// Transient failure, never an indefinite spinner.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client configuration, loaded from `telos.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the review backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bound applied to every remote call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Load config from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load config, returning defaults if the file doesn't exist
    /// or doesn't parse.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The platform config directory for Telos (`~/.config/telos` on Linux).
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("telos"))
    }

    /// Default location of `telos.toml`.
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("telos.toml"))
    }

    /// Where the persisted credential pair lives.
    pub fn token_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("tokens.json"))
    }
}
