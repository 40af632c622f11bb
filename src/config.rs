//! Store configuration
//!
//! Read from a JSON file next to the data; every field has a default so an
//! empty `{}` (or no file at all) is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{CELEBRATION_DURATION_MS, STORAGE_KEY};
use crate::error::ConfigError;

/// Environment variable that overrides [`StoreConfig::data_dir`]
pub const DATA_DIR_ENV: &str = "PODIUM_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key of the persisted slot
    pub storage_key: String,
    /// Directory holding file-backed slots
    pub data_dir: PathBuf,

    // === Timing ===
    /// How long a celebration stays visible
    pub celebration_duration_ms: u64,
    /// Artificial latency before a load completes (0 = none)
    pub load_delay_ms: u64,
    /// Artificial latency before a submit completes (0 = none)
    pub submit_delay_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            data_dir: PathBuf::from("."),
            celebration_duration_ms: CELEBRATION_DURATION_MS,
            load_delay_ms: 0,
            submit_delay_ms: 0,
        }
    }
}

impl StoreConfig {
    /// The pacing the original web front-end used (1 s load, 0.5 s submit)
    pub fn with_simulated_latency(mut self) -> Self {
        self.load_delay_ms = 1000;
        self.submit_delay_ms = 500;
        self
    }

    pub fn celebration_duration(&self) -> Duration {
        Duration::from_millis(self.celebration_duration_ms)
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    /// Environment overrides are applied either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(json) => {
                let config: Self = serde_json::from_str(&json)?;
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };
        config.override_data_dir(std::env::var(DATA_DIR_ENV).ok());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }

    fn override_data_dir(&mut self, value: Option<String>) {
        if let Some(dir) = value.filter(|d| !d.trim().is_empty()) {
            log::debug!("{} overrides data_dir: {}", DATA_DIR_ENV, dir);
            self.data_dir = PathBuf::from(dir);
        }
    }
}
