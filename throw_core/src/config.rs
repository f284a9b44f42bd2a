//! Configuration file support for Throwlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/throwlog/config.toml`.

use crate::load::{DEFAULT_SERIES_WEEKS, MAX_SERIES_WEEKS};
use crate::{DistanceUnit, Error, Event, Result, WeightUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub athlete: AthleteConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Default units for new sessions
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct UnitsConfig {
    #[serde(default)]
    pub weight_unit: WeightUnit,

    #[serde(default)]
    pub distance_unit: DistanceUnit,
}

/// Athlete profile
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct AthleteConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub primary_event: Option<Event>,
}

/// Analytics display parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsConfig {
    #[serde(default = "default_series_weeks")]
    pub series_weeks: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            series_weeks: default_series_weeks(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("throwlog")
}

fn default_series_weeks() -> u32 {
    DEFAULT_SERIES_WEEKS
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Check values that parse but make no sense
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SERIES_WEEKS).contains(&self.analytics.series_weeks) {
            return Err(Error::Config(format!(
                "analytics.series_weeks must be between 1 and {}, got {}",
                MAX_SERIES_WEEKS, self.analytics.series_weeks
            )));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("throwlog").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
