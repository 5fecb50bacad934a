//! Configuration file support for the Headache Diary.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/headache-diary/config.toml`.

use crate::{Error, MedicationCatalog, Result, SheetConfig};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sheet: SheetDefaults,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Initial sheet settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SheetDefaults {
    #[serde(default = "default_day_count")]
    pub day_count: u32,

    #[serde(default = "default_titration_enabled")]
    pub titration_enabled: bool,

    #[serde(default = "default_acute")]
    pub acute: Vec<String>,

    #[serde(default = "default_preventive")]
    pub preventive: Vec<String>,
}

impl Default for SheetDefaults {
    fn default() -> Self {
        Self {
            day_count: default_day_count(),
            titration_enabled: default_titration_enabled(),
            acute: default_acute(),
            preventive: default_preventive(),
        }
    }
}

/// Medication catalog source
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// TOML catalog replacing the built-in one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Rendered sheet format
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::Config(format!(
                "Unknown output format '{}' (expected text, json or csv)",
                other
            ))),
        }
    }
}

/// Output configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

// Default value functions
fn default_day_count() -> u32 {
    14
}

fn default_titration_enabled() -> bool {
    true
}

fn default_acute() -> Vec<String> {
    vec!["panadol".into(), "imigran".into()]
}

fn default_preventive() -> Vec<String> {
    vec!["topamax".into()]
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {:?}: {}", path, e)))?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("headache-diary").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Sheet settings starting at `start_date`, seeded from the defaults
    pub fn sheet_config(&self, start_date: NaiveDate) -> SheetConfig {
        SheetConfig {
            start_date,
            day_count: self.sheet.day_count,
            selected_acute_ids: self.sheet.acute.iter().cloned().collect(),
            selected_preventive_ids: self.sheet.preventive.iter().cloned().collect(),
            titration_enabled: self.sheet.titration_enabled,
        }
    }

    /// Load the configured catalog, or the built-in one
    pub fn load_catalog(&self) -> Result<MedicationCatalog> {
        match &self.catalog.path {
            Some(path) => MedicationCatalog::load_from(path),
            None => Ok(crate::default_catalog().clone()),
        }
    }
}
