//! Application configuration
//!
//! Read from `config.toml` (by default under the user config directory),
//! then overridden by `INFRA_CLI_*` environment variables. Every field has a
//! default so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::wizard::state::DEFAULT_ROOMS;

pub const APP_DIR: &str = "infra-cli";
pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_INFRASTRUCTURE: &str = "INFRA_CLI_INFRASTRUCTURE";
pub const ENV_REGIONS: &str = "INFRA_CLI_REGIONS";
pub const ENV_EXPORT_DIR: &str = "INFRA_CLI_EXPORT_DIR";
pub const ENV_ROOMS: &str = "INFRA_CLI_ROOMS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
}

/// Source spreadsheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Room counts per facility
    #[serde(default = "default_infrastructure")]
    pub infrastructure: PathBuf,
    /// Facility to region (entidad) mapping
    #[serde(default = "default_regions")]
    pub regions: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            infrastructure: default_infrastructure(),
            regions: default_regions(),
        }
    }
}

fn default_infrastructure() -> PathBuf {
    PathBuf::from("data/infraestructura.xlsx")
}

fn default_regions() -> PathBuf {
    PathBuf::from("data/clues_julio.xlsx")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Consultation rooms per facility
    #[serde(default = "default_rooms")]
    pub rooms: u8,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            rooms: default_rooms(),
        }
    }
}

fn default_rooms() -> u8 {
    DEFAULT_ROOMS
}

impl Config {
    /// `<config dir>/infra-cli/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration used by the binary
    ///
    /// An explicit path must exist. The default path is optional and falls
    /// back to defaults when absent. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        let config = config.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Apply `INFRA_CLI_*` overrides looked up through `get`
    pub fn with_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = get(ENV_INFRASTRUCTURE) {
            self.data.infrastructure = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_REGIONS) {
            self.data.regions = PathBuf::from(path);
        }
        if let Some(dir) = get(ENV_EXPORT_DIR) {
            self.export.directory = PathBuf::from(dir);
        }
        if let Some(rooms) = get(ENV_ROOMS) {
            self.wizard.rooms = rooms
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number from 1 to 255, got '{}'", ENV_ROOMS, rooms))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.wizard.rooms == 0 {
            bail!("wizard.rooms must be at least 1");
        }
        Ok(())
    }
}
