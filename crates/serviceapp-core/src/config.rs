use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ServiceAppError;
use crate::models::{PlayerSettings, ServiceMp3Config, TargetOptions, UserSettings};
use crate::{SinkChoice, SystemPaths};

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: SystemPaths,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub servicemp3: ServiceMp3Config,
    #[serde(default)]
    pub options: TargetOptions,
    /// `[gstplayer.*]` and `[exteplayer3.*]` tables.
    #[serde(flatten)]
    pub players: PlayerSettings,
    #[serde(default)]
    pub user: UserSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub timeout_secs: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl DetectionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, ServiceAppError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path; built-in defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ServiceAppError> {
        if !path.exists() {
            debug!(path = %path.display(), "No user config, using defaults");
            return Self::parse(DEFAULT_CONFIG);
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ServiceAppError> {
        toml::from_str(content).map_err(|e| ServiceAppError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), ServiceAppError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ServiceAppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ServiceAppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamp every bounded value and resolve sinks against what is installed.
    pub fn sanitize(&mut self, available_sinks: &[SinkChoice]) {
        self.players.sanitize(available_sinks);
        self.options.servicemp3.sanitize();
        self.options.servicegstplayer.sanitize();
        self.options.serviceexteplayer3.sanitize();
        self.user.gstplayer.sanitize(available_sinks);
    }

    /// Path to user config file (XDG on Linux).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "serviceapp")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
