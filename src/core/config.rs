//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::error::ThresholdError;
use crate::core::thresholds::ThresholdConfig;

/// EQA configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Threshold file to use when `--thresholds` is not given
    pub thresholds: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/eqa/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match Self::load_file(&global_path) {
                    Some(global) => config.merge(global),
                    None => tracing::warn!(
                        path = %global_path.display(),
                        "ignoring unreadable config file"
                    ),
                }
            }
        }

        // 3. Environment variables
        if let Ok(path) = std::env::var("EQA_THRESHOLDS") {
            if !path.is_empty() {
                config.thresholds = Some(PathBuf::from(path));
            }
        }
        if let Ok(format) = std::env::var("EQA_FORMAT") {
            if !format.is_empty() {
                config.default_format = Some(format);
            }
        }

        config
    }

    fn load_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        if contents.trim().is_empty() {
            return Some(Config::default());
        }
        serde_yml::from_str::<Config>(&contents).ok()
    }

    /// Directory holding the global config and default threshold file
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "eqa").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.yaml"))
    }

    /// Default location of the persisted threshold file
    pub fn default_thresholds_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("thresholds.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.thresholds.is_some() {
            self.thresholds = other.thresholds;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// The threshold file this configuration points at
    ///
    /// An explicit override wins, then the configured path, then the default location.
    pub fn thresholds_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.thresholds.clone())
            .or_else(Self::default_thresholds_path)
    }

    /// Resolve the thresholds to classify against
    ///
    /// An explicitly named file must exist. The configured or default file is
    /// used when present; otherwise the built-in defaults apply.
    pub fn resolve_thresholds(&self, explicit: Option<&Path>) -> Result<ThresholdConfig, ThresholdError> {
        if let Some(path) = explicit {
            return ThresholdConfig::load_from(path);
        }

        match self.thresholds_path(None) {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "using threshold file");
                ThresholdConfig::load_from(&path)
            }
            _ => Ok(ThresholdConfig::default()),
        }
    }
}
