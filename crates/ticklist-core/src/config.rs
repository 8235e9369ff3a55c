use crate::swipe::SwipeConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory the file gateway keeps its documents in.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Leftmost drag offset in display units (negative).
    #[serde(default)]
    pub swipe_bound: Option<f32>,
    /// Fraction of the bound a drag must pass to dismiss.
    #[serde(default)]
    pub swipe_commit_ratio: Option<f32>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/ticklist/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("ticklist/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("ticklist\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Configured data directory, or the platform data dir under `ticklist/`.
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        if self.data_dir.is_some() {
            return self.data_dir.clone();
        }
        dirs::data_dir().map(|dir| dir.join("ticklist"))
    }

    /// Swipe tuning with config overrides applied on top of the defaults.
    /// An override outside its valid range (the bound must be negative, the
    /// ratio in (0, 1]) or non-finite is ignored and the default kept.
    pub fn swipe_config(&self) -> SwipeConfig {
        let defaults = SwipeConfig::default();
        SwipeConfig {
            max_translation: self
                .swipe_bound
                .filter(|bound| bound.is_finite() && *bound < 0.0)
                .unwrap_or(defaults.max_translation),
            commit_ratio: self
                .swipe_commit_ratio
                .filter(|ratio| ratio.is_finite() && *ratio > 0.0 && *ratio <= 1.0)
                .unwrap_or(defaults.commit_ratio),
        }
    }
}
