//! Configuration persistence
//!
//! Stores user preferences in `~/.config/mocha-codespace/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MochaConfig {
    /// Highlight theme id ("mocha" or a user theme)
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Wall-clock limit for one run. Fixed for the whole process.
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,

    /// Language of new untitled tabs
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Hand HTML/CSS (and the node fallback) to the desktop viewer.
    /// When false, the URI is only reported.
    #[serde(default = "default_open_external")]
    pub open_external: bool,
}

fn default_theme() -> String {
    crate::theme::DEFAULT_THEME.to_string()
}

fn default_run_timeout_secs() -> u64 {
    crate::exec::RUN_TIMEOUT.as_secs()
}

fn default_language() -> String {
    "Python".to_string()
}

fn default_open_external() -> bool {
    true
}

impl Default for MochaConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            run_timeout_secs: default_run_timeout_secs(),
            default_language: default_language(),
            open_external: default_open_external(),
        }
    }
}

impl MochaConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path; any problem yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk, creating the config directory if needed
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| Error::Config("No config directory available".to_string()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io("create", parent, e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::io("write", path, e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Run timeout; zero falls back to the built-in limit
    pub fn run_timeout(&self) -> Duration {
        if self.run_timeout_secs == 0 {
            crate::exec::RUN_TIMEOUT
        } else {
            Duration::from_secs(self.run_timeout_secs)
        }
    }
}
