//! Application configuration
//!
//! Loaded from `<config dir>/zamm/config.toml`. Every field is optional in
//! the file; missing fields keep their defaults.

use crate::{Result, ZammError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_FILENAME: &str = "config.toml";

/// Configuration for the desktop application
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `preferences.yaml`
    pub preferences_dir: Option<PathBuf>,

    /// Whether `play_sound` reaches the audio device
    pub enable_sound_output: bool,

    /// Initial window size in points
    pub window_width: f32,
    pub window_height: f32,

    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preferences_dir: dirs::config_dir().map(|dir| dir.join("zamm")),
            enable_sound_output: true,
            window_width: 800.0,
            window_height: 600.0,
            log_filter: "zamm=debug,info".to_string(),
        }
    }
}

impl AppConfig {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zamm").join(CONFIG_FILENAME))
    }

    /// Load the file at `path`, falling back to defaults when it is absent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            ZammError::ConfigError(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_preferences_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.preferences_dir = Some(dir.into());
        self
    }

    /// Disable sound output (silent mode)
    pub fn without_sound_output(mut self) -> Self {
        self.enable_sound_output = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(ZammError::ConfigError(format!(
                "Window size must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if let Some(dir) = &self.preferences_dir {
            if dir.is_file() {
                return Err(ZammError::ConfigError(format!(
                    "Preferences dir is a file: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
