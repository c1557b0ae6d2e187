//! Preferences persisted as YAML in the preferences directory

use crate::preferences::Preferences;
use crate::{Result, ZammError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const PREFERENCES_FILENAME: &str = "preferences.yaml";

pub fn get_preferences_file(preferences_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = preferences_dir
        .ok_or_else(|| ZammError::ConfigError("No preferences dir found".to_string()))?;
    Ok(dir.join(PREFERENCES_FILENAME))
}

fn read_preferences(preferences_dir: Option<&Path>) -> Result<Preferences> {
    let path = get_preferences_file(preferences_dir)?;
    if !path.exists() {
        info!("No preferences found at {}", path.display());
        return Ok(Preferences::default());
    }
    info!("Reading preferences from {}", path.display());
    let contents = fs::read_to_string(&path)?;
    let preferences: Preferences = serde_yaml::from_str(&contents)?;
    Ok(preferences)
}

/// Stored preferences, or none at all when they cannot be read
pub fn get_preferences(preferences_dir: Option<&Path>) -> Preferences {
    match read_preferences(preferences_dir) {
        Ok(preferences) => preferences,
        Err(e) => {
            error!("Error getting preferences: {}", e);
            Preferences::default()
        }
    }
}

/// Merge `overrides` into the stored preferences and write them back
pub fn set_preferences(preferences_dir: Option<&Path>, overrides: &Preferences) -> Result<()> {
    let path = get_preferences_file(preferences_dir)?;
    let mut stored = read_preferences(preferences_dir)?;
    stored.merge(overrides);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_yaml::to_string(&stored)?)?;
    info!("Saved preferences to {}", path.display());
    Ok(())
}
