//! Native implementation of the backend entry points
//!
//! [`LocalBackend`] answers the same invocations the sample calls record,
//! so the views run unchanged against either.

pub mod api_keys;
pub mod preferences;
pub mod system;

use crate::api::{self, ApiKeys, PlaySoundArgs};
use crate::audio::{queue_sound, SoundRequest, SoundSender};
use crate::preferences::Preferences;
use crate::rpc::{Invocation, Transport};
use crate::{Result, ZammError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SetPreferencesArgs {
    preferences: Preferences,
}

/// Backend running in-process
pub struct LocalBackend {
    preferences_dir: Option<PathBuf>,
    api_keys: ApiKeys,
    sounds: Option<SoundSender>,
}

impl LocalBackend {
    pub fn new(preferences_dir: Option<PathBuf>) -> Self {
        Self {
            preferences_dir,
            api_keys: ApiKeys::default(),
            sounds: None,
        }
    }

    pub fn with_api_keys(mut self, api_keys: ApiKeys) -> Self {
        self.api_keys = api_keys;
        self
    }

    /// Forward `play_sound` invocations to a sound player
    pub fn with_sound_output(mut self, sounds: SoundSender) -> Self {
        self.sounds = Some(sounds);
        self
    }

    /// Run one entry point synchronously
    pub fn handle(&self, entry_point: &str, args: Value) -> Result<Value> {
        debug!("Handling {}", entry_point);
        match entry_point {
            api::GET_PREFERENCES => {
                let prefs = preferences::get_preferences(self.preferences_dir.as_deref());
                Ok(serde_json::to_value(prefs)?)
            }
            api::SET_PREFERENCES => {
                let SetPreferencesArgs { preferences: overrides } = parse_args(entry_point, args)?;
                preferences::set_preferences(self.preferences_dir.as_deref(), &overrides)?;
                Ok(Value::Null)
            }
            api::PLAY_SOUND => {
                let PlaySoundArgs {
                    sound,
                    volume,
                    speed,
                } = parse_args(entry_point, args)?;
                match &self.sounds {
                    Some(sounds) => queue_sound(
                        sounds,
                        SoundRequest {
                            sound,
                            volume: volume as f32,
                            speed: speed as f32,
                        },
                    )?,
                    None => warn!("No sound output, skipping {:?}", sound),
                }
                Ok(Value::Null)
            }
            api::GET_API_KEYS => Ok(serde_json::to_value(&self.api_keys)?),
            api::GET_SYSTEM_INFO => Ok(serde_json::to_value(system::get_system_info())?),
            other => Err(ZammError::UnknownCommand(other.to_string())),
        }
    }
}

impl Transport for LocalBackend {
    fn invoke(&self, entry_point: &str, args: Value) -> Invocation {
        let result = self.handle(entry_point, args);
        Box::pin(async move { result })
    }
}

fn parse_args<T: DeserializeOwned>(command: &str, args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| ZammError::InvalidArguments {
        command: command.to_string(),
        reason: e.to_string(),
    })
}
