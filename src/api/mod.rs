//! Typed bindings for the backend entry points
//!
//! Each function serializes its arguments, sends them through a
//! [`Transport`] and decodes the response.

pub mod models;

pub use models::{ApiKey, ApiKeys, PlaySoundArgs, Shell, Sound, Source, SystemInfo};

use crate::preferences::Preferences;
use crate::rpc::Transport;
use crate::{Result, ZammError};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub const GET_PREFERENCES: &str = "get_preferences";
pub const SET_PREFERENCES: &str = "set_preferences";
pub const PLAY_SOUND: &str = "play_sound";
pub const GET_API_KEYS: &str = "get_api_keys";
pub const GET_SYSTEM_INFO: &str = "get_system_info";

async fn call<T: DeserializeOwned>(
    transport: &dyn Transport,
    entry_point: &str,
    args: Value,
) -> Result<T> {
    let response = transport.invoke(entry_point, args).await?;
    serde_json::from_value(response).map_err(|e| {
        ZammError::SerializationError(format!("Bad response from {}: {}", entry_point, e))
    })
}

pub async fn get_preferences(transport: &dyn Transport) -> Result<Preferences> {
    call(transport, GET_PREFERENCES, json!({})).await
}

pub async fn set_preferences(transport: &dyn Transport, preferences: &Preferences) -> Result<()> {
    call(transport, SET_PREFERENCES, json!({ "preferences": preferences })).await
}

pub async fn play_sound(
    transport: &dyn Transport,
    sound: Sound,
    volume: f64,
    speed: f64,
) -> Result<()> {
    let args = serde_json::to_value(PlaySoundArgs {
        sound,
        volume,
        speed,
    })?;
    call(transport, PLAY_SOUND, args).await
}

pub async fn get_api_keys(transport: &dyn Transport) -> Result<ApiKeys> {
    call(transport, GET_API_KEYS, json!({})).await
}

pub async fn get_system_info(transport: &dyn Transport) -> Result<SystemInfo> {
    call(transport, GET_SYSTEM_INFO, json!({})).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_call::Playback;
    use futures::executor::block_on;

    #[test]
    fn test_set_preferences_matches_stored_sample() {
        let playback = Playback::new();
        playback
            .add_samples("api/sample-calls/set_preferences-sound-off.yaml")
            .unwrap();
        let overrides = Preferences::none().with_sound_on(false);
        block_on(set_preferences(&playback, &overrides)).unwrap();
        assert_eq!(playback.pending(), 0);
    }

    #[test]
    fn test_play_sound_matches_stored_sample() {
        let playback = Playback::new();
        playback
            .add_samples("api/sample-calls/play_sound-switch.yaml")
            .unwrap();
        block_on(play_sound(&playback, Sound::Switch, 1.0, 1.0)).unwrap();
        assert_eq!(playback.pending(), 0);
    }

    #[test]
    fn test_get_api_keys_decodes_known_key() {
        let playback = Playback::new();
        playback
            .add_samples("api/sample-calls/get_api_keys-openai.yaml")
            .unwrap();
        let keys = block_on(get_api_keys(&playback)).unwrap();
        assert_eq!(
            keys.openai,
            Some(ApiKey {
                value: "0p3n41-4p1-k3y".to_string(),
                source: Source::Environment,
            })
        );
    }

    #[test]
    fn test_get_system_info_decodes_shell() {
        let playback = Playback::new();
        playback
            .add_samples("api/sample-calls/get_system_info-linux.yaml")
            .unwrap();
        let info = block_on(get_system_info(&playback)).unwrap();
        assert_eq!(info.shell, Some(Shell::Zsh));
    }

    #[test]
    fn test_unexpected_response_shape_is_an_error() {
        let playback = Playback::new();
        playback.add_call(crate::sample_call::CallRecord::new(
            GET_API_KEYS,
            json!({}),
            json!("not an object"),
        ));
        assert!(matches!(
            block_on(get_api_keys(&playback)),
            Err(ZammError::SerializationError(_))
        ));
    }
}
