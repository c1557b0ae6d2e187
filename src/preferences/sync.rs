//! One-shot preference sync from the backend

use super::{PreferenceStore, Preferences};
use crate::api;
use crate::rpc::Transport;
use crate::Result;
use tracing::info;

/// Fetch persisted preferences and write every override into the store.
///
/// Issues exactly one `get_preferences` invocation. Unset fields leave the
/// store's defaults in place.
pub async fn sync_preferences(
    transport: &dyn Transport,
    store: &PreferenceStore,
) -> Result<Preferences> {
    let preferences = api::get_preferences(transport).await?;
    if preferences.is_empty() {
        info!("No preference overrides found, keeping defaults");
    } else {
        info!("Applying preference overrides: {:?}", preferences);
    }
    store.apply_overrides(&preferences);
    Ok(preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::RecordingTransport;
    use crate::sample_call::Playback;
    use futures::executor::block_on;
    use std::sync::Arc;

    fn synced_store(sample: &str) -> (PreferenceStore, Arc<Playback>, RecordingTransport) {
        let playback = Arc::new(Playback::new());
        playback.add_samples(sample).unwrap();
        let spy = RecordingTransport::new(playback.clone());
        let store = PreferenceStore::new();
        block_on(sync_preferences(&spy, &store)).unwrap();
        (store, playback, spy)
    }

    #[test]
    fn test_all_null_keeps_defaults() {
        let (store, playback, spy) = synced_store("api/sample-calls/get_preferences-no-file.yaml");
        assert!(store.sound_on.get());
        assert_eq!(store.volume.get(), 1.0);
        assert!(store.animations_on.get());
        assert!(!store.unceasing_animations.get());
        assert_eq!(store.animation_speed.get(), 4.0);
        assert_eq!(spy.call_count(), 1);
        assert_eq!(playback.pending(), 0);
    }

    #[test]
    fn test_sound_override() {
        let (store, _, spy) = synced_store("api/sample-calls/get_preferences-sound-override.yaml");
        assert!(!store.sound_on.get());
        assert_eq!(spy.call_count(), 1);
    }

    #[test]
    fn test_volume_override() {
        let (store, _, _) = synced_store("api/sample-calls/get_preferences-volume-override.yaml");
        assert_eq!(store.volume.get(), 0.8);
        assert!(store.sound_on.get());
    }
}
