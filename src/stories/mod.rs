//! Isolated view scenarios
//!
//! A story renders one view against a store seeded straight from its
//! parameters, with no preference sync and no backend round trip. The
//! decorator here is what every story passes through before rendering.

use crate::api::{ApiKey, ApiKeys, Source};
use crate::preferences::{PreferenceStore, Preferences};
use crate::ui::{ApiKeysDisplay, ApiKeysStatus, Theme};
use serde::Deserialize;
use tracing::debug;

/// Parameters a story carries alongside its view
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoryParameters {
    /// Preference values pushed into the store before rendering
    pub preferences: Option<Preferences>,
    /// What the backend would have answered, for views that fetch data
    pub resolution: Option<ApiKeys>,
    /// Keep the view in its pending state instead of resolving
    pub should_wait: bool,
}

impl StoryParameters {
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn with_resolution(mut self, keys: ApiKeys) -> Self {
        self.resolution = Some(keys);
        self
    }

    pub fn waiting(mut self) -> Self {
        self.should_wait = true;
        self
    }
}

/// Write story parameters directly into the store.
///
/// Fields absent from the preference set leave their cell alone, except the
/// animation speed which goes back to 1 so one story's speed never leaks into
/// the next.
pub fn seed_store(store: &PreferenceStore, params: &StoryParameters) {
    let prefs = params.preferences.clone().unwrap_or_default();

    if let Some(on) = prefs.animations_on {
        store.animations_on.set(on);
    }
    if let Some(on) = prefs.unceasing_animations {
        store.unceasing_animations.set(on);
    }
    if let Some(on) = prefs.sound_on {
        store.sound_on.set(on);
    }
    if let Some(volume) = prefs.volume {
        store.volume.set(volume);
    }
    store.animation_speed.set(prefs.animation_speed.unwrap_or(1.0));

    debug!("Seeded store for story: {:?}", prefs);
}

/// Seed the store, then render the story
pub fn with_seeded_store<R>(
    store: &PreferenceStore,
    params: &StoryParameters,
    story: impl FnOnce(&PreferenceStore) -> R,
) -> R {
    seed_store(store, params);
    story(store)
}

/// A named view scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub name: &'static str,
    pub parameters: StoryParameters,
}

impl Story {
    /// Status the API key display shows for this story
    pub fn api_keys_status(&self) -> ApiKeysStatus {
        if self.parameters.should_wait {
            ApiKeysStatus::Loading
        } else {
            ApiKeysStatus::Loaded(self.parameters.resolution.clone().unwrap_or_default())
        }
    }
}

/// Stories for the API key display: pending, no keys, and a key from the
/// environment
pub fn api_keys_display_stories() -> Vec<Story> {
    let unknown_keys = ApiKeys { openai: None };
    let known_keys = ApiKeys {
        openai: Some(ApiKey {
            value: "sk-1234567890".to_string(),
            source: Source::Environment,
        }),
    };

    vec![
        Story {
            name: "Loading",
            parameters: StoryParameters::default()
                .with_resolution(unknown_keys.clone())
                .waiting(),
        },
        Story {
            name: "Unknown",
            parameters: StoryParameters::default().with_resolution(unknown_keys),
        },
        Story {
            name: "Known",
            parameters: StoryParameters::default().with_resolution(known_keys),
        },
    ]
}

/// Render an API key display story into `ui`
pub fn show_api_keys_story(
    ui: &mut egui::Ui,
    store: &PreferenceStore,
    story: &Story,
    theme: &Theme,
) {
    with_seeded_store(store, &story.parameters, |_| {
        let status = story.api_keys_status();
        ApiKeysDisplay::new(&status, theme).show(ui);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_without_preferences_resets_speed() {
        let store = PreferenceStore::new();
        store.animation_speed.set(0.9);
        store.unceasing_animations.set(true);

        seed_store(&store, &StoryParameters::default());
        assert_eq!(store.animation_speed.get(), 1.0);
        assert!(store.unceasing_animations.get());
    }

    #[test]
    fn test_seed_writes_present_fields_only() {
        let store = PreferenceStore::new();
        let params = StoryParameters::default().with_preferences(
            Preferences::none()
                .with_unceasing_animations(true)
                .with_animation_speed(0.5),
        );

        seed_store(&store, &params);
        assert!(store.unceasing_animations.get());
        assert_eq!(store.animation_speed.get(), 0.5);
        assert!(store.sound_on.get());
        assert_eq!(store.volume.get(), 1.0);
    }

    #[test]
    fn test_decorator_seeds_before_story() {
        let store = PreferenceStore::new();
        let params = StoryParameters::default()
            .with_preferences(Preferences::none().with_sound_on(false).with_volume(0.25));

        let seen = with_seeded_store(&store, &params, |s| (s.sound_on.get(), s.volume.get()));
        assert_eq!(seen, (false, 0.25));
    }

    #[test]
    fn test_parameters_from_yaml() {
        let params: StoryParameters = serde_yaml::from_str(
            "preferences:\n  unceasing_animations: true\nshould_wait: true\n",
        )
        .unwrap();
        assert!(params.should_wait);
        assert_eq!(
            params.preferences.and_then(|p| p.unceasing_animations),
            Some(true)
        );
    }

    #[test]
    fn test_api_keys_story_statuses() {
        let stories = api_keys_display_stories();
        let names: Vec<_> = stories.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Loading", "Unknown", "Known"]);

        assert_eq!(stories[0].api_keys_status(), ApiKeysStatus::Loading);
        assert_eq!(
            stories[1].api_keys_status(),
            ApiKeysStatus::Loaded(ApiKeys::default())
        );
        match stories[2].api_keys_status() {
            ApiKeysStatus::Loaded(keys) => {
                assert_eq!(keys.openai.map(|k| k.source), Some(Source::Environment))
            }
            other => panic!("unexpected status {:?}", other),
        }
    }
}
