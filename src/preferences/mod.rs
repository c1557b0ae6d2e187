//! User preferences
//!
//! [`Preferences`] is the nullable-override payload exchanged with the
//! backend; `None` means "keep the default". The live values shown by views
//! are held in a [`PreferenceStore`].

mod store;
mod sync;

pub use store::{Observable, PreferenceStore, Subscription};
pub use sync::sync_preferences;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ANIMATIONS_ON: bool = true;
pub const DEFAULT_UNCEASING_ANIMATIONS: bool = false;
pub const DEFAULT_SOUND_ON: bool = true;
pub const DEFAULT_VOLUME: f64 = 1.0;
pub const DEFAULT_ANIMATION_SPEED: f64 = 4.0;

/// Preference overrides; unset fields fall back to defaults
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub animations_on: Option<bool>,
    #[serde(default)]
    pub unceasing_animations: Option<bool>,
    #[serde(default)]
    pub sound_on: Option<bool>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub animation_speed: Option<f64>,
}

impl Preferences {
    /// Preferences with every field unset
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_sound_on(mut self, on: bool) -> Self {
        self.sound_on = Some(on);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_animations_on(mut self, on: bool) -> Self {
        self.animations_on = Some(on);
        self
    }

    pub fn with_unceasing_animations(mut self, on: bool) -> Self {
        self.unceasing_animations = Some(on);
        self
    }

    pub fn with_animation_speed(mut self, speed: f64) -> Self {
        self.animation_speed = Some(speed);
        self
    }

    /// Check whether no field is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overwrite fields with every field set in `overrides`
    pub fn merge(&mut self, overrides: &Preferences) {
        if overrides.animations_on.is_some() {
            self.animations_on = overrides.animations_on;
        }
        if overrides.unceasing_animations.is_some() {
            self.unceasing_animations = overrides.unceasing_animations;
        }
        if overrides.sound_on.is_some() {
            self.sound_on = overrides.sound_on;
        }
        if overrides.volume.is_some() {
            self.volume = overrides.volume;
        }
        if overrides.animation_speed.is_some() {
            self.animation_speed = overrides.animation_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_field_payload_decodes() {
        let payload = json!({
            "animations_on": null,
            "unceasing_animations": null,
            "sound_on": false,
            "volume": null
        });
        let preferences: Preferences = serde_json::from_value(payload).unwrap();
        assert_eq!(preferences, Preferences::none().with_sound_on(false));
    }

    #[test]
    fn test_serializes_nulls() {
        let value = serde_json::to_value(Preferences::none()).unwrap();
        assert_eq!(
            value,
            json!({
                "animations_on": null,
                "unceasing_animations": null,
                "sound_on": null,
                "volume": null,
                "animation_speed": null
            })
        );
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut stored = Preferences::none().with_sound_on(false).with_volume(0.5);
        stored.merge(&Preferences::none().with_volume(0.8).with_animations_on(false));
        assert_eq!(stored.sound_on, Some(false));
        assert_eq!(stored.volume, Some(0.8));
        assert_eq!(stored.animations_on, Some(false));
        assert!(!stored.is_empty());
        assert!(Preferences::none().is_empty());
    }
}
