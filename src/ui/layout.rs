//! Attributes of the application root derived from preferences
//!
//! These mirror what a styled root element would carry: a class token when
//! animations are off and a custom property holding the animation speed.
//! The egui app turns the same values into its animation timing.

use crate::preferences::PreferenceStore;

pub const ANIMATIONS_DISABLED_CLASS: &str = "animations-disabled";
pub const ANIMATION_SPEED_PROPERTY: &str = "--base-animation-speed";

/// egui's stock animation time in seconds
pub const BASE_ANIMATION_TIME: f32 = 1.0 / 12.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootAttributes {
    pub classes: Vec<String>,
    /// Present only when the animation speed differs from 1
    pub style: Option<String>,
}

impl RootAttributes {
    pub fn from_store(store: &PreferenceStore) -> Self {
        let mut classes = Vec::new();
        if !store.animations_on.get() {
            classes.push(ANIMATIONS_DISABLED_CLASS.to_string());
        }

        let speed = store.animation_speed.get();
        let style = (speed != 1.0).then(|| format!("{}: {};", ANIMATION_SPEED_PROPERTY, speed));

        Self { classes, style }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Seconds an egui animation should take under the current preferences
pub fn animation_time(store: &PreferenceStore) -> f32 {
    if !store.animations_on.get() {
        return 0.0;
    }
    let speed = store.animation_speed.get() as f32;
    if speed > 0.0 {
        BASE_ANIMATION_TIME / speed
    } else {
        BASE_ANIMATION_TIME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animations_disabled_class() {
        let store = PreferenceStore::new();
        assert!(!RootAttributes::from_store(&store).has_class(ANIMATIONS_DISABLED_CLASS));

        store.animations_on.set(false);
        let attrs = RootAttributes::from_store(&store);
        assert!(attrs.has_class(ANIMATIONS_DISABLED_CLASS));
        assert_eq!(animation_time(&store), 0.0);

        store.animations_on.set(true);
        assert!(RootAttributes::from_store(&store).classes.is_empty());
    }

    #[test]
    fn test_speed_style() {
        let store = PreferenceStore::new();
        store.animation_speed.set(0.9);
        assert_eq!(
            RootAttributes::from_store(&store).style.as_deref(),
            Some("--base-animation-speed: 0.9;")
        );

        store.animation_speed.set(1.0);
        assert_eq!(RootAttributes::from_store(&store).style, None);
    }

    #[test]
    fn test_faster_speed_shortens_animations() {
        let store = PreferenceStore::new();
        store.animation_speed.set(2.0);
        assert!(animation_time(&store) < BASE_ANIMATION_TIME);
    }
}
