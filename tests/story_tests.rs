//! API key display stories rendered through the store decorator

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use zamm::preferences::{PreferenceStore, Preferences};
use zamm::stories::{api_keys_display_stories, show_api_keys_story, Story, StoryParameters};
use zamm::ui::Theme;

struct StoryApp {
    story: Story,
    store: PreferenceStore,
    theme: Theme,
}

fn harness(story: Story) -> Harness<'static, StoryApp> {
    let app = StoryApp {
        story,
        store: PreferenceStore::new(),
        theme: Theme::dark(),
    };
    Harness::builder()
        .with_size(egui::Vec2::new(360.0, 640.0))
        .build_state(
            |ctx, app: &mut StoryApp| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    show_api_keys_story(ui, &app.store, &app.story, &app.theme);
                });
            },
            app,
        )
}

fn story(name: &str) -> Story {
    api_keys_display_stories()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap()
}

#[test]
fn test_loading_story() {
    let mut harness = harness(story("Loading"));
    harness.run();

    let _loading = harness.get_by_label("API keys loading");
}

#[test]
fn test_unknown_story() {
    let mut harness = harness(story("Unknown"));
    harness.run();

    let _inactive = harness.get_by_label("OpenAI API key: Inactive");
}

#[test]
fn test_known_story() {
    let mut harness = harness(story("Known"));
    harness.run();

    let _active = harness.get_by_label("OpenAI API key: Active (from environment)");
}

#[test]
fn test_story_resets_animation_speed() {
    let mut harness = harness(story("Unknown"));
    harness.state().store.animation_speed.set(0.9);
    harness.run();

    assert_eq!(harness.state().store.animation_speed.get(), 1.0);
}

#[test]
fn test_story_preferences_seed_store() {
    let mut seeded = story("Known");
    seeded.parameters = StoryParameters::default()
        .with_preferences(Preferences::none().with_animation_speed(0.5).with_sound_on(false));

    let mut harness = harness(seeded);
    harness.run();

    assert_eq!(harness.state().store.animation_speed.get(), 0.5);
    assert!(!harness.state().store.sound_on.get());
}
