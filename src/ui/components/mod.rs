pub mod api_keys_display;
pub mod settings;

pub use api_keys_display::ApiKeysDisplay;
pub use settings::SettingsPanel;
