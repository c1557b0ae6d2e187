//! UI components and application module
//!
//! This module provides the egui/eframe-based user interface for ZAMM.

mod app;
pub mod components;
pub mod layout;
mod state;
mod theme;

pub use app::ZammApp;
pub use components::{ApiKeysDisplay, SettingsPanel};
pub use layout::RootAttributes;
pub use state::{ApiKeysStatus, AppState, SOUND_SPEED};
pub use theme::Theme;
