//! ZAMM desktop application
//!
//! Main entry point. `zamm --scenario <file>` runs a recorded scenario
//! headlessly and exits with its result instead of opening the window.

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zamm::audio::spawn_sound_player;
use zamm::backend::api_keys::setup_api_keys;
use zamm::backend::LocalBackend;
use zamm::config::AppConfig;
use zamm::scenario::{ScenarioConfig, ScenarioRunner};
use zamm::ui::{AppState, ZammApp};

fn main() -> Result<()> {
    let config = AppConfig::load_default();
    let log_filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| AppConfig::default().log_filter);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config.context("Failed to load configuration")?;

    if let Some(path) = scenario_arg() {
        let code = run_scenario(path)?;
        std::process::exit(code);
    }

    info!("Starting ZAMM");
    run_app(config)
}

/// Path following `--scenario`, if given
fn scenario_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--scenario" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

fn run_scenario(path: PathBuf) -> Result<i32> {
    let scenario = ScenarioConfig::load(&path)?;
    let base_dir = std::env::current_dir().context("No working directory")?;
    let report = ScenarioRunner::new(scenario, base_dir).run();

    for failure in &report.failures {
        error!("{}", failure);
    }
    println!("{}", report.summary());
    Ok(if report.passed() { 0 } else { 1 })
}

fn run_app(config: AppConfig) -> Result<()> {
    let mut backend =
        LocalBackend::new(config.preferences_dir.clone()).with_api_keys(setup_api_keys());

    if config.enable_sound_output {
        match spawn_sound_player() {
            Ok((sender, _player)) => backend = backend.with_sound_output(sender),
            Err(e) => warn!("Sound output unavailable: {}", e),
        }
    }

    let state = AppState::new(Arc::new(backend));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([400.0, 300.0])
            .with_title("ZAMM"),
        ..Default::default()
    };

    eframe::run_native(
        "ZAMM",
        options,
        Box::new(|cc| Ok(Box::new(ZammApp::new(cc, state)))),
    )
    .map_err(|e| anyhow!("Failed to run UI: {}", e))
}
