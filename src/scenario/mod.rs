//! Recorded-interaction scenarios
//!
//! A scenario is a TOML file listing the fixtures a run may consume, the
//! user actions to perform in order, and what the store, the root attributes
//! and the invocation log should look like after each action. Scenarios run
//! headlessly against a playback transport.

mod runner;

pub use runner::{AssertionResult, ScenarioReport, ScenarioRunner};

use crate::stories::StoryParameters;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A scenario loaded from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioMetadata,
    /// Values seeded into the store before the first step
    #[serde(default)]
    pub parameters: Option<StoryParameters>,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One action plus the fixtures it needs and the checks that follow it
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioStep {
    /// Fixture files queued before the action runs, relative to the base dir
    #[serde(default)]
    pub fixtures: Vec<String>,
    pub action: Action,
    #[serde(default)]
    pub assert: Vec<Assertion>,
}

/// User interactions a scenario can perform
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Mount the app layout, syncing preferences
    Mount,
    ToggleSound { on: bool },
    SetVolume { volume: f64 },
    SetAnimationsOn { on: bool },
    SetUnceasingAnimations { on: bool },
    SetAnimationSpeed { speed: f64 },
    LoadApiKeys,
    /// Log a message, touching nothing
    Log { message: String },
}

/// Conditions checked after a step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    SoundOn { expected: bool },
    Volume { expected: f64 },
    AnimationsOn { expected: bool },
    UnceasingAnimations { expected: bool },
    AnimationSpeed { expected: f64 },
    /// Total invocations since the scenario started
    InvocationCount { expected: usize },
    /// No queued fixture is left
    QueueEmpty,
    ApiKeysLoaded,
    RootHasClass { class: String },
    RootLacksClass { class: String },
    /// Inline style on the root; omit `expected` to require none
    RootStyle {
        #[serde(default)]
        expected: Option<String>,
    },
}

impl ScenarioConfig {
    /// Load a scenario from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScenarioConfigError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ScenarioConfigError::Parse { error, .. } => ScenarioConfigError::Parse {
                path: path.display().to_string(),
                error,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate scenario text
    pub fn parse(content: &str) -> Result<Self, ScenarioConfigError> {
        let config: ScenarioConfig =
            toml::from_str(content).map_err(|e| ScenarioConfigError::Parse {
                path: "<inline>".to_string(),
                error: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ScenarioConfigError> {
        if self.scenario.name.trim().is_empty() {
            return Err(ScenarioConfigError::Validation(
                "Scenario must have a name".to_string(),
            ));
        }
        if self.steps.is_empty() {
            return Err(ScenarioConfigError::Validation(
                "Scenario must have at least one step".to_string(),
            ));
        }

        // Syncing happens once per mount; a second mount step would never invoke
        let mounts = self
            .steps
            .iter()
            .filter(|s| s.action == Action::Mount)
            .count();
        if mounts > 1 {
            return Err(ScenarioConfigError::Validation(format!(
                "Scenario mounts {} times, at most once is allowed",
                mounts
            )));
        }

        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioConfigError {
    #[error("Failed to read scenario '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse scenario '{path}': {error}")]
    Parse { path: String, error: String },

    #[error("Invalid scenario: {0}")]
    Validation(String),
}
