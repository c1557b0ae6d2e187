//! Scenario runner
//!
//! Drives an [`AppState`] through the steps of a [`ScenarioConfig`] with a
//! playback transport underneath, checking assertions as it goes.

use super::{Action, Assertion, ScenarioConfig};
use crate::rpc::RecordingTransport;
use crate::sample_call::Playback;
use crate::stories::seed_store;
use crate::ui::{ApiKeysStatus, AppState};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Result of an assertion check
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionResult {
    Passed,
    Failed(String),
}

impl AssertionResult {
    fn check(ok: bool, reason: impl FnOnce() -> String) -> Self {
        if ok {
            AssertionResult::Passed
        } else {
            AssertionResult::Failed(reason())
        }
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub name: String,
    pub steps_run: usize,
    pub failures: Vec<String>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        let status = if self.passed() { "PASSED" } else { "FAILED" };
        format!(
            "[SCENARIO] '{}' {}: executed {} step(s), {} failure(s)",
            self.name,
            status,
            self.steps_run,
            self.failures.len()
        )
    }
}

/// Executes a scenario against fixtures resolved from `base_dir`
pub struct ScenarioRunner {
    config: ScenarioConfig,
    base_dir: PathBuf,
    playback: Arc<Playback>,
    spy: Arc<RecordingTransport>,
    state: AppState,
}

impl ScenarioRunner {
    pub fn new(config: ScenarioConfig, base_dir: impl Into<PathBuf>) -> Self {
        info!("[SCENARIO] Loaded scenario: {}", config.scenario.name);
        if !config.scenario.description.is_empty() {
            info!("[SCENARIO] Description: {}", config.scenario.description);
        }
        info!("[SCENARIO] Total steps: {}", config.steps.len());

        let playback = Arc::new(Playback::new());
        let spy = Arc::new(RecordingTransport::new(playback.clone()));
        let state = AppState::new(spy.clone());
        if let Some(params) = &config.parameters {
            seed_store(&state.store, params);
        }

        Self {
            config,
            base_dir: base_dir.into(),
            playback,
            spy,
            state,
        }
    }

    /// State under test, for inspection after a run
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run every step, stopping at the first one that cannot complete
    pub fn run(&mut self) -> ScenarioReport {
        let mut failures = Vec::new();
        let mut steps_run = 0;
        let steps = self.config.steps.clone();

        for (index, step) in steps.iter().enumerate() {
            let label = format!("step {} ({:?})", index + 1, step.action);

            if let Some(reason) = self.queue_fixtures(&step.fixtures) {
                failures.push(format!("{}: {}", label, reason));
                break;
            }

            debug!("[SCENARIO] Executing {}", label);
            if let Err(reason) = self.perform(&step.action) {
                error!("[SCENARIO] FAIL: {} - {}", label, reason);
                failures.push(format!("{}: {}", label, reason));
                break;
            }
            steps_run += 1;

            for assertion in &step.assert {
                if let AssertionResult::Failed(reason) = self.check_assertion(assertion) {
                    failures.push(format!("{}: {}", label, reason));
                }
            }
        }

        // Leftover fixtures mean an expected call never happened
        if failures.is_empty() {
            if let Err(e) = self.playback.assert_exhausted() {
                error!("[SCENARIO] FAIL: {}", e);
                failures.push(e.to_string());
            }
        }

        let report = ScenarioReport {
            name: self.config.scenario.name.clone(),
            steps_run,
            failures,
        };
        info!("{}", report.summary());
        report
    }

    fn queue_fixtures(&self, fixtures: &[String]) -> Option<String> {
        for fixture in fixtures {
            let path = self.base_dir.join(fixture);
            if let Err(e) = self.playback.add_samples(&path) {
                return Some(format!("cannot load {}: {}", path.display(), e));
            }
        }
        None
    }

    /// Perform one action and let every invocation it started resolve.
    /// An invocation with no matching fixture aborts the playback call, which
    /// is reported here as a step failure.
    fn perform(&mut self, action: &Action) -> Result<(), String> {
        let state = &mut self.state;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            match action {
                Action::Mount => state.mount(),
                Action::ToggleSound { on } => state.toggle_sound(*on),
                Action::SetVolume { volume } => state.set_volume(*volume),
                Action::SetAnimationsOn { on } => state.set_animations_on(*on),
                Action::SetUnceasingAnimations { on } => state.set_unceasing_animations(*on),
                Action::SetAnimationSpeed { speed } => state.set_animation_speed(*speed),
                Action::LoadApiKeys => state.load_api_keys(),
                Action::Log { message } => info!("[SCENARIO] Log: {}", message),
            }
            state.run_pending();
        }));

        if let Err(payload) = outcome {
            return Err(panic_message(payload.as_ref()));
        }
        if let Some(e) = self.state.last_error.get() {
            return Err(e.to_string());
        }
        Ok(())
    }

    pub fn check_assertion(&self, assertion: &Assertion) -> AssertionResult {
        let store = &self.state.store;
        let result = match assertion {
            Assertion::SoundOn { expected } => {
                let actual = store.sound_on.get();
                AssertionResult::check(actual == *expected, || {
                    format!("Expected sound_on {}, got {}", expected, actual)
                })
            }
            Assertion::Volume { expected } => {
                let actual = store.volume.get();
                AssertionResult::check(actual == *expected, || {
                    format!("Expected volume {}, got {}", expected, actual)
                })
            }
            Assertion::AnimationsOn { expected } => {
                let actual = store.animations_on.get();
                AssertionResult::check(actual == *expected, || {
                    format!("Expected animations_on {}, got {}", expected, actual)
                })
            }
            Assertion::UnceasingAnimations { expected } => {
                let actual = store.unceasing_animations.get();
                AssertionResult::check(actual == *expected, || {
                    format!("Expected unceasing_animations {}, got {}", expected, actual)
                })
            }
            Assertion::AnimationSpeed { expected } => {
                let actual = store.animation_speed.get();
                AssertionResult::check(actual == *expected, || {
                    format!("Expected animation_speed {}, got {}", expected, actual)
                })
            }
            Assertion::InvocationCount { expected } => {
                let actual = self.spy.call_count();
                AssertionResult::check(actual == *expected, || {
                    format!("Expected {} invocation(s), got {}", expected, actual)
                })
            }
            Assertion::QueueEmpty => {
                let pending = self.playback.unmatched_requests();
                AssertionResult::check(pending.is_empty(), || {
                    format!("Expected empty queue, still holding {}", pending.join(", "))
                })
            }
            Assertion::ApiKeysLoaded => AssertionResult::check(
                matches!(self.state.api_keys.get(), ApiKeysStatus::Loaded(_)),
                || "Expected API keys to be loaded".to_string(),
            ),
            Assertion::RootHasClass { class } => {
                AssertionResult::check(self.state.root_attributes().has_class(class), || {
                    format!("Expected root to have class '{}'", class)
                })
            }
            Assertion::RootLacksClass { class } => {
                AssertionResult::check(!self.state.root_attributes().has_class(class), || {
                    format!("Expected root to lack class '{}'", class)
                })
            }
            Assertion::RootStyle { expected } => {
                let actual = self.state.root_attributes().style;
                AssertionResult::check(actual == *expected, || {
                    format!("Expected root style {:?}, got {:?}", expected, actual)
                })
            }
        };

        match &result {
            AssertionResult::Passed => info!("[SCENARIO] PASS: {:?}", assertion),
            AssertionResult::Failed(reason) => {
                error!("[SCENARIO] FAIL: {:?} - {}", assertion, reason)
            }
        }
        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "invocation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(toml: &str) -> ScenarioRunner {
        let config = ScenarioConfig::parse(toml).unwrap();
        ScenarioRunner::new(config, env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn test_sound_toggle_passes() {
        let mut runner = runner(
            r#"
            [scenario]
            name = "Toggle"

            [[steps]]
            fixtures = ["api/sample-calls/set_preferences-sound-off.yaml"]
            action = { type = "toggle_sound", on = false }
            assert = [
                { type = "sound_on", expected = false },
                { type = "invocation_count", expected = 1 },
                { type = "queue_empty" },
            ]

            [[steps]]
            fixtures = [
                "api/sample-calls/set_preferences-sound-on.yaml",
                "api/sample-calls/play_sound-switch.yaml",
            ]
            action = { type = "toggle_sound", on = true }
            assert = [
                { type = "sound_on", expected = true },
                { type = "invocation_count", expected = 3 },
            ]
            "#,
        );

        let report = runner.run();
        assert!(report.passed(), "{:?}", report.failures);
        assert_eq!(report.steps_run, 2);
        assert!(report.summary().contains("PASSED"));
    }

    #[test]
    fn test_failed_assertion_is_reported() {
        let mut runner = runner(
            r#"
            [scenario]
            name = "Wrong expectation"

            [[steps]]
            action = { type = "log", message = "nothing happens" }
            assert = [{ type = "sound_on", expected = false }]
            "#,
        );

        let report = runner.run();
        assert!(!report.passed());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("Expected sound_on false"));
    }

    #[test]
    fn test_unmatched_invocation_fails_step() {
        let mut runner = runner(
            r#"
            [scenario]
            name = "No fixture"

            [[steps]]
            action = { type = "set_volume", volume = 0.5 }

            [[steps]]
            action = { type = "log", message = "never reached" }
            "#,
        );

        let report = runner.run();
        assert!(!report.passed());
        assert_eq!(report.steps_run, 0);
        assert!(report.failures[0].contains("No matching call found"));
    }

    #[test]
    fn test_unconsumed_fixture_fails_run() {
        let mut runner = runner(
            r#"
            [scenario]
            name = "Leftover"

            [[steps]]
            fixtures = ["api/sample-calls/get_api_keys-empty.yaml"]
            action = { type = "log", message = "never asks for keys" }
            "#,
        );

        let report = runner.run();
        assert!(!report.passed());
        assert!(report.failures[0].contains("never consumed"));
    }

    #[test]
    fn test_missing_fixture_file() {
        let mut runner = runner(
            r#"
            [scenario]
            name = "Missing"

            [[steps]]
            fixtures = ["api/sample-calls/nope.yaml"]
            action = { type = "mount" }
            "#,
        );

        let report = runner.run();
        assert!(!report.passed());
        assert!(report.failures[0].contains("cannot load"));
    }

    #[test]
    fn test_parameters_seed_store() {
        let runner = runner(
            r#"
            [scenario]
            name = "Seeded"

            [parameters.preferences]
            unceasing_animations = true

            [[steps]]
            action = { type = "log", message = "seeded" }
            "#,
        );

        assert!(runner.state().store.unceasing_animations.get());
        assert_eq!(runner.state().store.animation_speed.get(), 1.0);
    }
}
