//! Test execution engine
//!
//! Scenarios drive a `GameManager` directly, one scripted call per step,
//! with no Bevy app in between. Every event a step publishes is tagged with
//! that step's number before the sequence is checked.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::events::EventBus;
use crate::session::GameManager;
use crate::settings::GameSettings;

use super::assertions::{
    AssertionError, CapturedEvent, SessionSnapshot, check_sequence, check_state,
};
use super::parser::{Step, TestDefinition, TestSetup};

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { steps: usize },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Apply scenario overrides on top of the default settings
fn settings_for(setup: &TestSetup) -> Result<GameSettings, String> {
    let mut settings = GameSettings::default();
    settings.session.mode = setup.mode;
    settings.session.seed = setup.seed;

    if let Some(duration) = setup.duration {
        settings.session.duration = duration;
    }
    if let Some(threshold) = setup.streak_threshold {
        settings.streak.threshold = threshold;
    }
    if let Some(duration) = setup.power_up_duration {
        settings.streak.power_up_duration = duration;
    }
    if let Some(multiplier) = setup.multiplier {
        settings.streak.multiplier = multiplier;
    }
    if let Some(duration) = setup.bonus_duration {
        settings.bonus.duration = duration;
    }
    if let Some([min, max]) = setup.bonus_interval {
        if min < 0.0 || max < min {
            return Err(format!("Invalid bonus_interval [{}, {}]", min, max));
        }
        settings.bonus.min_interval = min;
        settings.bonus.max_interval = max;
    }
    if let Some(table) = &setup.bonus_table {
        settings.bonus.table = table.clone();
    }
    if let Some(count) = setup.spawn_points {
        if count == 0 || count > settings.spawn_points.len() {
            return Err(format!(
                "spawn_points must be between 1 and {}",
                settings.spawn_points.len()
            ));
        }
        settings.spawn_points.truncate(count);
    }

    Ok(settings)
}

fn apply_step(step: &Step, manager: &mut GameManager, bus: &mut EventBus) {
    match step {
        Step::Start => manager.start_game(bus),
        Step::Tick { seconds, draw } => match draw {
            Some(draw) => {
                for _ in 0..*seconds {
                    manager.tick_second_with_draw(*draw, bus);
                }
            }
            None => manager.advance(Duration::from_secs(u64::from(*seconds)), bus),
        },
        Step::Score { player, kind } => manager.award(*player, *kind, bus),
        Step::OutOfPlay { player } => manager.on_ball_out_of_play(*player, bus),
        Step::Pause => manager.pause(bus),
        Step::Resume => manager.resume(bus),
        Step::End => manager.end_game(bus),
        Step::PlayAgain => manager.play_again(bus),
        Step::Menu => manager.return_to_menu(bus),
    }
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let settings = match settings_for(&test.setup) {
        Ok(settings) => settings,
        Err(message) => return TestResult::Error { message },
    };

    if let Some(bad) = test
        .expect
        .state
        .iter()
        .find(|a| a.after_step == 0 || a.after_step > test.steps.len())
    {
        return TestResult::Error {
            message: format!(
                "State assertion after step {} but the test has {} steps",
                bad.after_step,
                test.steps.len()
            ),
        };
    }

    let mut manager = GameManager::in_memory(settings, test.setup.seed.unwrap_or(0));
    let mut bus = EventBus::new();
    let mut captured = Vec::new();

    for (i, step) in test.steps.iter().enumerate() {
        let step_number = i + 1;
        apply_step(step, &mut manager, &mut bus);

        captured.extend(bus.drain().into_iter().map(|entry| CapturedEvent {
            step: step_number,
            event: entry.event,
        }));

        let snapshot = SessionSnapshot::capture(&manager);
        for assertion in test.expect.state.iter().filter(|a| a.after_step == step_number) {
            if let Err(error) = check_state(assertion, &snapshot) {
                return TestResult::Fail { error };
            }
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass {
        steps: test.steps.len(),
    }
}

/// Find scenario files under `base`, optionally keeping only paths containing `filter`
pub fn discover_tests(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_tests_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_tests_recursive(
    base: &Path,
    current: &Path,
    filter: Option<&str>,
    tests: &mut Vec<PathBuf>,
) {
    let entries = match fs::read_dir(current) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            discover_tests_recursive(base, &path, filter, tests);
        } else if path.extension().is_some_and(|e| e == "toml") {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            tests.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SCENARIOS_DIR;
    use crate::testing::parser::parse_test_file;

    fn definition(toml: &str) -> TestDefinition {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_inline_scenario_passes() {
        let def = definition(
            r#"
name = "Inline"
[setup]
seed = 1

[[steps]]
action = "start"

[[steps]]
action = "score"
player = "Human"
kind = "Standard"

[[expect.sequence]]
event = "GameStateChanged"
step_max = 1

[[expect.sequence]]
event = "ScoreChanged"
player = "Human"
value = 2
step_min = 2

[[expect.state]]
after_step = 2
checks = ["score.human = 2", "streak.human = 1"]
"#,
        );
        assert!(matches!(run_test(&def), TestResult::Pass { steps: 2 }));
    }

    #[test]
    fn test_failing_check_reports_fail() {
        let def = definition(
            r#"
name = "Wrong"
[[steps]]
action = "start"

[[expect.state]]
after_step = 1
checks = ["timer = 30"]
"#,
        );
        assert!(matches!(run_test(&def), TestResult::Fail { .. }));
    }

    #[test]
    fn test_assertion_past_last_step_is_an_error() {
        let def = definition(
            r#"
name = "Late"
[[steps]]
action = "start"

[[expect.state]]
after_step = 4
checks = ["timer = 60"]
"#,
        );
        assert!(matches!(run_test(&def), TestResult::Error { .. }));
    }

    #[test]
    fn test_bundled_scenarios_pass() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR")).join(SCENARIOS_DIR);
        let tests = discover_tests(&base, None);
        assert!(!tests.is_empty(), "no scenarios under {}", base.display());

        for path in tests {
            let def = parse_test_file(&path).unwrap();
            match run_test(&def) {
                TestResult::Pass { .. } => {}
                TestResult::Fail { error } => panic!("{}: {}", path.display(), error),
                TestResult::Error { message } => panic!("{}: {}", path.display(), message),
            }
        }
    }
}
