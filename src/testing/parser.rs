//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::events::{PlayerId, ScoreKind};
use crate::session::{BonusEntry, GameMode};

/// Complete scenario definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Session configuration overrides
#[derive(Debug, Default, Deserialize)]
pub struct TestSetup {
    #[serde(default)]
    pub mode: GameMode,
    pub seed: Option<u64>,
    pub duration: Option<u32>,
    pub streak_threshold: Option<u32>,
    pub power_up_duration: Option<u32>,
    pub multiplier: Option<u32>,
    pub bonus_duration: Option<u32>,
    /// `[min, max]` seconds between bonus draws
    pub bonus_interval: Option<[f32; 2]>,
    pub bonus_table: Option<Vec<BonusEntry>>,
    /// Number of spawn points to keep from the defaults
    pub spawn_points: Option<usize>,
}

/// One scripted session call
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Start,
    /// Let `seconds` of game time pass. With `draw`, each second is ticked
    /// with that forced bonus draw instead of the session RNG.
    Tick {
        #[serde(default = "default_seconds")]
        seconds: u32,
        draw: Option<f32>,
    },
    Score {
        player: PlayerId,
        kind: ScoreKind,
    },
    /// Ball went out of play (a miss unless the player scored this attempt)
    #[serde(alias = "miss")]
    OutOfPlay {
        player: PlayerId,
    },
    Pause,
    Resume,
    End,
    PlayAgain,
    Menu,
}

fn default_seconds() -> u32 {
    1
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// State assertions after given steps (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub player: Option<PlayerId>,
    /// Primary numeric payload (score, points, seconds, streak...)
    pub value: Option<u32>,
    pub step_min: Option<usize>,
    pub step_max: Option<usize>,
}

/// State assertion after a step (1-based)
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_step: usize,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a scenario file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}
