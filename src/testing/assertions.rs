//! Assertion checking for scenario expectations

use std::collections::BTreeMap;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::{GameEvent, GameState, PlayerId};
use crate::session::GameManager;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Published event with the step that produced it
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub step: usize,
    pub event: GameEvent,
}

impl CapturedEvent {
    /// The number a scenario compares against `value`
    pub fn value(&self) -> Option<u32> {
        match &self.event {
            GameEvent::ScoreChanged { score, .. } | GameEvent::HighScoreChanged { score } => {
                Some(*score)
            }
            GameEvent::Basket { points, .. } | GameEvent::BonusActivated { points, .. } => {
                Some(*points)
            }
            GameEvent::TimerChanged { seconds } => Some(*seconds),
            GameEvent::StreakProgress { current, .. } => Some(*current),
            GameEvent::PowerUpActivated { duration, .. } => Some(*duration),
            GameEvent::MatchEnd { human, .. } => Some(*human),
            GameEvent::PositionReset { spawn_index, .. } => Some(*spawn_index as u32),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match (self.event.player(), self.value()) {
            (Some(p), Some(v)) => format!("{}({}, {})", self.event.name(), p, v),
            (Some(p), None) => format!("{}({})", self.event.name(), p),
            (None, Some(v)) => format!("{}({})", self.event.name(), v),
            (None, None) => self.event.name().to_string(),
        }
    }
}

/// Check that expected events appear in order (other events may interleave)
pub fn check_sequence(
    expected: &[ExpectedEvent],
    captured: &[CapturedEvent],
) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            cap.event.name() == exp.event
                && exp.player.is_none_or(|p| cap.event.player() == Some(p))
                && exp.value.is_none_or(|v| cap.value() == Some(v))
        });

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.step_min {
                    if cap.step < min {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                            expected: format!("step >= {}", min),
                            actual: format!("step {}", cap.step),
                        });
                    }
                }
                if let Some(max) = exp.step_max {
                    if cap.step > max {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                            expected: format!("step <= {}", max),
                            actual: format!("step {}", cap.step),
                        });
                    }
                }
                captured_idx += offset + 1;
            }
            None => {
                let player_str = exp.player.map(|p| format!(" (player: {})", p)).unwrap_or_default();
                let value_str = exp.value.map(|v| format!(" = {}", v)).unwrap_or_default();
                return Err(AssertionError {
                    message: format!(
                        "Event #{} '{}'{}{} not found",
                        i + 1,
                        exp.event,
                        player_str,
                        value_str
                    ),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| e.describe()).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Per-player values visible to checks
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub score: u32,
    pub streak: u32,
    pub power_up: bool,
    pub spawn: Option<usize>,
}

/// Session values visible to checks
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: GameState,
    pub timer: u32,
    pub high_score: u32,
    pub bonus: u32,
    pub counting_down: bool,
    pub players: BTreeMap<PlayerId, PlayerSnapshot>,
}

impl SessionSnapshot {
    pub fn capture(manager: &GameManager) -> Self {
        let session = manager.session();
        Self {
            state: session.game_state,
            timer: session.timer,
            high_score: session.high_score,
            bonus: manager.bonus().points,
            counting_down: manager.is_counting_down(),
            players: session
                .players
                .iter()
                .map(|(id, record)| {
                    (
                        *id,
                        PlayerSnapshot {
                            score: record.score,
                            streak: record.streak.streak,
                            power_up: record.streak.is_powered(),
                            spawn: record.spawn_index,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Resolve a check path to a comparable value
    fn lookup(&self, path: &str) -> Option<Value> {
        let mut parts = path.split('.');
        let head = parts.next()?;
        let player = match parts.next() {
            Some("human") => Some(PlayerId::Human),
            Some("ai") => Some(PlayerId::Ai),
            Some(_) => return None,
            None => None,
        };

        match (head, player) {
            ("state", None) => Some(Value::State(self.state)),
            ("timer", None) => Some(Value::Number(self.timer as f64)),
            ("high_score", None) => Some(Value::Number(self.high_score as f64)),
            ("bonus", None) => Some(Value::Number(self.bonus as f64)),
            ("counting_down", None) => Some(Value::Number(flag(self.counting_down))),
            ("spawns_distinct", None) => {
                let human = self.players.get(&PlayerId::Human).and_then(|p| p.spawn);
                let ai = self.players.get(&PlayerId::Ai).and_then(|p| p.spawn);
                Some(Value::Number(flag(human != ai)))
            }
            (field, Some(player)) => {
                let p = self.players.get(&player)?;
                match field {
                    "score" => Some(Value::Number(p.score as f64)),
                    "streak" => Some(Value::Number(p.streak as f64)),
                    "power_up" => Some(Value::Number(flag(p.power_up))),
                    "spawn" => p.spawn.map(|s| Value::Number(s as f64)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    Number(f64),
    State(GameState),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::State(s) => write!(f, "{:?}", s),
        }
    }
}

fn parse_value(raw: &str) -> Option<Value> {
    match raw {
        "true" => return Some(Value::Number(1.0)),
        "false" => return Some(Value::Number(0.0)),
        "MainMenu" => return Some(Value::State(GameState::MainMenu)),
        "Gameplay" => return Some(Value::State(GameState::Gameplay)),
        "Reward" => return Some(Value::State(GameState::Reward)),
        "Pause" => return Some(Value::State(GameState::Pause)),
        _ => {}
    }
    raw.parse::<f64>().ok().map(Value::Number)
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

fn compare(actual: Value, operator: &str, expected: Value) -> Option<bool> {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => Some(match operator {
            "=" => (a - e).abs() < 1e-6,
            "!=" => (a - e).abs() >= 1e-6,
            ">=" => a >= e,
            "<=" => a <= e,
            ">" => a > e,
            "<" => a < e,
            _ => return None,
        }),
        (Value::State(a), Value::State(e)) => match operator {
            "=" => Some(a == e),
            "!=" => Some(a != e),
            _ => None,
        },
        _ => None,
    }
}

/// Check state assertions against a session snapshot
pub fn check_state(assertion: &StateAssertion, state: &SessionSnapshot) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path = value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;

        let actual = state.lookup(path).ok_or_else(|| AssertionError {
            message: format!("Unknown path '{}' after step {}", path, assertion.after_step),
            expected: "state, timer, high_score, bonus, counting_down, spawns_distinct, or <field>.<human|ai>"
                .to_string(),
            actual: path.to_string(),
        })?;
        let expected = parse_value(expected_value).ok_or_else(|| AssertionError {
            message: format!("Invalid value for {}", path),
            expected: "number, bool, or game state".to_string(),
            actual: expected_value.to_string(),
        })?;

        match compare(actual, operator, expected) {
            Some(true) => {}
            Some(false) => {
                return Err(AssertionError {
                    message: format!("Check failed after step {}: {}", assertion.after_step, check),
                    expected: format!("{} {} {}", path, operator, expected),
                    actual: actual.to_string(),
                });
            }
            None => {
                return Err(AssertionError {
                    message: format!("Cannot apply '{}' to {}", operator, path),
                    expected: format!("{} value", actual),
                    actual: expected_value.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SessionSnapshot {
        let mut players = BTreeMap::new();
        players.insert(
            PlayerId::Human,
            PlayerSnapshot {
                score: 6,
                streak: 2,
                power_up: false,
                spawn: Some(1),
            },
        );
        SessionSnapshot {
            state: GameState::Gameplay,
            timer: 42,
            high_score: 10,
            bonus: 0,
            counting_down: true,
            players,
        }
    }

    fn assertion(checks: &[&str]) -> StateAssertion {
        StateAssertion {
            after_step: 1,
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_passing_checks() {
        let checks = assertion(&[
            "state = Gameplay",
            "timer >= 40",
            "score.human = 6",
            "streak.human < 3",
            "power_up.human = false",
            "counting_down = true",
        ]);
        assert!(check_state(&checks, &snapshot()).is_ok());
    }

    #[test]
    fn test_failing_and_unknown_checks() {
        assert!(check_state(&assertion(&["score.human = 3"]), &snapshot()).is_err());
        assert!(check_state(&assertion(&["score.ai = 0"]), &snapshot()).is_err());
        assert!(check_state(&assertion(&["state > Gameplay"]), &snapshot()).is_err());
        assert!(check_state(&assertion(&["nonsense"]), &snapshot()).is_err());
    }

    #[test]
    fn test_sequence_matches_in_order() {
        let captured = vec![
            CapturedEvent {
                step: 1,
                event: GameEvent::TimerChanged { seconds: 60 },
            },
            CapturedEvent {
                step: 2,
                event: GameEvent::ScoreChanged {
                    player: PlayerId::Human,
                    score: 3,
                },
            },
        ];
        let expected = |event: &str, value: Option<u32>| ExpectedEvent {
            event: event.to_string(),
            player: None,
            value,
            step_min: None,
            step_max: None,
        };

        assert!(
            check_sequence(
                &[expected("TimerChanged", Some(60)), expected("ScoreChanged", Some(3))],
                &captured
            )
            .is_ok()
        );
        assert!(
            check_sequence(
                &[expected("ScoreChanged", None), expected("TimerChanged", None)],
                &captured
            )
            .is_err()
        );
    }
}
