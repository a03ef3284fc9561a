//! Full-match runner: plays one headless round to the end

use bevy::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::events::{EventBus, GameEvent, GameState, PlayerId, ScoreKind};
use crate::session::{GameManager, GameMode};
use crate::simulation::HeadlessAppBuilder;

/// Per-player shooting stats
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerStats {
    pub shots: u32,
    pub perfect: u32,
    pub standard: u32,
    pub backboard: u32,
    pub power_ups: u32,
}

impl PlayerStats {
    pub fn baskets(&self) -> u32 {
        self.perfect + self.standard + self.backboard
    }
}

/// Outcome of a headless round
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub mode: GameMode,
    pub human: u32,
    pub ai: Option<u32>,
    pub high_score: u32,
    /// "human", "ai" or "tie" (single player always "human")
    pub winner: String,
    pub frames: u64,
    pub stats: BTreeMap<PlayerId, PlayerStats>,
}

impl MatchResult {
    fn from_app(app: &App, frames: u64) -> Self {
        let manager = app.world().resource::<GameManager>();
        let bus = app.world().resource::<EventBus>();

        let mut stats: BTreeMap<PlayerId, PlayerStats> = manager
            .mode()
            .active_players()
            .iter()
            .map(|p| (*p, PlayerStats::default()))
            .collect();
        for entry in bus.processed() {
            let Some(player) = entry.event.player() else {
                continue;
            };
            let Some(s) = stats.get_mut(&player) else {
                continue;
            };
            match entry.event {
                GameEvent::BallLaunched { .. } => s.shots += 1,
                GameEvent::Basket { kind, .. } => match kind {
                    ScoreKind::Perfect => s.perfect += 1,
                    ScoreKind::Standard => s.standard += 1,
                    ScoreKind::Backboard => s.backboard += 1,
                },
                GameEvent::PowerUpActivated { .. } => s.power_ups += 1,
                _ => {}
            }
        }

        let human = manager.score(PlayerId::Human);
        let ai = (manager.mode() == GameMode::VersusAi).then(|| manager.score(PlayerId::Ai));
        let winner = match ai {
            Some(ai) if ai > human => "ai",
            Some(ai) if ai == human => "tie",
            _ => "human",
        };

        Self {
            mode: manager.mode(),
            human,
            ai,
            high_score: manager.high_score(),
            winner: winner.to_string(),
            frames,
            stats,
        }
    }
}

/// Step the app until the round reaches `Reward` (or `max_frames` runs out)
pub fn run_match(builder: HeadlessAppBuilder, max_frames: u64) -> MatchResult {
    let mut app = builder.with_autostart().with_event_history().build();

    let mut frames = 0;
    while frames < max_frames {
        app.update();
        frames += 1;
        if app.world().resource::<GameManager>().game_state() == GameState::Reward {
            break;
        }
    }

    if app.world().resource::<GameManager>().game_state() != GameState::Reward {
        warn!("Match did not finish within {} frames", max_frames);
    }
    MatchResult::from_app(&app, frames)
}
