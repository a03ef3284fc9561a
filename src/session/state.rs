//! Session data: mode, per-player records, timer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::events::{GameState, PlayerId};
use crate::session::PlayerStreakState;

/// Which identities take part in a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    SinglePlayer,
    VersusAi,
}

impl GameMode {
    pub fn active_players(self) -> &'static [PlayerId] {
        match self {
            GameMode::SinglePlayer => &[PlayerId::Human],
            GameMode::VersusAi => &[PlayerId::Human, PlayerId::Ai],
        }
    }

    pub fn is_active(self, player: PlayerId) -> bool {
        self.active_players().contains(&player)
    }
}

/// Per-player scoring state, keyed by `PlayerId`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    pub score: u32,
    pub streak: PlayerStreakState,
    /// Set on the first basket of the current attempt, cleared on reset
    pub scored_this_attempt: bool,
    /// Index into the configured spawn points
    pub spawn_index: Option<usize>,
}

/// Everything the session owns between frames
#[derive(Debug, Clone)]
pub struct SessionState {
    pub game_state: GameState,
    pub mode: GameMode,
    /// Seconds left in the round
    pub timer: u32,
    pub duration: u32,
    pub high_score: u32,
    pub players: BTreeMap<PlayerId, PlayerRecord>,
}

impl SessionState {
    pub fn new(mode: GameMode, duration: u32, high_score: u32) -> Self {
        Self {
            game_state: GameState::MainMenu,
            mode,
            timer: duration,
            duration,
            high_score,
            players: mode
                .active_players()
                .iter()
                .map(|p| (*p, PlayerRecord::default()))
                .collect(),
        }
    }

    pub fn player(&self, player: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&player)
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.player(player).map(|r| r.score).unwrap_or(0)
    }

    /// Spawn index held by the opponent of `player`, if any
    pub fn other_spawn(&self, player: PlayerId) -> Option<usize> {
        self.player(player.other()).and_then(|r| r.spawn_index)
    }
}
