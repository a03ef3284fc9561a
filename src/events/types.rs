//! Notification type definitions for the event bus

use serde::{Deserialize, Serialize};

/// Player identifier (the human shooter or the scripted opponent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Human,
    Ai,
}

impl PlayerId {
    /// The opposing identity in a versus match
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::Human => PlayerId::Ai,
            PlayerId::Ai => PlayerId::Human,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Human => write!(f, "H"),
            PlayerId::Ai => write!(f, "A"),
        }
    }
}

/// Top-level session state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    MainMenu,
    Gameplay,
    Reward,
    Pause,
}

/// How a basket was scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreKind {
    /// Clean swish, nothing touched
    Perfect,
    /// Rim or glass touched on the way in
    Standard,
    /// Glass touched while a backboard bonus is lit
    Backboard,
}

/// Result of comparing an attempt against the cached perfect trajectories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotClassification {
    PerfectBasket,
    PerfectBackboard,
    Imperfect,
}

/// All notifications the core publishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Process started (published once)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // RFC 3339
    },
    /// Game state changed
    GameStateChanged { state: GameState },
    /// Round finished (entered Reward)
    MatchEnd { human: u32, ai: Option<u32> },

    // === Scoring Events ===
    /// A player's score changed (also published for the zero reset)
    ScoreChanged { player: PlayerId, score: u32 },
    /// A basket was awarded
    Basket {
        player: PlayerId,
        kind: ScoreKind,
        points: u32,
    },
    /// Global high score beaten
    HighScoreChanged { score: u32 },
    /// Countdown value in whole seconds
    TimerChanged { seconds: u32 },

    // === Streak / Power-up Events ===
    /// Consecutive-basket progress
    StreakProgress {
        player: PlayerId,
        current: u32,
        max: u32,
    },
    /// Power-up window opened
    PowerUpActivated { player: PlayerId, duration: u32 },
    /// Power-up window closed
    PowerUpExpired { player: PlayerId },

    // === Bonus Events ===
    /// Backboard bonus lit
    BonusActivated { points: u32, duration: u32 },
    /// Backboard bonus went dark
    BonusExpired,

    // === Shot Events ===
    /// Power bar hint markers for the perfect trajectories (0-100)
    PerfectShotHints {
        player: PlayerId,
        basket_percent: f32,
        backboard_percent: f32,
    },
    /// Live power while dragging (0-100)
    DragPower { player: PlayerId, percent: f32 },
    /// Final power of a released shot (0-100)
    ShotPower { player: PlayerId, percent: f32 },
    /// Ball left the hand
    BallLaunched {
        player: PlayerId,
        velocity: (f32, f32, f32),
        classification: ShotClassification,
    },
    /// Ball placed at a spawn point, ready to shoot
    PositionReset {
        player: PlayerId,
        spawn_index: usize,
        position: (f32, f32, f32),
    },
}

impl GameEvent {
    /// Get the event type code for compact logging
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::GameStateChanged { .. } => "GS",
            GameEvent::MatchEnd { .. } => "ME",
            GameEvent::ScoreChanged { .. } => "SC",
            GameEvent::Basket { .. } => "B",
            GameEvent::HighScoreChanged { .. } => "HS",
            GameEvent::TimerChanged { .. } => "T",
            GameEvent::StreakProgress { .. } => "SP",
            GameEvent::PowerUpActivated { .. } => "P+",
            GameEvent::PowerUpExpired { .. } => "P-",
            GameEvent::BonusActivated { .. } => "BA",
            GameEvent::BonusExpired => "BE",
            GameEvent::PerfectShotHints { .. } => "PH",
            GameEvent::DragPower { .. } => "DP",
            GameEvent::ShotPower { .. } => "SH",
            GameEvent::BallLaunched { .. } => "L",
            GameEvent::PositionReset { .. } => "PR",
        }
    }

    /// Variant name, as used in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SessionStart",
            GameEvent::GameStateChanged { .. } => "GameStateChanged",
            GameEvent::MatchEnd { .. } => "MatchEnd",
            GameEvent::ScoreChanged { .. } => "ScoreChanged",
            GameEvent::Basket { .. } => "Basket",
            GameEvent::HighScoreChanged { .. } => "HighScoreChanged",
            GameEvent::TimerChanged { .. } => "TimerChanged",
            GameEvent::StreakProgress { .. } => "StreakProgress",
            GameEvent::PowerUpActivated { .. } => "PowerUpActivated",
            GameEvent::PowerUpExpired { .. } => "PowerUpExpired",
            GameEvent::BonusActivated { .. } => "BonusActivated",
            GameEvent::BonusExpired => "BonusExpired",
            GameEvent::PerfectShotHints { .. } => "PerfectShotHints",
            GameEvent::DragPower { .. } => "DragPower",
            GameEvent::ShotPower { .. } => "ShotPower",
            GameEvent::BallLaunched { .. } => "BallLaunched",
            GameEvent::PositionReset { .. } => "PositionReset",
        }
    }

    /// Player this notification is scoped to, if any
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::ScoreChanged { player, .. }
            | GameEvent::Basket { player, .. }
            | GameEvent::StreakProgress { player, .. }
            | GameEvent::PowerUpActivated { player, .. }
            | GameEvent::PowerUpExpired { player }
            | GameEvent::PerfectShotHints { player, .. }
            | GameEvent::DragPower { player, .. }
            | GameEvent::ShotPower { player, .. }
            | GameEvent::BallLaunched { player, .. }
            | GameEvent::PositionReset { player, .. } => Some(*player),
            _ => None,
        }
    }
}
