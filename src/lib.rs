//! Hoopstreak - a swipe-to-shoot basketball arcade core built on Bevy
//!
//! This crate provides the trajectory solver, shot pipeline, session state
//! machine and spawn coordinator, plus the headless wiring that runs them.

// Core modules
pub mod constants;
pub mod events;
pub mod settings;
pub mod simulation;
pub mod testing;

// Game logic modules
pub mod ai;
pub mod ball;
pub mod input;
pub mod session;
pub mod shooting;
pub mod spawning;
pub mod world;

// Re-export commonly used types for convenience
pub use ai::{ScriptedShooter, perfect_drag_for};
pub use ball::{Ball, BallBody, ContactEvent, ContactOutcome, ContactQueue};
pub use constants::*;
pub use events::{BusEvent, EventBus, GameEvent, GameState, PlayerId, ScoreKind};
pub use input::{GestureEvent, GestureQueue};
pub use session::{
    BonusEntry, BonusTable, GameManager, GameMode, HighScoreStore, JsonHighScoreStore,
    MemoryHighScoreStore,
};
pub use settings::{GameSettings, SETTINGS_FILE};
pub use shooting::{
    LaunchSolution, ShotPhase, ShotPipeline, TrajectoryCache, classify_shot, solve_launch_velocity,
};
pub use spawning::SpawnCoordinator;
pub use world::Court;
