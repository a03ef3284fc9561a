//! Session configuration
//!
//! Loads gameplay tuning (angles, thresholds, durations, bonus table, spawn
//! points) from config/game_settings.json. The values are static for a session.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::session::{BonusEntry, GameMode};
use crate::shooting::ShotTargets;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/game_settings.json";

// Serde default functions for shooting fields
fn default_gravity() -> f32 {
    GRAVITY
}
fn default_basket_angle() -> f32 {
    BASKET_LAUNCH_ANGLE
}
fn default_backboard_angle() -> f32 {
    BACKBOARD_LAUNCH_ANGLE
}
fn default_threshold() -> f32 {
    PERFECT_SHOT_THRESHOLD
}
fn default_force_multiplier() -> f32 {
    FORCE_MULTIPLIER
}
fn default_vertical_multiplier() -> f32 {
    VERTICAL_MULTIPLIER
}
fn default_max_speed_factor() -> f32 {
    MAX_SPEED_FACTOR
}
fn default_spin_impulse() -> f32 {
    SPIN_IMPULSE
}
fn default_gesture_min_distance() -> f32 {
    GESTURE_MIN_DISTANCE
}
fn default_gesture_max_duration() -> f32 {
    GESTURE_MAX_DURATION
}

/// Trajectory and gesture tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShootingSettings {
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Launch angle for the perfect swish (degrees)
    #[serde(default = "default_basket_angle")]
    pub basket_angle: f32,
    /// Launch angle for the perfect bank shot (degrees)
    #[serde(default = "default_backboard_angle")]
    pub backboard_angle: f32,
    /// Percent error under which an attempt snaps to a perfect trajectory
    #[serde(default = "default_threshold")]
    pub perfect_shot_threshold: f32,
    #[serde(default = "default_force_multiplier")]
    pub force_multiplier: f32,
    #[serde(default = "default_vertical_multiplier")]
    pub vertical_multiplier: f32,
    #[serde(default = "default_max_speed_factor")]
    pub max_speed_factor: f32,
    #[serde(default = "default_spin_impulse")]
    pub spin_impulse: f32,
    #[serde(default = "default_gesture_min_distance")]
    pub gesture_min_distance: f32,
    #[serde(default = "default_gesture_max_duration")]
    pub gesture_max_duration: f32,
}

impl Default for ShootingSettings {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            basket_angle: default_basket_angle(),
            backboard_angle: default_backboard_angle(),
            perfect_shot_threshold: default_threshold(),
            force_multiplier: default_force_multiplier(),
            vertical_multiplier: default_vertical_multiplier(),
            max_speed_factor: default_max_speed_factor(),
            spin_impulse: default_spin_impulse(),
            gesture_min_distance: default_gesture_min_distance(),
            gesture_max_duration: default_gesture_max_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Round length in seconds
    pub duration: u32,
    pub mode: GameMode,
    /// RNG seed for reproducible sessions (None = entropy)
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            duration: GAME_DURATION,
            mode: GameMode::SinglePlayer,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub perfect_points: u32,
    pub standard_points: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            perfect_points: PERFECT_POINTS,
            standard_points: STANDARD_POINTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakSettings {
    /// Consecutive baskets that trigger the power-up
    pub threshold: u32,
    /// Power-up length in seconds
    pub power_up_duration: u32,
    pub multiplier: u32,
}

impl Default for StreakSettings {
    fn default() -> Self {
        Self {
            threshold: STREAK_THRESHOLD,
            power_up_duration: POWER_UP_DURATION,
            multiplier: POWER_UP_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusSettings {
    /// Seconds a lit bonus stays active
    pub duration: u32,
    pub min_interval: f32,
    pub max_interval: f32,
    /// Weighted table; probabilities need not sum to 100
    pub table: Vec<BonusEntry>,
}

impl Default for BonusSettings {
    fn default() -> Self {
        Self {
            duration: BONUS_DURATION,
            min_interval: BONUS_MIN_INTERVAL,
            max_interval: BONUS_MAX_INTERVAL,
            table: vec![
                BonusEntry {
                    points: 4,
                    probability: 40.0,
                },
                BonusEntry {
                    points: 6,
                    probability: 25.0,
                },
                BonusEntry {
                    points: 8,
                    probability: 15.0,
                },
            ],
        }
    }
}

/// Hoop geometry, in world metres
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtSettings {
    pub rim_center: [f32; 3],
    pub rim_radius: f32,
    pub backboard_center: [f32; 3],
    /// Upper aim marker on the glass; the bank shot aims between it and the centre
    pub backboard_max_range: Option<[f32; 3]>,
    pub backboard_half_extents: [f32; 3],
    /// Farthest reachable point, used to normalise power percentages
    pub max_range_target: Option<[f32; 3]>,
    pub ball_radius: f32,
    pub ground_y: f32,
    pub ground_restitution: f32,
    pub board_restitution: f32,
    pub trigger_depth: f32,
}

impl Default for CourtSettings {
    fn default() -> Self {
        Self {
            rim_center: RIM_CENTER.to_array(),
            rim_radius: RIM_RADIUS,
            backboard_center: BACKBOARD_CENTER.to_array(),
            backboard_max_range: Some(BACKBOARD_MAX_RANGE.to_array()),
            backboard_half_extents: BACKBOARD_HALF_EXTENTS.to_array(),
            max_range_target: None,
            ball_radius: BALL_RADIUS,
            ground_y: GROUND_Y,
            ground_restitution: GROUND_RESTITUTION,
            board_restitution: BOARD_RESTITUTION,
            trigger_depth: TRIGGER_DEPTH,
        }
    }
}

/// Everything configurable for one session
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub session: SessionSettings,
    pub shooting: ShootingSettings,
    pub scoring: ScoringSettings,
    pub streak: StreakSettings,
    pub bonus: BonusSettings,
    pub court: CourtSettings,
    pub spawn_points: Vec<[f32; 3]>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            shooting: ShootingSettings::default(),
            scoring: ScoringSettings::default(),
            streak: StreakSettings::default(),
            bonus: BonusSettings::default(),
            court: CourtSettings::default(),
            spawn_points: DEFAULT_SPAWN_POINTS.iter().map(|p| p.to_array()).collect(),
        }
    }
}

impl GameSettings {
    /// Load settings from a JSON file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        let mut settings: Self = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", path, e))?;
        settings.validate();
        Ok(settings)
    }

    /// Load settings with fallback
    /// Priority: explicit path > SETTINGS_FILE > built-in defaults
    pub fn load(path: Option<&str>) -> Self {
        if let Some(path) = path {
            match Self::from_file(path) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path);
                    return settings;
                }
                Err(e) => warn!("{}, trying {}", e, SETTINGS_FILE),
            }
        }

        if !Path::new(SETTINGS_FILE).exists() {
            info!("No {} found, using defaults", SETTINGS_FILE);
            return Self::default();
        }

        match Self::from_file(SETTINGS_FILE) {
            Ok(settings) => {
                info!("Loaded settings from {}", SETTINGS_FILE);
                settings
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }

        fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        info!("Saved settings to {}", path);
        Ok(())
    }

    /// Repair inconsistent values in place. Returns a description of each repair.
    pub fn validate(&mut self) -> Vec<String> {
        let mut repairs = Vec::new();

        if self.shooting.gravity >= 0.0 {
            self.shooting.gravity = if self.shooting.gravity == 0.0 {
                GRAVITY
            } else {
                -self.shooting.gravity
            };
            repairs.push(format!("gravity must be negative, using {}", self.shooting.gravity));
        }

        let bonus = &mut self.bonus;
        if bonus.min_interval < 0.0 || bonus.max_interval < 0.0 {
            bonus.min_interval = bonus.min_interval.max(0.0);
            bonus.max_interval = bonus.max_interval.max(0.0);
            repairs.push("negative bonus interval clamped to 0".to_string());
        }
        if bonus.min_interval > bonus.max_interval {
            std::mem::swap(&mut bonus.min_interval, &mut bonus.max_interval);
            repairs.push(format!(
                "bonus interval min/max swapped to {}..{}",
                bonus.min_interval, bonus.max_interval
            ));
        }
        let before = bonus.table.len();
        bonus.table.retain(|entry| entry.probability > 0.0);
        if bonus.table.len() != before {
            repairs.push(format!(
                "dropped {} bonus entries with non-positive probability",
                before - bonus.table.len()
            ));
        }

        if self.streak.multiplier == 0 {
            self.streak.multiplier = 1;
            repairs.push("power-up multiplier 0 replaced with 1".to_string());
        }
        if self.shooting.perfect_shot_threshold < 0.0 {
            self.shooting.perfect_shot_threshold = 0.0;
            repairs.push("negative perfect shot threshold clamped to 0".to_string());
        }
        if self.spawn_points.is_empty() {
            self.spawn_points = DEFAULT_SPAWN_POINTS.iter().map(|p| p.to_array()).collect();
            repairs.push("no spawn points configured, using defaults".to_string());
        }

        for repair in &repairs {
            warn!("Settings: {}", repair);
        }
        repairs
    }

    /// Spawn points as world positions
    pub fn spawn_positions(&self) -> Vec<Vec3> {
        self.spawn_points.iter().map(|p| Vec3::from_array(*p)).collect()
    }

    /// Aim points for the trajectory cache
    pub fn shot_targets(&self) -> ShotTargets {
        ShotTargets {
            basket: Vec3::from_array(self.court.rim_center),
            backboard_center: Vec3::from_array(self.court.backboard_center),
            backboard_max_range: self.court.backboard_max_range.map(Vec3::from_array),
            max_range: self.court.max_range_target.map(Vec3::from_array),
        }
    }
}
