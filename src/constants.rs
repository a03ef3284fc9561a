//! Tunable constants for hoopstreak
//!
//! All gameplay defaults are defined here for easy tweaking. Anything a designer
//! may want to change per build is also exposed through `GameSettings`.

use bevy::prelude::*;

// =============================================================================
// PHYSICS
// =============================================================================

pub const GRAVITY: f32 = -9.81; // Metres per second squared (negative = down)
pub const BALL_RADIUS: f32 = 0.12;
pub const GROUND_Y: f32 = 0.0;
pub const GROUND_RESTITUTION: f32 = 0.6; // Vertical velocity retained per ground bounce
pub const BOARD_RESTITUTION: f32 = 0.5; // Velocity retained off the backboard

// =============================================================================
// SHOOTING
// =============================================================================

pub const BASKET_LAUNCH_ANGLE: f32 = 55.0; // Degrees, shallower arc straight into the rim
pub const BACKBOARD_LAUNCH_ANGLE: f32 = 60.0; // Degrees, steeper arc off the glass
pub const PERFECT_SHOT_THRESHOLD: f32 = 10.0; // Percent error still snapped to a perfect trajectory
pub const FORCE_MULTIPLIER: f32 = 0.02; // Drag pixels -> horizontal m/s
pub const VERTICAL_MULTIPLIER: f32 = 0.02; // Drag pixels (y) -> vertical m/s
pub const MAX_SPEED_FACTOR: f32 = 1.5; // Fallback max speed = factor * larger perfect speed
pub const SPIN_IMPULSE: f32 = 2.0; // Max random angular velocity added at launch (rad/s)
pub const GESTURE_MIN_DISTANCE: f32 = 30.0; // Shorter swipes are ignored (pixels)
pub const GESTURE_MAX_DURATION: f32 = 1.0; // Slower swipes are ignored (seconds)

// =============================================================================
// SCORING
// =============================================================================

pub const PERFECT_POINTS: u32 = 3;
pub const STANDARD_POINTS: u32 = 2;
pub const STREAK_THRESHOLD: u32 = 5; // Consecutive baskets needed for power-up
pub const POWER_UP_DURATION: u32 = 10; // Seconds
pub const POWER_UP_MULTIPLIER: u32 = 2;

// =============================================================================
// SESSION
// =============================================================================

pub const GAME_DURATION: u32 = 60; // Seconds
pub const BONUS_DURATION: u32 = 8; // Seconds a backboard bonus stays lit
pub const BONUS_MIN_INTERVAL: f32 = 8.0; // Seconds between bonus spawn checks (min)
pub const BONUS_MAX_INTERVAL: f32 = 15.0; // Seconds between bonus spawn checks (max)
pub const MAX_SPAWN_ATTEMPTS: usize = 10;

// =============================================================================
// SCRIPTED SHOOTER
// =============================================================================

pub const AI_THINK_TIME_MIN: f32 = 0.6; // Seconds between arming and swiping
pub const AI_THINK_TIME_MAX: f32 = 1.4;
pub const AI_DRAG_NOISE: f32 = 0.08; // Relative error on swipe length (0.08 = up to 8%)
pub const AI_BANK_CHANCE: f32 = 0.3; // Chance of going for the glass
pub const AI_SWIPE_DURATION: f32 = 0.2; // Seconds from touch to release

// =============================================================================
// COURT
// =============================================================================

pub const RIM_CENTER: Vec3 = Vec3::new(0.0, 3.05, 6.0);
pub const RIM_RADIUS: f32 = 0.23;
pub const BACKBOARD_CENTER: Vec3 = Vec3::new(0.0, 3.35, 6.45);
pub const BACKBOARD_MAX_RANGE: Vec3 = Vec3::new(0.0, 3.75, 6.45); // Upper marker on the glass
pub const BACKBOARD_HALF_EXTENTS: Vec3 = Vec3::new(0.9, 0.53, 0.03);
pub const TRIGGER_DEPTH: f32 = 0.05; // Trigger planes sit this far above and below the rim
pub const RING_TUBE_RADIUS: f32 = 0.01; // Thickness of the rim hoop

pub const DEFAULT_SPAWN_POINTS: [Vec3; 5] = [
    Vec3::new(0.0, 1.8, 1.5),
    Vec3::new(-2.0, 1.8, 2.0),
    Vec3::new(2.0, 1.8, 2.0),
    Vec3::new(-3.0, 1.8, 3.5),
    Vec3::new(3.0, 1.8, 3.5),
];
