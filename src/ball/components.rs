//! Ball-related components

use bevy::prelude::*;

/// Marker for ball entities
#[derive(Component)]
pub struct Ball;

/// Rigid body state. Kinematic bodies are frozen in place until launched.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BallBody {
    pub velocity: Vec3,
    /// Radians per second around each axis
    pub angular_velocity: Vec3,
    pub kinematic: bool,
}

impl Default for BallBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            kinematic: true,
        }
    }
}

impl BallBody {
    /// Freeze the body (ball sitting at a spawn point)
    pub fn freeze(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.kinematic = true;
    }
}

/// Sticky contact flags for the current attempt
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallContactState {
    pub touched_ring: bool,
    pub touched_backboard: bool,
    /// Toggled on each ground touch; the second touch ends the attempt
    pub touched_ground: bool,
    /// Ball passed the upper basket trigger (required before the lower one scores)
    pub passed_upper_trigger: bool,
}

impl BallContactState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Previous-frame position, used for trigger plane crossings
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ContactTracker {
    pub previous: Vec3,
    pub touching_ring: bool,
    pub touching_backboard: bool,
}
