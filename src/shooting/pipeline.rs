//! Per-ball shot pipeline: Idle -> Armed -> InFlight -> (reset) -> Armed

use bevy::prelude::*;

use crate::events::{GameEvent, GameState, PlayerId, ShotClassification};
use crate::settings::ShootingSettings;
use crate::shooting::{
    ShotTargets, TrajectoryCache, chosen_velocity, classify_shot, gesture_to_velocity,
    speed_percentage,
};

/// Shooting state of one ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShotPhase {
    /// Cannot shoot, waiting for a reset
    #[default]
    Idle,
    /// Cache is valid, one shot allowed
    Armed,
    /// Ball released, waiting for the outcome
    InFlight,
}

/// One throw, from gesture to the velocity that will be applied
#[derive(Debug, Clone, PartialEq)]
pub struct ShotAttempt {
    pub player: PlayerId,
    pub origin: Vec3,
    pub drag: Vec2,
    /// Velocity derived from the player's gesture
    pub attempted: Vec3,
    /// Velocity actually applied (perfect velocity when snapped)
    pub chosen: Vec3,
    pub power_percent: f32,
    pub basket_error: Option<f32>,
    pub backboard_error: Option<f32>,
    pub classification: ShotClassification,
}

/// Owns the trajectory cache and phase for one player's ball
#[derive(Component, Debug, Clone)]
pub struct ShotPipeline {
    pub owner: PlayerId,
    pub phase: ShotPhase,
    /// Spawn point the cache was computed from
    pub origin: Vec3,
    pub cache: TrajectoryCache,
}

impl ShotPipeline {
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            phase: ShotPhase::Idle,
            origin: Vec3::ZERO,
            cache: TrajectoryCache::default(),
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.phase == ShotPhase::Armed
    }

    /// Recompute the cache for a new spawn point and arm shooting.
    /// Resets addressed to another player are ignored (returns `None`).
    pub fn on_reset(
        &mut self,
        origin: Vec3,
        player: PlayerId,
        targets: &ShotTargets,
        shooting: &ShootingSettings,
    ) -> Option<GameEvent> {
        if player != self.owner {
            return None;
        }

        self.origin = origin;
        self.cache = TrajectoryCache::compute(origin, targets, shooting);
        self.phase = ShotPhase::Armed;

        let basket_percent = speed_percentage(self.cache.basket.speed, self.cache.max_speed);
        let backboard_percent = speed_percentage(self.cache.backboard.speed, self.cache.max_speed);
        debug!(
            "{} armed at {:?}: basket {:.2} m/s ({:.0}%), backboard {:.2} m/s ({:.0}%)",
            self.owner,
            origin,
            self.cache.basket.speed,
            basket_percent,
            self.cache.backboard.speed,
            backboard_percent
        );

        Some(GameEvent::PerfectShotHints {
            player: self.owner,
            basket_percent,
            backboard_percent,
        })
    }

    /// Velocity a drag would produce from `ball_position`
    pub fn preview_velocity(
        &self,
        drag: Vec2,
        ball_position: Vec3,
        targets: &ShotTargets,
        shooting: &ShootingSettings,
    ) -> Vec3 {
        gesture_to_velocity(
            drag,
            ball_position,
            targets.basket,
            shooting.force_multiplier,
            shooting.vertical_multiplier,
            self.cache.max_speed,
        )
    }

    /// Live power feedback while dragging. Purely observational.
    pub fn on_drag_update(
        &self,
        drag: Vec2,
        ball_position: Vec3,
        targets: &ShotTargets,
        shooting: &ShootingSettings,
    ) -> Option<GameEvent> {
        if !self.can_shoot() {
            return None;
        }
        let velocity = self.preview_velocity(drag, ball_position, targets, shooting);
        Some(GameEvent::DragPower {
            player: self.owner,
            percent: speed_percentage(velocity.length(), self.cache.max_speed),
        })
    }

    /// Turn a finished gesture into a shot. No-op unless armed during gameplay;
    /// disarms so only one shot leaves per reset.
    pub fn on_gesture_end(
        &mut self,
        drag: Vec2,
        game_state: GameState,
        ball_position: Vec3,
        targets: &ShotTargets,
        shooting: &ShootingSettings,
    ) -> Option<ShotAttempt> {
        if !self.can_shoot() || game_state != GameState::Gameplay {
            return None;
        }
        self.phase = ShotPhase::InFlight;

        let attempted = self.preview_velocity(drag, ball_position, targets, shooting);
        let attempt_speed = attempted.length();
        let classification =
            classify_shot(attempt_speed, &self.cache, shooting.perfect_shot_threshold);
        let chosen = chosen_velocity(classification.result, attempted, &self.cache);

        debug!(
            "{} shot: drag {:?} -> {:.2} m/s, errors basket {:?} backboard {:?} -> {:?}",
            self.owner,
            drag,
            attempt_speed,
            classification.basket_error,
            classification.backboard_error,
            classification.result
        );

        Some(ShotAttempt {
            player: self.owner,
            origin: ball_position,
            drag,
            attempted,
            chosen,
            power_percent: speed_percentage(attempt_speed, self.cache.max_speed),
            basket_error: classification.basket_error,
            backboard_error: classification.backboard_error,
            classification: classification.result,
        })
    }

    /// Drop back to Idle (ball went out of play before the next reset)
    pub fn disarm(&mut self) {
        self.phase = ShotPhase::Idle;
    }
}
