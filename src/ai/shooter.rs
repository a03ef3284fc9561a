//! Scripted shooter: swipes on its own once its ball is armed

use bevy::prelude::*;
use rand::Rng;

use crate::constants::*;
use crate::events::GameState;
use crate::input::GestureQueue;
use crate::session::GameManager;
use crate::settings::{GameSettings, ShootingSettings};
use crate::shooting::{LaunchSolution, ShotPipeline, TrajectoryCache, drag_for_speed};

/// Where the shooter is in its per-reset routine
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ShooterPhase {
    /// Ball not armed yet
    #[default]
    Waiting,
    /// Armed, seconds left before the swipe
    Thinking(f32),
    /// Swipe queued for this arming
    Fired,
}

/// Drives a ball through the gesture queue, like a player would
#[derive(Component, Debug, Clone)]
pub struct ScriptedShooter {
    pub think_min: f32,
    pub think_max: f32,
    /// Relative error on swipe length
    pub drag_noise: f32,
    /// Chance of aiming the bank shot
    pub bank_chance: f32,
    pub phase: ShooterPhase,
}

impl Default for ScriptedShooter {
    fn default() -> Self {
        Self {
            think_min: AI_THINK_TIME_MIN,
            think_max: AI_THINK_TIME_MAX,
            drag_noise: AI_DRAG_NOISE,
            bank_chance: AI_BANK_CHANCE,
            phase: ShooterPhase::Waiting,
        }
    }
}

impl ScriptedShooter {
    /// A shooter that always swipes the exact perfect-basket drag
    pub fn sharpshooter() -> Self {
        Self {
            drag_noise: 0.0,
            bank_chance: 0.0,
            ..default()
        }
    }

    /// Pick the swipe for the current cache
    pub fn choose_drag(
        &self,
        cache: &TrajectoryCache,
        shooting: &ShootingSettings,
        rng: &mut impl Rng,
    ) -> Option<Vec2> {
        let go_bank = self.bank_chance > 0.0
            && cache.backboard.is_valid()
            && rng.gen_range(0.0..=1.0) < self.bank_chance;
        let drag = if go_bank {
            drag_for_solution(&cache.backboard, shooting)
        } else {
            perfect_drag_for(cache, shooting)
        }?;

        if self.drag_noise <= 0.0 {
            return Some(drag);
        }
        Some(drag * (1.0 + rng.gen_range(-self.drag_noise..=self.drag_noise)))
    }
}

/// Swipe that reproduces the perfect-basket speed under the configured mapping
pub fn perfect_drag_for(cache: &TrajectoryCache, shooting: &ShootingSettings) -> Option<Vec2> {
    drag_for_solution(&cache.basket, shooting)
}

fn drag_for_solution(solution: &LaunchSolution, shooting: &ShootingSettings) -> Option<Vec2> {
    if !solution.is_valid() {
        return None;
    }
    let drag = drag_for_speed(
        solution.speed,
        shooting.force_multiplier,
        shooting.vertical_multiplier,
    );
    (drag != Vec2::ZERO).then_some(drag)
}

/// Queue a swipe for every scripted ball that has been armed long enough
pub fn drive_scripted_shooters(
    time: Res<Time>,
    settings: Res<GameSettings>,
    manager: Res<GameManager>,
    mut queue: ResMut<GestureQueue>,
    mut shooters: Query<(&mut ScriptedShooter, &ShotPipeline)>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();
    let mut rng = rand::thread_rng();

    for (mut shooter, pipeline) in &mut shooters {
        if !pipeline.can_shoot() {
            shooter.phase = ShooterPhase::Waiting;
            continue;
        }

        match shooter.phase {
            ShooterPhase::Waiting => {
                let (min, max) = (shooter.think_min, shooter.think_max.max(shooter.think_min));
                shooter.phase = ShooterPhase::Thinking(rng.gen_range(min..=max));
            }
            ShooterPhase::Thinking(remaining) => {
                let remaining = remaining - dt;
                if remaining > 0.0 || manager.game_state() != GameState::Gameplay {
                    shooter.phase = ShooterPhase::Thinking(remaining);
                    continue;
                }
                let Some(drag) = shooter.choose_drag(&pipeline.cache, &settings.shooting, &mut rng)
                else {
                    // Nothing reachable from here; wait for the next reset
                    shooter.phase = ShooterPhase::Fired;
                    continue;
                };
                trace!("{} scripted swipe {:?}", pipeline.owner, drag);
                queue.push_swipe(
                    pipeline.owner,
                    Vec2::ZERO,
                    drag,
                    now,
                    now + AI_SWIPE_DURATION,
                );
                shooter.phase = ShooterPhase::Fired;
            }
            ShooterPhase::Fired => {}
        }
    }
}
