//! Ball launch: applies the chosen velocity to the body

use bevy::prelude::*;
use rand::Rng;

use crate::ball::BallBody;
use crate::events::GameEvent;
use crate::shooting::ShotAttempt;

/// Release the ball with the attempt's chosen velocity.
///
/// The velocity is assigned directly (not as an impulse) so a snapped shot
/// reproduces the solver output exactly. Spin is cosmetic.
pub fn launch_ball(
    body: &mut BallBody,
    attempt: &ShotAttempt,
    spin_impulse: f32,
    rng: &mut impl Rng,
) -> GameEvent {
    body.velocity = Vec3::ZERO;
    body.angular_velocity = Vec3::ZERO;
    body.kinematic = false;

    body.velocity = attempt.chosen;
    if spin_impulse > 0.0 {
        body.angular_velocity += Vec3::new(
            rng.gen_range(-spin_impulse..=spin_impulse),
            rng.gen_range(-spin_impulse..=spin_impulse),
            rng.gen_range(-spin_impulse..=spin_impulse),
        );
    }

    GameEvent::BallLaunched {
        player: attempt.player,
        velocity: attempt.chosen.into(),
        classification: attempt.classification,
    }
}
