//! Ball physics systems

use bevy::prelude::*;

use crate::ball::components::*;
use crate::settings::GameSettings;

/// Integrate gravity, position and spin for every non-kinematic ball
pub fn integrate_ball_bodies(
    settings: Res<GameSettings>,
    time: Res<Time>,
    mut query: Query<(&mut Transform, &mut BallBody), With<Ball>>,
) {
    // Use minimum dt for headless mode compatibility
    let dt = time.delta_secs().max(1.0 / 60.0);

    for (mut transform, mut body) in &mut query {
        step_body(&mut transform, &mut body, settings.shooting.gravity, dt);
    }
}

/// Advance one body by `dt` seconds. Free flight is integrated exactly
/// so launched balls follow the solver's parabola.
pub fn step_body(transform: &mut Transform, body: &mut BallBody, gravity: f32, dt: f32) {
    if body.kinematic {
        return;
    }

    let accel = Vec3::Y * gravity;
    transform.translation += body.velocity * dt + accel * (0.5 * dt * dt);
    body.velocity += accel * dt;

    let spin = body.angular_velocity * dt;
    if spin != Vec3::ZERO {
        transform.rotation = Quat::from_scaled_axis(spin) * transform.rotation;
    }
}
