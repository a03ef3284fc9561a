//! Shooting systems: gestures in, launches out, re-arm on reset

use bevy::prelude::*;

use crate::ball::{BallBody, BallContactState, ContactTracker};
use crate::events::{EventBus, GameEvent, PendingReset};
use crate::input::{GestureOutput, GestureQueue, GestureTrackers};
use crate::session::GameManager;
use crate::settings::GameSettings;
use crate::shooting::{ShotPipeline, launch_ball};

/// Feed queued gesture samples through the trackers and into each player's pipeline.
/// A completed swipe launches the ball.
pub fn process_gestures(
    settings: Res<GameSettings>,
    manager: Res<GameManager>,
    mut queue: ResMut<GestureQueue>,
    mut trackers: ResMut<GestureTrackers>,
    mut bus: ResMut<EventBus>,
    mut balls: Query<(&Transform, &mut ShotPipeline, &mut BallBody)>,
) {
    let targets = settings.shot_targets();
    let shooting = &settings.shooting;
    let mut rng = rand::thread_rng();

    for (player, gesture) in queue.drain() {
        let Some(output) = trackers.handle(player, gesture, shooting) else {
            continue;
        };
        let Some((transform, mut pipeline, mut body)) =
            balls.iter_mut().find(|(_, pipeline, _)| pipeline.owner == player)
        else {
            continue;
        };

        match output {
            GestureOutput::Dragged(drag) => {
                if let Some(event) =
                    pipeline.on_drag_update(drag, transform.translation, &targets, shooting)
                {
                    bus.emit(event);
                }
            }
            GestureOutput::Ended(drag) => {
                let Some(attempt) = pipeline.on_gesture_end(
                    drag,
                    manager.game_state(),
                    transform.translation,
                    &targets,
                    shooting,
                ) else {
                    continue;
                };

                let launched = launch_ball(&mut body, &attempt, shooting.spin_impulse, &mut rng);
                bus.emit_all([
                    GameEvent::ShotPower {
                        player,
                        percent: attempt.power_percent,
                    },
                    launched,
                ]);
            }
        }
    }
}

/// Move each ball to its new spawn point and re-arm its pipeline
/// when the session publishes a `PositionReset` for its owner.
pub fn arm_pipelines_on_reset(
    settings: Res<GameSettings>,
    mut bus: ResMut<EventBus>,
    mut balls: Query<(
        &mut Transform,
        &mut ShotPipeline,
        &mut BallBody,
        &mut BallContactState,
        &mut ContactTracker,
    )>,
) {
    let resets = bus.take_resets();
    if resets.is_empty() {
        return;
    }

    let targets = settings.shot_targets();
    let mut hints = Vec::new();
    for PendingReset { player, position } in resets {
        for (mut transform, mut pipeline, mut body, mut contact, mut tracker) in &mut balls {
            let Some(hint) = pipeline.on_reset(position, player, &targets, &settings.shooting) else {
                continue;
            };
            transform.translation = position;
            transform.rotation = Quat::IDENTITY;
            body.freeze();
            contact.clear();
            *tracker = ContactTracker {
                previous: position,
                ..default()
            };
            hints.push(hint);
        }
    }
    bus.emit_all(hints);
}
