//! Court geometry and the contact layer
//!
//! A minimal axis-aligned stand-in for a physics engine: ground plane, a thin
//! rim hoop, a backboard box and two basket trigger planes. It bounces balls
//! off the static pieces and reports what they touched into `ContactQueue`.

use bevy::prelude::*;

use crate::ball::{Ball, BallBody, ContactEvent, ContactQueue, ContactTracker};
use crate::constants::RING_TUBE_RADIUS;
use crate::settings::CourtSettings;

/// Static hoop geometry
#[derive(Resource, Debug, Clone)]
pub struct Court {
    pub rim_center: Vec3,
    pub rim_radius: f32,
    pub backboard_center: Vec3,
    pub backboard_half_extents: Vec3,
    pub ball_radius: f32,
    pub ground_y: f32,
    pub ground_restitution: f32,
    pub board_restitution: f32,
    pub trigger_depth: f32,
}

impl Court {
    pub fn from_settings(court: &CourtSettings) -> Self {
        Self {
            rim_center: Vec3::from_array(court.rim_center),
            rim_radius: court.rim_radius,
            backboard_center: Vec3::from_array(court.backboard_center),
            backboard_half_extents: Vec3::from_array(court.backboard_half_extents),
            ball_radius: court.ball_radius,
            ground_y: court.ground_y,
            ground_restitution: court.ground_restitution,
            board_restitution: court.board_restitution,
            trigger_depth: court.trigger_depth,
        }
    }

    /// Ball centre is inside the hoop opening (horizontally)
    pub fn within_rim(&self, position: Vec3) -> bool {
        let offset = position - self.rim_center;
        Vec2::new(offset.x, offset.z).length() < self.rim_radius
    }

    /// Bounce the ball off the court and report contacts for this step.
    /// `tracker.previous` must hold the position before integration.
    pub fn resolve(
        &self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        tracker: &mut ContactTracker,
    ) -> Vec<ContactEvent> {
        let mut events = Vec::new();
        let r = self.ball_radius;

        // Ground
        if position.y - r <= self.ground_y && velocity.y < 0.0 {
            position.y = self.ground_y + r;
            velocity.y = -velocity.y * self.ground_restitution;
            events.push(ContactEvent::Ground);
        }

        // Backboard box: push out along the axis of least overlap
        let diff = *position - self.backboard_center;
        let overlap = self.backboard_half_extents + Vec3::splat(r) - diff.abs();
        let touching_board = overlap.min_element() > 0.0;
        if touching_board {
            let axis = if overlap.x <= overlap.y && overlap.x <= overlap.z {
                Vec3::X
            } else if overlap.y <= overlap.z {
                Vec3::Y
            } else {
                Vec3::Z
            };
            let sign = if diff.dot(axis) >= 0.0 { 1.0 } else { -1.0 };
            let normal = axis * sign;
            *position += normal * overlap.dot(axis);
            let approach = velocity.dot(normal);
            if approach < 0.0 {
                *velocity -= normal * approach * (1.0 + self.board_restitution);
            }
            if !tracker.touching_backboard {
                events.push(ContactEvent::Backboard);
            }
        }
        tracker.touching_backboard = touching_board;

        // Rim hoop (torus with a thin tube)
        let offset = *position - self.rim_center;
        let radial = Vec3::new(offset.x, 0.0, offset.z).normalize_or_zero();
        let mut touching_ring = false;
        if radial != Vec3::ZERO {
            let nearest = self.rim_center + radial * self.rim_radius;
            let to_ball = *position - nearest;
            let reach = r + RING_TUBE_RADIUS;
            let distance = to_ball.length();
            if distance < reach && distance > f32::EPSILON {
                touching_ring = true;
                let normal = to_ball / distance;
                *position = nearest + normal * reach;
                let approach = velocity.dot(normal);
                if approach < 0.0 {
                    *velocity -= normal * approach * (1.0 + self.board_restitution);
                }
                if !tracker.touching_ring {
                    events.push(ContactEvent::Ring);
                }
            }
        }
        tracker.touching_ring = touching_ring;

        // Trigger planes, crossed downward inside the hoop
        let upper = self.rim_center.y + self.trigger_depth;
        let lower = self.rim_center.y - self.trigger_depth;
        if self.within_rim(*position) {
            if tracker.previous.y >= upper && position.y < upper {
                events.push(ContactEvent::UpperTrigger);
            }
            if tracker.previous.y >= lower && position.y < lower {
                events.push(ContactEvent::LowerTrigger);
            }
        }

        events
    }
}

/// Collide every moving ball with the court and queue the contacts
pub fn detect_court_contacts(
    court: Res<Court>,
    mut queue: ResMut<ContactQueue>,
    mut balls: Query<(Entity, &mut Transform, &mut BallBody, &mut ContactTracker), With<Ball>>,
) {
    for (entity, mut transform, mut body, mut tracker) in &mut balls {
        if !body.kinematic {
            let contacts = court.resolve(&mut transform.translation, &mut body.velocity, &mut tracker);
            for contact in contacts {
                queue.push(entity, contact);
            }
        }
        tracker.previous = transform.translation;
    }
}
