//! Swipe-to-velocity mapping
//!
//! Direction is always basket-ward; the swipe only controls power (its length)
//! and arc height (its vertical component).

use bevy::prelude::*;

/// Convert a 2D drag into a 3D launch velocity.
/// The result is clamped to `max_speed` when `max_speed > 0`.
pub fn gesture_to_velocity(
    drag: Vec2,
    ball_position: Vec3,
    basket: Vec3,
    force_multiplier: f32,
    vertical_multiplier: f32,
    max_speed: f32,
) -> Vec3 {
    let to_basket = basket - ball_position;
    let direction = Vec3::new(to_basket.x, 0.0, to_basket.z).normalize_or_zero();

    let horizontal = direction * drag.length() * force_multiplier;
    let vertical = Vec3::Y * drag.y * vertical_multiplier;
    let velocity = horizontal + vertical;

    if max_speed > 0.0 {
        velocity.clamp_length_max(max_speed)
    } else {
        velocity
    }
}

/// Straight-up swipe whose launch speed equals `speed` under the mapping above
pub fn drag_for_speed(speed: f32, force_multiplier: f32, vertical_multiplier: f32) -> Vec2 {
    let gain = force_multiplier.hypot(vertical_multiplier);
    if gain <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(0.0, speed / gain)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASKET: Vec3 = Vec3::new(0.0, 3.0, 6.0);

    #[test]
    fn test_direction_is_always_basketward() {
        let ball = Vec3::new(0.0, 1.8, 0.0);
        // Swipe to the left still goes toward the basket (+Z)
        let v = gesture_to_velocity(Vec2::new(-200.0, 0.0), ball, BASKET, 0.02, 0.02, 0.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.z - 4.0).abs() < 1e-5);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_vertical_component_adds_arc() {
        let ball = Vec3::new(0.0, 1.8, 0.0);
        let v = gesture_to_velocity(Vec2::new(0.0, 300.0), ball, BASKET, 0.02, 0.01, 0.0);
        assert!((v.z - 6.0).abs() < 1e-5);
        assert!((v.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_clamped_to_max_speed() {
        let ball = Vec3::new(0.0, 1.8, 0.0);
        let v = gesture_to_velocity(Vec2::new(0.0, 5000.0), ball, BASKET, 0.02, 0.02, 10.0);
        assert!((v.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_ball_under_basket_has_no_horizontal_component() {
        let ball = Vec3::new(0.0, 1.0, 6.0);
        let v = gesture_to_velocity(Vec2::new(100.0, 100.0), ball, BASKET, 0.02, 0.02, 0.0);
        assert!(v.is_finite());
        assert_eq!(Vec2::new(v.x, v.z), Vec2::ZERO);
    }

    #[test]
    fn test_drag_for_speed_inverts_mapping() {
        let drag = drag_for_speed(8.0, 0.02, 0.015);
        let ball = Vec3::new(1.0, 1.8, 0.0);
        let v = gesture_to_velocity(drag, ball, BASKET, 0.02, 0.015, 0.0);
        assert!((v.length() - 8.0).abs() < 1e-4);
    }
}
