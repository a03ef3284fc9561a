//! Closed-form launch velocity solver
//!
//! Inverts projectile motion: given a start point, a target and a launch angle,
//! returns the exact velocity that passes through the target under `gravity`.
//! Every "perfect shot" comparison in the pipeline trusts this function.

use bevy::prelude::*;

/// Below this planar distance the target counts as directly above/below
const HORIZONTAL_EPSILON: f32 = 1e-4;

/// A solved launch, cached per ball
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaunchSolution {
    pub velocity: Vec3,
    /// Magnitude of `velocity`; 0 marks an invalid (unsolved) entry
    pub speed: f32,
    pub angle_degrees: f32,
}

impl LaunchSolution {
    /// Solve and wrap. Unreachable targets yield the zero-speed sentinel.
    pub fn solve(origin: Vec3, target: Vec3, angle_degrees: f32, gravity: f32) -> Self {
        let velocity =
            solve_launch_velocity(origin, target, angle_degrees, gravity).unwrap_or(Vec3::ZERO);
        Self {
            velocity,
            speed: velocity.length(),
            angle_degrees,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.speed > 0.0
    }
}

/// Calculate the launch velocity that hits `target` from `origin` at the given
/// elevation angle. Returns `None` when the target is unreachable at that angle.
///
/// Uses vH² = (0.5 · g · x²) / (y − x · tan θ), where x is the planar distance and
/// y the vertical delta. With g < 0 a real solution needs a negative denominator.
pub fn solve_launch_velocity(
    origin: Vec3,
    target: Vec3,
    launch_angle_degrees: f32,
    gravity: f32,
) -> Option<Vec3> {
    if !(gravity < 0.0) || !gravity.is_finite() {
        return None;
    }

    let delta = target - origin;
    let planar = Vec3::new(delta.x, 0.0, delta.z);
    let x = planar.length();
    let y = delta.y;

    let tan_theta = launch_angle_degrees.to_radians().tan();
    if !tan_theta.is_finite() || !x.is_finite() || !y.is_finite() {
        return None;
    }

    // Straight above/below: no horizontal component, denominator collapses to y
    if x < HORIZONTAL_EPSILON {
        return if y < 0.0 { Some(Vec3::ZERO) } else { None };
    }

    let denominator = y - x * tan_theta;
    if denominator >= 0.0 {
        return None;
    }

    let vh_sq = (0.5 * gravity * x * x) / denominator;
    if !vh_sq.is_finite() || vh_sq < 0.0 {
        return None;
    }

    let vh = vh_sq.sqrt();
    let vy = vh * tan_theta;
    let velocity = planar / x * vh + Vec3::Y * vy;

    velocity.is_finite().then_some(velocity)
}

/// Time for `velocity` to cover `horizontal_distance` on the ground plane
pub fn flight_time(velocity: Vec3, horizontal_distance: f32) -> Option<f32> {
    let planar_speed = Vec2::new(velocity.x, velocity.z).length();
    if planar_speed <= f32::EPSILON {
        return None;
    }
    Some(horizontal_distance / planar_speed)
}

/// Ballistic position after `t` seconds (no drag)
pub fn position_at(origin: Vec3, velocity: Vec3, gravity: f32, t: f32) -> Vec3 {
    origin + velocity * t + Vec3::Y * (0.5 * gravity * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f32 = -9.81;

    fn planar_distance(a: Vec3, b: Vec3) -> f32 {
        Vec2::new(b.x - a.x, b.z - a.z).length()
    }

    #[test]
    fn test_round_trip_lands_on_target() {
        let cases = [
            (Vec3::new(0.0, 1.8, 1.5), Vec3::new(0.0, 3.05, 6.0), 50.0),
            (Vec3::new(-3.0, 1.8, 3.5), Vec3::new(0.0, 3.05, 6.0), 55.0),
            (Vec3::new(2.0, 1.8, 2.0), Vec3::new(0.0, 3.55, 6.45), 60.0),
            (Vec3::new(0.0, 5.0, 0.0), Vec3::new(4.0, 0.0, 3.0), 10.0),
        ];

        for (origin, target, angle) in cases {
            let velocity = solve_launch_velocity(origin, target, angle, G)
                .unwrap_or_else(|| panic!("Expected solution for {:?} -> {:?}", origin, target));
            let t = flight_time(velocity, planar_distance(origin, target)).unwrap();
            let landed = position_at(origin, velocity, G, t);
            assert!(
                landed.distance(target) < 1e-3,
                "Landed at {:?}, expected {:?}",
                landed,
                target
            );
        }
    }

    #[test]
    fn test_velocity_matches_launch_angle() {
        let velocity =
            solve_launch_velocity(Vec3::ZERO, Vec3::new(5.0, 1.0, 0.0), 45.0, G).unwrap();
        let elevation = velocity.y.atan2(velocity.x).to_degrees();
        assert!((elevation - 45.0).abs() < 1e-3, "elevation {}", elevation);
    }

    #[test]
    fn test_unreachability_is_monotonic_in_height() {
        // x = 4, θ = 45° -> threshold at y = 4
        let origin = Vec3::ZERO;
        let mut seen_unreachable = false;
        let mut transitions = 0;

        for step in 0..40 {
            let y = step as f32 * 0.25;
            let found = solve_launch_velocity(origin, Vec3::new(4.0, y, 0.0), 45.0, G).is_some();
            if !found && !seen_unreachable {
                seen_unreachable = true;
                transitions += 1;
            }
            assert!(
                !(seen_unreachable && found),
                "Target became reachable again at y = {}",
                y
            );
        }
        assert_eq!(transitions, 1);
        assert!(solve_launch_velocity(origin, Vec3::new(4.0, 3.9, 0.0), 45.0, G).is_some());
        assert!(solve_launch_velocity(origin, Vec3::new(4.0, 4.1, 0.0), 45.0, G).is_none());
    }

    #[test]
    fn test_directly_above_is_unreachable() {
        let result = solve_launch_velocity(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), 60.0, G);
        assert!(result.is_none());
    }

    #[test]
    fn test_directly_below_is_a_drop() {
        let result = solve_launch_velocity(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, 60.0, G);
        assert_eq!(result, Some(Vec3::ZERO));
    }

    #[test]
    fn test_non_negative_gravity_fails_gracefully() {
        let target = Vec3::new(4.0, 1.0, 0.0);
        assert!(solve_launch_velocity(Vec3::ZERO, target, 45.0, 0.0).is_none());
        assert!(solve_launch_velocity(Vec3::ZERO, target, 45.0, 9.81).is_none());
        assert!(solve_launch_velocity(Vec3::ZERO, target, 45.0, f32::NAN).is_none());
    }

    #[test]
    fn test_vertical_angle_never_returns_nan() {
        let result = solve_launch_velocity(Vec3::ZERO, Vec3::new(4.0, 1.0, 0.0), 90.0, G);
        if let Some(v) = result {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_invalid_solution_is_zero_sentinel() {
        let solution = LaunchSolution::solve(Vec3::ZERO, Vec3::new(1.0, 10.0, 0.0), 30.0, G);
        assert!(!solution.is_valid());
        assert_eq!(solution.velocity, Vec3::ZERO);
        assert_eq!(solution.speed, 0.0);
    }
}
