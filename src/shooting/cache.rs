//! Per-ball cache of perfect trajectories, recomputed on every reset

use bevy::prelude::*;

use crate::settings::ShootingSettings;
use crate::shooting::LaunchSolution;

/// World-space aim points for one hoop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotTargets {
    /// Rim centre
    pub basket: Vec3,
    pub backboard_center: Vec3,
    /// Upper marker on the glass (bank shots aim at the midpoint when present)
    pub backboard_max_range: Option<Vec3>,
    /// Farthest reachable point, normalises power percentages
    pub max_range: Option<Vec3>,
}

impl ShotTargets {
    /// Point the bank shot aims at
    pub fn backboard_aim(&self) -> Vec3 {
        match self.backboard_max_range {
            Some(max) => self.backboard_center.lerp(max, 0.5),
            None => self.backboard_center,
        }
    }
}

/// Perfect trajectories from the current spawn point.
/// Zero speeds are the "invalid" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrajectoryCache {
    pub basket: LaunchSolution,
    pub backboard: LaunchSolution,
    /// Normalisation constant for power percentages
    pub max_speed: f32,
}

impl TrajectoryCache {
    /// Solve both perfect shots from `origin`. Unreachable targets are logged
    /// and cached as zero; the other trajectory keeps working.
    pub fn compute(origin: Vec3, targets: &ShotTargets, shooting: &ShootingSettings) -> Self {
        let gravity = shooting.gravity;

        let basket = LaunchSolution::solve(origin, targets.basket, shooting.basket_angle, gravity);
        if !basket.is_valid() {
            warn!(
                "No basket trajectory from {:?} at {}°",
                origin, shooting.basket_angle
            );
        }

        let backboard = LaunchSolution::solve(
            origin,
            targets.backboard_aim(),
            shooting.backboard_angle,
            gravity,
        );
        if !backboard.is_valid() {
            warn!(
                "No backboard trajectory from {:?} at {}°",
                origin, shooting.backboard_angle
            );
        }

        let fallback = basket.speed.max(backboard.speed) * shooting.max_speed_factor;
        let max_speed = targets
            .max_range
            .map(|target| LaunchSolution::solve(origin, target, shooting.backboard_angle, gravity))
            .filter(LaunchSolution::is_valid)
            .map(|solution| solution.speed)
            .unwrap_or(fallback);

        Self {
            basket,
            backboard,
            max_speed,
        }
    }

    /// True when at least one perfect trajectory exists
    pub fn has_any_solution(&self) -> bool {
        self.basket.is_valid() || self.backboard.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameSettings;

    #[test]
    fn test_compute_from_default_spawn() {
        let settings = GameSettings::default();
        let targets = settings.shot_targets();
        let origin = settings.spawn_positions()[0];

        let cache = TrajectoryCache::compute(origin, &targets, &settings.shooting);
        assert!(cache.basket.is_valid());
        assert!(cache.backboard.is_valid());
        let larger = cache.basket.speed.max(cache.backboard.speed);
        assert!((cache.max_speed - larger * 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_backboard_aims_at_midpoint() {
        let targets = ShotTargets {
            basket: Vec3::ZERO,
            backboard_center: Vec3::new(0.0, 3.0, 6.0),
            backboard_max_range: Some(Vec3::new(0.0, 4.0, 6.0)),
            max_range: None,
        };
        assert_eq!(targets.backboard_aim(), Vec3::new(0.0, 3.5, 6.0));
    }

    #[test]
    fn test_max_range_target_overrides_factor() {
        let settings = GameSettings::default();
        let mut targets = settings.shot_targets();
        targets.max_range = Some(Vec3::new(0.0, 0.0, 15.0));
        let origin = settings.spawn_positions()[0];

        let cache = TrajectoryCache::compute(origin, &targets, &settings.shooting);
        let expected = LaunchSolution::solve(
            origin,
            Vec3::new(0.0, 0.0, 15.0),
            settings.shooting.backboard_angle,
            settings.shooting.gravity,
        );
        assert!((cache.max_speed - expected.speed).abs() < 1e-5);
    }

    #[test]
    fn test_unreachable_targets_degrade_to_zero() {
        let settings = GameSettings::default();
        let targets = ShotTargets {
            basket: Vec3::new(0.0, 100.0, 0.5),
            backboard_center: Vec3::new(0.0, 100.0, 0.5),
            backboard_max_range: None,
            max_range: None,
        };
        let cache = TrajectoryCache::compute(Vec3::ZERO, &targets, &settings.shooting);
        assert!(!cache.has_any_solution());
        assert_eq!(cache.max_speed, 0.0);
    }
}
