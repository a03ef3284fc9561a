//! Accuracy classification against the cached perfect trajectories

use bevy::prelude::*;

use crate::events::ShotClassification;
use crate::shooting::TrajectoryCache;

/// Percent error of `attempt` relative to `perfect`.
/// `None` when the perfect speed is the zero sentinel (no classification possible).
pub fn percent_error(attempt: f32, perfect: f32) -> Option<f32> {
    if perfect <= 0.0 || !perfect.is_finite() {
        return None;
    }
    Some((attempt - perfect).abs() / perfect * 100.0)
}

/// Speed normalised against `max_speed`, 0-100
pub fn speed_percentage(speed: f32, max_speed: f32) -> f32 {
    if max_speed <= 0.0 || !max_speed.is_finite() {
        return 0.0;
    }
    (speed / max_speed * 100.0).clamp(0.0, 100.0)
}

/// Outcome of classifying one attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub result: ShotClassification,
    pub basket_error: Option<f32>,
    pub backboard_error: Option<f32>,
}

/// Classify an attempt speed. Priority:
/// 1. both within threshold -> smaller error wins (ties go to the basket)
/// 2. only basket within threshold -> basket
/// 3. only backboard within threshold -> backboard
/// 4. otherwise imperfect
pub fn classify_shot(attempt_speed: f32, cache: &TrajectoryCache, threshold: f32) -> Classification {
    let basket_error = percent_error(attempt_speed, cache.basket.speed);
    let backboard_error = percent_error(attempt_speed, cache.backboard.speed);

    let within = |error: Option<f32>| error.filter(|e| *e < threshold);

    let result = match (within(basket_error), within(backboard_error)) {
        (Some(basket), Some(backboard)) => {
            if backboard < basket {
                ShotClassification::PerfectBackboard
            } else {
                ShotClassification::PerfectBasket
            }
        }
        (Some(_), None) => ShotClassification::PerfectBasket,
        (None, Some(_)) => ShotClassification::PerfectBackboard,
        (None, None) => ShotClassification::Imperfect,
    };

    Classification {
        result,
        basket_error,
        backboard_error,
    }
}

/// Velocity actually applied for a classification
pub fn chosen_velocity(
    classification: ShotClassification,
    attempted: Vec3,
    cache: &TrajectoryCache,
) -> Vec3 {
    match classification {
        ShotClassification::PerfectBasket => cache.basket.velocity,
        ShotClassification::PerfectBackboard => cache.backboard.velocity,
        ShotClassification::Imperfect => attempted,
    }
}
