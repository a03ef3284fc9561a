//! Spawn point selection for ball resets

use bevy::prelude::*;
use rand::Rng;

use crate::constants::MAX_SPAWN_ATTEMPTS;

/// Picks a spawn point for a player, avoiding the player's own previous point
/// and the opponent's current one.
#[derive(Debug, Clone)]
pub struct SpawnCoordinator {
    pub points: Vec<Vec3>,
    pub max_attempts: usize,
}

impl SpawnCoordinator {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points,
            max_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Uniform choice with bounded retries. Returns `None` only when no
    /// points are configured.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        current: Option<usize>,
        other: Option<usize>,
        rng: &mut R,
    ) -> Option<usize> {
        let len = self.points.len();
        if len == 0 {
            return None;
        }
        if len == 1 {
            return Some(0);
        }

        let mut candidate = 0;
        for _ in 0..self.max_attempts.max(1) {
            candidate = rng.gen_range(0..len);
            if Some(candidate) != current && Some(candidate) != other {
                return Some(candidate);
            }
        }

        // Never share a point with the opponent; repeating our own is acceptable
        let fallback = (0..len).find(|i| Some(*i) != other).unwrap_or(candidate);
        warn!(
            "No fresh spawn point after {} attempts, falling back to {}",
            self.max_attempts, fallback
        );
        Some(fallback)
    }
}
