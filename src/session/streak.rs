//! Consecutive-basket streak and the power-up window it unlocks

/// Running power-up, counted down once per session second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpWindow {
    pub remaining: u32,
}

/// Outcome of counting a basket towards the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakChange {
    /// Streak after the update (0 when the power-up fired)
    pub current: u32,
    /// True when this basket reached the threshold
    pub activated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStreakState {
    pub streak: u32,
    pub power_up: Option<PowerUpWindow>,
}

impl PlayerStreakState {
    pub fn is_powered(&self) -> bool {
        self.power_up.is_some()
    }

    /// Count a basket. Returns `None` while the power-up is running,
    /// since baskets during the window neither extend nor re-trigger it.
    pub fn record_basket(&mut self, threshold: u32, power_up_duration: u32) -> Option<StreakChange> {
        if self.is_powered() {
            return None;
        }

        self.streak += 1;
        if self.streak >= threshold.max(1) {
            self.streak = 0;
            // Replaces any previous window rather than stacking
            self.power_up = Some(PowerUpWindow {
                remaining: power_up_duration,
            });
            return Some(StreakChange {
                current: 0,
                activated: true,
            });
        }

        Some(StreakChange {
            current: self.streak,
            activated: false,
        })
    }

    /// A miss. Breaks the streak unless the power-up protects it.
    /// Returns true if the streak changed.
    pub fn record_miss(&mut self) -> bool {
        if self.is_powered() || self.streak == 0 {
            return false;
        }
        self.streak = 0;
        true
    }

    /// One second elapsed. Returns true when the power-up just expired.
    pub fn tick(&mut self) -> bool {
        let Some(window) = self.power_up.as_mut() else {
            return false;
        };
        window.remaining = window.remaining.saturating_sub(1);
        if window.remaining == 0 {
            self.power_up = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_activates_once() {
        let mut state = PlayerStreakState::default();
        for i in 1..5 {
            let change = state.record_basket(5, 10).unwrap();
            assert_eq!(change.current, i);
            assert!(!change.activated);
        }
        let change = state.record_basket(5, 10).unwrap();
        assert!(change.activated);
        assert_eq!(state.streak, 0);
        assert_eq!(state.power_up, Some(PowerUpWindow { remaining: 10 }));

        // Sixth basket during the window is ignored
        assert_eq!(state.record_basket(5, 10), None);
        assert_eq!(state.streak, 0);
        assert_eq!(state.power_up, Some(PowerUpWindow { remaining: 10 }));
    }

    #[test]
    fn test_miss_protected_by_power_up() {
        let mut state = PlayerStreakState {
            streak: 3,
            power_up: Some(PowerUpWindow { remaining: 4 }),
        };
        assert!(!state.record_miss());
        assert_eq!(state.streak, 3);

        state.power_up = None;
        assert!(state.record_miss());
        assert_eq!(state.streak, 0);
    }

    #[test]
    fn test_tick_expires_window() {
        let mut state = PlayerStreakState {
            streak: 0,
            power_up: Some(PowerUpWindow { remaining: 2 }),
        };
        assert!(!state.tick());
        assert!(state.tick());
        assert!(!state.is_powered());
        assert!(!state.tick());
    }
}
