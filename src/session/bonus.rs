//! Backboard bonus: weighted table and the timed window it lights

use serde::{Deserialize, Serialize};

/// One row of the bonus table. `probability` is a percentage weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusEntry {
    pub points: u32,
    pub probability: f32,
}

/// Weighted bonus table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BonusTable(pub Vec<BonusEntry>);

impl BonusTable {
    /// Pick the first entry whose cumulative probability reaches `draw`.
    /// Entries with no probability are never picked. A draw above the table
    /// total selects nothing.
    pub fn select(&self, draw: f32) -> Option<BonusEntry> {
        let mut cumulative = 0.0;
        for entry in self.0.iter().filter(|e| e.probability > 0.0) {
            cumulative += entry.probability;
            if cumulative >= draw {
                return Some(*entry);
            }
        }
        None
    }

    pub fn total(&self) -> f32 {
        self.0.iter().map(|e| e.probability.max(0.0)).sum()
    }
}

/// Shared backboard bonus state. `points == 0` means inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BackboardBonusWindow {
    pub points: u32,
    /// Seconds until the lit bonus expires
    pub remaining: u32,
    /// Timer value at or below which the next bonus is drawn
    pub next_spawn_at: f32,
}

impl BackboardBonusWindow {
    pub fn is_active(&self) -> bool {
        self.points > 0
    }

    pub fn activate(&mut self, entry: BonusEntry, duration: u32) {
        self.points = entry.points;
        self.remaining = duration;
    }

    /// Turn the bonus off. Returns true if it was lit.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.is_active();
        self.points = 0;
        self.remaining = 0;
        was_active
    }

    /// One second elapsed. Returns true when the bonus just expired.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.points = 0;
            return true;
        }
        false
    }

    /// Whether the countdown has crossed the spawn threshold with nothing lit
    pub fn is_due(&self, timer: u32) -> bool {
        !self.is_active() && timer as f32 <= self.next_spawn_at
    }
}
