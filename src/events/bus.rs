//! Event Bus - the outbound notification channel of the core
//!
//! Operations publish `GameEvent`s once their mutation is complete. The
//! general stream is drained each frame by `log_bus_events` for whatever
//! presents the game. Ball placements also land on a separate reset queue
//! that only the shooting systems consume, so a reset published late in a
//! frame is still delivered on the next one.

use bevy::prelude::*;

use super::types::{GameEvent, PlayerId};

/// Published event with its timestamp
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Milliseconds since app start
    pub time_ms: u32,
    pub event: GameEvent,
}

/// A ball placement the shooting systems still have to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingReset {
    pub player: PlayerId,
    pub position: Vec3,
}

#[derive(Resource, Default)]
pub struct EventBus {
    pending: Vec<BusEvent>,
    resets: Vec<PendingReset>,
    /// Everything drained so far, when the owner asked for it
    history: Option<Vec<BusEvent>>,
    now_ms: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus that keeps every drained event, for match summaries and tests
    pub fn with_history() -> Self {
        Self {
            history: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.now_ms = (elapsed_secs * 1000.0) as u32;
    }

    pub fn emit(&mut self, event: GameEvent) {
        if let GameEvent::PositionReset {
            player, position, ..
        } = &event
        {
            self.resets.push(PendingReset {
                player: *player,
                position: Vec3::from(*position),
            });
        }
        self.pending.push(BusEvent {
            time_ms: self.now_ms,
            event,
        });
    }

    /// Publish in order
    pub fn emit_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    /// Take everything published since the last drain
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        if let Some(history) = &mut self.history {
            history.extend(events.iter().cloned());
        }
        events
    }

    /// Take the placements not yet applied to a ball. Not affected by `drain`.
    pub fn take_resets(&mut self) -> Vec<PendingReset> {
        std::mem::take(&mut self.resets)
    }

    /// Drained events, oldest first. Empty unless built `with_history`.
    pub fn processed(&self) -> &[BusEvent] {
        self.history.as_deref().unwrap_or_default()
    }
}

/// Stamp this frame's events with the app clock
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}
