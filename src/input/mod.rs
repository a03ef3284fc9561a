//! Input module - gesture queue and validity filter
//!
//! The platform input layer (touch, mouse) and the scripted opponent push raw
//! gesture samples into `GestureQueue`. `GestureTracker` turns them into drag
//! deltas and silently drops swipes that are too short or too slow.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::events::PlayerId;
use crate::settings::ShootingSettings;

/// Raw gesture sample in screen space, with a timestamp in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start { position: Vec2, time: f32 },
    Update { position: Vec2, time: f32 },
    End { position: Vec2, time: f32 },
}

/// What the shot pipeline receives from a tracked gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutput {
    /// Live drag delta (current - start)
    Dragged(Vec2),
    /// Completed, valid swipe delta (end - start)
    Ended(Vec2),
}

/// Gesture samples waiting to be processed this frame
#[derive(Resource, Default)]
pub struct GestureQueue {
    pending: Vec<(PlayerId, GestureEvent)>,
}

impl GestureQueue {
    pub fn push(&mut self, player: PlayerId, event: GestureEvent) {
        self.pending.push((player, event));
    }

    /// Queue a complete swipe from `start` to `end`
    pub fn push_swipe(&mut self, player: PlayerId, start: Vec2, end: Vec2, t0: f32, t1: f32) {
        self.push(player, GestureEvent::Start { position: start, time: t0 });
        self.push(player, GestureEvent::End { position: end, time: t1 });
    }

    pub fn drain(&mut self) -> Vec<(PlayerId, GestureEvent)> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Tracks one in-progress gesture
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureTracker {
    start: Option<(Vec2, f32)>,
}

impl GestureTracker {
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Feed one sample. Invalid or out-of-order samples produce nothing.
    pub fn handle(&mut self, event: GestureEvent, shooting: &ShootingSettings) -> Option<GestureOutput> {
        match event {
            GestureEvent::Start { position, time } => {
                self.start = Some((position, time));
                None
            }
            GestureEvent::Update { position, .. } => {
                let (start, _) = self.start?;
                Some(GestureOutput::Dragged(position - start))
            }
            GestureEvent::End { position, time } => {
                let (start, started_at) = self.start.take()?;
                let delta = position - start;
                let duration = time - started_at;

                if delta.length() < shooting.gesture_min_distance {
                    trace!("Gesture dropped: {:.1}px is too short", delta.length());
                    return None;
                }
                if duration > shooting.gesture_max_duration || duration < 0.0 {
                    trace!("Gesture dropped: {:.2}s is out of range", duration);
                    return None;
                }
                Some(GestureOutput::Ended(delta))
            }
        }
    }
}

/// One tracker per player
#[derive(Resource, Default)]
pub struct GestureTrackers(pub HashMap<PlayerId, GestureTracker>);

impl GestureTrackers {
    pub fn handle(
        &mut self,
        player: PlayerId,
        event: GestureEvent,
        shooting: &ShootingSettings,
    ) -> Option<GestureOutput> {
        self.0.entry(player).or_default().handle(event, shooting)
    }
}
