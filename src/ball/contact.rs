//! Contact interpretation: turns collision notifications into scoring calls

use bevy::prelude::*;

use crate::ball::{BallBody, BallContactState};
use crate::events::{EventBus, ScoreKind};
use crate::session::GameManager;
use crate::shooting::ShotPipeline;

/// Collision notification for one ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Ring,
    Backboard,
    /// Entered the trigger zone above the rim
    UpperTrigger,
    /// Entered the trigger zone below the rim
    LowerTrigger,
    Ground,
}

/// What a contact means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Scored(ScoreKind),
    OutOfPlay,
}

impl BallContactState {
    /// Fold one contact into the flags.
    /// `bonus_active` decides whether a glass-assisted basket pays the bonus.
    pub fn apply(&mut self, event: ContactEvent, bonus_active: bool) -> Option<ContactOutcome> {
        match event {
            ContactEvent::Ring => {
                self.touched_ring = true;
                None
            }
            ContactEvent::Backboard => {
                self.touched_backboard = true;
                None
            }
            ContactEvent::UpperTrigger => {
                self.passed_upper_trigger = true;
                None
            }
            ContactEvent::LowerTrigger => {
                // Bounce-outs re-enter from below without passing the upper zone
                if !self.passed_upper_trigger {
                    return None;
                }
                let kind = if self.touched_backboard && bonus_active {
                    ScoreKind::Backboard
                } else if self.touched_ring || self.touched_backboard {
                    ScoreKind::Standard
                } else {
                    ScoreKind::Perfect
                };
                self.clear();
                Some(ContactOutcome::Scored(kind))
            }
            ContactEvent::Ground => {
                if self.touched_ground {
                    self.clear();
                    Some(ContactOutcome::OutOfPlay)
                } else {
                    self.touched_ground = true;
                    None
                }
            }
        }
    }
}

/// Contacts reported by the collision layer since the last frame
#[derive(Resource, Default)]
pub struct ContactQueue {
    pending: Vec<(Entity, ContactEvent)>,
}

impl ContactQueue {
    pub fn push(&mut self, ball: Entity, event: ContactEvent) {
        self.pending.push((ball, event));
    }

    pub fn drain(&mut self) -> Vec<(Entity, ContactEvent)> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Route queued contacts into scoring and out-of-play calls
pub fn resolve_ball_contacts(
    mut queue: ResMut<ContactQueue>,
    mut manager: ResMut<GameManager>,
    mut bus: ResMut<EventBus>,
    mut balls: Query<(&ShotPipeline, &mut BallContactState, &mut BallBody)>,
) {
    for (entity, event) in queue.drain() {
        let Ok((pipeline, mut contact, mut body)) = balls.get_mut(entity) else {
            continue;
        };

        let bonus_active = manager.bonus().is_active();
        match contact.apply(event, bonus_active) {
            Some(ContactOutcome::Scored(kind)) => {
                trace!("{} ball scored {:?}", pipeline.owner, kind);
                manager.award(pipeline.owner, kind, &mut bus);
            }
            Some(ContactOutcome::OutOfPlay) => {
                trace!("{} ball out of play", pipeline.owner);
                body.freeze();
                manager.on_ball_out_of_play(pipeline.owner, &mut bus);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[ContactEvent], bonus_active: bool) -> Vec<ContactOutcome> {
        let mut state = BallContactState::default();
        events
            .iter()
            .filter_map(|e| state.apply(*e, bonus_active))
            .collect()
    }

    #[test]
    fn test_clean_swish_is_perfect() {
        let outcomes = run(&[ContactEvent::UpperTrigger, ContactEvent::LowerTrigger], false);
        assert_eq!(outcomes, vec![ContactOutcome::Scored(ScoreKind::Perfect)]);
    }

    #[test]
    fn test_rim_touch_is_standard() {
        let outcomes = run(
            &[
                ContactEvent::Ring,
                ContactEvent::UpperTrigger,
                ContactEvent::LowerTrigger,
            ],
            true,
        );
        assert_eq!(outcomes, vec![ContactOutcome::Scored(ScoreKind::Standard)]);
    }

    #[test]
    fn test_glass_pays_bonus_only_when_active() {
        let bank = [
            ContactEvent::Backboard,
            ContactEvent::UpperTrigger,
            ContactEvent::LowerTrigger,
        ];
        assert_eq!(run(&bank, true), vec![ContactOutcome::Scored(ScoreKind::Backboard)]);
        assert_eq!(run(&bank, false), vec![ContactOutcome::Scored(ScoreKind::Standard)]);
    }

    #[test]
    fn test_lower_trigger_without_upper_is_ignored() {
        let outcomes = run(&[ContactEvent::LowerTrigger, ContactEvent::LowerTrigger], false);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_second_ground_touch_ends_attempt() {
        let mut state = BallContactState::default();
        assert_eq!(state.apply(ContactEvent::Ground, false), None);
        assert!(state.touched_ground);
        assert_eq!(
            state.apply(ContactEvent::Ground, false),
            Some(ContactOutcome::OutOfPlay)
        );
        assert_eq!(state, BallContactState::default());
    }

    #[test]
    fn test_flags_do_not_leak_across_attempts() {
        let mut state = BallContactState::default();
        state.apply(ContactEvent::Ring, false);
        state.apply(ContactEvent::UpperTrigger, false);
        state.apply(ContactEvent::LowerTrigger, false);
        // Next attempt: clean swish must not inherit the ring touch
        state.apply(ContactEvent::UpperTrigger, false);
        assert_eq!(
            state.apply(ContactEvent::LowerTrigger, false),
            Some(ContactOutcome::Scored(ScoreKind::Perfect))
        );
    }
}
