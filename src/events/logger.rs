//! Event logging - drains the bus at the end of each frame

use bevy::prelude::*;
use uuid::Uuid;

use super::bus::EventBus;
use super::types::GameEvent;

/// Build the once-per-process session marker
pub fn session_start_event() -> GameEvent {
    GameEvent::SessionStart {
        session_id: Uuid::new_v4().to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
    }
}

/// Startup system: publish the session marker
pub fn emit_session_start(mut bus: ResMut<EventBus>) {
    let event = session_start_event();
    if let GameEvent::SessionStart { session_id, .. } = &event {
        info!("Session {} started", session_id);
    }
    bus.emit(event);
}

/// Drain everything published this frame and write it to the log.
/// Runs in `Last`; ball resets travel on their own queue and are not lost here.
pub fn log_bus_events(mut bus: ResMut<EventBus>) {
    for entry in bus.drain() {
        match &entry.event {
            GameEvent::GameStateChanged { .. }
            | GameEvent::MatchEnd { .. }
            | GameEvent::PowerUpActivated { .. }
            | GameEvent::BonusActivated { .. }
            | GameEvent::HighScoreChanged { .. } => {
                info!("[{:>7}ms] {} {:?}", entry.time_ms, entry.event.type_code(), entry.event);
            }
            GameEvent::DragPower { .. } => {
                trace!("[{:>7}ms] {} {:?}", entry.time_ms, entry.event.type_code(), entry.event);
            }
            _ => {
                debug!("[{:>7}ms] {} {:?}", entry.time_ms, entry.event.type_code(), entry.event);
            }
        }
    }
}
