//! Notification system
//!
//! The EventBus is the in-process publish/subscribe channel between the core and
//! everything that presents it (HUD, audio, camera). No wire or file format is
//! involved; events are logged as they are drained.

mod bus;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, PendingReset, update_event_bus_time};
pub use logger::{emit_session_start, log_bus_events, session_start_event};
pub use types::{GameEvent, GameState, PlayerId, ScoreKind, ShotClassification};
