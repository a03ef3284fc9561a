//! Session module - round lifecycle, scoring, streaks, bonus window

mod bonus;
mod high_score;
mod manager;
mod state;
mod streak;

pub use bonus::*;
pub use high_score::*;
pub use manager::*;
pub use state::*;
pub use streak::*;
