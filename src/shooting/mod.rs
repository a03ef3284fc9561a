//! Shooting module - trajectory solver, accuracy assist, and launch systems

mod cache;
mod classify;
mod gesture;
mod launch;
mod pipeline;
mod throw;
mod trajectory;

pub use cache::*;
pub use classify::*;
pub use gesture::*;
pub use launch::*;
pub use pipeline::*;
pub use throw::*;
pub use trajectory::*;
