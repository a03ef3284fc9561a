//! Ball module - components, physics, and contact interpretation

mod components;
mod contact;
mod physics;

pub use components::*;
pub use contact::*;
pub use physics::*;
