//! AI module - scripted opponent that plays through the gesture queue

mod shooter;

pub use shooter::*;
