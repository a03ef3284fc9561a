//! Headless simulation - app wiring and full-match runner
//!
//! Runs the gameplay core without rendering, for the demo binary and for
//! app-level tests.

pub mod app_builder;
pub mod runner;

pub use app_builder::{HeadlessAppBuilder, start_match};
pub use runner::{MatchResult, PlayerStats, run_match};
