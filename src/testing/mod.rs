//! Scenario testing system for deterministic session testing
//!
//! Scenarios are TOML files that script `GameManager` calls step by step
//! and assert on the published events and the session state in between.

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedEvent, SessionSnapshot, check_sequence, check_state};
pub use parser::{ExpectedEvent, StateAssertion, Step, TestDefinition, TestExpectations, TestSetup};
pub use runner::{TestResult, discover_tests, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";
