//! Behaviour-driven end-to-end tests for the LTO Network transaction API.
//!
//! The cucumber world is [`context::ScenarioContext`]. Step definitions live
//! with the test runners under `tests/` and call into [`actions`].

pub mod actions;
pub mod config;
pub mod context;
pub mod memory_node;
pub mod params;
pub mod tools;
