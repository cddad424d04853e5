//! Ledger actions behind the step definitions.
//!
//! Each action resolves named actors through the [`ScenarioContext`], then
//! either signs and broadcasts one transaction or queries fresh node state.
//! Whether an error propagates is up to the calling step.
//!
//! [`ScenarioContext`]: crate::context::ScenarioContext

pub mod anchor;
pub mod association;
pub mod balance;
pub mod lease;
pub mod mass_transfer;
