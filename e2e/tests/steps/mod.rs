//! Step definitions, collected by cucumber from their attributes.
//!
//! Actors are single words (`{word}`). A sentence containing "tries to" is
//! speculative: it records a [`TxOutcome`] and never fails the step.
//!
//! [`TxOutcome`]: lto_e2e::context::TxOutcome

mod anchor;
mod association;
mod generic;
mod lease;
mod mass_transfer;
