//! LTO Network common library
//!
//! Account keys and addresses, the transaction types exercised by the
//! end-to-end suite, and an asynchronous client for the node's REST API.

pub mod api;
pub mod config;
pub mod crypto;
pub mod transaction;
