//! Idchain State - the ledger key-value boundary
//!
//! This crate provides:
//! - the [`LedgerState`] trait the registry reads and writes through
//! - an in-memory adapter for tests and local runtime use
//!
//! Durability, commit ordering, and retry policy belong to the host store
//! behind the trait, not to this crate.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::StateError;
pub use memory::InMemoryLedger;
pub use traits::{InsertOutcome, LedgerState};
