//! Accord host reference implementation.
//!
//! The engine treats its host as an opaque keyed store plus a budget for
//! storage deposits. [`InMemoryHost`] is the executable model of that
//! contract: it loads snapshots, runs the [`accord_engine::TransitionEngine`],
//! and commits effects atomically, moving deposits between per-identity
//! budgets and escrow as records are allocated and reclaimed.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
mod memory;

pub use error::{HostError, HostResult};
pub use memory::{deposit_for, InMemoryHost, STORAGE_RATE_PER_BYTE};
