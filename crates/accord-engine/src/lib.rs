//! Accord integrity validator and transition engine.
//!
//! The store underneath this system is a bare key→record map: no foreign
//! keys, no cross-record transactions, no trust in caller-supplied
//! references. This crate substitutes for all of that with two pure
//! components:
//!
//! - [`validate`]: per-operation admission checks that re-derive every
//!   supplied address and re-prove every cross-record reference.
//! - [`TransitionEngine`]: the consent-driven state machine; it turns an
//!   admitted [`Operation`] plus a loaded [`Snapshot`] into [`Effect`]s for
//!   the host to commit atomically.
//!
//! Nothing here performs IO or holds state between operations.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod engine;
mod op;
mod snapshot;
pub mod validate;

pub use engine::{Effect, Outcome, TransitionEngine};
pub use op::Operation;
pub use snapshot::Snapshot;
