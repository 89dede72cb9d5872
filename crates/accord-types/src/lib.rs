//! Accord core types.
//!
//! Everything the validator and engine agree on lives here:
//! - opaque [`Identity`] credentials and the canonical pair order
//! - derived [`Address`]es (the only keys the record tables have)
//! - the two persisted record schemas and the agreement lifecycle states
//! - the deposit/budget capability backing record storage
//! - the rejection taxonomy
//!
//! Design stance:
//! - No storage here, no IO: pure data and pure derivations.
//! - Addresses are re-derivable from identities; nothing in the system
//!   trusts a stored or supplied address it has not re-derived.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod address;
mod budget;
mod error;
mod identity;
mod record;

pub use address::Address;
pub use budget::{Amount, Budget, BudgetError, Deposit};
pub use error::{AccordError, AccordResult};
pub use identity::{canonical_pair, Identity};
pub use record::{
    AgreementRecord, AgreementState, PartnerRecord, MAX_DISPLAY_NAME_LEN, MAX_STATEMENT_LEN,
};
