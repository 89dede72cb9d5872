use crate::address::Address;
use crate::record::AgreementState;
use thiserror::Error;

/// Result type for validation and transition operations.
pub type AccordResult<T> = Result<T, AccordError>;

/// Rejection kinds for inbound operations.
///
/// Every kind is detected before any mutation, so a rejected operation
/// leaves persisted state untouched, and every kind is specific enough for
/// a caller to tell "wrong address" from "not your turn" from "already
/// settled". Idempotent consent re-assertion is a silent success, not an
/// error, so there is no no-op kind here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccordError {
    /// A caller-supplied or stored address does not match its
    /// re-derivation from the identities involved.
    #[error("address mismatch for {context}: expected {expected}, got {supplied}")]
    AddressMismatch {
        context: &'static str,
        expected: Address,
        supplied: Address,
    },

    /// A stored cross-reference does not tie its records together: a
    /// partner's `agreement_ref` names some other agreement, or none.
    #[error("{context} does not reference agreement {expected}")]
    ReferenceMismatch {
        context: &'static str,
        expected: Address,
    },

    /// A referenced record does not exist at its derived address.
    #[error("record not initialized at {address} ({context})")]
    NotInitialized {
        context: &'static str,
        address: Address,
    },

    /// A live record already occupies the derived address.
    #[error("record already exists at {address} ({context})")]
    AlreadyExists {
        context: &'static str,
        address: Address,
    },

    /// The agreement is not in a state this operation permits.
    #[error("operation {operation} not permitted in state {state}")]
    InvalidState {
        operation: &'static str,
        state: AgreementState,
    },

    /// The acting identity fails the operation's ownership or role check.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed payload: oversized text or a non-distinct identity pair.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
