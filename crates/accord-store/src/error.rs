use accord_types::{AccordError, Address, BudgetError};
use thiserror::Error;

/// Result type for host store operations.
pub type HostResult<T> = Result<T, HostError>;

/// Host-layer failures.
///
/// `Rejected` carries the engine's taxonomy unchanged so callers can still
/// tell the rejection kinds apart. Everything here is raised before any
/// record or balance changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error(transparent)]
    Rejected(#[from] AccordError),

    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// A reclaim named a record the host never escrowed a deposit for.
    /// Only reachable on a store seeded outside `execute`.
    #[error("no escrowed deposit for {0}")]
    EscrowMissing(Address),

    #[error("store lock poisoned")]
    LockPoisoned,
}
