use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage funds, in indivisible units.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Amount(pub u64);

impl Amount {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Amount, available: Amount },
}

/// Escrowed value backing one record's storage.
///
/// Returned from [`Budget::escrow`] and consumed by [`Budget::release`]:
/// the full escrowed amount comes back at reclamation, never a partial
/// refund. Deliberately not `Copy`: a deposit is released exactly once.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[must_use = "an unreleased deposit is escrowed value lost"]
pub struct Deposit {
    amount: Amount,
}

impl Deposit {
    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Funds an identity can spend on record storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Budget {
    available: Amount,
}

impl Budget {
    pub fn with_funds(available: Amount) -> Self {
        Self { available }
    }

    pub fn available(&self) -> Amount {
        self.available
    }

    /// Move `amount` out of the budget into a deposit.
    pub fn escrow(&mut self, amount: Amount) -> Result<Deposit, BudgetError> {
        if amount > self.available {
            return Err(BudgetError::InsufficientFunds {
                needed: amount,
                available: self.available,
            });
        }
        self.available = self.available.saturating_sub(amount);
        Ok(Deposit { amount })
    }

    /// Return a deposit's full value to the budget.
    pub fn release(&mut self, deposit: Deposit) {
        self.available = self.available.saturating_add(deposit.amount);
    }
}
