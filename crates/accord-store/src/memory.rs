use crate::error::{HostError, HostResult};
use accord_engine::{Effect, Operation, Outcome, Snapshot, TransitionEngine};
use accord_types::{
    Address, AgreementRecord, Amount, Budget, Deposit, Identity, PartnerRecord,
};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Deposit units charged per byte of record storage.
pub const STORAGE_RATE_PER_BYTE: u64 = 4;

/// The deposit escrowed for a record of the given footprint. Returned in
/// full at reclamation.
pub fn deposit_for(footprint: u64) -> Amount {
    Amount::new(footprint.saturating_mul(STORAGE_RATE_PER_BYTE))
}

#[derive(Default)]
struct Tables {
    partners: HashMap<Address, PartnerRecord>,
    agreements: HashMap<Address, AgreementRecord>,
    budgets: HashMap<Identity, Budget>,
    escrow: HashMap<Address, Deposit>,
}

impl Tables {
    fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for (address, record) in &self.partners {
            snapshot.insert_partner(*address, record.clone());
        }
        for (address, record) in &self.agreements {
            snapshot.insert_agreement(*address, record.clone());
        }
        snapshot
    }

    /// Commit an admitted outcome, or change nothing.
    ///
    /// Deposits are drawn first, the only fallible step; if any draw fails,
    /// every deposit drawn so far goes back and the tables are untouched.
    /// Record mutations then cannot fail.
    fn commit(&mut self, outcome: &Outcome) -> HostResult<()> {
        let mut drawn: Vec<(Identity, Address, Deposit)> = Vec::new();
        for effect in &outcome.effects {
            let (address, footprint, funder) = match effect {
                Effect::AllocateAgreement {
                    address,
                    record,
                    funded_by,
                } => (*address, record.storage_footprint(), *funded_by),
                Effect::AllocatePartner {
                    address,
                    record,
                    funded_by,
                } => (*address, record.storage_footprint(), *funded_by),
                Effect::ReclaimAgreement { address, .. }
                | Effect::ReclaimPartner { address, .. } => {
                    if !self.escrow.contains_key(address) {
                        self.roll_back(drawn);
                        return Err(HostError::EscrowMissing(*address));
                    }
                    continue;
                }
                _ => continue,
            };
            let budget = self.budgets.entry(funder).or_default();
            match budget.escrow(deposit_for(footprint)) {
                Ok(deposit) => drawn.push((funder, address, deposit)),
                Err(err) => {
                    self.roll_back(drawn);
                    return Err(err.into());
                }
            }
        }

        let mut pending: HashMap<Address, Deposit> = drawn
            .into_iter()
            .map(|(_, address, deposit)| (address, deposit))
            .collect();

        for effect in &outcome.effects {
            match effect {
                Effect::AllocateAgreement {
                    address, record, ..
                } => {
                    if let Some(deposit) = pending.remove(address) {
                        self.escrow.insert(*address, deposit);
                    }
                    self.agreements.insert(*address, record.clone());
                }
                Effect::AllocatePartner {
                    address, record, ..
                } => {
                    if let Some(deposit) = pending.remove(address) {
                        self.escrow.insert(*address, deposit);
                    }
                    self.partners.insert(*address, record.clone());
                }
                Effect::UpdateAgreement { address, record } => {
                    self.agreements.insert(*address, record.clone());
                }
                Effect::UpdatePartner { address, record } => {
                    self.partners.insert(*address, record.clone());
                }
                Effect::ReclaimAgreement { address, refund_to } => {
                    self.agreements.remove(address);
                    self.refund(*address, *refund_to);
                }
                Effect::ReclaimPartner { address, refund_to } => {
                    self.partners.remove(address);
                    self.refund(*address, *refund_to);
                }
            }
        }

        Ok(())
    }

    fn roll_back(&mut self, drawn: Vec<(Identity, Address, Deposit)>) {
        for (funder, _, deposit) in drawn {
            self.budgets.entry(funder).or_default().release(deposit);
        }
    }

    fn refund(&mut self, address: Address, refund_to: Identity) {
        if let Some(deposit) = self.escrow.remove(&address) {
            debug!(%address, %refund_to, amount = %deposit.amount(), "deposit refunded");
            self.budgets.entry(refund_to).or_default().release(deposit);
        }
    }
}

/// In-memory reference host.
///
/// Executable model of the host contract: a keyed store for both record
/// tables, per-identity budgets, and escrow accounting, with each operation
/// applied as one atomic unit under a single write lock. Deterministic and
/// test-friendly; authenticating actors and persisting across restarts are
/// a real deployment's concern.
#[derive(Default)]
pub struct InMemoryHost {
    engine: TransitionEngine,
    tables: RwLock<Tables>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an identity's budget. Stands in for external funding.
    pub fn fund(&self, identity: Identity, amount: Amount) -> HostResult<()> {
        let mut tables = self.tables.write().map_err(|_| HostError::LockPoisoned)?;
        let budget = tables.budgets.entry(identity).or_default();
        *budget = Budget::with_funds(budget.available().saturating_add(amount));
        Ok(())
    }

    pub fn balance(&self, identity: Identity) -> HostResult<Amount> {
        let tables = self.tables.read().map_err(|_| HostError::LockPoisoned)?;
        Ok(tables
            .budgets
            .get(&identity)
            .map(Budget::available)
            .unwrap_or_default())
    }

    /// Sum of all escrowed deposits.
    pub fn escrowed_total(&self) -> HostResult<Amount> {
        let tables = self.tables.read().map_err(|_| HostError::LockPoisoned)?;
        Ok(tables
            .escrow
            .values()
            .fold(Amount::zero(), |acc, deposit| {
                acc.saturating_add(deposit.amount())
            }))
    }

    pub fn partner(&self, address: Address) -> HostResult<Option<PartnerRecord>> {
        let tables = self.tables.read().map_err(|_| HostError::LockPoisoned)?;
        Ok(tables.partners.get(&address).cloned())
    }

    pub fn agreement(&self, address: Address) -> HostResult<Option<AgreementRecord>> {
        let tables = self.tables.read().map_err(|_| HostError::LockPoisoned)?;
        Ok(tables.agreements.get(&address).cloned())
    }

    /// Run one operation end to end: load, validate, transition, commit.
    ///
    /// Holds the write lock for the whole step, which serializes every
    /// in-flight mutation, a coarser guarantee than the per-record
    /// serialization the engine requires, and trivially sufficient.
    pub fn execute(&self, op: &Operation) -> HostResult<Outcome> {
        let mut tables = self.tables.write().map_err(|_| HostError::LockPoisoned)?;
        let snapshot = tables.snapshot();
        let outcome = self.engine.apply(op, &snapshot)?;
        tables.commit(&outcome)?;
        debug!(op = op.name(), effects = outcome.effects.len(), "operation committed");
        Ok(outcome)
    }
}
