use accord_types::{Address, Identity};

/// An inbound operation against the record tables.
///
/// The actor identity in each variant is assumed already authenticated by
/// the host (signer-verification oracle). Every address here is
/// caller-supplied and therefore untrusted: the validator re-derives each
/// one from the identities involved before the engine touches anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Allocate the agreement for {party_a, party_b}. Any identity may
    /// initiate, including a third party.
    CreateAgreement {
        initiator: Identity,
        party_a: Identity,
        party_b: Identity,
        agreement: Address,
    },

    /// Allocate `identity`'s partner record and attach it to the live
    /// agreement for {identity, counterpart}.
    AttachPartner {
        identity: Identity,
        counterpart: Identity,
        partner: Address,
        agreement: Address,
        display_name: String,
        statement: String,
    },

    /// Reclaim a pre-acceptance agreement. Restricted to the initiator or
    /// either participant.
    CancelAgreement {
        actor: Identity,
        party_a: Identity,
        party_b: Identity,
        agreement: Address,
    },

    /// Reclaim `identity`'s partner record once its agreement is gone.
    DetachPartner {
        identity: Identity,
        partner: Address,
    },

    /// Record `identity`'s consent and advance the agreement accordingly.
    GiveConsent {
        identity: Identity,
        counterpart: Identity,
        partner: Address,
        counterpart_partner: Address,
        agreement: Address,
        value: bool,
    },

    /// Retract consent on an accepted agreement; the second side's call
    /// completes the mutual withdrawal and reclaims the agreement.
    Withdraw {
        identity: Identity,
        counterpart: Identity,
        partner: Address,
        counterpart_partner: Address,
        agreement: Address,
    },
}

impl Operation {
    /// Operation name for logs and `InvalidState` reports.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateAgreement { .. } => "create_agreement",
            Operation::AttachPartner { .. } => "attach_partner",
            Operation::CancelAgreement { .. } => "cancel_agreement",
            Operation::DetachPartner { .. } => "detach_partner",
            Operation::GiveConsent { .. } => "give_consent",
            Operation::Withdraw { .. } => "withdraw",
        }
    }
}
