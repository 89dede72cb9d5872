use crate::address::Address;
use crate::identity::{canonical_pair, Identity};
use serde::{Deserialize, Serialize};

/// Maximum byte length of a partner's display name.
pub const MAX_DISPLAY_NAME_LEN: usize = 64;
/// Maximum byte length of a partner's statement.
pub const MAX_STATEMENT_LEN: usize = 256;

/// Lifecycle state of an agreement.
///
/// There is no terminal `Withdrawn` state: completion of the mutual
/// withdrawal flow reclaims the record instead of persisting a tombstone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementState {
    Created,
    Proposing,
    Accepted,
    Withdrawing,
}

impl std::fmt::Display for AgreementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgreementState::Created => "created",
            AgreementState::Proposing => "proposing",
            AgreementState::Accepted => "accepted",
            AgreementState::Withdrawing => "withdrawing",
        };
        f.write_str(s)
    }
}

/// Per-identity record holding one side's personal data and consent.
///
/// Not owned by the agreement: the agreement only references partner
/// addresses, and the partner only carries a weak `agreement_ref` back.
/// `display_name` and `statement` are immutable once attached; only
/// `consent` ever changes, and only at the owner's request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRecord {
    pub owner: Identity,
    /// Weak reference to the agreement this partner is attached to.
    /// `None` only for a record that outlived its agreement's reclamation.
    pub agreement_ref: Option<Address>,
    pub display_name: String,
    pub statement: String,
    pub consent: bool,
}

impl PartnerRecord {
    pub fn new(
        owner: Identity,
        agreement_ref: Address,
        display_name: String,
        statement: String,
    ) -> Self {
        Self {
            owner,
            agreement_ref: Some(agreement_ref),
            display_name,
            statement,
            consent: false,
        }
    }

    /// Storage bytes this record occupies; the basis for its deposit.
    pub fn storage_footprint(&self) -> u64 {
        // owner + option tag + address + 2 * (len prefix + text) + consent
        (32 + 1 + 32 + 4 + self.display_name.len() + 4 + self.statement.len() + 1) as u64
    }
}

/// The shared two-party record driven by both sides' consent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementRecord {
    /// Creator; not necessarily one of the pair. Receives the agreement
    /// deposit back at reclamation.
    pub initiator: Identity,
    /// Partner address of the canonically lower identity. Never changes.
    pub side_a: Address,
    /// Partner address of the canonically higher identity. Never changes.
    pub side_b: Address,
    pub state: AgreementState,
}

impl AgreementRecord {
    /// Build a fresh agreement with sides assigned in canonical pair order,
    /// independent of the argument order the creator supplied.
    pub fn new(initiator: Identity, party_a: Identity, party_b: Identity) -> Self {
        let (lower, higher) = canonical_pair(party_a, party_b);
        Self {
            initiator,
            side_a: Address::for_partner(lower),
            side_b: Address::for_partner(higher),
            state: AgreementState::Created,
        }
    }

    /// Whether `partner` occupies one of this agreement's two slots.
    pub fn has_side(&self, partner: Address) -> bool {
        self.side_a == partner || self.side_b == partner
    }

    /// The slot opposite `partner`, if `partner` is one of the two sides.
    pub fn other_side(&self, partner: Address) -> Option<Address> {
        if partner == self.side_a {
            Some(self.side_b)
        } else if partner == self.side_b {
            Some(self.side_a)
        } else {
            None
        }
    }

    /// Storage bytes this record occupies; the basis for its deposit.
    pub fn storage_footprint(&self) -> u64 {
        // initiator + 2 * address + state tag
        (32 + 32 + 32 + 1) as u64
    }
}
