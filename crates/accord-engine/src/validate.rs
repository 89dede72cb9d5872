//! Integrity validation.
//!
//! The record store enforces nothing: no foreign keys, no cascade rules, no
//! guarantee that a caller-supplied address has anything to do with the
//! identities in the same request. These functions are what stands in for
//! all of that. Each one re-derives every address an operation names,
//! re-checks every stored cross-reference against the other party's record,
//! and proves the acting identity's role, all before the engine computes a
//! single effect. Validation runs to completion or the operation is
//! rejected; there is no partial pass.

use crate::snapshot::Snapshot;
use accord_types::{
    Address, AccordError, AccordResult, AgreementRecord, AgreementState, Identity, PartnerRecord,
    canonical_pair, MAX_DISPLAY_NAME_LEN, MAX_STATEMENT_LEN,
};

/// Both partner records and the agreement tying them together, proven
/// mutually consistent. What the consent/withdraw transitions operate on.
pub struct PairView<'a> {
    pub agreement_addr: Address,
    pub agreement: &'a AgreementRecord,
    pub partner_addr: Address,
    pub partner: &'a PartnerRecord,
    pub other_partner_addr: Address,
    pub other_partner: &'a PartnerRecord,
}

fn expect_address(context: &'static str, expected: Address, supplied: Address) -> AccordResult<()> {
    if expected == supplied {
        Ok(())
    } else {
        Err(AccordError::AddressMismatch {
            context,
            expected,
            supplied,
        })
    }
}

fn expect_ref(
    context: &'static str,
    expected: Address,
    stored: Option<Address>,
) -> AccordResult<()> {
    if stored == Some(expected) {
        Ok(())
    } else {
        Err(AccordError::ReferenceMismatch { context, expected })
    }
}

fn expect_distinct(a: Identity, b: Identity) -> AccordResult<()> {
    if a == b {
        Err(AccordError::InvalidInput(format!(
            "identity pair must be distinct, got {a} twice"
        )))
    } else {
        Ok(())
    }
}

fn expect_state(
    operation: &'static str,
    state: AgreementState,
    allowed: &[AgreementState],
) -> AccordResult<()> {
    if allowed.contains(&state) {
        Ok(())
    } else {
        Err(AccordError::InvalidState { operation, state })
    }
}

/// Check the stored side slots against their re-derivations.
///
/// The slots are pure functions of the pair, so for an uncorrupted store
/// this never fires; it exists because the engine refuses to assume the
/// store is uncorrupted.
fn expect_sides(
    agreement: &AgreementRecord,
    party_a: Identity,
    party_b: Identity,
) -> AccordResult<()> {
    let (lower, higher) = canonical_pair(party_a, party_b);
    expect_address("side_a", Address::for_partner(lower), agreement.side_a)?;
    expect_address("side_b", Address::for_partner(higher), agreement.side_b)?;
    Ok(())
}

/// Admission check for `create_agreement`.
///
/// Beyond the derivation checks, both parties' partner slots must be empty:
/// a leftover partner record from an earlier lifecycle carries stale consent
/// state, and must be detached before its identity can enter a new
/// agreement.
pub fn validate_create(
    snapshot: &Snapshot,
    party_a: Identity,
    party_b: Identity,
    supplied_agreement: Address,
) -> AccordResult<Address> {
    expect_distinct(party_a, party_b)?;

    let agreement_addr = Address::for_agreement(party_a, party_b);
    expect_address("agreement", agreement_addr, supplied_agreement)?;

    if snapshot.agreement(agreement_addr).is_some() {
        return Err(AccordError::AlreadyExists {
            context: "agreement",
            address: agreement_addr,
        });
    }

    for party in [party_a, party_b] {
        let slot = Address::for_partner(party);
        if snapshot.partner(slot).is_some() {
            return Err(AccordError::AlreadyExists {
                context: "partner slot",
                address: slot,
            });
        }
    }

    Ok(agreement_addr)
}

/// Admission check for `attach_partner`.
pub fn validate_attach<'a>(
    snapshot: &'a Snapshot,
    identity: Identity,
    counterpart: Identity,
    supplied_partner: Address,
    supplied_agreement: Address,
    display_name: &str,
    statement: &str,
) -> AccordResult<(Address, &'a AgreementRecord)> {
    expect_distinct(identity, counterpart)?;

    if display_name.len() > MAX_DISPLAY_NAME_LEN {
        return Err(AccordError::InvalidInput(format!(
            "display name exceeds {MAX_DISPLAY_NAME_LEN} bytes"
        )));
    }
    if statement.len() > MAX_STATEMENT_LEN {
        return Err(AccordError::InvalidInput(format!(
            "statement exceeds {MAX_STATEMENT_LEN} bytes"
        )));
    }

    let partner_addr = Address::for_partner(identity);
    expect_address("partner", partner_addr, supplied_partner)?;

    let agreement_addr = Address::for_agreement(identity, counterpart);
    expect_address("agreement", agreement_addr, supplied_agreement)?;

    let agreement =
        snapshot
            .agreement(agreement_addr)
            .ok_or(AccordError::NotInitialized {
                context: "agreement",
                address: agreement_addr,
            })?;
    expect_sides(agreement, identity, counterpart)?;

    if snapshot.partner(partner_addr).is_some() {
        return Err(AccordError::AlreadyExists {
            context: "partner slot",
            address: partner_addr,
        });
    }

    Ok((agreement_addr, agreement))
}

/// Admission check for `cancel_agreement`.
///
/// Only the initiator or one of the two participants may cancel, and only
/// before acceptance. Participation is proven by derivation: the actor's
/// partner address must occupy one of the agreement's side slots.
pub fn validate_cancel<'a>(
    snapshot: &'a Snapshot,
    actor: Identity,
    party_a: Identity,
    party_b: Identity,
    supplied_agreement: Address,
) -> AccordResult<(Address, &'a AgreementRecord)> {
    expect_distinct(party_a, party_b)?;

    let agreement_addr = Address::for_agreement(party_a, party_b);
    expect_address("agreement", agreement_addr, supplied_agreement)?;

    let agreement =
        snapshot
            .agreement(agreement_addr)
            .ok_or(AccordError::NotInitialized {
                context: "agreement",
                address: agreement_addr,
            })?;
    expect_sides(agreement, party_a, party_b)?;

    let actor_slot = Address::for_partner(actor);
    let is_member = actor == agreement.initiator || agreement.has_side(actor_slot);
    if !is_member {
        return Err(AccordError::Unauthorized(format!(
            "{actor} is neither initiator nor participant of {agreement_addr}"
        )));
    }

    expect_state(
        "cancel_agreement",
        agreement.state,
        &[AgreementState::Created, AgreementState::Proposing],
    )?;

    Ok((agreement_addr, agreement))
}

/// Admission check for `detach_partner`.
///
/// Detach is never permitted while the referenced agreement is live, in
/// any state. A live agreement that could still read this partner's consent
/// must be cancelled or fully withdrawn first.
pub fn validate_detach<'a>(
    snapshot: &'a Snapshot,
    identity: Identity,
    supplied_partner: Address,
) -> AccordResult<(Address, &'a PartnerRecord)> {
    let partner_addr = Address::for_partner(identity);
    expect_address("partner", partner_addr, supplied_partner)?;

    let partner = snapshot
        .partner(partner_addr)
        .ok_or(AccordError::NotInitialized {
            context: "partner",
            address: partner_addr,
        })?;

    if partner.owner != identity {
        return Err(AccordError::Unauthorized(format!(
            "{identity} does not own partner record {partner_addr}"
        )));
    }

    if let Some(agreement_ref) = partner.agreement_ref {
        if let Some(agreement) = snapshot.agreement(agreement_ref) {
            return Err(AccordError::InvalidState {
                operation: "detach_partner",
                state: agreement.state,
            });
        }
    }

    Ok((partner_addr, partner))
}

/// Shared admission check for `give_consent` and `withdraw`.
///
/// Loads both partner records and the agreement, proves every address by
/// re-derivation, proves both partners' `agreement_ref` point at this
/// agreement, and proves the actor owns the "self" side.
pub fn validate_pair<'a>(
    snapshot: &'a Snapshot,
    operation: &'static str,
    identity: Identity,
    counterpart: Identity,
    supplied_partner: Address,
    supplied_counterpart_partner: Address,
    supplied_agreement: Address,
    allowed: &[AgreementState],
) -> AccordResult<PairView<'a>> {
    expect_distinct(identity, counterpart)?;

    let partner_addr = Address::for_partner(identity);
    expect_address("partner", partner_addr, supplied_partner)?;

    let other_partner_addr = Address::for_partner(counterpart);
    expect_address("counterpart partner", other_partner_addr, supplied_counterpart_partner)?;

    let agreement_addr = Address::for_agreement(identity, counterpart);
    expect_address("agreement", agreement_addr, supplied_agreement)?;

    let agreement =
        snapshot
            .agreement(agreement_addr)
            .ok_or(AccordError::NotInitialized {
                context: "agreement",
                address: agreement_addr,
            })?;
    expect_sides(agreement, identity, counterpart)?;

    let partner = snapshot
        .partner(partner_addr)
        .ok_or(AccordError::NotInitialized {
            context: "partner",
            address: partner_addr,
        })?;
    let other_partner =
        snapshot
            .partner(other_partner_addr)
            .ok_or(AccordError::NotInitialized {
                context: "counterpart partner",
                address: other_partner_addr,
            })?;

    expect_ref("partner agreement_ref", agreement_addr, partner.agreement_ref)?;
    expect_ref(
        "counterpart partner agreement_ref",
        agreement_addr,
        other_partner.agreement_ref,
    )?;

    if partner.owner != identity {
        return Err(AccordError::Unauthorized(format!(
            "{identity} does not own partner record {partner_addr}"
        )));
    }

    expect_state(operation, agreement.state, allowed)?;

    Ok(PairView {
        agreement_addr,
        agreement,
        partner_addr,
        partner,
        other_partner_addr,
        other_partner,
    })
}
