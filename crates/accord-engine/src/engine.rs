use crate::op::Operation;
use crate::snapshot::Snapshot;
use crate::validate;
use accord_types::{
    Address, AccordResult, AgreementRecord, AgreementState, Identity, PartnerRecord,
};
use tracing::debug;

/// A single mutation for the host to commit.
///
/// Allocations name the identity whose budget funds the deposit;
/// reclamations name the identity the deposit refunds to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    AllocateAgreement {
        address: Address,
        record: AgreementRecord,
        funded_by: Identity,
    },
    AllocatePartner {
        address: Address,
        record: PartnerRecord,
        funded_by: Identity,
    },
    UpdateAgreement {
        address: Address,
        record: AgreementRecord,
    },
    UpdatePartner {
        address: Address,
        record: PartnerRecord,
    },
    ReclaimAgreement {
        address: Address,
        refund_to: Identity,
    },
    ReclaimPartner {
        address: Address,
        refund_to: Identity,
    },
}

/// The complete outcome of one admitted operation.
///
/// Effects are computed against the snapshot and returned, never applied in
/// place; committing all of them as one unit is the host's job, which is
/// what makes a rejected operation leave every record byte-for-byte
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn single(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
        }
    }
}

/// The state machine: validated operation in, next-state effects out.
///
/// Stateless and synchronous. Concurrency is the host's concern: the engine
/// assumes at most one in-flight mutation per record and never blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionEngine;

impl TransitionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validate `op` against `snapshot` and compute its effects.
    ///
    /// Validation runs to completion first; any rejection carries the
    /// specific [`accord_types::AccordError`] kind and implies zero effects.
    pub fn apply(&self, op: &Operation, snapshot: &Snapshot) -> AccordResult<Outcome> {
        match op {
            Operation::CreateAgreement {
                initiator,
                party_a,
                party_b,
                agreement,
            } => {
                let address =
                    validate::validate_create(snapshot, *party_a, *party_b, *agreement)?;
                let record = AgreementRecord::new(*initiator, *party_a, *party_b);
                debug!(%address, initiator = %initiator, "agreement created");
                Ok(Outcome::single(Effect::AllocateAgreement {
                    address,
                    record,
                    funded_by: *initiator,
                }))
            }

            Operation::AttachPartner {
                identity,
                counterpart,
                partner,
                agreement,
                display_name,
                statement,
            } => {
                let (agreement_addr, _) = validate::validate_attach(
                    snapshot,
                    *identity,
                    *counterpart,
                    *partner,
                    *agreement,
                    display_name,
                    statement,
                )?;
                let address = Address::for_partner(*identity);
                let record = PartnerRecord::new(
                    *identity,
                    agreement_addr,
                    display_name.clone(),
                    statement.clone(),
                );
                debug!(%address, owner = %identity, agreement = %agreement_addr, "partner attached");
                Ok(Outcome::single(Effect::AllocatePartner {
                    address,
                    record,
                    funded_by: *identity,
                }))
            }

            Operation::CancelAgreement {
                actor,
                party_a,
                party_b,
                agreement,
            } => {
                let (address, record) =
                    validate::validate_cancel(snapshot, *actor, *party_a, *party_b, *agreement)?;
                debug!(%address, actor = %actor, state = %record.state, "agreement cancelled");
                Ok(Outcome::single(Effect::ReclaimAgreement {
                    address,
                    refund_to: record.initiator,
                }))
            }

            Operation::DetachPartner { identity, partner } => {
                let (address, record) =
                    validate::validate_detach(snapshot, *identity, *partner)?;
                debug!(%address, owner = %record.owner, "partner detached");
                Ok(Outcome::single(Effect::ReclaimPartner {
                    address,
                    refund_to: record.owner,
                }))
            }

            Operation::GiveConsent {
                identity,
                counterpart,
                partner,
                counterpart_partner,
                agreement,
                value,
            } => {
                let view = validate::validate_pair(
                    snapshot,
                    "give_consent",
                    *identity,
                    *counterpart,
                    *partner,
                    *counterpart_partner,
                    *agreement,
                    &[AgreementState::Created, AgreementState::Proposing],
                )?;
                Ok(self.apply_consent(&view, *value))
            }

            Operation::Withdraw {
                identity,
                counterpart,
                partner,
                counterpart_partner,
                agreement,
            } => {
                let view = validate::validate_pair(
                    snapshot,
                    "withdraw",
                    *identity,
                    *counterpart,
                    *partner,
                    *counterpart_partner,
                    *agreement,
                    &[AgreementState::Accepted, AgreementState::Withdrawing],
                )?;
                Ok(self.apply_withdraw(&view))
            }
        }
    }

    /// Consent table. The partner's flag is written unconditionally; the
    /// agreement advances only when the accumulated consent says so:
    ///
    /// - `Created` + `true`  → `Proposing`
    /// - `Created` + `false` → stays `Created`
    /// - `Proposing` + `true` with the other side already consenting →
    ///   `Accepted`
    /// - otherwise stays `Proposing`
    ///
    /// Re-asserting a value the side already holds is a silent success:
    /// deterministic, identical for both sides, and tested.
    fn apply_consent(&self, view: &validate::PairView<'_>, value: bool) -> Outcome {
        let mut partner = view.partner.clone();
        partner.consent = value;

        let next_state = match (view.agreement.state, value) {
            (AgreementState::Created, true) => AgreementState::Proposing,
            (AgreementState::Created, false) => AgreementState::Created,
            (AgreementState::Proposing, true) if view.other_partner.consent => {
                AgreementState::Accepted
            }
            (AgreementState::Proposing, _) => AgreementState::Proposing,
            // validate_pair admits Created/Proposing only
            (state, _) => state,
        };

        let mut outcome = Outcome::single(Effect::UpdatePartner {
            address: view.partner_addr,
            record: partner,
        });

        if next_state != view.agreement.state {
            debug!(
                address = %view.agreement_addr,
                from = %view.agreement.state,
                to = %next_state,
                "consent advanced agreement"
            );
            let mut agreement = view.agreement.clone();
            agreement.state = next_state;
            outcome.effects.push(Effect::UpdateAgreement {
                address: view.agreement_addr,
                record: agreement,
            });
        }

        outcome
    }

    /// Withdrawal table:
    ///
    /// - `Accepted` → `Withdrawing`, caller's consent reset
    /// - `Withdrawing`, other side already withdrew (consent false) →
    ///   reclaim the agreement, deposit refunded to the initiator
    /// - `Withdrawing`, other side still consenting → the caller already
    ///   withdrew; repeat calls are a silent no-op
    ///
    /// The second side's call is the sole reclamation trigger; a one-sided
    /// withdrawal parks the agreement in `Withdrawing` indefinitely.
    fn apply_withdraw(&self, view: &validate::PairView<'_>) -> Outcome {
        let mut partner = view.partner.clone();
        partner.consent = false;

        let mut outcome = Outcome::single(Effect::UpdatePartner {
            address: view.partner_addr,
            record: partner,
        });

        match view.agreement.state {
            AgreementState::Accepted => {
                debug!(
                    address = %view.agreement_addr,
                    from = %AgreementState::Accepted,
                    to = %AgreementState::Withdrawing,
                    "withdrawal opened"
                );
                let mut agreement = view.agreement.clone();
                agreement.state = AgreementState::Withdrawing;
                outcome.effects.push(Effect::UpdateAgreement {
                    address: view.agreement_addr,
                    record: agreement,
                });
            }
            AgreementState::Withdrawing if !view.other_partner.consent => {
                debug!(
                    address = %view.agreement_addr,
                    refund_to = %view.agreement.initiator,
                    "withdrawal completed, agreement reclaimed"
                );
                outcome.effects.push(Effect::ReclaimAgreement {
                    address: view.agreement_addr,
                    refund_to: view.agreement.initiator,
                });
            }
            // repeat withdraw by the side that already withdrew
            _ => {}
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_types::AccordError;

    fn ident(seed: u8) -> Identity {
        Identity::from_bytes([seed; 32])
    }

    fn create_op(initiator: Identity, a: Identity, b: Identity) -> Operation {
        Operation::CreateAgreement {
            initiator,
            party_a: a,
            party_b: b,
            agreement: Address::for_agreement(a, b),
        }
    }

    fn attach_op(identity: Identity, counterpart: Identity, name: &str, stmt: &str) -> Operation {
        Operation::AttachPartner {
            identity,
            counterpart,
            partner: Address::for_partner(identity),
            agreement: Address::for_agreement(identity, counterpart),
            display_name: name.to_string(),
            statement: stmt.to_string(),
        }
    }

    fn consent_op(identity: Identity, counterpart: Identity, value: bool) -> Operation {
        Operation::GiveConsent {
            identity,
            counterpart,
            partner: Address::for_partner(identity),
            counterpart_partner: Address::for_partner(counterpart),
            agreement: Address::for_agreement(identity, counterpart),
            value,
        }
    }

    fn withdraw_op(identity: Identity, counterpart: Identity) -> Operation {
        Operation::Withdraw {
            identity,
            counterpart,
            partner: Address::for_partner(identity),
            counterpart_partner: Address::for_partner(counterpart),
            agreement: Address::for_agreement(identity, counterpart),
        }
    }

    fn cancel_op(actor: Identity, a: Identity, b: Identity) -> Operation {
        Operation::CancelAgreement {
            actor,
            party_a: a,
            party_b: b,
            agreement: Address::for_agreement(a, b),
        }
    }

    fn detach_op(identity: Identity) -> Operation {
        Operation::DetachPartner {
            identity,
            partner: Address::for_partner(identity),
        }
    }

    /// Test-only commit loop: apply an outcome's effects back onto the
    /// snapshot so operations can be chained.
    fn commit(snapshot: &mut Snapshot, outcome: Outcome) {
        for effect in outcome.effects {
            match effect {
                Effect::AllocateAgreement {
                    address, record, ..
                }
                | Effect::UpdateAgreement { address, record } => {
                    snapshot.insert_agreement(address, record);
                }
                Effect::AllocatePartner {
                    address, record, ..
                }
                | Effect::UpdatePartner { address, record } => {
                    snapshot.insert_partner(address, record);
                }
                Effect::ReclaimAgreement { address, .. } => {
                    snapshot.remove_agreement(address);
                }
                Effect::ReclaimPartner { address, .. } => {
                    snapshot.remove_partner(address);
                }
            }
        }
    }

    fn run(engine: &TransitionEngine, snapshot: &mut Snapshot, op: Operation) {
        let outcome = engine.apply(&op, snapshot).unwrap();
        commit(snapshot, outcome);
    }

    /// Agreement plus both partners attached, ready for consent.
    fn attached_snapshot(initiator: Identity, a: Identity, b: Identity) -> Snapshot {
        let engine = TransitionEngine::new();
        let mut snapshot = Snapshot::new();
        run(&engine, &mut snapshot, create_op(initiator, a, b));
        run(&engine, &mut snapshot, attach_op(a, b, "bob", "always"));
        run(&engine, &mut snapshot, attach_op(b, a, "alice", "forever"));
        snapshot
    }

    fn state_of(snapshot: &Snapshot, a: Identity, b: Identity) -> AgreementState {
        snapshot
            .agreement(Address::for_agreement(a, b))
            .unwrap()
            .state
    }

    fn consent_of(snapshot: &Snapshot, id: Identity) -> bool {
        snapshot.partner(Address::for_partner(id)).unwrap().consent
    }

    #[test]
    fn create_assigns_canonical_sides_regardless_of_argument_order() {
        let engine = TransitionEngine::new();
        let (creator, x, y) = (ident(9), ident(5), ident(3));
        let fwd = engine.apply(&create_op(creator, x, y), &Snapshot::new()).unwrap();
        let rev = engine.apply(&create_op(creator, y, x), &Snapshot::new()).unwrap();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn create_rejects_identical_parties() {
        let engine = TransitionEngine::new();
        let err = engine
            .apply(&create_op(ident(1), ident(2), ident(2)), &Snapshot::new())
            .unwrap_err();
        assert!(matches!(err, AccordError::InvalidInput(_)));
    }

    #[test]
    fn create_rejects_mismatched_agreement_address() {
        let engine = TransitionEngine::new();
        let (a, b, c) = (ident(1), ident(2), ident(3));
        let op = Operation::CreateAgreement {
            initiator: a,
            party_a: a,
            party_b: b,
            agreement: Address::for_agreement(a, c), // wrong pair
        };
        let err = engine.apply(&op, &Snapshot::new()).unwrap_err();
        assert!(matches!(err, AccordError::AddressMismatch { context: "agreement", .. }));
    }

    #[test]
    fn create_rejects_existing_agreement() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = Snapshot::new();
        run(&engine, &mut snapshot, create_op(a, a, b));
        let err = engine.apply(&create_op(b, b, a), &snapshot).unwrap_err();
        assert!(matches!(err, AccordError::AlreadyExists { context: "agreement", .. }));
    }

    #[test]
    fn create_rejects_leftover_partner_slot() {
        let engine = TransitionEngine::new();
        let (a, b, c) = (ident(1), ident(2), ident(3));
        // a went through a full lifecycle with c but never detached
        let mut snapshot = attached_snapshot(a, a, c);
        run(&engine, &mut snapshot, cancel_op(a, a, c));
        let err = engine.apply(&create_op(a, a, b), &snapshot).unwrap_err();
        assert!(matches!(err, AccordError::AlreadyExists { context: "partner slot", .. }));
    }

    #[test]
    fn attach_before_create_fails_not_initialized() {
        let engine = TransitionEngine::new();
        let err = engine
            .apply(&attach_op(ident(1), ident(2), "bob", "always"), &Snapshot::new())
            .unwrap_err();
        assert!(matches!(err, AccordError::NotInitialized { context: "agreement", .. }));
    }

    #[test]
    fn attach_rejects_oversized_texts() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = Snapshot::new();
        run(&engine, &mut snapshot, create_op(a, a, b));

        let long_name = "n".repeat(accord_types::MAX_DISPLAY_NAME_LEN + 1);
        let err = engine
            .apply(&attach_op(a, b, &long_name, "ok"), &snapshot)
            .unwrap_err();
        assert!(matches!(err, AccordError::InvalidInput(_)));

        let long_statement = "s".repeat(accord_types::MAX_STATEMENT_LEN + 1);
        let err = engine
            .apply(&attach_op(a, b, "ok", &long_statement), &snapshot)
            .unwrap_err();
        assert!(matches!(err, AccordError::InvalidInput(_)));
    }

    #[test]
    fn attach_twice_fails_already_exists() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = Snapshot::new();
        run(&engine, &mut snapshot, create_op(a, a, b));
        run(&engine, &mut snapshot, attach_op(a, b, "bob", "always"));
        let err = engine
            .apply(&attach_op(a, b, "bob", "always"), &snapshot)
            .unwrap_err();
        assert!(matches!(err, AccordError::AlreadyExists { context: "partner slot", .. }));
    }

    #[test]
    fn single_consent_moves_to_proposing() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, true));
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Proposing);
        assert!(consent_of(&snapshot, a));
        assert!(!consent_of(&snapshot, b));
    }

    #[test]
    fn consent_order_commutes() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        for (first, second) in [(a, b), (b, a)] {
            let mut snapshot = attached_snapshot(a, a, b);
            run(&engine, &mut snapshot, consent_op(first, second, true));
            run(&engine, &mut snapshot, consent_op(second, first, true));
            assert_eq!(state_of(&snapshot, a, b), AgreementState::Accepted);
            assert!(consent_of(&snapshot, a) && consent_of(&snapshot, b));
        }
    }

    #[test]
    fn declined_consent_keeps_state() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, false));
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Created);

        run(&engine, &mut snapshot, consent_op(a, b, true));
        run(&engine, &mut snapshot, consent_op(b, a, false));
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Proposing);
    }

    #[test]
    fn consent_reassertion_is_silent_noop() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, true));
        let before = snapshot.clone();
        // same side asserts true again: admitted, changes nothing
        let outcome = engine.apply(&consent_op(a, b, true), &snapshot).unwrap();
        commit(&mut snapshot, outcome);
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Proposing);
        assert_eq!(
            snapshot.partner(Address::for_partner(a)),
            before.partner(Address::for_partner(a))
        );
    }

    #[test]
    fn consent_rejected_after_acceptance() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, true));
        run(&engine, &mut snapshot, consent_op(b, a, true));
        let err = engine.apply(&consent_op(a, b, true), &snapshot).unwrap_err();
        assert_eq!(
            err,
            AccordError::InvalidState {
                operation: "give_consent",
                state: AgreementState::Accepted,
            }
        );
    }

    #[test]
    fn consent_rejects_stale_agreement_ref() {
        let engine = TransitionEngine::new();
        let (a, b, c) = (ident(1), ident(2), ident(3));
        let mut snapshot = attached_snapshot(a, a, b);
        // corrupt b's back-reference to point at a different pair
        let b_addr = Address::for_partner(b);
        let mut stale = snapshot.partner(b_addr).unwrap().clone();
        stale.agreement_ref = Some(Address::for_agreement(b, c));
        snapshot.insert_partner(b_addr, stale);

        let err = engine.apply(&consent_op(a, b, true), &snapshot).unwrap_err();
        assert!(matches!(
            err,
            AccordError::ReferenceMismatch { context: "counterpart partner agreement_ref", .. }
        ));
    }

    #[test]
    fn consent_rejects_foreign_owner() {
        let engine = TransitionEngine::new();
        let (a, b, c) = (ident(1), ident(2), ident(3));
        let mut snapshot = attached_snapshot(a, a, b);
        // corrupted store: a's slot holds a record owned by someone else
        let a_addr = Address::for_partner(a);
        let mut stolen = snapshot.partner(a_addr).unwrap().clone();
        stolen.owner = c;
        snapshot.insert_partner(a_addr, stolen);

        let err = engine.apply(&consent_op(a, b, true), &snapshot).unwrap_err();
        assert!(matches!(err, AccordError::Unauthorized(_)));
    }

    #[test]
    fn cancel_allowed_for_initiator_and_participants_only() {
        let engine = TransitionEngine::new();
        let (creator, a, b, outsider) = (ident(9), ident(1), ident(2), ident(7));
        let snapshot = attached_snapshot(creator, a, b);

        let err = engine
            .apply(&cancel_op(outsider, a, b), &snapshot)
            .unwrap_err();
        assert!(matches!(err, AccordError::Unauthorized(_)));
        // rejected operation leaves state untouched
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Created);

        for actor in [creator, a, b] {
            let outcome = engine.apply(&cancel_op(actor, a, b), &snapshot).unwrap();
            assert_eq!(
                outcome.effects,
                vec![Effect::ReclaimAgreement {
                    address: Address::for_agreement(a, b),
                    refund_to: creator,
                }]
            );
        }
    }

    #[test]
    fn cancel_rejected_once_accepted() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, true));
        run(&engine, &mut snapshot, consent_op(b, a, true));

        let err = engine.apply(&cancel_op(a, a, b), &snapshot).unwrap_err();
        assert_eq!(
            err,
            AccordError::InvalidState {
                operation: "cancel_agreement",
                state: AgreementState::Accepted,
            }
        );

        run(&engine, &mut snapshot, withdraw_op(a, b));
        let err = engine.apply(&cancel_op(a, a, b), &snapshot).unwrap_err();
        assert_eq!(
            err,
            AccordError::InvalidState {
                operation: "cancel_agreement",
                state: AgreementState::Withdrawing,
            }
        );
    }

    #[test]
    fn full_withdraw_cycle_reclaims_agreement() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, true));
        run(&engine, &mut snapshot, consent_op(b, a, true));
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Accepted);

        run(&engine, &mut snapshot, withdraw_op(a, b));
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Withdrawing);
        assert!(!consent_of(&snapshot, a));
        assert!(consent_of(&snapshot, b));

        run(&engine, &mut snapshot, withdraw_op(b, a));
        assert!(snapshot.agreement(Address::for_agreement(a, b)).is_none());
        assert!(!consent_of(&snapshot, a));
        assert!(!consent_of(&snapshot, b));
    }

    #[test]
    fn repeat_withdraw_by_same_side_is_noop() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, true));
        run(&engine, &mut snapshot, consent_op(b, a, true));
        run(&engine, &mut snapshot, withdraw_op(a, b));

        // a withdraws again: other side still consents, nothing reclaimed
        let outcome = engine.apply(&withdraw_op(a, b), &snapshot).unwrap();
        assert!(!outcome
            .effects
            .iter()
            .any(|e| matches!(e, Effect::ReclaimAgreement { .. })));
        commit(&mut snapshot, outcome);
        assert_eq!(state_of(&snapshot, a, b), AgreementState::Withdrawing);
    }

    #[test]
    fn withdraw_rejected_before_acceptance() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, consent_op(a, b, true));
        let err = engine.apply(&withdraw_op(a, b), &snapshot).unwrap_err();
        assert_eq!(
            err,
            AccordError::InvalidState {
                operation: "withdraw",
                state: AgreementState::Proposing,
            }
        );
    }

    #[test]
    fn detach_blocked_while_agreement_live() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);

        for state_setup in 0..2 {
            if state_setup == 1 {
                run(&engine, &mut snapshot, consent_op(a, b, true));
                run(&engine, &mut snapshot, consent_op(b, a, true));
            }
            let err = engine.apply(&detach_op(a), &snapshot).unwrap_err();
            assert!(matches!(err, AccordError::InvalidState { operation: "detach_partner", .. }));
        }
    }

    #[test]
    fn detach_succeeds_after_cancel() {
        let engine = TransitionEngine::new();
        let (a, b) = (ident(1), ident(2));
        let mut snapshot = attached_snapshot(a, a, b);
        run(&engine, &mut snapshot, cancel_op(b, a, b));

        let outcome = engine.apply(&detach_op(a), &snapshot).unwrap();
        assert_eq!(
            outcome.effects,
            vec![Effect::ReclaimPartner {
                address: Address::for_partner(a),
                refund_to: a,
            }]
        );
        commit(&mut snapshot, outcome);
        assert!(snapshot.partner(Address::for_partner(a)).is_none());
    }

    #[test]
    fn detach_of_missing_partner_fails_not_initialized() {
        let engine = TransitionEngine::new();
        let err = engine
            .apply(&detach_op(ident(4)), &Snapshot::new())
            .unwrap_err();
        assert!(matches!(err, AccordError::NotInitialized { context: "partner", .. }));
    }
}
