use crate::identity::{canonical_pair, Identity};
use serde::{Deserialize, Serialize};

/// Deterministic, collision-resistant record identifier.
///
/// Addresses are the sole key for both record tables. There are no secondary
/// indices anywhere: every lookup path is re-derivable from the identities an
/// operation names, and every caller-supplied address is checked against its
/// re-derivation before use.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

/// Domain-separation tag for partner record addresses.
const PARTNER_TAG: &[u8] = b"accord:partner:v1";
/// Domain-separation tag for agreement record addresses.
const AGREEMENT_TAG: &[u8] = b"accord:agreement:v1";

impl Address {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derive the partner record address for an identity.
    ///
    /// A pure function of the identity alone, so each identity owns at most
    /// one partner slot at a time.
    pub fn for_partner(owner: Identity) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(PARTNER_TAG);
        hasher.update(owner.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Derive the agreement record address for an unordered identity pair.
    ///
    /// Sorts the pair canonically before hashing, so the derivation is
    /// commutative in its logical pair: `for_agreement(x, y)` and
    /// `for_agreement(y, x)` are the same address.
    pub fn for_agreement(a: Identity, b: Identity) -> Self {
        let (lower, higher) = canonical_pair(a, b);
        let mut hasher = blake3::Hasher::new();
        hasher.update(AGREEMENT_TAG);
        hasher.update(lower.as_bytes());
        hasher.update(higher.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Short display form (first 8 bytes hex).
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "addr:{}", self.short_id())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.short_id())
    }
}
