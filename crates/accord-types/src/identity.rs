use serde::{Deserialize, Serialize};

/// Opaque public credential naming an actor.
///
/// The core never inspects the credential beyond byte equality and ordering.
/// Authenticity (that an inbound operation was really signed by this
/// identity) is the host's responsibility; by the time an operation reaches
/// the engine its actor identity is assumed verified.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    pub const LEN: usize = 32;

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short display form (first 8 bytes hex).
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "id:{}", self.short_id())
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({})", self.short_id())
    }
}

/// Canonical total order over a pair of distinct identities.
///
/// Byte-wise lexicographic comparison of the raw credentials, which for
/// fixed-length arrays is the same as big-endian numeric comparison. Every
/// derivation involving a pair sorts through here first so that argument
/// order at the call site can never influence a derived address.
pub fn canonical_pair(a: Identity, b: Identity) -> (Identity, Identity) {
    if a.as_bytes() <= b.as_bytes() {
        (a, b)
    } else {
        (b, a)
    }
}
