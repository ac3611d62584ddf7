//! # Identity Derivation
//!
//! Derives a cryptographic identity from a wallet signature over a fixed
//! prompt. The derivation is message-based and deterministic: identical
//! signatures always yield identical identities, with no added
//! randomness. That determinism is a design choice — it lets a user
//! recover the same identity from the same wallet on any device.
//!
//! ## Security Invariant
//!
//! - The trapdoor and nullifier are secrets. `Identity` does not
//!   implement `Serialize`, and its `Debug` output is redacted, so the
//!   secrets cannot leak through logs or response bodies.
//! - Only the commitment — Poseidon(nullifier, trapdoor) — is public.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::poseidon::{fr_from_be_bytes_mod, poseidon_hash, Fr};
use crate::CryptoError;

/// The fixed prompt the wallet signs to create an identity.
pub const IDENTITY_PROMPT: &str = "Sign this message to create your identity!";

const TRAPDOOR_TAG: &[u8] = b"zkgreet.identity.trapdoor";
const NULLIFIER_TAG: &[u8] = b"zkgreet.identity.nullifier";

/// A derived identity: the secret trapdoor/nullifier pair.
///
/// Obtained only through [`Identity::from_signature`]. Never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    trapdoor: Fr,
    nullifier: Fr,
}

impl Identity {
    /// Derive an identity from a signature over [`IDENTITY_PROMPT`].
    ///
    /// Each secret is the domain-separated SHA-256 of the signature
    /// bytes, reduced into the scalar field.
    pub fn from_signature(signature: &[u8]) -> Self {
        let trapdoor = derive_secret(signature, TRAPDOOR_TAG);
        let nullifier = derive_secret(signature, NULLIFIER_TAG);
        Self { trapdoor, nullifier }
    }

    /// The secret trapdoor component.
    pub fn trapdoor(&self) -> Fr {
        self.trapdoor
    }

    /// The secret nullifier component.
    pub fn nullifier(&self) -> Fr {
        self.nullifier
    }

    /// The public identity commitment: Poseidon(nullifier, trapdoor).
    pub fn commitment(&self) -> Result<Fr, CryptoError> {
        poseidon_hash(&[self.nullifier, self.trapdoor])
    }
}

fn derive_secret(signature: &[u8], tag: &[u8]) -> Fr {
    let mut hasher = Sha256::new();
    hasher.update(signature);
    hasher.update(tag);
    let mut digest: [u8; 32] = hasher.finalize().into();
    let secret = fr_from_be_bytes_mod(&digest);
    digest.zeroize();
    secret
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("trapdoor", &"[REDACTED]")
            .field("nullifier", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poseidon::fr_to_dec;

    #[test]
    fn same_signature_same_identity() {
        let a = Identity::from_signature(b"signature-bytes");
        let b = Identity::from_signature(b"signature-bytes");
        assert_eq!(a, b);
        assert_eq!(a.commitment().unwrap(), b.commitment().unwrap());
    }

    #[test]
    fn different_signatures_different_commitments() {
        let a = Identity::from_signature(b"signature-one");
        let b = Identity::from_signature(b"signature-two");
        assert_ne!(a.commitment().unwrap(), b.commitment().unwrap());
    }

    #[test]
    fn trapdoor_and_nullifier_are_distinct() {
        let id = Identity::from_signature(b"signature-bytes");
        assert_ne!(id.trapdoor(), id.nullifier());
    }

    #[test]
    fn debug_output_is_redacted() {
        let id = Identity::from_signature(b"signature-bytes");
        let rendered = format!("{id:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains(&fr_to_dec(&id.trapdoor())));
    }
}
