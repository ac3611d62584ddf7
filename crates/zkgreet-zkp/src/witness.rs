//! # Witness Assembly and Public Signals
//!
//! The witness combines the identity secrets, the Merkle path, the
//! external nullifier, and the statement — the full private and public
//! input set the proving circuit consumes. The external nullifier is the
//! Merkle root: a proof is scoped to one exact published set, and the
//! nullifier hash lets a verifier reject a second proof from the same
//! identity for the same scope. Enforcing that rejection is the
//! verifier's responsibility, not this crate's.
//!
//! ## Security Invariant
//!
//! `MembershipWitness` does not implement `Serialize` and its `Debug`
//! output carries no secret material. Only [`PublicSignals`] may be
//! transmitted.

use serde::{Deserialize, Serialize};

use zkgreet_crypto::poseidon::{fr_to_dec, poseidon_hash, signal_hash};
use zkgreet_crypto::{CryptoError, Fr, Identity, MerklePath};

/// The full input set for one membership proof. Consumed exactly once.
pub struct MembershipWitness {
    identity: Identity,
    path: MerklePath,
    external_nullifier: Fr,
    statement: String,
}

/// The public outputs of a membership proof, as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSignals {
    /// The Merkle root of the membership set.
    pub root: String,
    /// Poseidon(external_nullifier, identity_nullifier) — deterministic
    /// in the identity, independent of the statement.
    pub nullifier_hash: String,
    /// Hash of the attested statement.
    pub signal_hash: String,
}

impl MembershipWitness {
    /// Assemble a witness. The external nullifier is the path's root.
    pub fn new(identity: Identity, path: MerklePath, statement: &str) -> Self {
        let external_nullifier = path.root;
        Self {
            identity,
            path,
            external_nullifier,
            statement: statement.to_string(),
        }
    }

    /// The Merkle root the proof is scoped to.
    pub fn root(&self) -> Fr {
        self.path.root
    }

    /// The attested statement.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// The inclusion path for the identity commitment.
    pub fn path(&self) -> &MerklePath {
        &self.path
    }

    /// The identity whose membership is being proven.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Compute the nullifier hash public signal.
    pub fn nullifier_hash(&self) -> Result<Fr, CryptoError> {
        poseidon_hash(&[self.external_nullifier, self.identity.nullifier()])
    }

    /// Compute all public signals.
    pub fn public_signals(&self) -> Result<PublicSignals, CryptoError> {
        Ok(PublicSignals {
            root: fr_to_dec(&self.path.root),
            nullifier_hash: fr_to_dec(&self.nullifier_hash()?),
            signal_hash: fr_to_dec(&signal_hash(&self.statement)),
        })
    }
}

impl std::fmt::Debug for MembershipWitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipWitness")
            .field("identity", &self.identity)
            .field("root", &fr_to_dec(&self.path.root))
            .field("statement", &self.statement)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkgreet_crypto::MembershipSet;

    fn witness_for(signature: &[u8], statement: &str) -> MembershipWitness {
        let identity = Identity::from_signature(signature);
        let commitment = identity.commitment().unwrap();
        let set = MembershipSet::new(vec![Fr::from(1u64), commitment]);
        let path = set.prove_membership(commitment).unwrap();
        MembershipWitness::new(identity, path, statement)
    }

    #[test]
    fn nullifier_hash_independent_of_statement() {
        let a = witness_for(b"sig", "Hello world");
        let b = witness_for(b"sig", "something else entirely");
        assert_eq!(a.nullifier_hash().unwrap(), b.nullifier_hash().unwrap());
    }

    #[test]
    fn nullifier_hash_differs_across_identities() {
        let a = witness_for(b"sig-one", "Hello world");
        let b = witness_for(b"sig-two", "Hello world");
        assert_ne!(a.nullifier_hash().unwrap(), b.nullifier_hash().unwrap());
    }

    #[test]
    fn public_signals_are_decimal_strings() {
        let signals = witness_for(b"sig", "Hello world").public_signals().unwrap();
        for value in [&signals.root, &signals.nullifier_hash, &signals.signal_hash] {
            assert!(value.bytes().all(|b| b.is_ascii_digit()), "not decimal: {value}");
        }
    }

    #[test]
    fn public_signals_serialize_camel_case() {
        let signals = witness_for(b"sig", "Hello world").public_signals().unwrap();
        let json = serde_json::to_value(&signals).unwrap();
        assert!(json.get("nullifierHash").is_some());
        assert!(json.get("signalHash").is_some());
        assert!(json.get("root").is_some());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let witness = witness_for(b"sig", "Hello world");
        let rendered = format!("{witness:?}");
        assert!(rendered.contains("[REDACTED]"));
    }
}
