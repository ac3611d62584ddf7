//! # Transparent Proof System
//!
//! A deterministic, transparent implementation of [`ProofSystem`].
//! Proofs are SHA-256 transcripts over the public signals and the
//! artifact paths — they provide no zero-knowledge privacy but are
//! verifiable by recomputation and satisfy the trait interface, so the
//! rest of the stack exercises the exact code paths a SNARK backend
//! would.
//!
//! ## Security Notice
//!
//! This implementation provides NO zero-knowledge privacy. It exists so
//! the flow, the wire format, and the verifier-side checks are testable
//! without the circuit toolchain.

use sha2::{Digest, Sha256};

use crate::artifacts::ProverArtifacts;
use crate::traits::{ProofError, ProofSystem, SolidityProof, VerifyError};
use crate::witness::{MembershipWitness, PublicSignals};

const TRANSCRIPT_TAG: &[u8] = b"zkgreet.transparent.v1";

/// A transparent proof: eight 32-byte transcript words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransparentProof {
    words: [[u8; 32]; 8],
}

/// Deterministic transparent proof system.
#[derive(Debug, Default, Clone)]
pub struct TransparentProofSystem;

fn transcript_words(
    artifacts: &ProverArtifacts,
    signals: &PublicSignals,
) -> [[u8; 32]; 8] {
    let mut seed = Sha256::new();
    seed.update(TRANSCRIPT_TAG);
    seed.update(artifacts.circuit().to_string_lossy().as_bytes());
    seed.update(artifacts.proving_key().to_string_lossy().as_bytes());
    seed.update(signals.root.as_bytes());
    seed.update(signals.nullifier_hash.as_bytes());
    seed.update(signals.signal_hash.as_bytes());
    let seed: [u8; 32] = seed.finalize().into();

    let mut words = [[0u8; 32]; 8];
    for (i, word) in words.iter_mut().enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update([i as u8]);
        *word = hasher.finalize().into();
    }
    words
}

impl ProofSystem for TransparentProofSystem {
    type Proof = TransparentProof;

    fn prove(
        &self,
        artifacts: &ProverArtifacts,
        witness: &MembershipWitness,
    ) -> Result<Self::Proof, ProofError> {
        // The witness must be self-consistent before a proof is issued.
        let valid = witness
            .path()
            .verify()
            .map_err(|e| ProofError::WitnessError(e.to_string()))?;
        if !valid {
            return Err(ProofError::WitnessError(
                "merkle path does not reach the declared root".to_string(),
            ));
        }
        let signals = witness
            .public_signals()
            .map_err(|e| ProofError::WitnessError(e.to_string()))?;
        Ok(TransparentProof {
            words: transcript_words(artifacts, &signals),
        })
    }

    fn verify(
        &self,
        artifacts: &ProverArtifacts,
        proof: &Self::Proof,
        signals: &PublicSignals,
    ) -> Result<bool, VerifyError> {
        Ok(proof.words == transcript_words(artifacts, signals))
    }

    fn pack_to_solidity(&self, proof: &Self::Proof) -> SolidityProof {
        let mut packed = [0u8; 256];
        for (i, word) in proof.words.iter().enumerate() {
            packed[i * 32..(i + 1) * 32].copy_from_slice(word);
        }
        SolidityProof(packed)
    }
}
