//! # Proof System Trait
//!
//! Defines the abstract interface for zero-knowledge proof systems.
//! All implementations (transparent, Groth16, PLONK) must satisfy this
//! trait.
//!
//! ## Security Invariant
//!
//! The trait requires `Send + Sync` bounds for safe concurrent access.
//! Proof generation and verification are pure functions with no side
//! effects; the prover artifacts are passed through unchanged.

use thiserror::Error;

use crate::artifacts::ProverArtifacts;
use crate::witness::{MembershipWitness, PublicSignals};

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The witness is malformed or unsatisfiable.
    #[error("witness error: {0}")]
    WitnessError(String),
    /// A proving artifact is missing or unreadable.
    #[error("artifact error: {0}")]
    ArtifactError(String),
    /// Internal prover error.
    #[error("prover error: {0}")]
    ProverError(String),
}

/// Error during proof verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The proof is invalid.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
    /// The verifying material is incompatible.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),
}

/// A proof packed into the fixed-size argument layout expected by the
/// on-chain verifier: eight 32-byte words (two G1 points and one G2
/// point in Solidity calldata order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidityProof(pub [u8; 256]);

impl SolidityProof {
    /// Hex-encode the packed proof with a `0x` prefix.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(2 + 512);
        out.push_str("0x");
        for b in self.0 {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }
}

/// Abstract interface for a zero-knowledge proof system.
///
/// Each implementation provides its own proof type. The trait ensures
/// that the transparent reference system and a real SNARK backend are
/// interchangeable at compile time.
pub trait ProofSystem: Send + Sync {
    /// The proof type produced by this system.
    type Proof: Send + Sync;

    /// Generate a proof from a witness.
    fn prove(
        &self,
        artifacts: &ProverArtifacts,
        witness: &MembershipWitness,
    ) -> Result<Self::Proof, ProofError>;

    /// Verify a proof against its public signals.
    fn verify(
        &self,
        artifacts: &ProverArtifacts,
        proof: &Self::Proof,
        signals: &PublicSignals,
    ) -> Result<bool, VerifyError>;

    /// Pack a proof into the on-chain verifier's argument layout.
    fn pack_to_solidity(&self, proof: &Self::Proof) -> SolidityProof;
}
