//! # zkgreet-zkp — Membership Proof Layer
//!
//! Turns an identity, a membership set, and a statement into a
//! zero-knowledge membership proof plus its public signals. The proving
//! system itself is an opaque external collaborator behind the
//! [`ProofSystem`] trait; this crate owns the witness assembly, the
//! public-signal computation, the artifact handling, and the packing of
//! proofs into the on-chain verifier's fixed-size argument layout.
//!
//! ## Security Invariant
//!
//! The witness combines identity secrets with the Merkle path and is
//! consumed exactly once per proof. It never implements `Serialize` and
//! never crosses the network boundary — only the proof and the public
//! signals do.

pub mod artifacts;
pub mod traits;
pub mod transparent;
pub mod witness;

pub use artifacts::ProverArtifacts;
pub use traits::{ProofError, ProofSystem, SolidityProof, VerifyError};
pub use transparent::TransparentProofSystem;
pub use witness::{MembershipWitness, PublicSignals};

use thiserror::Error;

use zkgreet_crypto::{CryptoError, Fr, Identity, MembershipSet};

/// Error produced by the membership proof facade.
#[derive(Error, Debug)]
pub enum MembershipProofError {
    /// The identity commitment is absent from the membership set.
    #[error("identity commitment is not a member of the set")]
    NotAMember,

    /// A cryptographic operation failed.
    #[error(transparent)]
    Crypto(CryptoError),

    /// The underlying prover failed.
    #[error(transparent)]
    Prover(#[from] ProofError),
}

impl From<CryptoError> for MembershipProofError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::LeafNotFound => Self::NotAMember,
            other => Self::Crypto(other),
        }
    }
}

/// Prove that `identity` is a member of `set` and attests to `statement`.
///
/// Returns the public signals and the proof packed for the on-chain
/// verifier. The proving artifacts are passed through to the proof
/// system unchanged.
pub fn prove_membership<P: ProofSystem>(
    system: &P,
    artifacts: &ProverArtifacts,
    identity: &Identity,
    set: &MembershipSet,
    statement: &str,
) -> Result<(PublicSignals, SolidityProof), MembershipProofError> {
    let commitment: Fr = identity.commitment()?;
    let path = set.prove_membership(commitment)?;
    let witness = MembershipWitness::new(identity.clone(), path, statement);
    let signals = witness.public_signals()?;
    let proof = system.prove(artifacts, &witness)?;
    let packed = system.pack_to_solidity(&proof);
    Ok((signals, packed))
}
