//! # zkgreet-crypto — Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for zkgreet:
//!
//! - **Poseidon** circuit-friendly hashing over the BN254 scalar field,
//!   plus field-element encoding helpers (decimal strings, byte reduction).
//! - **Identity derivation** — deterministic trapdoor/nullifier pair from
//!   a wallet signature, and the public identity commitment.
//! - **Membership Merkle tree** — fixed depth 20, zero-value padding,
//!   inclusion paths and verification.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkgreet-*` crates.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   Poseidon, real SHA-256, real Keccak-256.
//! - Identity secrets never implement `Serialize`.
//! - `unsafe` prohibited.

pub mod identity;
pub mod merkle;
pub mod poseidon;

pub use identity::{Identity, IDENTITY_PROMPT};
pub use merkle::{MembershipSet, MerklePath, MerkleTree, TREE_DEPTH};
pub use poseidon::{fr_from_dec, fr_to_dec, poseidon_hash, signal_hash, Fr};

use thiserror::Error;

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Poseidon hashing failed.
    #[error("hash error: {0}")]
    Hash(String),

    /// A field element could not be parsed or encoded.
    #[error("field error: {0}")]
    Field(String),

    /// Merkle tree construction or proof generation failed.
    #[error("tree error: {0}")]
    Tree(String),

    /// The requested leaf is absent from the membership set.
    #[error("leaf not found in membership set")]
    LeafNotFound,
}
