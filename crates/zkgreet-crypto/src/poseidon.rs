//! # Poseidon Hashing and Field Helpers
//!
//! Circuit-friendly hashing over the BN254 scalar field, using the Circom
//! parameterization so digests match what the proving circuit computes.
//!
//! The membership set publishes commitments as decimal strings; the
//! helpers here convert between that representation and field elements.
//! The signal hash follows the EVM convention: Keccak-256 of the
//! statement, shifted right by 8 bits so the result always fits the
//! field.

use std::str::FromStr;

use ark_ff::PrimeField;
use light_poseidon::{Poseidon, PoseidonHasher};
use sha3::{Digest, Keccak256};

use crate::CryptoError;

/// The BN254 scalar field element type used throughout zkgreet.
pub type Fr = ark_bn254::Fr;

/// Compute a Poseidon hash of the given field elements.
///
/// The hasher width is chosen from the input arity, matching Circom's
/// `Poseidon(n)` component.
pub fn poseidon_hash(inputs: &[Fr]) -> Result<Fr, CryptoError> {
    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len())
        .map_err(|e| CryptoError::Hash(format!("poseidon init: {e}")))?;
    hasher
        .hash(inputs)
        .map_err(|e| CryptoError::Hash(format!("poseidon hash: {e}")))
}

/// Parse a field element from a decimal string.
pub fn fr_from_dec(s: &str) -> Result<Fr, CryptoError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CryptoError::Field(format!(
            "expected a decimal field element, got {s:?}"
        )));
    }
    Fr::from_str(s).map_err(|_| CryptoError::Field(format!("value out of field range: {s}")))
}

/// Render a field element as a decimal string.
pub fn fr_to_dec(v: &Fr) -> String {
    v.into_bigint().to_string()
}

/// Reduce big-endian bytes into a field element modulo the field order.
pub fn fr_from_be_bytes_mod(bytes: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(bytes)
}

/// Hash a plaintext statement into a field element.
///
/// Keccak-256 of the UTF-8 bytes, shifted right 8 bits (the top 31 bytes
/// interpreted big-endian), so the value is always below the BN254
/// modulus.
pub fn signal_hash(statement: &str) -> Fr {
    let digest = Keccak256::digest(statement.as_bytes());
    fr_from_be_bytes_mod(&digest[..31])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poseidon_is_deterministic() {
        let a = Fr::from(7u64);
        let b = Fr::from(11u64);
        let h1 = poseidon_hash(&[a, b]).unwrap();
        let h2 = poseidon_hash(&[a, b]).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn poseidon_is_order_sensitive() {
        let a = Fr::from(7u64);
        let b = Fr::from(11u64);
        assert_ne!(
            poseidon_hash(&[a, b]).unwrap(),
            poseidon_hash(&[b, a]).unwrap()
        );
    }

    #[test]
    fn poseidon_arity_matters() {
        let a = Fr::from(7u64);
        assert_ne!(
            poseidon_hash(&[a]).unwrap(),
            poseidon_hash(&[a, Fr::from(0u64)]).unwrap()
        );
    }

    #[test]
    fn decimal_round_trip() {
        let v = Fr::from(123456789u64);
        let s = fr_to_dec(&v);
        assert_eq!(s, "123456789");
        assert_eq!(fr_from_dec(&s).unwrap(), v);
    }

    #[test]
    fn decimal_rejects_garbage() {
        assert!(fr_from_dec("").is_err());
        assert!(fr_from_dec("0x12").is_err());
        assert!(fr_from_dec("12.5").is_err());
        assert!(fr_from_dec("-1").is_err());
    }

    #[test]
    fn signal_hash_is_deterministic_and_statement_sensitive() {
        assert_eq!(signal_hash("Hello world"), signal_hash("Hello world"));
        assert_ne!(signal_hash("Hello world"), signal_hash("Hello worlds"));
    }
}
