//! # Wire Types — `/api/greet` Request Body
//!
//! The typed request struct shared between the form model and the
//! submission client. The field names and casing are fixed by the
//! backend contract and must not change.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/greet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetSubmission {
    /// The plaintext statement being attested to.
    pub greeting: String,
    /// Decimal string of the nullifier hash public signal.
    pub nullifier_hash: String,
    /// The proof packed into the on-chain verifier's fixed-size argument
    /// layout, hex-encoded with a `0x` prefix.
    pub solidity_proof: String,
}
