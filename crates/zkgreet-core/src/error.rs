//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout zkgreet. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! The top-level `GreetError` mirrors the failure classes a user can
//! actually observe: no wallet, permission denied, not in the membership
//! set, prover failure, or a server-side rejection. Lower-level crates
//! define their own error enums and convert into `GreetError` at the
//! flow boundary, so the narration shown to the user is always one of
//! these variants rendered through `Display`.

use thiserror::Error;

/// Top-level error type for the zkgreet submission flow.
#[derive(Error, Debug)]
pub enum GreetError {
    /// No injected wallet provider could be detected.
    #[error("no wallet provider detected")]
    ProviderUnavailable,

    /// The user rejected the wallet permission prompt or the signature
    /// request.
    #[error("wallet request rejected by user")]
    UserRejected,

    /// The identity commitment is absent from the published membership set.
    #[error("identity commitment is not a member of the published set")]
    NotAMember,

    /// The underlying prover failed to produce a proof.
    #[error("proof generation failed: {0}")]
    ProofGenerationFailure(String),

    /// The server rejected the submission; the message is the response
    /// body, shown verbatim.
    #[error("{0}")]
    SubmissionFailure(String),

    /// The form did not validate; submission is blocked.
    #[error("form validation failed: {0}")]
    InvalidForm(#[from] FormErrors),

    /// A cryptographic operation failed (hashing, field parsing, tree
    /// construction).
    #[error("crypto error: {0}")]
    Crypto(String),

    /// A network operation other than the submission itself failed
    /// (commitment-set fetch, RPC transport).
    #[error("transport error: {0}")]
    Transport(String),
}

/// The set of field-level validation errors produced by form validation.
///
/// Collected as a set rather than failing on the first violation so the
/// UI can surface every offending field at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors {
    /// Field-level violations, in field order.
    pub fields: Vec<FieldError>,
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for FormErrors {}

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field name.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FormErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Record a violation against a field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether any violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn render(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for FormErrors {
    fn default() -> Self {
        Self::new()
    }
}
