//! # zkgreet-core — Foundational Types for zkgreet
//!
//! This crate is the leaf of the zkgreet dependency DAG. It defines the
//! types every other crate shares: the greeting form and its validation
//! rules, the submission flow state machine, the display state the UI
//! renders, the wire types for the `/api/greet` endpoint, and the error
//! hierarchy.
//!
//! ## Key Design Principles
//!
//! 1. **Validated constructors.** A `GreetingPayload` can only be obtained
//!    by validating a `GreetingForm`. No bare user input flows downstream.
//!
//! 2. **One error taxonomy.** `GreetError` enumerates exactly the failure
//!    classes the flow can surface: `ProviderUnavailable`, `UserRejected`,
//!    `NotAMember`, `ProofGenerationFailure`, `SubmissionFailure`, plus
//!    structured conversions from lower-level errors.
//!
//! 3. **Explicit state machine.** `FlowStage` names every step of the
//!    submission flow; `Failed` and `Success` are terminal.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkgreet-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod flow;
pub mod form;
pub mod wire;

pub use error::{FormErrors, GreetError};
pub use flow::{DisplayState, FlowStage};
pub use form::{GreetingForm, GreetingPayload};
pub use wire::GreetSubmission;
