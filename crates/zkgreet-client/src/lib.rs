//! # zkgreet-client — Client Surfaces
//!
//! The only crate in the workspace that talks to the network. It holds:
//!
//! - **Wallet connector** — the injected-provider JSON-RPC contract
//!   (`eth_requestAccounts`, `personal_sign`) behind the
//!   [`wallet::WalletProvider`] port, plus a deterministic local signer.
//! - **Commitment registry** — fetches and parses the published
//!   membership set (`identityCommitments.json`).
//! - **Submission client** — the single-attempt `POST /api/greet` call.
//! - **Greeting watcher** — polls the contract for `NewGreeting` events
//!   and delivers them over a bounded channel with an explicit shutdown
//!   handle.
//! - **Flow orchestrator** — drives the submission state machine and
//!   narrates every step into the display state.
//!
//! ## Crate Policy
//!
//! - All HTTP goes through `reqwest`; every client takes explicit base
//!   URLs from [`config::ClientConfig`].
//! - Errors cross the flow boundary only as `zkgreet_core::GreetError`.

pub mod config;
pub mod flow;
pub(crate) mod rpc;
pub mod registry;
pub mod submit;
pub mod wallet;
pub mod watcher;

pub use config::ClientConfig;
pub use flow::GreetFlow;
pub use registry::CommitmentRegistry;
pub use submit::{GreetingApi, SubmissionOutcome, SUCCESS_MESSAGE};
pub use wallet::{LocalWallet, RpcWallet, WalletError, WalletProvider};
pub use watcher::{GreetingEvent, GreetingFeed, GreetingWatcher, WatcherHandle};

use thiserror::Error;

/// Error in client-side network operations (registry fetch, RPC
/// transport, submission transport).
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP request itself failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response arrived but could not be interpreted.
    #[error("bad response: {0}")]
    BadResponse(String),

    /// A URL could not be constructed from the configured base.
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}
