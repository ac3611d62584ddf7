//! # zkgreet-cli — Command-Line Interface
//!
//! Two subcommands:
//!
//! - `greet` — run the anonymous greeting flow once: validate the form,
//!   connect the wallet, derive the identity, prove membership, submit.
//! - `watch` — subscribe to the greeting contract and print each
//!   `NewGreeting` event as it arrives.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business
//!   logic; handler functions delegate to `zkgreet-client`.

pub mod greet;
pub mod watch;
