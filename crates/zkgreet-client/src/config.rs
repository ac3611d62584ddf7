//! Client configuration.
//!
//! Explicit construction only — the protocol surfaces carry no
//! environment-variable configuration. Defaults point at the local
//! development stack the page ships against.

use std::time::Duration;

use url::Url;

/// The contract address the page watches for `NewGreeting` events.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

/// The statement proved and submitted by default.
pub const DEFAULT_GREETING: &str = "Hello world";

/// Configuration for all client surfaces.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend serving `/api/greet` and
    /// `identityCommitments.json`.
    pub api_base_url: Url,
    /// JSON-RPC endpoint of the wallet provider and the read-only chain
    /// provider.
    pub rpc_url: Url,
    /// Address of the greeting contract.
    pub contract_address: String,
    /// The statement to prove and submit.
    pub greeting: String,
    /// Path to the fixed circuit binary.
    pub circuit_path: String,
    /// Path to the fixed proving key.
    pub proving_key_path: String,
    /// Watcher poll interval.
    pub poll_interval: Duration,
    /// Request timeout for HTTP calls.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration pointing at the local development stack.
    pub fn default_local() -> Result<Self, url::ParseError> {
        Ok(Self {
            api_base_url: Url::parse("http://localhost:3000")?,
            rpc_url: Url::parse("http://localhost:8545")?,
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            circuit_path: "./semaphore.wasm".to_string(),
            proving_key_path: "./semaphore_final.zkey".to_string(),
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
        })
    }
}
