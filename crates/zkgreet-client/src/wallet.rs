//! # Wallet Connector
//!
//! The narrow port to the injected wallet provider. Detection, account
//! access, and message signing — nothing else crosses this boundary.
//!
//! [`RpcWallet`] speaks the standard injected-provider request contract
//! over JSON-RPC (`eth_requestAccounts`, `personal_sign`); requesting
//! accounts may prompt the user, and a rejection surfaces as
//! [`WalletError::UserRejected`] (EIP-1193 code 4001). [`LocalWallet`]
//! is a deterministic Ed25519 signer for tests and offline use.
//!
//! ## Security Invariant
//!
//! `LocalWallet` never serializes or logs its private key.

use std::future::Future;
use std::sync::Mutex;

use ed25519_dalek::{Signer, SigningKey};
use rand_core::OsRng;
use serde_json::json;
use sha3::{Digest, Keccak256};
use thiserror::Error;
use url::Url;

use crate::rpc::{self, RpcCallError};

/// EIP-1193: the user rejected the request.
const USER_REJECTED_CODE: i64 = 4001;

/// Error in wallet operations.
#[derive(Error, Debug)]
pub enum WalletError {
    /// No wallet provider could be detected at the configured endpoint.
    #[error("no wallet provider detected")]
    ProviderUnavailable,

    /// The user rejected the permission prompt or signature request.
    #[error("request rejected by user")]
    UserRejected,

    /// The provider answered with an unexpected error or payload.
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<RpcCallError> for WalletError {
    fn from(err: RpcCallError) -> Self {
        match err {
            RpcCallError::Remote(body) if body.code == USER_REJECTED_CODE => Self::UserRejected,
            other => Self::Provider(other.to_string()),
        }
    }
}

/// Port to a wallet capable of granting account access and signing
/// arbitrary messages.
pub trait WalletProvider: Send + Sync {
    /// Request account access. May prompt the user.
    fn request_accounts(&self)
        -> impl Future<Output = Result<Vec<String>, WalletError>> + Send;

    /// Sign a message with the connected account.
    fn sign_message(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<Vec<u8>, WalletError>> + Send;
}

/// Wallet connector speaking the injected-provider JSON-RPC contract.
#[derive(Debug)]
pub struct RpcWallet {
    http: reqwest::Client,
    url: Url,
    /// Account granted by `eth_requestAccounts`, cached for signing.
    account: Mutex<Option<String>>,
}

impl RpcWallet {
    /// Detect a provider at `url`.
    ///
    /// Probes the endpoint with `eth_chainId`; an unreachable or
    /// non-JSON-RPC endpoint fails with
    /// [`WalletError::ProviderUnavailable`].
    pub async fn detect(http: reqwest::Client, url: Url) -> Result<Self, WalletError> {
        rpc::call(&http, &url, "eth_chainId", json!([]))
            .await
            .map_err(|_| WalletError::ProviderUnavailable)?;
        Ok(Self {
            http,
            url,
            account: Mutex::new(None),
        })
    }

    fn connected_account(&self) -> Result<String, WalletError> {
        self.account
            .lock()
            .map_err(|_| WalletError::Provider("account cache poisoned".to_string()))?
            .clone()
            .ok_or_else(|| WalletError::Provider("no account connected".to_string()))
    }

    fn remember_account(&self, account: String) -> Result<(), WalletError> {
        *self
            .account
            .lock()
            .map_err(|_| WalletError::Provider("account cache poisoned".to_string()))? =
            Some(account);
        Ok(())
    }
}

impl WalletProvider for RpcWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        let result = rpc::call(&self.http, &self.url, "eth_requestAccounts", json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(result)
            .map_err(|e| WalletError::Provider(format!("malformed accounts list: {e}")))?;
        let first = accounts
            .first()
            .ok_or_else(|| WalletError::Provider("provider granted no accounts".to_string()))?;
        self.remember_account(first.clone())?;
        Ok(accounts)
    }

    async fn sign_message(&self, message: &str) -> Result<Vec<u8>, WalletError> {
        let account = self.connected_account()?;
        let data = rpc::to_hex(message.as_bytes());
        let result = rpc::call(
            &self.http,
            &self.url,
            "personal_sign",
            json!([data, account]),
        )
        .await?;
        let signature: String = serde_json::from_value(result)
            .map_err(|e| WalletError::Provider(format!("malformed signature: {e}")))?;
        rpc::from_hex(&signature).map_err(WalletError::Provider)
    }
}

/// Deterministic local signer for tests and offline use.
///
/// Does not implement `Serialize` and redacts its key in `Debug`.
pub struct LocalWallet {
    signing_key: SigningKey,
    address: String,
}

impl LocalWallet {
    /// Generate a wallet with a fresh random key.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Build a wallet from a fixed seed. Deterministic.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let digest = Keccak256::digest(signing_key.verifying_key().as_bytes());
        let address = rpc::to_hex(&digest[12..]);
        Self {
            signing_key,
            address,
        }
    }

    /// The wallet's account address.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl WalletProvider for LocalWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        Ok(vec![self.address.clone()])
    }

    async fn sign_message(&self, message: &str) -> Result<Vec<u8>, WalletError> {
        Ok(self.signing_key.sign(message.as_bytes()).to_bytes().to_vec())
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}
