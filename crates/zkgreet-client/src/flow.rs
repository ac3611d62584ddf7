//! # Submission Flow Orchestrator
//!
//! Drives one greeting submission through its state machine:
//!
//! IDLE → CONNECTING_WALLET → DERIVING_IDENTITY → GENERATING_PROOF →
//! SUBMITTING → SUCCESS | FAILED
//!
//! Every step is narrated into the display state. No step is retried;
//! the first error moves the flow to `Failed` with the error text as the
//! final narration, and a server rejection surfaces its body verbatim.

use zkgreet_core::{DisplayState, FlowStage, GreetError, GreetSubmission, GreetingForm};
use zkgreet_crypto::{Identity, IDENTITY_PROMPT};
use zkgreet_zkp::{prove_membership, MembershipProofError, ProofSystem, ProverArtifacts};

use crate::config::ClientConfig;
use crate::registry::CommitmentRegistry;
use crate::submit::{GreetingApi, SubmissionOutcome, SUCCESS_MESSAGE};
use crate::wallet::{WalletError, WalletProvider};
use crate::ClientError;

impl From<WalletError> for GreetError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::ProviderUnavailable => Self::ProviderUnavailable,
            WalletError::UserRejected => Self::UserRejected,
            WalletError::Provider(msg) => Self::Transport(msg),
        }
    }
}

impl From<ClientError> for GreetError {
    fn from(err: ClientError) -> Self {
        Self::Transport(err.to_string())
    }
}

// Both types live in other crates, so this cannot be a `From` impl.
fn proof_failure(err: MembershipProofError) -> GreetError {
    match err {
        MembershipProofError::NotAMember => GreetError::NotAMember,
        MembershipProofError::Crypto(e) => GreetError::Crypto(e.to_string()),
        MembershipProofError::Prover(e) => GreetError::ProofGenerationFailure(e.to_string()),
    }
}

/// Orchestrates one greeting submission.
pub struct GreetFlow<W, P: ProofSystem> {
    wallet: W,
    system: P,
    artifacts: ProverArtifacts,
    registry: CommitmentRegistry,
    api: GreetingApi,
    greeting: String,
}

impl<W: WalletProvider, P: ProofSystem> GreetFlow<W, P> {
    /// Assemble a flow from configuration, a wallet, and a proof system.
    pub fn from_config(
        config: &ClientConfig,
        wallet: W,
        system: P,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            wallet,
            system,
            artifacts: ProverArtifacts::new(&config.circuit_path, &config.proving_key_path),
            registry: CommitmentRegistry::new(http.clone(), config.api_base_url.clone()),
            api: GreetingApi::new(http, config.api_base_url.clone()),
            greeting: config.greeting.clone(),
        })
    }

    /// Run the flow once. The display state always ends in a terminal
    /// stage; the returned error mirrors the final narration.
    pub async fn run(
        &self,
        form: &GreetingForm,
        state: &mut DisplayState,
    ) -> Result<(), GreetError> {
        match self.advance(form, state).await {
            Ok(()) => Ok(()),
            Err(err) => {
                state.enter(FlowStage::Failed, err.to_string());
                Err(err)
            }
        }
    }

    async fn advance(
        &self,
        form: &GreetingForm,
        state: &mut DisplayState,
    ) -> Result<(), GreetError> {
        let payload = form.validate()?;
        if let Ok(raw) = payload.to_json() {
            // The payload stays client-side; the wire contract carries
            // only the statement and the proof.
            tracing::debug!(payload = %raw, "validated greeting form");
        }

        state.enter(FlowStage::ConnectingWallet, "Connecting your wallet...");
        let accounts = self.wallet.request_accounts().await?;
        tracing::info!(account = %accounts.first().map(String::as_str).unwrap_or(""), "wallet connected");

        state.enter(FlowStage::DerivingIdentity, "Creating your identity...");
        let signature = self.wallet.sign_message(IDENTITY_PROMPT).await?;
        let identity = Identity::from_signature(&signature);

        state.enter(
            FlowStage::GeneratingProof,
            "Creating your membership proof...",
        );
        let set = self.registry.fetch().await?;
        let (signals, packed) =
            prove_membership(&self.system, &self.artifacts, &identity, &set, &self.greeting)
                .map_err(proof_failure)?;

        state.enter(FlowStage::Submitting, "Posting your anonymous greeting...");
        let submission = GreetSubmission {
            greeting: self.greeting.clone(),
            nullifier_hash: signals.nullifier_hash,
            solidity_proof: packed.to_hex(),
        };
        match self.api.submit(&submission).await? {
            SubmissionOutcome::Accepted => {
                state.enter(FlowStage::Success, SUCCESS_MESSAGE);
                Ok(())
            }
            SubmissionOutcome::Rejected(message) => Err(GreetError::SubmissionFailure(message)),
        }
    }
}
