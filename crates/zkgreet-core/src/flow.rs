//! # Submission Flow State Machine
//!
//! Models the lifecycle of a single greeting submission and the state the
//! page displays.
//!
//! ## States
//!
//! IDLE → CONNECTING_WALLET → DERIVING_IDENTITY → GENERATING_PROOF →
//! SUBMITTING → SUCCESS | FAILED
//!
//! Every transition is a blocking step narrated through
//! [`DisplayState::logs`]. No step is retried; any error moves the flow
//! to `Failed`, which is terminal, with the error text as the final
//! narration.

/// The stage of the submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStage {
    /// No submission in progress.
    Idle,
    /// Requesting account access from the wallet provider.
    ConnectingWallet,
    /// Signing the identity prompt and deriving the identity.
    DerivingIdentity,
    /// Fetching the membership set and generating the proof.
    GeneratingProof,
    /// Posting the proof to the backend.
    Submitting,
    /// The backend accepted the submission (terminal).
    Success,
    /// Some step failed; no automatic recovery (terminal).
    Failed,
}

impl FlowStage {
    /// Whether this stage is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl std::fmt::Display for FlowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::ConnectingWallet => "CONNECTING_WALLET",
            Self::DerivingIdentity => "DERIVING_IDENTITY",
            Self::GeneratingProof => "GENERATING_PROOF",
            Self::Submitting => "SUBMITTING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// The state the page displays.
///
/// Mutated by two independent flows: the submission flow writes `logs`,
/// the event watcher writes `greeting`. No ordering guarantee exists
/// between the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    /// Status narration for the submission flow.
    pub logs: String,
    /// The last observed on-chain greeting.
    pub greeting: String,
    /// The current flow stage.
    pub stage: FlowStage,
}

impl DisplayState {
    /// Initial display state, matching the page's idle prompt.
    pub fn new() -> Self {
        Self {
            logs: "Connect your wallet and greet!".to_string(),
            greeting: String::new(),
            stage: FlowStage::Idle,
        }
    }

    /// Enter a stage and narrate it.
    pub fn enter(&mut self, stage: FlowStage, narration: impl Into<String>) {
        self.stage = stage;
        self.logs = narration.into();
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
