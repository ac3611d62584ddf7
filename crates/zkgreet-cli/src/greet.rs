//! `greet` subcommand — run the submission flow once.

use std::time::Duration;

use clap::Args;
use url::Url;

use zkgreet_client::config::{ClientConfig, DEFAULT_CONTRACT_ADDRESS, DEFAULT_GREETING};
use zkgreet_client::{GreetFlow, RpcWallet};
use zkgreet_core::{DisplayState, FlowStage, GreetError, GreetingForm};
use zkgreet_zkp::TransparentProofSystem;

/// Arguments for the `greet` subcommand.
#[derive(Args, Debug)]
pub struct GreetArgs {
    /// Your name.
    #[arg(long)]
    pub name: String,

    /// Your age (a positive integer).
    #[arg(long)]
    pub age: f64,

    /// Your address (optional).
    #[arg(long)]
    pub address: Option<String>,

    /// Base URL of the greeting backend.
    #[arg(long, default_value = "http://localhost:3000")]
    pub api_url: Url,

    /// JSON-RPC endpoint of the wallet provider.
    #[arg(long, default_value = "http://localhost:8545")]
    pub rpc_url: Url,

    /// The statement to prove and submit.
    #[arg(long, default_value = DEFAULT_GREETING)]
    pub greeting: String,

    /// Path to the circuit binary.
    #[arg(long, default_value = "./semaphore.wasm")]
    pub circuit: String,

    /// Path to the proving key.
    #[arg(long, default_value = "./semaphore_final.zkey")]
    pub proving_key: String,
}

impl GreetArgs {
    fn to_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_url.clone(),
            rpc_url: self.rpc_url.clone(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            greeting: self.greeting.clone(),
            circuit_path: self.circuit.clone(),
            proving_key_path: self.proving_key.clone(),
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Handler for `zkgreet greet`.
pub async fn run(args: GreetArgs) -> anyhow::Result<()> {
    let (state, result) = execute(args).await;
    println!("{}", state.logs);
    result
}

/// Run the flow and return the final display state alongside the
/// outcome. Every failure, wallet detection included, ends in the
/// `Failed` stage with the error text as the status line.
async fn execute(args: GreetArgs) -> (DisplayState, anyhow::Result<()>) {
    let config = args.to_config();
    let form = GreetingForm {
        name: args.name,
        age: args.age,
        address: args.address,
    };

    let mut state = DisplayState::new();
    let wallet = match RpcWallet::detect(reqwest::Client::new(), config.rpc_url.clone()).await {
        Ok(wallet) => wallet,
        Err(err) => {
            let err = GreetError::from(err);
            state.enter(FlowStage::Failed, err.to_string());
            return (state, Err(err.into()));
        }
    };
    let flow = match GreetFlow::from_config(&config, wallet, TransparentProofSystem) {
        Ok(flow) => flow,
        Err(err) => {
            let err = GreetError::from(err);
            state.enter(FlowStage::Failed, err.to_string());
            return (state, Err(err.into()));
        }
    };

    let result = flow.run(&form, &mut state).await;
    (state, result.map_err(Into::into))
}
