//! `watch` subcommand — print NewGreeting events as they arrive.

use std::time::Duration;

use clap::Args;
use url::Url;

use zkgreet_client::config::DEFAULT_CONTRACT_ADDRESS;
use zkgreet_client::GreetingWatcher;

/// Arguments for the `watch` subcommand.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// JSON-RPC endpoint of the read-only chain provider.
    #[arg(long, default_value = "http://localhost:8545")]
    pub rpc_url: Url,

    /// Address of the greeting contract.
    #[arg(long, default_value = DEFAULT_CONTRACT_ADDRESS)]
    pub contract: String,

    /// Poll interval in seconds.
    #[arg(long, default_value_t = 2)]
    pub poll_interval_secs: u64,
}

/// Handler for `zkgreet watch`.
pub async fn run(args: WatchArgs) -> anyhow::Result<()> {
    let watcher = GreetingWatcher::new(
        reqwest::Client::new(),
        args.rpc_url,
        args.contract,
        Duration::from_secs(args.poll_interval_secs),
    );

    let (mut feed, handle) = watcher.subscribe().await?;
    tracing::info!("watching for NewGreeting events, ctrl-c to stop");

    loop {
        tokio::select! {
            maybe_event = feed.recv() => match maybe_event {
                Some(event) => println!("{}", event.display_text()),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
    Ok(())
}
