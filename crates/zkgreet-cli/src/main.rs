//! # zkgreet CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// zkgreet — anonymous on-chain greetings with membership proofs.
#[derive(Parser, Debug)]
#[command(name = "zkgreet", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the anonymous greeting flow once.
    Greet(zkgreet_cli::greet::GreetArgs),
    /// Watch the greeting contract for NewGreeting events.
    Watch(zkgreet_cli::watch::WatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Greet(args) => zkgreet_cli::greet::run(args).await,
        Commands::Watch(args) => zkgreet_cli::watch::run(args).await,
    }
}
