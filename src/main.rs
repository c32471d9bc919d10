//! gemcommit - AI commit messages from your staged changes
//!
//! Available as the `gemcommit` command.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gemcommit::cli::commands::{Cli, Commands};
use gemcommit::cli::{config, generate, history};
use gemcommit::error::Result;

#[tokio::main]
async fn main() {
    // Initialize logging on stderr, stdout carries the commit message
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest(args) => generate::handle_suggest(args).await,
        Commands::Detailed(args) => generate::handle_detailed(args).await,
        Commands::History(args) => history::handle_history(args).await,
        Commands::Config(args) => config::handle_config(args.command),
    }
}
