mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{handle_config, handle_rank, handle_search, ui, Cli, Commands};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if let Ok(env) = std::env::var("RUST_LOG") {
        EnvFilter::new(env)
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Rank { retrieval, output } => handle_rank(config_path, retrieval, output).await,
        Commands::Search { retrieval, json } => handle_search(config_path, retrieval, json).await,
        Commands::Config => handle_config(config_path),
    }
}
