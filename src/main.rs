// Trialchain - Clinical Trial Registry with Ledger Verification
// Copyright (c) 2025 Trialchain Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use trialchain::cli::{Cli, Commands};
use trialchain::config::load_config;
use trialchain::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; commands
    // report config errors themselves, so a bad file falls back to console.
    let file_config = if cli.command.skips_config() {
        None
    } else {
        load_config(&cli.config).ok()
    };
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    let logging_config = file_config
        .map(|c| c.logging)
        .unwrap_or_default();

    let log_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Trialchain - Clinical Trial Registry with Ledger Verification"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(log_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Init(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::User(args) => args.execute(&cli.config).await,
        Commands::Trial(args) => args.execute(&cli.config).await,
        Commands::Patient(args) => args.execute(&cli.config).await,
        Commands::Report(args) => args.execute(&cli.config).await,
        Commands::Verify(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
    }
}
