//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Trialchain using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Trialchain - Clinical Trial Registry with Ledger Verification
#[derive(Parser, Debug)]
#[command(name = "trialchain")]
#[command(version, about, long_about = None)]
#[command(author = "Trialchain Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "trialchain.toml", env = "TRIALCHAIN_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRIALCHAIN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Register users and manage the login session
    User(commands::user::UserArgs),

    /// Create, list, show and decide trials
    Trial(commands::trial::TrialArgs),

    /// Enroll and list patients
    Patient(commands::patient::PatientArgs),

    /// Generate, show and submit trial reports
    Report(commands::report::ReportArgs),

    /// Verify stored reports against the ledger
    Verify(commands::verify::VerifyArgs),

    /// Show registry counts and trial progress
    Status(commands::status::StatusArgs),
}

impl Commands {
    /// True for commands that run before a configuration file exists
    pub fn skips_config(&self) -> bool {
        matches!(self, Commands::Init(_))
    }
}
