// Trialchain - Clinical Trial Registry with Ledger Verification
// Copyright (c) 2025 Trialchain Contributors
// Licensed under the MIT License

//! # Trialchain - Clinical Trial Registry with Ledger Verification
//!
//! Trialchain keeps a registry of clinical trials shared by three kinds of
//! users: pharma companies sponsor trials, hospitals enroll patients and
//! produce reports, and regulators verify those reports before deciding a
//! trial. Every report is sealed with a SHA-256 hash that hospitals publish
//! to an external ledger; regulators recompute nothing and instead compare
//! the stored hash with the one the ledger returns.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Registry operations, report generation, submission, verification
//! - [`adapters`] - Record stores and ledger oracles
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trialchain::adapters::ledger::create_ledger_oracle;
//! use trialchain::adapters::storage::create_record_store;
//! use trialchain::config::load_config;
//! use trialchain::core::registry::Registry;
//! use trialchain::core::verification::Verifier;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("trialchain.toml")?;
//!
//!     let registry = Registry::open(create_record_store(&config.storage)?)?;
//!     let verifier = Verifier::new(create_ledger_oracle(&config.ledger)?);
//!
//!     let report = verifier.verify_all(&registry).await?;
//!     println!("{}", report.format_summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Reports
//!
//! Report text depends only on the trial id, the number of enrolled
//! patients and the generation date, so two reports generated on the same
//! day for the same patients hash identically:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use trialchain::core::report::ReportGenerator;
//! use trialchain::domain::TrialId;
//!
//! let generator = ReportGenerator::default();
//! let trial_id = TrialId::new("trial-1").unwrap();
//! let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
//!
//! let report = generator.generate(&trial_id, 3, date);
//! assert!(report.report_text.contains("3/7/2025"));
//! assert_eq!(report.hash.len(), 64);
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error is
//! [`domain::RegistryError`]. Ledger failures are carried as
//! [`domain::LedgerError`] inside it.
//!
//! ```rust,no_run
//! use trialchain::domain::RegistryError;
//!
//! fn example() -> Result<(), RegistryError> {
//!     let config = trialchain::config::load_config("trialchain.toml")?;
//!     println!("{}", config.ledger.backend.as_str());
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Trialchain uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(trial_id = "trial-1", "Report generated");
//! warn!(trial_id = "trial-1", "Report hash does not match ledger");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
