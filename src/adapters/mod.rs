//! External system integrations for Trialchain.
//!
//! - [`storage`] - Record stores holding users, trials, patients, reports
//!   and the login session
//! - [`ledger`] - Ledger oracles that publish and fetch report hashes
//!
//! # Design Pattern
//!
//! Both layers are trait objects ([`storage::RecordStore`] and
//! [`ledger::LedgerOracle`]) chosen by a factory from configuration, with an
//! in-memory implementation of each for tests.
//!
//! ```rust,no_run
//! use trialchain::adapters::ledger::create_ledger_oracle;
//! use trialchain::config::load_config;
//! use trialchain::domain::TrialId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("trialchain.toml")?;
//! let ledger = create_ledger_oracle(&config.ledger)?;
//!
//! let hash = ledger.fetch(&TrialId::new("trial-1")?).await?;
//! println!("ledger hash: {hash}");
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod storage;
