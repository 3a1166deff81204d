//! Configuration management for Trialchain.
//!
//! Trialchain reads a single TOML file with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TRIALCHAIN_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! data_dir = "./trialchain-data"
//!
//! [ledger]
//! backend = "http"
//! publish_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
//! fetch_address = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7"
//! base_url = "https://ledger-gateway.example.com"
//! api_token = "${TRIALCHAIN_LEDGER_TOKEN}"
//! timeout_seconds = 10
//!
//! [report]
//! date_format = "%-m/%-d/%Y"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use trialchain::config::load_config;
//!
//! # fn example() {
//! match load_config("trialchain.toml") {
//!     Ok(config) => println!("Ledger backend: {}", config.ledger.backend.as_str()),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, LedgerBackend, LedgerConfig, LoggingConfig, ReportConfig, StorageConfig,
    TrialchainConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
