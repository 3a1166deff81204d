//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Trialchain configuration file.

use crate::config::{load_config, LedgerBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Data Directory: {}", config.storage.data_dir);
        println!("  Ledger Backend: {}", config.ledger.backend.as_str());
        match config.ledger.backend {
            LedgerBackend::Memory => {}
            LedgerBackend::File => println!("  Ledger File: {}", config.ledger.file_path),
            LedgerBackend::Http => {
                println!(
                    "  Ledger URL: {}",
                    config.ledger.base_url.as_deref().unwrap_or_default()
                );
                println!(
                    "  API Token: {}",
                    if config.ledger.api_token.is_some() {
                        "set"
                    } else {
                        "not set"
                    }
                );
            }
        }
        println!("  Publish Address: {}", config.ledger.publish_address);
        println!("  Fetch Address: {}", config.ledger.fetch_address);
        println!("  Ledger Timeout: {}s", config.ledger.timeout_seconds);
        println!("  Report Date Format: {}", config.report.date_format);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }

        if config.ledger.addresses_differ() {
            println!();
            println!("⚠️  publish_address and fetch_address differ");
            println!("   Submitted hashes will not be found during verification");
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let code = ValidateArgs {}
            .execute(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_invalid_address_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trialchain.toml");
        std::fs::write(
            &path,
            "[ledger]\npublish_address = \"0x123\"\nfetch_address = \"0x123\"\n",
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
