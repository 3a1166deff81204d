//! Ledger oracle factory
//!
//! Builds the configured ledger backend and wraps it in a [`TimeoutLedger`].

use super::{FileLedger, HttpLedger, InMemoryLedger, LedgerOracle, TimeoutLedger};
use crate::config::{LedgerBackend, LedgerConfig};
use crate::domain::{RegistryError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Create the ledger oracle described by `config`
///
/// # Errors
///
/// Returns `Configuration` if a backend setting is missing, or a ledger
/// error if the HTTP client cannot be built.
pub fn create_ledger_oracle(config: &LedgerConfig) -> Result<Arc<dyn LedgerOracle>> {
    if config.addresses_differ() {
        tracing::warn!(
            publish_address = %config.publish_address,
            fetch_address = %config.fetch_address,
            "Ledger publish and fetch addresses differ; published hashes will not verify"
        );
    }

    let timeout = Duration::from_secs(config.timeout_seconds);

    let inner: Arc<dyn LedgerOracle> = match config.backend {
        LedgerBackend::Memory => {
            tracing::warn!("Using in-memory ledger; published hashes are lost on exit");
            Arc::new(InMemoryLedger::new())
        }
        LedgerBackend::File => Arc::new(FileLedger::new(
            &config.file_path,
            &config.publish_address,
            &config.fetch_address,
        )),
        LedgerBackend::Http => {
            let base_url = config.base_url.as_deref().ok_or_else(|| {
                RegistryError::Configuration(
                    "ledger.base_url is required when backend = 'http'".to_string(),
                )
            })?;
            Arc::new(HttpLedger::new(
                base_url,
                &config.publish_address,
                &config.fetch_address,
                config.api_token.clone(),
                timeout,
            )?)
        }
    };

    tracing::debug!(
        backend = config.backend.as_str(),
        timeout_seconds = config.timeout_seconds,
        "Ledger oracle created"
    );

    Ok(Arc::new(TimeoutLedger::new(inner, timeout)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrialId;
    use tempfile::TempDir;

    const ADDR: &str = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7";

    fn config(backend: LedgerBackend) -> LedgerConfig {
        LedgerConfig {
            backend,
            publish_address: ADDR.to_string(),
            fetch_address: ADDR.to_string(),
            file_path: String::new(),
            base_url: None,
            api_token: None,
            timeout_seconds: 2,
        }
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let oracle = create_ledger_oracle(&config(LedgerBackend::Memory)).unwrap();
        assert_eq!(oracle.name(), "memory");

        let trial_id = TrialId::generate();
        oracle.publish(&trial_id, "h").await.unwrap();
        assert_eq!(oracle.fetch(&trial_id).await.unwrap(), "h");
    }

    #[tokio::test]
    async fn test_file_backend() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config(LedgerBackend::File);
        config.file_path = temp_dir
            .path()
            .join("ledger.json")
            .to_string_lossy()
            .into_owned();

        let oracle = create_ledger_oracle(&config).unwrap();
        assert_eq!(oracle.name(), "file");

        let trial_id = TrialId::generate();
        oracle.publish(&trial_id, "h").await.unwrap();
        assert!(temp_dir.path().join("ledger.json").exists());
    }

    #[tokio::test]
    async fn test_file_backend_accepts_mixed_case_addresses() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config(LedgerBackend::File);
        config.fetch_address = ADDR.to_lowercase();
        config.file_path = temp_dir
            .path()
            .join("ledger.json")
            .to_string_lossy()
            .into_owned();
        assert!(!config.addresses_differ());

        let oracle = create_ledger_oracle(&config).unwrap();
        let trial_id = TrialId::generate();
        oracle.publish(&trial_id, "h").await.unwrap();
        assert_eq!(oracle.fetch(&trial_id).await.unwrap(), "h");
    }

    #[test]
    fn test_http_backend_without_url() {
        let result = create_ledger_oracle(&config(LedgerBackend::Http));
        assert!(matches!(result, Err(RegistryError::Configuration(_))));
    }

    #[test]
    fn test_http_backend() {
        let mut config = config(LedgerBackend::Http);
        config.base_url = Some("http://localhost:8545".to_string());
        let oracle = create_ledger_oracle(&config).unwrap();
        assert_eq!(oracle.name(), "http");
    }
}
