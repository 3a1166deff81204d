//! Configuration schema types
//!
//! This module defines the configuration structure that maps to
//! `trialchain.toml`.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Ledger backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Process-local map, lost on exit
    Memory,
    /// Local JSON ledger file
    #[default]
    File,
    /// REST ledger gateway
    Http,
}

impl LedgerBackend {
    /// Backend name as written in the configuration file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Http => "http",
        }
    }
}

/// Main Trialchain configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialchainConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Where the registry collections are kept
    #[serde(default)]
    pub storage: StorageConfig,

    /// Ledger oracle settings
    pub ledger: LedgerConfig,

    /// Report rendering settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TrialchainConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.ledger.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Record storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON collection files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_dir.trim().is_empty() {
            return Err("storage.data_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Ledger oracle configuration
///
/// `publish_address` and `fetch_address` are independent. Reports are
/// published to the first and verified against the second, so both must
/// name the same contract for verification to ever succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Backend (memory, file, http)
    #[serde(default)]
    pub backend: LedgerBackend,

    /// Contract address hashes are published to
    pub publish_address: String,

    /// Contract address hashes are fetched from
    pub fetch_address: String,

    /// Ledger file path (file backend)
    #[serde(default = "default_ledger_file")]
    pub file_path: String,

    /// Gateway base URL (http backend)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token for the gateway (http backend, optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Upper bound for every ledger call, in seconds
    #[serde(default = "default_ledger_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl LedgerConfig {
    fn validate(&self) -> Result<(), String> {
        validate_address("ledger.publish_address", &self.publish_address)?;
        validate_address("ledger.fetch_address", &self.fetch_address)?;

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "ledger.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }

        match self.backend {
            LedgerBackend::Memory => {}
            LedgerBackend::File => {
                if self.file_path.trim().is_empty() {
                    return Err(
                        "ledger.file_path cannot be empty when backend = 'file'".to_string()
                    );
                }
            }
            LedgerBackend::Http => {
                let base_url = self.base_url.as_deref().unwrap_or_default();
                if base_url.is_empty() {
                    return Err(
                        "ledger.base_url is required when backend = 'http'".to_string()
                    );
                }
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err("ledger.base_url must start with http:// or https://".to_string());
                }
            }
        }

        Ok(())
    }

    /// Returns true when reports are published to one contract and
    /// verified against another
    pub fn addresses_differ(&self) -> bool {
        !self
            .publish_address
            .eq_ignore_ascii_case(&self.fetch_address)
    }
}

fn is_contract_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn validate_address(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if !is_contract_address(value) {
        return Err(format!(
            "{field} '{value}' is not a contract address (expected 0x followed by 40 hex digits)"
        ));
    }
    Ok(())
}

/// Report rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// strftime pattern for the report date line
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        crate::core::report::generator::validate_date_format(&self.date_format)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_data_dir() -> String {
    "./trialchain-data".to_string()
}

fn default_ledger_file() -> String {
    "./trialchain-data/ledger.json".to_string()
}

fn default_ledger_timeout_seconds() -> u64 {
    10
}

fn default_date_format() -> String {
    crate::core::report::DEFAULT_DATE_FORMAT.to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    const ADDR_A: &str = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7";
    const ADDR_B: &str = "0xabF669AB56DE36eCb6112113C52d74936BBde580";

    fn ledger_config() -> LedgerConfig {
        LedgerConfig {
            backend: LedgerBackend::File,
            publish_address: ADDR_A.to_string(),
            fetch_address: ADDR_A.to_string(),
            file_path: default_ledger_file(),
            base_url: None,
            api_token: None,
            timeout_seconds: 10,
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_config_validation() {
        let mut config = StorageConfig::default();
        assert!(config.validate().is_ok());

        config.data_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ledger_address_validation() {
        let mut config = ledger_config();
        assert!(config.validate().is_ok());

        config.publish_address = "0x1234".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("ledger.publish_address"));

        config.publish_address = ADDR_A.to_string();
        config.fetch_address = String::new();
        assert!(config.validate().unwrap_err().contains("cannot be empty"));
    }

    #[test]
    fn test_ledger_timeout_bounds() {
        let mut config = ledger_config();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.timeout_seconds = 301;
        assert!(config.validate().is_err());

        config.timeout_seconds = 300;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_backend_requires_base_url() {
        let mut config = ledger_config();
        config.backend = LedgerBackend::Http;
        assert!(config.validate().is_err());

        config.base_url = Some("ftp://ledger.example.com".to_string());
        assert!(config.validate().is_err());

        config.base_url = Some("https://ledger.example.com".to_string());
        config.api_token = Some(secret_string("token".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_addresses_differ() {
        let mut config = ledger_config();
        assert!(!config.addresses_differ());

        config.fetch_address = ADDR_A.to_lowercase();
        assert!(!config.addresses_differ());

        config.fetch_address = ADDR_B.to_string();
        assert!(config.addresses_differ());
    }

    #[test]
    fn test_report_config_validation() {
        let mut config = ReportConfig::default();
        assert_eq!(config.date_format, "%-m/%-d/%Y");
        assert!(config.validate().is_ok());

        config.date_format = "%Y-%Q".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig {
            local_rotation: "hourly".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_serde() {
        let backend: LedgerBackend = serde_json::from_str("\"http\"").unwrap();
        assert_eq!(backend, LedgerBackend::Http);
        assert_eq!(backend.as_str(), "http");
        assert_eq!(LedgerBackend::default(), LedgerBackend::File);
    }
}
