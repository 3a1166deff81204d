//! Domain error types
//!
//! This module defines the error hierarchy for trialchain. Every failure a
//! registry operation can surface is a variant of [`RegistryError`]; ledger
//! oracle failures live in [`LedgerError`] and convert into it with `?`.
//! Neither type exposes third-party error types.

use thiserror::Error;

/// Main trialchain error type
///
/// Each variant aborts the single action that raised it. Earlier steps of a
/// multi-step flow (e.g. generate-then-publish) are not rolled back.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field was missing or blank
    #[error("Validation error: {0}")]
    Validation(String),

    /// A looked-up record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The hospital id does not resolve to a hospital user
    #[error("Unknown hospital: {0}")]
    UnknownHospital(String),

    /// The sponsor id does not resolve to a pharma user
    #[error("Unknown sponsor: {0}")]
    UnknownSponsor(String),

    /// The trial id does not resolve to a trial
    #[error("Unknown trial: {0}")]
    UnknownTrial(String),

    /// Display name already registered
    #[error("Display name already registered: {0}")]
    DuplicateName(String),

    /// Verification requested before a report was generated
    #[error("No report generated for trial {0}")]
    NoReport(String),

    /// No user is remembered in the session
    #[error("Not logged in")]
    NotLoggedIn,

    /// The current user's role is not allowed to perform the action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Ledger oracle errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Persisting or loading the record store failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl RegistryError {
    /// Returns true when the ledger could not be reached (including timeouts)
    pub fn is_ledger_unavailable(&self) -> bool {
        matches!(
            self,
            RegistryError::Ledger(LedgerError::Unavailable(_) | LedgerError::Timeout(_))
        )
    }
}

/// Ledger oracle errors
///
/// Errors raised while publishing or fetching a report hash. Transport
/// details of the concrete oracle are flattened into messages.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Oracle unreachable or not configured
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// Nothing was ever published under the trial id
    #[error("No hash published for trial {0}")]
    HashNotFound(String),

    /// The call did not complete within the configured deadline
    #[error("Ledger call timed out after {0}s")]
    Timeout(u64),

    /// The oracle answered with something that is not a hash record
    #[error("Invalid ledger response: {0}")]
    InvalidResponse(String),
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RegistryError {
    fn from(err: toml::de::Error) -> Self {
        RegistryError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::DuplicateName("GenHosp".to_string());
        assert_eq!(err.to_string(), "Display name already registered: GenHosp");

        let err = RegistryError::NoReport("t-1".to_string());
        assert_eq!(err.to_string(), "No report generated for trial t-1");
    }

    #[test]
    fn test_ledger_error_conversion() {
        let ledger_err = LedgerError::Unavailable("connection refused".to_string());
        let err: RegistryError = ledger_err.into();
        assert!(matches!(err, RegistryError::Ledger(_)));
        assert!(err.is_ledger_unavailable());
    }

    #[test]
    fn test_timeout_counts_as_unavailable() {
        let err: RegistryError = LedgerError::Timeout(10).into();
        assert!(err.is_ledger_unavailable());
        assert_eq!(err.to_string(), "Ledger error: Ledger call timed out after 10s");
    }

    #[test]
    fn test_hash_not_found_is_not_unavailable() {
        let err: RegistryError = LedgerError::HashNotFound("t-1".to_string()).into();
        assert!(!err.is_ledger_unavailable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: RegistryError = io_err.into();
        assert!(matches!(err, RegistryError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RegistryError = json_err.into();
        assert!(matches!(err, RegistryError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: RegistryError = toml_err.into();
        assert!(matches!(err, RegistryError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_registry_error_implements_std_error() {
        let err = RegistryError::Validation("title is required".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
