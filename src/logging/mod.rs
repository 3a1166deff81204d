//! Logging and observability
//!
//! Structured logging through `tracing`, with an optional JSON file layer.
//! The macros below give registry events consistent field names.
//!
//! # Example
//!
//! ```no_run
//! use trialchain::logging::init_logging;
//! use trialchain::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Registry ready");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a trial status transition
///
/// # Example
///
/// ```no_run
/// use trialchain::log_status_change;
/// use trialchain::domain::{TrialId, TrialStatus};
///
/// let trial_id = TrialId::new("t-1").unwrap();
/// log_status_change!(trial_id, TrialStatus::Pending, TrialStatus::Approved);
/// ```
#[macro_export]
macro_rules! log_status_change {
    ($trial_id:expr, $from:expr, $to:expr) => {
        tracing::info!(
            trial_id = %$trial_id,
            from = %$from,
            status = %$to,
            "Trial status changed"
        );
    };
}

/// Log the outcome of a ledger call
///
/// # Example
///
/// ```no_run
/// use trialchain::log_ledger_call;
/// use trialchain::domain::TrialId;
///
/// let trial_id = TrialId::new("t-1").unwrap();
/// log_ledger_call!("publish", trial_id, "2cf24dba");
/// ```
#[macro_export]
macro_rules! log_ledger_call {
    ($operation:expr, $trial_id:expr, $hash:expr) => {
        tracing::info!(
            operation = $operation,
            trial_id = %$trial_id,
            hash = %$hash,
            "Ledger call completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use trialchain::log_error_with_context;
/// use trialchain::domain::RegistryError;
///
/// let error = RegistryError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
