//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | code | meaning                          |
//! |------|----------------------------------|
//! | 0    | success                          |
//! | 1    | verification mismatch            |
//! | 2    | configuration error              |
//! | 3    | domain or validation error       |
//! | 4    | ledger unavailable               |
//! | 5    | fatal (storage, I/O)             |

pub mod init;
pub mod patient;
pub mod report;
pub mod status;
pub mod trial;
pub mod user;
pub mod validate;
pub mod verify;

use crate::adapters::ledger::{create_ledger_oracle, LedgerOracle};
use crate::adapters::storage::create_record_store;
use crate::config::{load_config, TrialchainConfig};
use crate::core::registry::Registry;
use crate::core::report::ReportGenerator;
use crate::domain::{LedgerError, RegistryError, Role, Trial, User};
use std::sync::Arc;

/// Command succeeded
pub const EXIT_OK: i32 = 0;
/// Ledger hash did not match, or nothing was published
pub const EXIT_VERIFICATION_FAILED: i32 = 1;
/// Configuration could not be loaded or is invalid
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// A registry rule rejected the action
pub const EXIT_DOMAIN_ERROR: i32 = 3;
/// The ledger could not be reached in time
pub const EXIT_LEDGER_UNAVAILABLE: i32 = 4;
/// Storage or I/O failure
pub const EXIT_FATAL: i32 = 5;

/// Map an error to the exit code the CLI reports for it
pub fn exit_code_for(err: &RegistryError) -> i32 {
    match err {
        RegistryError::Configuration(_) => EXIT_CONFIG_ERROR,
        RegistryError::Ledger(LedgerError::HashNotFound(_)) => EXIT_VERIFICATION_FAILED,
        RegistryError::Ledger(_) => EXIT_LEDGER_UNAVAILABLE,
        RegistryError::Storage(_) | RegistryError::Io(_) | RegistryError::Serialization(_) => {
            EXIT_FATAL
        }
        _ => EXIT_DOMAIN_ERROR,
    }
}

/// Print `err` under `action` and return its exit code
pub(crate) fn report_failure(action: &str, err: &RegistryError) -> i32 {
    crate::log_error_with_context!(err, action);

    println!("❌ {action}");
    println!("   Error: {err}");
    if matches!(err, RegistryError::NotLoggedIn) {
        println!("   Log in first: trialchain user login <name>");
    }
    exit_code_for(err)
}

/// Configuration plus the registry it points at
pub(crate) struct CommandContext {
    pub config: TrialchainConfig,
    pub registry: Registry,
}

impl CommandContext {
    /// Load configuration and open the registry, printing any failure
    pub(crate) fn open(config_path: &str) -> Result<Self, i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Err(EXIT_CONFIG_ERROR);
            }
        };

        let generator = ReportGenerator::new(config.report.date_format.clone())
            .map_err(|e| report_failure("Invalid report settings", &e))?;

        let store = create_record_store(&config.storage)
            .map_err(|e| report_failure("Failed to open record store", &e))?;

        let registry = Registry::open(store)
            .map_err(|e| report_failure("Failed to load registry", &e))?
            .with_generator(generator);

        Ok(Self { config, registry })
    }

    /// Build the configured ledger oracle
    pub(crate) fn ledger(&self) -> Result<Arc<dyn LedgerOracle>, i32> {
        create_ledger_oracle(&self.config.ledger)
            .map_err(|e| report_failure("Failed to set up ledger", &e))
    }

    /// Current user if logged in with `role`, cloned out of the registry
    pub(crate) fn require_role(&self, role: Role) -> Result<User, i32> {
        self.registry
            .require_role(role)
            .cloned()
            .map_err(|e| report_failure("Permission check failed", &e))
    }

    /// Current user if they may see `trial`
    pub(crate) fn require_visible(&self, trial: &Trial) -> Result<User, i32> {
        let user = self
            .registry
            .current_user()
            .cloned()
            .ok_or(RegistryError::NotLoggedIn)
            .map_err(|e| report_failure("Permission check failed", &e))?;

        if can_view(&user, trial) {
            Ok(user)
        } else {
            let err = RegistryError::Forbidden(format!(
                "trial {} is not visible to {}",
                trial.id, user.display_name
            ));
            Err(report_failure("Permission check failed", &err))
        }
    }

    /// Current hospital user, provided `trial` is assigned to them
    pub(crate) fn require_assigned_hospital(&self, trial: &Trial) -> Result<User, i32> {
        let user = self.require_role(Role::Hospital)?;
        if trial.hospital_id != user.id {
            let err = RegistryError::Forbidden(format!(
                "trial {} is assigned to {}",
                trial.id, trial.hospital_name
            ));
            return Err(report_failure("Permission check failed", &err));
        }
        Ok(user)
    }

    /// Look up a trial, printing a failure for unknown ids
    pub(crate) fn trial(&self, trial_id: &crate::domain::TrialId) -> Result<Trial, i32> {
        self.registry
            .get_trial(trial_id)
            .cloned()
            .map_err(|e| report_failure("Trial lookup failed", &e))
    }
}

/// Regulators see every trial; sponsors and hospitals see their own
pub(crate) fn can_view(user: &User, trial: &Trial) -> bool {
    match user.role {
        Role::Regulator => true,
        Role::Pharma => trial.sponsor_id == user.id,
        Role::Hospital => trial.hospital_id == user.id,
    }
}

/// Unwrap a command step or return its exit code
macro_rules! try_step {
    ($step:expr) => {
        match $step {
            Ok(value) => value,
            Err(code) => return Ok(code),
        }
    };
}
pub(crate) use try_step;
