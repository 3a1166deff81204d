//! Ledger oracle abstraction
//!
//! The ledger is an external key/hash store. The registry never keeps
//! ledger state itself; it publishes a report hash under a trial id and later
//! fetches whatever was last published there.

use crate::domain::{LedgerError, TrialId};
use async_trait::async_trait;

/// Result type for ledger calls
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// External ledger holding one hash per trial id
///
/// # Example
///
/// ```no_run
/// use trialchain::adapters::ledger::{InMemoryLedger, LedgerOracle};
/// use trialchain::domain::TrialId;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ledger = InMemoryLedger::new();
/// let trial_id = TrialId::generate();
///
/// ledger.publish(&trial_id, "abc123").await?;
/// assert_eq!(ledger.fetch(&trial_id).await?, "abc123");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait LedgerOracle: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Publish `hash` under `trial_id`
    ///
    /// Publishing the same pair twice is not an error. Publishing a
    /// different hash overwrites the previous one.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Unavailable` if the ledger cannot be reached.
    async fn publish(&self, trial_id: &TrialId, hash: &str) -> LedgerResult<()>;

    /// Fetch the hash last published under `trial_id`
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::HashNotFound` if nothing was published and
    /// `LedgerError::Unavailable` if the ledger cannot be reached.
    async fn fetch(&self, trial_id: &TrialId) -> LedgerResult<String>;
}
