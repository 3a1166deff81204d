//! Ledger verification
//!
//! Compares the hash of a trial's stored report with the hash the ledger
//! holds for that trial. Verification only reads: it never changes trial
//! status or any other record.

use crate::adapters::ledger::LedgerOracle;
use crate::core::registry::Registry;
use crate::core::verification::report::{
    VerificationFailure, VerificationOutcome, VerificationReport,
};
use crate::domain::{LedgerError, RegistryError, Result, TrialId};
use std::sync::Arc;
use std::time::Instant;

/// Checks local reports against the ledger
pub struct Verifier {
    oracle: Arc<dyn LedgerOracle>,
}

impl Verifier {
    /// Create a verifier reading from `oracle`
    pub fn new(oracle: Arc<dyn LedgerOracle>) -> Self {
        Self { oracle }
    }

    /// Verify one trial
    ///
    /// # Errors
    ///
    /// - `NoReport` if the trial has no stored report
    /// - `Ledger(HashNotFound)` if nothing was published for the trial
    /// - `Ledger(Unavailable | Timeout)` if the ledger cannot be reached
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use trialchain::adapters::ledger::InMemoryLedger;
    /// use trialchain::adapters::storage::MemoryStore;
    /// use trialchain::core::registry::Registry;
    /// use trialchain::core::verification::Verifier;
    /// use trialchain::domain::TrialId;
    ///
    /// # async fn example() -> trialchain::domain::Result<()> {
    /// let registry = Registry::open(Arc::new(MemoryStore::new()))?;
    /// let verifier = Verifier::new(Arc::new(InMemoryLedger::new()));
    /// # let trial_id = TrialId::generate();
    /// let outcome = verifier.verify(&registry, &trial_id).await?;
    /// println!("matched: {}", outcome.matched);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn verify(
        &self,
        registry: &Registry,
        trial_id: &TrialId,
    ) -> Result<VerificationOutcome> {
        let local_hash = registry
            .get_report(trial_id)
            .map(|r| r.hash.clone())
            .ok_or_else(|| RegistryError::NoReport(trial_id.to_string()))?;

        let remote_hash = self.oracle.fetch(trial_id).await?;
        crate::log_ledger_call!("fetch", trial_id, remote_hash);

        let outcome = VerificationOutcome {
            trial_id: trial_id.clone(),
            matched: remote_hash == local_hash,
            local_hash,
            remote_hash,
        };

        if outcome.matched {
            tracing::info!(trial_id = %trial_id, "Report hash matches ledger");
        } else {
            tracing::warn!(
                trial_id = %trial_id,
                local_hash = %outcome.local_hash,
                remote_hash = %outcome.remote_hash,
                "Report hash differs from ledger"
            );
        }

        Ok(outcome)
    }

    /// Verify every trial in creation order
    ///
    /// Trials without a report are skipped. A mismatch or a missing ledger
    /// entry is recorded as a failure and the run continues.
    ///
    /// # Errors
    ///
    /// Stops at the first ledger error other than `HashNotFound`.
    pub async fn verify_all(&self, registry: &Registry) -> Result<VerificationReport> {
        let start = Instant::now();
        let mut report = VerificationReport::new();

        let trials = registry.list_all();
        tracing::info!(trials = trials.len(), "Starting ledger verification");

        for trial in trials {
            match self.verify(registry, &trial.id).await {
                Ok(outcome) if outcome.matched => report.record_pass(),
                Ok(outcome) => report.record_failure(VerificationFailure {
                    trial_id: trial.id.clone(),
                    title: trial.title.clone(),
                    expected_hash: outcome.local_hash,
                    actual_hash: Some(outcome.remote_hash),
                    reason: "Ledger hash does not match local report".to_string(),
                }),
                Err(RegistryError::NoReport(_)) => report.record_skip(),
                Err(RegistryError::Ledger(LedgerError::HashNotFound(_))) => {
                    let expected_hash = registry
                        .get_report(&trial.id)
                        .map(|r| r.hash.clone())
                        .unwrap_or_default();
                    report.record_failure(VerificationFailure {
                        trial_id: trial.id.clone(),
                        title: trial.title.clone(),
                        expected_hash,
                        actual_hash: None,
                        reason: "No hash published to the ledger".to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        report.set_duration(start.elapsed().as_millis() as u64);

        tracing::info!(
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms = report.duration_ms,
            "Ledger verification completed"
        );

        Ok(report)
    }
}
