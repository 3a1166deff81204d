//! Submitting reports to the ledger
//!
//! Submission generates the trial's report if it has none yet, then
//! publishes the report hash. The two steps are not atomic: when publishing
//! fails the freshly generated report stays stored and a later submit
//! publishes it unchanged.

use crate::adapters::ledger::LedgerOracle;
use crate::core::registry::Registry;
use crate::domain::{Report, Result, TrialId};

/// What a submission did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The report whose hash was published
    pub report: Report,

    /// True if the report was generated by this submission
    pub generated: bool,
}

/// Publish the report hash for `trial_id`, generating the report first if
/// needed
///
/// # Errors
///
/// Returns `UnknownTrial` if the trial does not exist, a storage error if a
/// generated report cannot be saved, or a ledger error if publishing fails.
pub async fn submit_report(
    registry: &mut Registry,
    oracle: &dyn LedgerOracle,
    trial_id: &TrialId,
) -> Result<Submission> {
    let (report, generated) = match registry.get_report(trial_id) {
        Some(existing) => (existing.clone(), false),
        None => (registry.generate_report(trial_id)?, true),
    };

    oracle.publish(trial_id, &report.hash).await?;
    crate::log_ledger_call!("publish", trial_id, report.hash);

    Ok(Submission { report, generated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger::InMemoryLedger;
    use crate::core::registry::test_support::seeded;
    use crate::domain::{LedgerError, RegistryError};

    #[tokio::test]
    async fn test_submit_generates_missing_report() {
        let (mut registry, _, _, _, trial) = seeded();
        let ledger = InMemoryLedger::new();

        let submission = submit_report(&mut registry, &ledger, &trial.id).await.unwrap();
        assert!(submission.generated);
        assert_eq!(registry.get_report(&trial.id), Some(&submission.report));
        assert_eq!(ledger.fetch(&trial.id).await.unwrap(), submission.report.hash);
    }

    #[tokio::test]
    async fn test_submit_reuses_existing_report() {
        let (mut registry, _, _, _, trial) = seeded();
        let existing = registry.generate_report(&trial.id).unwrap();
        let ledger = InMemoryLedger::new();

        let submission = submit_report(&mut registry, &ledger, &trial.id).await.unwrap();
        assert!(!submission.generated);
        assert_eq!(submission.report, existing);
    }

    #[tokio::test]
    async fn test_failed_publish_keeps_generated_report() {
        let (mut registry, _, _, _, trial) = seeded();
        let ledger = InMemoryLedger::new();
        ledger.set_offline(true);

        let err = submit_report(&mut registry, &ledger, &trial.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Ledger(LedgerError::Unavailable(_))
        ));
        assert!(registry.get_report(&trial.id).is_some());
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_submit_unknown_trial() {
        let (mut registry, _, _, _, _) = seeded();
        let ledger = InMemoryLedger::new();

        let err = submit_report(&mut registry, &ledger, &TrialId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownTrial(_)));
    }
}
