//! Deadline decorator for ledger oracles

use super::traits::{LedgerOracle, LedgerResult};
use crate::domain::{LedgerError, TrialId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Wraps another oracle and bounds every call by a fixed deadline
///
/// An elapsed deadline surfaces as `LedgerError::Timeout`. The inner future
/// is dropped at that point; a publish that was in flight may still land.
pub struct TimeoutLedger {
    inner: Arc<dyn LedgerOracle>,
    timeout: Duration,
}

impl TimeoutLedger {
    /// Bound every call on `inner` by `timeout`
    pub fn new(inner: Arc<dyn LedgerOracle>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    fn elapsed(&self) -> LedgerError {
        LedgerError::Timeout(self.timeout.as_secs())
    }
}

#[async_trait]
impl LedgerOracle for TimeoutLedger {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn publish(&self, trial_id: &TrialId, hash: &str) -> LedgerResult<()> {
        tokio::time::timeout(self.timeout, self.inner.publish(trial_id, hash))
            .await
            .map_err(|_| self.elapsed())?
    }

    async fn fetch(&self, trial_id: &TrialId) -> LedgerResult<String> {
        tokio::time::timeout(self.timeout, self.inner.fetch(trial_id))
            .await
            .map_err(|_| self.elapsed())?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger::InMemoryLedger;

    struct StalledLedger;

    #[async_trait]
    impl LedgerOracle for StalledLedger {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn publish(&self, _trial_id: &TrialId, _hash: &str) -> LedgerResult<()> {
            std::future::pending().await
        }

        async fn fetch(&self, _trial_id: &TrialId) -> LedgerResult<String> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_calls_time_out() {
        let ledger = TimeoutLedger::new(Arc::new(StalledLedger), Duration::from_secs(3));
        let trial_id = TrialId::generate();

        let err = ledger.publish(&trial_id, "h").await.unwrap_err();
        assert!(matches!(err, LedgerError::Timeout(3)));

        let err = ledger.fetch(&trial_id).await.unwrap_err();
        assert!(matches!(err, LedgerError::Timeout(3)));
    }

    #[tokio::test]
    async fn test_fast_calls_pass_through() {
        let inner = Arc::new(InMemoryLedger::new());
        let ledger = TimeoutLedger::new(inner.clone(), Duration::from_secs(1));
        let trial_id = TrialId::generate();

        ledger.publish(&trial_id, "h").await.unwrap();
        assert_eq!(ledger.fetch(&trial_id).await.unwrap(), "h");
        assert_eq!(ledger.name(), "memory");
        assert_eq!(inner.len(), 1);
    }

    #[tokio::test]
    async fn test_inner_errors_are_preserved() {
        let ledger = TimeoutLedger::new(Arc::new(InMemoryLedger::new()), Duration::from_secs(1));
        let err = ledger.fetch(&TrialId::generate()).await.unwrap_err();
        assert!(matches!(err, LedgerError::HashNotFound(_)));
    }
}
