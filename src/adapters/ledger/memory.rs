//! In-memory ledger
//!
//! A plain map from trial id to hash. Used as the test double for the
//! ledger oracle and by the `memory` backend for throwaway sessions.

use super::traits::{LedgerOracle, LedgerResult};
use crate::domain::{LedgerError, TrialId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Ledger that lives in process memory
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<HashMap<TrialId, String>>,
    offline: AtomicBool,
}

impl InMemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the ledger becoming unreachable (or reachable again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of trial ids with a published hash
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if nothing was published yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> LedgerResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable(
                "in-memory ledger is offline".to_string(),
            ));
        }
        Ok(())
    }
}

fn poisoned() -> LedgerError {
    LedgerError::Unavailable("in-memory ledger lock poisoned".to_string())
}

#[async_trait]
impl LedgerOracle for InMemoryLedger {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn publish(&self, trial_id: &TrialId, hash: &str) -> LedgerResult<()> {
        self.check_online()?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(trial_id.clone(), hash.to_string());
        Ok(())
    }

    async fn fetch(&self, trial_id: &TrialId) -> LedgerResult<String> {
        self.check_online()?;
        let entries = self.entries.read().map_err(|_| poisoned())?;
        entries
            .get(trial_id)
            .cloned()
            .ok_or_else(|| LedgerError::HashNotFound(trial_id.to_string()))
    }
}
