//! Local JSON ledger file
//!
//! The file maps contract address to a map of trial id to hash:
//!
//! ```json
//! {
//!   "0xcf3cc873c988eb635712c8ab7c9a4f6a2376efc7": {
//!     "6f1c…": "2cf24dba…"
//!   }
//! }
//! ```
//!
//! Publishing writes under the publish address and fetching reads the fetch
//! address. Addresses are stored lowercased, so checksummed and lowercase
//! spellings of one contract share an entry. When the two addresses name
//! different contracts a published hash is never found again.

use super::traits::{LedgerOracle, LedgerResult};
use crate::domain::{LedgerError, TrialId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

type LedgerContents = BTreeMap<String, BTreeMap<String, String>>;

/// Ledger persisted to a JSON file on the local disk
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    publish_address: String,
    fetch_address: String,
    write_lock: Mutex<()>,
}

impl FileLedger {
    /// Create a ledger backed by `path`
    ///
    /// The file and its parent directory are created on first publish.
    /// Both addresses are lowercased before use as keys.
    pub fn new(
        path: impl Into<PathBuf>,
        publish_address: impl Into<String>,
        fetch_address: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            publish_address: publish_address.into().to_lowercase(),
            fetch_address: fetch_address.into().to_lowercase(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_contents(&self) -> LedgerResult<LedgerContents> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LedgerContents::new())
            }
            Err(e) => {
                return Err(LedgerError::Unavailable(format!(
                    "Failed to read ledger file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(LedgerContents::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            LedgerError::InvalidResponse(format!(
                "Ledger file {} is not valid JSON: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn write_contents(&self, contents: &LedgerContents) -> LedgerResult<()> {
        let unavailable = |e: std::io::Error| {
            LedgerError::Unavailable(format!(
                "Failed to write ledger file {}: {}",
                self.path.display(),
                e
            ))
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(unavailable)?;
        }

        let bytes = serde_json::to_vec_pretty(contents)
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");

        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(unavailable)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

#[async_trait]
impl LedgerOracle for FileLedger {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn publish(&self, trial_id: &TrialId, hash: &str) -> LedgerResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut contents = self.read_contents().await?;
        contents
            .entry(self.publish_address.clone())
            .or_default()
            .insert(trial_id.to_string(), hash.to_string());
        self.write_contents(&contents).await?;

        tracing::debug!(
            trial_id = %trial_id,
            address = %self.publish_address,
            path = %self.path.display(),
            "Hash written to ledger file"
        );
        Ok(())
    }

    async fn fetch(&self, trial_id: &TrialId) -> LedgerResult<String> {
        let contents = self.read_contents().await?;
        contents
            .get(&self.fetch_address)
            .and_then(|hashes| hashes.get(trial_id.as_str()))
            .filter(|hash| !hash.is_empty())
            .cloned()
            .ok_or_else(|| LedgerError::HashNotFound(trial_id.to_string()))
    }
}
