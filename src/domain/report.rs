//! Report domain model

use super::ids::TrialId;
use crate::core::report::checksum::calculate_digest;
use serde::{Deserialize, Serialize};

/// Generated trial report bound to its content digest
///
/// At most one report exists per trial. `hash` is always the SHA-256 hex
/// digest of `report_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Trial the report summarises
    pub trial_id: TrialId,

    /// Generated narrative
    pub report_text: String,

    /// Digest of `report_text`
    pub hash: String,
}

impl Report {
    /// Creates a report and computes its digest
    ///
    /// # Examples
    ///
    /// ```
    /// use trialchain::domain::report::Report;
    /// use trialchain::domain::ids::TrialId;
    ///
    /// let report = Report::seal(TrialId::new("t-1").unwrap(), "hello");
    /// assert_eq!(
    ///     report.hash,
    ///     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    /// );
    /// ```
    pub fn seal(trial_id: TrialId, report_text: impl Into<String>) -> Self {
        let report_text = report_text.into();
        let hash = calculate_digest(&report_text);
        Self {
            trial_id,
            report_text,
            hash,
        }
    }

    /// Returns true if `hash` still matches `report_text`
    pub fn is_intact(&self) -> bool {
        calculate_digest(&self.report_text) == self.hash
    }
}
