//! Verification results
//!
//! [`VerificationOutcome`] is the answer for one trial;
//! [`VerificationReport`] aggregates a batch run over every trial.

use crate::domain::TrialId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of comparing one trial's local report hash with the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Trial that was checked
    pub trial_id: TrialId,

    /// True iff the ledger hash equals the local hash exactly
    pub matched: bool,

    /// SHA-256 of the locally stored report text
    pub local_hash: String,

    /// Hash the ledger returned
    pub remote_hash: String,
}

/// Summary of a verification run over every trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// When the verification was performed
    pub verified_at: DateTime<Utc>,

    /// Number of trials considered
    pub total_verified: usize,

    /// Trials whose ledger hash matched
    pub passed: usize,

    /// Trials whose ledger hash differed or was missing
    pub failed: usize,

    /// Trials without a local report
    pub skipped: usize,

    /// Details of every failed trial
    pub failures: Vec<VerificationFailure>,

    /// Duration of verification in milliseconds
    pub duration_ms: u64,
}

/// Details of a failed verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Trial id
    pub trial_id: TrialId,

    /// Trial title, for display
    pub title: String,

    /// Hash of the local report
    pub expected_hash: String,

    /// Hash from the ledger, if it had one
    pub actual_hash: Option<String>,

    /// Reason for failure
    pub reason: String,
}

impl VerificationReport {
    /// Create an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            verified_at: Utc::now(),
            total_verified: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Record a matching trial
    pub fn record_pass(&mut self) {
        self.total_verified += 1;
        self.passed += 1;
    }

    /// Record a mismatching or unpublished trial
    pub fn record_failure(&mut self, failure: VerificationFailure) {
        self.total_verified += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Record a trial without a report
    pub fn record_skip(&mut self) {
        self.total_verified += 1;
        self.skipped += 1;
    }

    /// Set the duration of verification
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// True if no trial failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Share of considered trials that passed, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_verified == 0 {
            return 100.0;
        }
        (self.passed as f64 / self.total_verified as f64) * 100.0
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("📊 Ledger Verification Report\n");
        summary.push_str(&format!("  Verified at: {}\n", self.verified_at));
        summary.push_str(&format!("  Duration: {} ms\n", self.duration_ms));
        summary.push_str(&format!("  Trials considered: {}\n", self.total_verified));
        summary.push_str(&format!("  ✅ Passed: {}\n", self.passed));
        summary.push_str(&format!("  ❌ Failed: {}\n", self.failed));
        summary.push_str(&format!("  ⏭️  Skipped (no report): {}\n", self.skipped));
        summary.push_str(&format!("  Success rate: {:.2}%\n", self.success_rate()));

        if !self.failures.is_empty() {
            summary.push_str("\n❌ Failures:\n");
            for (i, failure) in self.failures.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. Trial: {} ({})\n",
                    i + 1,
                    failure.title,
                    failure.trial_id
                ));
                summary.push_str(&format!("     Local hash:  {}\n", failure.expected_hash));
                summary.push_str(&format!(
                    "     Ledger hash: {}\n",
                    failure.actual_hash.as_deref().unwrap_or("(none)")
                ));
                summary.push_str(&format!("     Reason: {}\n", failure.reason));
            }
        }

        summary
    }
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self::new()
    }
}
