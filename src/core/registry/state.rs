//! In-memory record collections
//!
//! [`RegistryState`] is the full persisted state: four collections loaded in
//! full and rewritten in full on every mutation. It holds no indices; all
//! lookups are linear scans, which matches the single-user workload.

use crate::domain::{Patient, Report, Role, Trial, TrialId, User, UserId};
use serde::{Deserialize, Serialize};

/// All persisted registry records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// Registered users
    #[serde(default)]
    pub users: Vec<User>,

    /// Trials in creation order
    #[serde(default)]
    pub trials: Vec<Trial>,

    /// Patients in enrollment order
    #[serde(default)]
    pub patients: Vec<Patient>,

    /// At most one report per trial
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl RegistryState {
    /// Returns true if no record of any kind exists
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.trials.is_empty()
            && self.patients.is_empty()
            && self.reports.is_empty()
    }

    pub(crate) fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub(crate) fn user_with_role(&self, id: &UserId, role: Role) -> Option<&User> {
        self.user(id).filter(|u| u.has_role(role))
    }

    pub(crate) fn trial(&self, id: &TrialId) -> Option<&Trial> {
        self.trials.iter().find(|t| &t.id == id)
    }

    pub(crate) fn trial_mut(&mut self, id: &TrialId) -> Option<&mut Trial> {
        self.trials.iter_mut().find(|t| &t.id == id)
    }

    pub(crate) fn report(&self, trial_id: &TrialId) -> Option<&Report> {
        self.reports.iter().find(|r| &r.trial_id == trial_id)
    }

    pub(crate) fn patient_count(&self, trial_id: &TrialId) -> usize {
        self.patients
            .iter()
            .filter(|p| &p.trial_id == trial_id)
            .count()
    }

    /// Insert or replace the report for its trial, keeping its position
    pub(crate) fn upsert_report(&mut self, report: Report) {
        match self
            .reports
            .iter_mut()
            .find(|r| r.trial_id == report.trial_id)
        {
            Some(existing) => *existing = report,
            None => self.reports.push(report),
        }
    }
}
