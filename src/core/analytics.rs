//! Registry statistics for the status dashboard

use crate::core::registry::Registry;
use crate::domain::{TrialId, TrialStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-trial line of the overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialOverview {
    /// Trial id
    pub trial_id: TrialId,
    /// Trial title
    pub title: String,
    /// Assigned hospital
    pub hospital_name: String,
    /// Current status
    pub status: TrialStatus,
    /// Enrolled patients
    pub patients: usize,
    /// Stored report hash, if a report exists
    pub report_hash: Option<String>,
}

impl TrialOverview {
    /// True if a report has been generated
    pub fn has_report(&self) -> bool {
        self.report_hash.is_some()
    }
}

/// Aggregate counts over the whole registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Number of trials
    pub total_trials: usize,
    /// Trials awaiting a decision
    pub pending: usize,
    /// Approved trials
    pub approved: usize,
    /// Rejected trials
    pub rejected: usize,
    /// Patients across all trials
    pub total_patients: usize,
    /// Stored reports
    pub reports: usize,
    /// Hospital name to number of trials, only hospitals with trials
    pub trials_per_hospital: BTreeMap<String, usize>,
    /// One entry per trial in creation order
    pub trials: Vec<TrialOverview>,
}

impl RegistryStats {
    /// Compute statistics from the current registry state
    pub fn collect(registry: &Registry) -> Self {
        let state = registry.state();
        let mut stats = Self {
            total_trials: state.trials.len(),
            total_patients: state.patients.len(),
            reports: state.reports.len(),
            ..Self::default()
        };

        for trial in &state.trials {
            match trial.status {
                TrialStatus::Pending => stats.pending += 1,
                TrialStatus::Approved => stats.approved += 1,
                TrialStatus::Rejected => stats.rejected += 1,
            }

            *stats
                .trials_per_hospital
                .entry(trial.hospital_name.clone())
                .or_default() += 1;

            stats.trials.push(TrialOverview {
                trial_id: trial.id.clone(),
                title: trial.title.clone(),
                hospital_name: trial.hospital_name.clone(),
                status: trial.status,
                patients: state.patient_count(&trial.id),
                report_hash: registry.get_report(&trial.id).map(|r| r.hash.clone()),
            });
        }

        stats
    }

    /// Share of trials approved, as a percentage
    pub fn approval_rate(&self) -> f64 {
        if self.total_trials == 0 {
            return 0.0;
        }
        (self.approved as f64 / self.total_trials as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::test_support::{registry, seeded};
    use crate::domain::{Patient, Role};

    #[test]
    fn test_empty_registry() {
        let (registry, _) = registry();
        let stats = RegistryStats::collect(&registry);
        assert_eq!(stats, RegistryStats::default());
        assert_eq!(stats.approval_rate(), 0.0);
    }

    #[test]
    fn test_counts() {
        let (mut registry, _, hospital, pharma, t1) = seeded();
        let clinic = registry.register("Alder Clinic", Role::Hospital).unwrap();
        let t2 = registry
            .create_trial(&pharma.id, &clinic.id, "T2", "D")
            .unwrap();
        registry
            .create_trial(&pharma.id, &hospital.id, "T3", "D")
            .unwrap();

        registry
            .add_patient(
                Patient::builder(t1.id.clone())
                    .name("A")
                    .age("1")
                    .diagnosis("D")
                    .dosage("x")
                    .result("y"),
            )
            .unwrap();
        registry.generate_report(&t1.id).unwrap();
        registry.set_status(&t1.id, TrialStatus::Approved).unwrap();
        registry.set_status(&t2.id, TrialStatus::Rejected).unwrap();

        let stats = RegistryStats::collect(&registry);
        assert_eq!(stats.total_trials, 3);
        assert_eq!((stats.pending, stats.approved, stats.rejected), (1, 1, 1));
        assert_eq!(stats.total_patients, 1);
        assert_eq!(stats.reports, 1);

        let hospitals: Vec<_> = stats.trials_per_hospital.iter().collect();
        assert_eq!(
            hospitals,
            [(&"Alder Clinic".to_string(), &1), (&"GenHosp".to_string(), &2)]
        );

        assert_eq!(stats.trials[0].patients, 1);
        assert!(stats.trials[0].has_report());
        assert!(!stats.trials[1].has_report());
    }
}
