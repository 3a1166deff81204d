//! Report store operations

use super::Registry;
use crate::domain::{RegistryError, Report, Result, TrialId};
use chrono::{Local, NaiveDate};

impl Registry {
    /// Generate (or regenerate) the report for `trial_id` dated today
    ///
    /// "Today" is the operator's local calendar date.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTrial` if the trial does not exist.
    pub fn generate_report(&mut self, trial_id: &TrialId) -> Result<Report> {
        self.generate_report_on(trial_id, Local::now().date_naive())
    }

    /// Generate (or regenerate) the report for `trial_id` with an explicit date
    ///
    /// The text depends only on the trial id, the current patient count and
    /// `date`, so two calls with the same inputs produce the same hash.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTrial` if the trial does not exist.
    pub fn generate_report_on(&mut self, trial_id: &TrialId, date: NaiveDate) -> Result<Report> {
        if self.state.trial(trial_id).is_none() {
            return Err(RegistryError::UnknownTrial(trial_id.to_string()));
        }

        let patient_count = self.state.patient_count(trial_id);
        let report = self.generator.generate(trial_id, patient_count, date);

        let report = self.mutate(|state| {
            state.upsert_report(report.clone());
            Ok(report)
        })?;

        tracing::info!(
            trial_id = %report.trial_id,
            patients = patient_count,
            hash = %report.hash,
            "Report generated"
        );
        Ok(report)
    }

    /// The stored report for `trial_id`, if one was generated
    pub fn get_report(&self, trial_id: &TrialId) -> Option<&Report> {
        self.state.report(trial_id)
    }
}
