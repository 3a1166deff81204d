//! Patient store operations

use super::Registry;
use crate::domain::{Patient, PatientBuilder, RegistryError, Result, TrialId};

impl Registry {
    /// Enroll a patient in the builder's trial
    ///
    /// Patients are append-only; there is no edit or delete.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTrial` if the trial does not exist and `Validation`
    /// naming the first blank field.
    pub fn add_patient(&mut self, patient: PatientBuilder) -> Result<Patient> {
        let trial_id = patient.trial_id().clone();
        if self.state.trial(&trial_id).is_none() {
            return Err(RegistryError::UnknownTrial(trial_id.to_string()));
        }

        let patient = patient.build()?;
        let patient = self.mutate(|state| {
            state.patients.push(patient.clone());
            Ok(patient)
        })?;

        tracing::info!(
            trial_id = %patient.trial_id,
            patient_id = %patient.id,
            "Patient enrolled"
        );
        Ok(patient)
    }

    /// Patients of `trial_id` in enrollment order
    pub fn list_patients(&self, trial_id: &TrialId) -> Vec<&Patient> {
        self.state
            .patients
            .iter()
            .filter(|p| &p.trial_id == trial_id)
            .collect()
    }
}
