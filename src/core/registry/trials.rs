//! Trial store operations

use super::Registry;
use crate::domain::{RegistryError, Result, Role, Trial, TrialId, TrialStatus, UserId};

/// Which trials a listing or search covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialScope {
    /// Every trial
    All,
    /// Trials created by this pharma user
    Sponsor(UserId),
    /// Trials assigned to this hospital user
    Hospital(UserId),
}

impl TrialScope {
    fn includes(&self, trial: &Trial) -> bool {
        match self {
            Self::All => true,
            Self::Sponsor(id) => &trial.sponsor_id == id,
            Self::Hospital(id) => &trial.hospital_id == id,
        }
    }
}

impl Registry {
    /// Create a pending trial sponsored by `sponsor_id` and assigned to
    /// `hospital_id`
    ///
    /// # Errors
    ///
    /// - `UnknownSponsor` if `sponsor_id` is not a pharma user
    /// - `UnknownHospital` if `hospital_id` is not a hospital user
    /// - `Validation` for a blank title or description
    pub fn create_trial(
        &mut self,
        sponsor_id: &UserId,
        hospital_id: &UserId,
        title: &str,
        description: &str,
    ) -> Result<Trial> {
        let sponsor = self
            .state
            .user_with_role(sponsor_id, Role::Pharma)
            .ok_or_else(|| RegistryError::UnknownSponsor(sponsor_id.to_string()))?;
        let hospital = self
            .state
            .user_with_role(hospital_id, Role::Hospital)
            .ok_or_else(|| RegistryError::UnknownHospital(hospital_id.to_string()))?;

        let trial = Trial::new(sponsor, hospital, title, description)?;

        let trial = self.mutate(|state| {
            state.trials.push(trial.clone());
            Ok(trial)
        })?;

        tracing::info!(
            trial_id = %trial.id,
            sponsor_id = %trial.sponsor_id,
            hospital_id = %trial.hospital_id,
            "Trial created"
        );
        Ok(trial)
    }

    /// Look up a trial by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    pub fn get_trial(&self, trial_id: &TrialId) -> Result<&Trial> {
        self.state
            .trial(trial_id)
            .ok_or_else(|| RegistryError::NotFound(format!("trial {trial_id}")))
    }

    /// Trials created by `sponsor_id`, oldest first
    pub fn list_by_sponsor(&self, sponsor_id: &UserId) -> Vec<&Trial> {
        self.search_trials("", &TrialScope::Sponsor(sponsor_id.clone()))
    }

    /// Trials assigned to `hospital_id`, oldest first
    pub fn list_by_hospital(&self, hospital_id: &UserId) -> Vec<&Trial> {
        self.search_trials("", &TrialScope::Hospital(hospital_id.clone()))
    }

    /// Every trial, oldest first
    pub fn list_all(&self) -> Vec<&Trial> {
        self.state.trials.iter().collect()
    }

    /// Trials in `scope` whose title, description or hospital name contains
    /// `query`, ignoring case
    pub fn search_trials(&self, query: &str, scope: &TrialScope) -> Vec<&Trial> {
        self.state
            .trials
            .iter()
            .filter(|t| scope.includes(t) && t.matches_query(query))
            .collect()
    }

    /// Overwrite a trial's status
    ///
    /// Any status may follow any other; the last write wins.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    pub fn set_status(&mut self, trial_id: &TrialId, status: TrialStatus) -> Result<Trial> {
        let (previous, trial) = self.mutate(|state| {
            let trial = state
                .trial_mut(trial_id)
                .ok_or_else(|| RegistryError::NotFound(format!("trial {trial_id}")))?;
            let previous = trial.status;
            trial.status = status;
            Ok((previous, trial.clone()))
        })?;

        crate::log_status_change!(trial.id, previous, trial.status);
        Ok(trial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::test_support::{registry, seeded};

    #[test]
    fn test_create_trial_starts_pending_with_fresh_id() {
        let (mut registry, _, hospital, pharma, first) = seeded();
        let second = registry
            .create_trial(&pharma.id, &hospital.id, "T2", "Another")
            .unwrap();

        assert_eq!(first.status, TrialStatus::Pending);
        assert_eq!(second.status, TrialStatus::Pending);
        assert_ne!(first.id, second.id);
        assert_eq!(second.hospital_name, "GenHosp");
        assert_eq!(registry.list_all().len(), 2);
    }

    #[test]
    fn test_unknown_hospital() {
        let (mut registry, _, _, pharma, _) = seeded();

        let err = registry
            .create_trial(&pharma.id, &UserId::generate(), "T", "D")
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownHospital(_)));
    }

    #[test]
    fn test_hospital_id_must_be_a_hospital() {
        let (mut registry, _, _, pharma, _) = seeded();

        let err = registry
            .create_trial(&pharma.id, &pharma.id, "T", "D")
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownHospital(_)));
    }

    #[test]
    fn test_sponsor_must_be_pharma() {
        let (mut registry, _, hospital, _, _) = seeded();

        let err = registry
            .create_trial(&hospital.id, &hospital.id, "T", "D")
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSponsor(_)));
    }

    #[test]
    fn test_blank_fields_rejected_without_saving() {
        let (mut registry, store, hospital, pharma, _) = seeded();
        let saves = store.save_count();

        let err = registry
            .create_trial(&pharma.id, &hospital.id, "", "D")
            .unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn test_listing_by_party() {
        let (mut registry, _, hospital, pharma, t1) = seeded();
        let other_hospital = registry.register("CityClinic", Role::Hospital).unwrap();
        let t2 = registry
            .create_trial(&pharma.id, &other_hospital.id, "T2", "D")
            .unwrap();

        let ids = |trials: Vec<&Trial>| trials.into_iter().map(|t| t.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(registry.list_by_sponsor(&pharma.id)), vec![t1.id.clone(), t2.id.clone()]);
        assert_eq!(ids(registry.list_by_hospital(&hospital.id)), vec![t1.id]);
        assert_eq!(ids(registry.list_by_hospital(&other_hospital.id)), vec![t2.id]);
    }

    #[test]
    fn test_status_last_write_wins() {
        let (mut registry, _, _, _, trial) = seeded();

        registry.set_status(&trial.id, TrialStatus::Approved).unwrap();
        registry.set_status(&trial.id, TrialStatus::Rejected).unwrap();
        assert_eq!(registry.get_trial(&trial.id).unwrap().status, TrialStatus::Rejected);

        registry.set_status(&trial.id, TrialStatus::Approved).unwrap();
        assert_eq!(registry.get_trial(&trial.id).unwrap().status, TrialStatus::Approved);
    }

    #[test]
    fn test_set_status_unknown_trial() {
        let (mut registry, _) = registry();
        let err = registry
            .set_status(&TrialId::generate(), TrialStatus::Approved)
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn test_search_trials() {
        let (mut registry, _, hospital, pharma, _) = seeded();
        registry
            .create_trial(&pharma.id, &hospital.id, "Oncology", "Tumour markers")
            .unwrap();

        assert_eq!(registry.search_trials("", &TrialScope::All).len(), 2);
        assert_eq!(registry.search_trials("ONCO", &TrialScope::All).len(), 1);
        assert_eq!(registry.search_trials("tumour", &TrialScope::All).len(), 1);
        assert_eq!(registry.search_trials("genhosp", &TrialScope::All).len(), 2);
        assert!(registry
            .search_trials("onco", &TrialScope::Sponsor(UserId::generate()))
            .is_empty());
    }
}
