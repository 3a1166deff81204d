//! Trial domain model and status state machine

use super::errors::RegistryError;
use super::ids::{TrialId, UserId};
use super::result::Result;
use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trial approval status
///
/// `Pending` is the initial state. `Approved` and `Rejected` are reached by
/// a regulator decision. There is no transition guard: a new decision always
/// overwrites the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrialStatus {
    /// Awaiting a regulator decision
    #[default]
    Pending,
    /// Approved by a regulator
    Approved,
    /// Rejected by a regulator
    Rejected,
}

impl TrialStatus {
    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialStatus::Pending => "pending",
            TrialStatus::Approved => "approved",
            TrialStatus::Rejected => "rejected",
        }
    }

    /// Returns true once a regulator has decided
    pub fn is_decided(&self) -> bool {
        !matches!(self, TrialStatus::Pending)
    }
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrialStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TrialStatus::Pending),
            "approved" => Ok(TrialStatus::Approved),
            "rejected" => Ok(TrialStatus::Rejected),
            other => Err(format!(
                "Invalid trial status '{other}'. Must be one of: pending, approved, rejected"
            )),
        }
    }
}

/// A clinical trial assigned by a sponsor to a hospital
///
/// `hospital_name` is copied from the hospital user when the trial is
/// created and is never re-synced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// Unique identifier
    pub id: TrialId,

    /// Pharma user that sponsors the trial
    pub sponsor_id: UserId,

    /// Hospital user running the trial
    pub hospital_id: UserId,

    /// Hospital display name at creation time
    pub hospital_name: String,

    /// Trial title
    pub title: String,

    /// Trial description
    pub description: String,

    /// Approval status
    pub status: TrialStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Trial {
    /// Creates a pending trial for the given sponsor and hospital
    ///
    /// The caller is responsible for having resolved `sponsor` and
    /// `hospital` from the identity directory.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the title or description is blank.
    pub fn new(
        sponsor: &User,
        hospital: &User,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let title = title.into();
        let description = description.into();

        if title.trim().is_empty() {
            return Err(RegistryError::Validation("title is required".to_string()));
        }
        if description.trim().is_empty() {
            return Err(RegistryError::Validation(
                "description is required".to_string(),
            ));
        }

        Ok(Self {
            id: TrialId::generate(),
            sponsor_id: sponsor.id.clone(),
            hospital_id: hospital.id.clone(),
            hospital_name: hospital.display_name.clone(),
            title,
            description,
            status: TrialStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Case-insensitive substring match on title, description and hospital name
    ///
    /// An empty query matches every trial.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.hospital_name.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;

    fn parties() -> (User, User) {
        (
            User::new("PharmaCo", Role::Pharma).unwrap(),
            User::new("GenHosp", Role::Hospital).unwrap(),
        )
    }

    #[test]
    fn test_new_trial_is_pending() {
        let (sponsor, hospital) = parties();
        let trial = Trial::new(&sponsor, &hospital, "T1", "desc").unwrap();

        assert_eq!(trial.status, TrialStatus::Pending);
        assert_eq!(trial.hospital_name, "GenHosp");
        assert_eq!(trial.sponsor_id, sponsor.id);
        assert_eq!(trial.hospital_id, hospital.id);
    }

    #[test]
    fn test_new_trial_requires_title_and_description() {
        let (sponsor, hospital) = parties();

        let err = Trial::new(&sponsor, &hospital, " ", "desc").unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));

        let err = Trial::new(&sponsor, &hospital, "T1", "").unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Approved".parse::<TrialStatus>().unwrap(), TrialStatus::Approved);
        assert!("archived".parse::<TrialStatus>().is_err());
        assert_eq!(TrialStatus::Rejected.to_string(), "rejected");
        assert!(!TrialStatus::Pending.is_decided());
        assert!(TrialStatus::Approved.is_decided());
    }

    #[test]
    fn test_matches_query() {
        let (sponsor, hospital) = parties();
        let trial = Trial::new(&sponsor, &hospital, "Oncology Phase II", "Dose finding").unwrap();

        assert!(trial.matches_query(""));
        assert!(trial.matches_query("oncology"));
        assert!(trial.matches_query("DOSE"));
        assert!(trial.matches_query("genhosp"));
        assert!(!trial.matches_query("cardio"));
    }
}
