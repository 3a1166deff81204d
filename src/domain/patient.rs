//! Patient enrollment domain model
//!
//! A patient is a free-text enrollment record attached to one trial. Records
//! are appended and never mutated or deleted.

use super::errors::RegistryError;
use super::ids::{PatientId, TrialId};
use super::result::Result;
use serde::{Deserialize, Serialize};

/// Enrollment record for one patient in one trial
///
/// # Examples
///
/// ```
/// use trialchain::domain::patient::PatientBuilder;
/// use trialchain::domain::ids::TrialId;
///
/// let patient = PatientBuilder::new(TrialId::generate())
///     .name("Jane Roe")
///     .age("54")
///     .diagnosis("Type 2 diabetes")
///     .dosage("10mg daily")
///     .result("HbA1c reduced")
///     .build()
///     .unwrap();
/// assert_eq!(patient.age, "54");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier
    pub id: PatientId,

    /// Trial the patient is enrolled in
    pub trial_id: TrialId,

    /// Patient name
    pub name: String,

    /// Age as entered
    pub age: String,

    /// Diagnosis
    pub diagnosis: String,

    /// Administered dosage
    pub dosage: String,

    /// Observed treatment result
    pub result: String,
}

impl Patient {
    /// Creates a new builder for the given trial
    pub fn builder(trial_id: TrialId) -> PatientBuilder {
        PatientBuilder::new(trial_id)
    }
}

/// Builder for [`Patient`]
///
/// Every field is required and must be non-blank.
#[derive(Debug)]
pub struct PatientBuilder {
    trial_id: TrialId,
    name: Option<String>,
    age: Option<String>,
    diagnosis: Option<String>,
    dosage: Option<String>,
    result: Option<String>,
}

impl PatientBuilder {
    /// Creates a builder for a patient of `trial_id`
    pub fn new(trial_id: TrialId) -> Self {
        Self {
            trial_id,
            name: None,
            age: None,
            diagnosis: None,
            dosage: None,
            result: None,
        }
    }

    /// Trial the patient will be enrolled in
    pub fn trial_id(&self) -> &TrialId {
        &self.trial_id
    }

    /// Sets the patient name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the age
    pub fn age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    /// Sets the diagnosis
    pub fn diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = Some(diagnosis.into());
        self
    }

    /// Sets the dosage
    pub fn dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = Some(dosage.into());
        self
    }

    /// Sets the treatment result
    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Builds the patient with a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first missing or blank field
    pub fn build(self) -> Result<Patient> {
        Ok(Patient {
            id: PatientId::generate(),
            trial_id: self.trial_id,
            name: required("name", self.name)?,
            age: required("age", self.age)?,
            diagnosis: required("diagnosis", self.diagnosis)?,
            dosage: required("dosage", self.dosage)?,
            result: required("result", self.result)?,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RegistryError::Validation(format!("{field} is required"))),
    }
}
