//! Report text generation
//!
//! The narrative is a fixed template. It depends only on the trial id, the
//! number of enrolled patients and the generation date; per-patient fields
//! are never read into the text. Two generations on the same day for the
//! same patient count therefore produce identical text and digest.

use crate::domain::{RegistryError, Report, Result, TrialId};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Default date format for the report header (e.g. `10/16/2026`)
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

const ANALYSIS_LINE: &str = "Analysis Results: 93% anomaly-free, flagged 1 inconsistency";
const SUMMARY_LINES: &str = "Summary: The trial shows promising results with minimal side effects.\n\
The majority of patients responded positively to the treatment.";
const RECOMMENDATION_LINE: &str =
    "Recommendation: Continue to phase 2 with minor protocol adjustments.";

/// Renders report narratives
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    date_format: String,
}

impl ReportGenerator {
    /// Create a generator with a custom header date format
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if `date_format` is not a valid strftime
    /// pattern.
    pub fn new(date_format: impl Into<String>) -> Result<Self> {
        let date_format = date_format.into();
        validate_date_format(&date_format).map_err(RegistryError::Configuration)?;
        Ok(Self { date_format })
    }

    /// Render the narrative for a trial
    ///
    /// # Examples
    ///
    /// ```
    /// use trialchain::core::report::ReportGenerator;
    /// use trialchain::domain::TrialId;
    /// use chrono::NaiveDate;
    ///
    /// let generator = ReportGenerator::default();
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
    /// let text = generator.render(&TrialId::new("t-1").unwrap(), 3, date);
    /// assert!(text.starts_with("Clinical Trial Report - 3/7/2026"));
    /// assert!(text.contains("Number of Patients: 3"));
    /// ```
    pub fn render(&self, trial_id: &TrialId, patient_count: usize, date: NaiveDate) -> String {
        format!(
            "Clinical Trial Report - {date}\n\
             \n\
             Trial ID: {trial_id}\n\
             Number of Patients: {patient_count}\n\
             {ANALYSIS_LINE}\n\
             \n\
             {SUMMARY_LINES}\n\
             \n\
             {RECOMMENDATION_LINE}",
            date = date.format(&self.date_format),
        )
    }

    /// Render the narrative and seal it into a [`Report`]
    pub fn generate(&self, trial_id: &TrialId, patient_count: usize, date: NaiveDate) -> Report {
        let text = self.render(trial_id, patient_count, date);
        Report::seal(trial_id.clone(), text)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Check that a strftime pattern contains no invalid specifiers
pub fn validate_date_format(date_format: &str) -> std::result::Result<(), String> {
    if date_format.trim().is_empty() {
        return Err("report.date_format cannot be empty".to_string());
    }
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(format!(
            "report.date_format '{date_format}' is not a valid strftime pattern"
        ));
    }
    Ok(())
}
