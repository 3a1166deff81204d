//! Patient command implementation

use super::{report_failure, try_step, CommandContext, EXIT_OK};
use crate::domain::{Patient, RegistryError, TrialId};
use clap::{Args, Subcommand};

/// Arguments for the patient command
#[derive(Args, Debug)]
pub struct PatientArgs {
    #[command(subcommand)]
    pub command: PatientCommand,
}

/// Patient subcommands
#[derive(Subcommand, Debug)]
pub enum PatientCommand {
    /// Enroll a patient in a trial assigned to the logged-in hospital
    Add {
        /// Trial ID
        trial_id: TrialId,

        #[arg(long)]
        name: String,

        #[arg(long)]
        age: String,

        #[arg(long)]
        diagnosis: String,

        #[arg(long)]
        dosage: String,

        /// Observed result
        #[arg(long)]
        result: String,
    },

    /// List the patients of a trial
    List {
        /// Trial ID
        trial_id: TrialId,
    },
}

impl PatientArgs {
    /// Execute the patient command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut ctx = try_step!(CommandContext::open(config_path));

        match &self.command {
            PatientCommand::Add {
                trial_id,
                name,
                age,
                diagnosis,
                dosage,
                result,
            } => {
                let trial = match ctx.registry.get_trial(trial_id) {
                    Ok(t) => t.clone(),
                    Err(_) => {
                        let err = RegistryError::UnknownTrial(trial_id.to_string());
                        return Ok(report_failure("Enrollment failed", &err));
                    }
                };
                try_step!(ctx.require_assigned_hospital(&trial));

                let builder = Patient::builder(trial.id.clone())
                    .name(name.as_str())
                    .age(age.as_str())
                    .diagnosis(diagnosis.as_str())
                    .dosage(dosage.as_str())
                    .result(result.as_str());

                let patient = match ctx.registry.add_patient(builder) {
                    Ok(p) => p,
                    Err(e) => return Ok(report_failure("Enrollment failed", &e)),
                };

                println!("✅ Enrolled {} in '{}'", patient.name, trial.title);
                println!("   Patient ID: {}", patient.id);
                if ctx.registry.get_report(&trial.id).is_some() {
                    println!("   ⚠️  The stored report predates this patient; regenerate it");
                }
            }
            PatientCommand::List { trial_id } => {
                let trial = try_step!(ctx.trial(trial_id));
                try_step!(ctx.require_visible(&trial));

                let patients = ctx.registry.list_patients(&trial.id);
                if patients.is_empty() {
                    println!("No patients enrolled in '{}'.", trial.title);
                    return Ok(EXIT_OK);
                }

                println!("🩺 Patients of '{}'", trial.title);
                println!();
                for patient in patients {
                    println!(
                        "  {:<20} age {:<4} {:<20} {:<10} {}",
                        patient.name, patient.age, patient.diagnosis, patient.dosage, patient.result
                    );
                }
            }
        }

        Ok(EXIT_OK)
    }
}
