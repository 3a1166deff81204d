//! Trial command implementation

use super::{report_failure, try_step, CommandContext, EXIT_OK};
use crate::core::registry::TrialScope;
use crate::domain::{RegistryError, Role, TrialId, TrialStatus};
use clap::{Args, Subcommand};

/// Arguments for the trial command
#[derive(Args, Debug)]
pub struct TrialArgs {
    #[command(subcommand)]
    pub command: TrialCommand,
}

/// Trial subcommands
#[derive(Subcommand, Debug)]
pub enum TrialCommand {
    /// Create a trial assigned to a hospital (pharma only)
    Create {
        /// Display name of the assigned hospital
        #[arg(long)]
        hospital: String,

        /// Trial title
        #[arg(long)]
        title: String,

        /// Trial description
        #[arg(long)]
        description: String,
    },

    /// List trials visible to the logged-in user
    List {
        /// Case-insensitive search on title, description and hospital
        #[arg(short, long)]
        query: Option<String>,

        /// Only list trials with this status: pending, approved or rejected
        #[arg(long)]
        status: Option<TrialStatus>,
    },

    /// Show one trial with its patients and report hash
    Show {
        /// Trial ID
        trial_id: TrialId,
    },

    /// Approve a trial (regulator only, requires a report)
    Approve {
        /// Trial ID
        trial_id: TrialId,
    },

    /// Reject a trial (regulator only)
    Reject {
        /// Trial ID
        trial_id: TrialId,
    },
}

impl TrialArgs {
    /// Execute the trial command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut ctx = try_step!(CommandContext::open(config_path));

        match &self.command {
            TrialCommand::Create {
                hospital,
                title,
                description,
            } => {
                let sponsor = try_step!(ctx.require_role(Role::Pharma));

                let hospital_id = match ctx.registry.find_by_name(hospital) {
                    Ok(user) if user.has_role(Role::Hospital) => user.id.clone(),
                    _ => {
                        let err = RegistryError::UnknownHospital(hospital.clone());
                        return Ok(report_failure("Trial creation failed", &err));
                    }
                };

                let trial = match ctx
                    .registry
                    .create_trial(&sponsor.id, &hospital_id, title, description)
                {
                    Ok(t) => t,
                    Err(e) => return Ok(report_failure("Trial creation failed", &e)),
                };

                println!("✅ Created trial '{}'", trial.title);
                println!("   ID: {}", trial.id);
                println!("   Hospital: {}", trial.hospital_name);
                println!("   Status: {}", trial.status);
            }
            TrialCommand::List { query, status } => {
                let Some(user) = ctx.registry.current_user() else {
                    return Ok(report_failure("Listing trials failed", &RegistryError::NotLoggedIn));
                };
                let scope = match user.role {
                    Role::Regulator => TrialScope::All,
                    Role::Pharma => TrialScope::Sponsor(user.id.clone()),
                    Role::Hospital => TrialScope::Hospital(user.id.clone()),
                };

                let trials: Vec<_> = ctx
                    .registry
                    .search_trials(query.as_deref().unwrap_or_default(), &scope)
                    .into_iter()
                    .filter(|t| status.map_or(true, |s| t.status == s))
                    .collect();

                if trials.is_empty() {
                    println!("No trials found.");
                    return Ok(EXIT_OK);
                }

                println!("🧪 Trials");
                println!();
                for trial in trials {
                    let patients = ctx.registry.list_patients(&trial.id).len();
                    println!(
                        "  {}  {:<9} {:<24} {} ({} patients)",
                        trial.id,
                        trial.status.as_str(),
                        trial.title,
                        trial.hospital_name,
                        patients
                    );
                }
            }
            TrialCommand::Show { trial_id } => {
                let trial = try_step!(ctx.trial(trial_id));
                try_step!(ctx.require_visible(&trial));

                println!("🧪 {}", trial.title);
                println!();
                println!("  ID:          {}", trial.id);
                println!("  Description: {}", trial.description);
                println!("  Hospital:    {}", trial.hospital_name);
                println!("  Status:      {}", trial.status);
                println!(
                    "  Created:     {}",
                    trial.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );

                let patients = ctx.registry.list_patients(&trial.id);
                println!("  Patients:    {}", patients.len());
                for patient in patients {
                    println!(
                        "    - {} (age {}): {}, dosage {}, result {}",
                        patient.name, patient.age, patient.diagnosis, patient.dosage, patient.result
                    );
                }

                match ctx.registry.get_report(&trial.id) {
                    Some(report) => println!("  Report hash: {}", report.hash),
                    None => println!("  Report hash: (no report)"),
                }
            }
            TrialCommand::Approve { trial_id } => {
                try_step!(ctx.require_role(Role::Regulator));
                let trial = try_step!(ctx.trial(trial_id));

                if ctx.registry.get_report(&trial.id).is_none() {
                    let err = RegistryError::NoReport(trial.id.to_string());
                    return Ok(report_failure("Approval refused", &err));
                }

                return Ok(decide(&mut ctx, trial_id, TrialStatus::Approved));
            }
            TrialCommand::Reject { trial_id } => {
                try_step!(ctx.require_role(Role::Regulator));
                return Ok(decide(&mut ctx, trial_id, TrialStatus::Rejected));
            }
        }

        Ok(EXIT_OK)
    }
}

fn decide(ctx: &mut CommandContext, trial_id: &TrialId, status: TrialStatus) -> i32 {
    if let Ok(current) = ctx.registry.get_trial(trial_id) {
        if current.status.is_decided() && current.status != status {
            println!(
                "⚠️  Overriding earlier decision: trial was {}",
                current.status
            );
        }
    }

    match ctx.registry.set_status(trial_id, status) {
        Ok(trial) => {
            println!("✅ Trial '{}' is now {}", trial.title, trial.status);
            EXIT_OK
        }
        Err(e) => report_failure("Status update failed", &e),
    }
}
