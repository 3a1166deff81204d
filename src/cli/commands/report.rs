//! Report command implementation
//!
//! Hospitals generate the report for an assigned trial and submit its hash
//! to the ledger.

use super::{report_failure, try_step, CommandContext, EXIT_OK};
use crate::core::submission::submit_report;
use crate::domain::{RegistryError, TrialId};
use clap::{Args, Subcommand};

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Generate (or regenerate) the report of an assigned trial
    Generate {
        /// Trial ID
        trial_id: TrialId,
    },

    /// Print a stored report and its hash
    Show {
        /// Trial ID
        trial_id: TrialId,
    },

    /// Publish the report hash to the ledger, generating the report if needed
    Submit {
        /// Trial ID
        trial_id: TrialId,
    },
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut ctx = try_step!(CommandContext::open(config_path));

        match &self.command {
            ReportCommand::Generate { trial_id } => {
                let trial = try_step!(ctx.trial(trial_id));
                try_step!(ctx.require_assigned_hospital(&trial));

                if ctx.registry.list_patients(&trial.id).is_empty() {
                    let err = RegistryError::Validation(format!(
                        "trial '{}' has no patients to report on",
                        trial.title
                    ));
                    return Ok(report_failure("Report generation refused", &err));
                }

                let report = match ctx.registry.generate_report(&trial.id) {
                    Ok(r) => r,
                    Err(e) => return Ok(report_failure("Report generation failed", &e)),
                };

                println!("✅ Generated report for '{}'", trial.title);
                println!("   {}", report.report_text);
                println!("   Hash: {}", report.hash);
            }
            ReportCommand::Show { trial_id } => {
                let trial = try_step!(ctx.trial(trial_id));
                try_step!(ctx.require_visible(&trial));

                match ctx.registry.get_report(&trial.id) {
                    Some(report) => {
                        println!("📄 Report for '{}'", trial.title);
                        println!("   {}", report.report_text);
                        println!("   Hash: {}", report.hash);
                    }
                    None => {
                        let err = RegistryError::NoReport(trial.id.to_string());
                        return Ok(report_failure("No report to show", &err));
                    }
                }
            }
            ReportCommand::Submit { trial_id } => {
                let trial = try_step!(ctx.trial(trial_id));
                try_step!(ctx.require_assigned_hospital(&trial));
                let ledger = try_step!(ctx.ledger());

                println!("📤 Submitting report for '{}'", trial.title);
                println!("   Ledger: {} ({})", ledger.name(), ctx.config.ledger.publish_address);

                let submission =
                    match submit_report(&mut ctx.registry, ledger.as_ref(), &trial.id).await {
                        Ok(s) => s,
                        Err(e) => return Ok(report_failure("Submission failed", &e)),
                    };

                if submission.generated {
                    println!("   Generated a new report before publishing");
                }
                println!("✅ Published hash {}", submission.report.hash);
            }
        }

        Ok(EXIT_OK)
    }
}
