//! Status command implementation
//!
//! This module implements the `status` command for displaying registry
//! counts and per-trial progress.

use super::{try_step, CommandContext};
use crate::core::analytics::RegistryStats;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show trials assigned to this hospital
    #[arg(long)]
    pub hospital: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking registry status");

        println!("📊 Registry Status");
        println!();

        let ctx = try_step!(CommandContext::open(config_path));

        match ctx.registry.current_user() {
            Some(user) => println!("Logged in as: {} ({})", user.display_name, user.role),
            None => println!("Logged in as: (nobody)"),
        }
        println!("Store: {}", ctx.registry.store_name());
        println!("Ledger backend: {}", ctx.config.ledger.backend.as_str());
        println!();

        let stats = RegistryStats::collect(&ctx.registry);
        if stats.total_trials == 0 {
            println!("No trials registered.");
            println!("Run 'trialchain trial create' as a pharma user to add one.");
            return Ok(0);
        }

        println!("Summary:");
        println!("  Trials: {}", stats.total_trials);
        println!(
            "  Pending / Approved / Rejected: {} / {} / {}",
            stats.pending, stats.approved, stats.rejected
        );
        println!("  Approval rate: {:.1}%", stats.approval_rate());
        println!("  Patients: {}", stats.total_patients);
        println!("  Reports: {}", stats.reports);
        println!();

        println!("Trials per hospital:");
        for (hospital, count) in &stats.trials_per_hospital {
            println!("  {hospital}: {count}");
        }
        println!();

        let trials: Vec<_> = stats
            .trials
            .iter()
            .filter(|t| {
                self.hospital
                    .as_deref()
                    .map_or(true, |h| t.hospital_name == h)
            })
            .collect();

        println!("Trials ({}):", trials.len());
        println!();
        for trial in trials {
            println!("  🧪 {} ({})", trial.title, trial.trial_id);
            println!("     Hospital: {}", trial.hospital_name);
            println!("     Status: {}", trial.status);
            println!("     Patients: {}", trial.patients);
            println!(
                "     Report: {}",
                trial.report_hash.as_deref().unwrap_or("(none)")
            );
            println!();
        }

        Ok(0)
    }
}
