//! Verify command implementation
//!
//! Regulators compare stored report hashes against the ledger. A mismatch,
//! or a trial with nothing published, exits with code 1.

use super::{
    report_failure, try_step, CommandContext, EXIT_OK, EXIT_VERIFICATION_FAILED,
};
use crate::core::verification::Verifier;
use crate::domain::{LedgerError, RegistryError, Role, TrialId};
use clap::Args;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Trial to verify
    #[arg(required_unless_present = "all")]
    pub trial_id: Option<TrialId>,

    /// Verify every trial that has a report
    #[arg(long, conflicts_with = "trial_id")]
    pub all: bool,
}

impl VerifyArgs {
    /// Execute the verify command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = try_step!(CommandContext::open(config_path));
        try_step!(ctx.require_role(Role::Regulator));
        let ledger = try_step!(ctx.ledger());

        if ctx.config.ledger.addresses_differ() {
            println!("⚠️  Publish and fetch addresses differ; hashes will not be found");
        }

        let verifier = Verifier::new(ledger);

        let Some(trial_id) = self.trial_id.as_ref().filter(|_| !self.all) else {
            let report = match verifier.verify_all(&ctx.registry).await {
                Ok(r) => r,
                Err(e) => return Ok(report_failure("Verification aborted", &e)),
            };
            println!("{}", report.format_summary());

            return Ok(if report.is_success() {
                EXIT_OK
            } else {
                EXIT_VERIFICATION_FAILED
            });
        };

        let trial = try_step!(ctx.trial(trial_id));
        println!("🔍 Verifying '{}'", trial.title);

        match verifier.verify(&ctx.registry, &trial.id).await {
            Ok(outcome) => {
                println!("   Local hash:  {}", outcome.local_hash);
                println!("   Ledger hash: {}", outcome.remote_hash);
                if outcome.matched {
                    println!("✅ Verified: report matches the ledger");
                    Ok(EXIT_OK)
                } else {
                    println!("❌ Mismatch: report differs from the ledger");
                    Ok(EXIT_VERIFICATION_FAILED)
                }
            }
            Err(RegistryError::Ledger(LedgerError::HashNotFound(_))) => {
                println!("❌ Not verified: no hash published for this trial");
                Ok(EXIT_VERIFICATION_FAILED)
            }
            Err(e) => Ok(report_failure("Verification failed", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: VerifyArgs,
    }

    #[test]
    fn test_parse_single_trial() {
        let cli = TestCli::parse_from(["test", "trial-1"]);
        assert_eq!(cli.args.trial_id.unwrap().as_str(), "trial-1");
        assert!(!cli.args.all);
    }

    #[test]
    fn test_parse_all() {
        let cli = TestCli::parse_from(["test", "--all"]);
        assert!(cli.args.all);
        assert!(cli.args.trial_id.is_none());
    }

    #[test]
    fn test_requires_trial_or_all() {
        assert!(TestCli::try_parse_from(["test"]).is_err());
        assert!(TestCli::try_parse_from(["test", "trial-1", "--all"]).is_err());
    }
}
