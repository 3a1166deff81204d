//! Core business logic for Trialchain.
//!
//! # Modules
//!
//! - [`registry`] - Users, trials, patients and reports behind one handle
//! - [`report`] - Report text generation and SHA-256 digests
//! - [`submission`] - Generate-if-missing then publish to the ledger
//! - [`verification`] - Compare stored report hashes with the ledger
//! - [`analytics`] - Aggregate counts for the status dashboard
//!
//! # Workflow
//!
//! 1. A hospital and a pharma company register
//! 2. The pharma company creates a trial assigned to the hospital
//! 3. The hospital enrolls patients and generates the trial report
//! 4. The hospital submits the report hash to the ledger
//! 5. A regulator verifies the stored report against the ledger
//! 6. The regulator approves or rejects the trial
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trialchain::adapters::ledger::InMemoryLedger;
//! use trialchain::adapters::storage::MemoryStore;
//! use trialchain::core::registry::Registry;
//! use trialchain::core::submission::submit_report;
//! use trialchain::core::verification::Verifier;
//! use trialchain::domain::Role;
//!
//! # async fn example() -> trialchain::domain::Result<()> {
//! let mut registry = Registry::open(Arc::new(MemoryStore::new()))?;
//! let hospital = registry.register("GenHosp", Role::Hospital)?;
//! let pharma = registry.register("PharmaCo", Role::Pharma)?;
//! let trial = registry.create_trial(&pharma.id, &hospital.id, "T1", "desc")?;
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! submit_report(&mut registry, ledger.as_ref(), &trial.id).await?;
//!
//! let outcome = Verifier::new(ledger).verify(&registry, &trial.id).await?;
//! assert!(outcome.matched);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod registry;
pub mod report;
pub mod submission;
pub mod verification;
