//! Domain models and types for trialchain.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`UserId`], [`TrialId`], [`PatientId`])
//! - **Records** ([`User`], [`Trial`], [`Patient`], [`Report`])
//! - **Error types** ([`RegistryError`], [`LedgerError`])
//! - **Result type alias** ([`Result`])
//!
//! Records are fixed types whose constructors enforce their invariants, so
//! a `Trial` can only be built with a non-blank title and description and
//! always starts out [`TrialStatus::Pending`]:
//!
//! ```rust
//! use trialchain::domain::{Role, Trial, TrialStatus, User};
//!
//! # fn example() -> trialchain::domain::Result<()> {
//! let sponsor = User::new("PharmaCo", Role::Pharma)?;
//! let hospital = User::new("GenHosp", Role::Hospital)?;
//! let trial = Trial::new(&sponsor, &hospital, "T1", "desc")?;
//! assert_eq!(trial.status, TrialStatus::Pending);
//! # Ok(())
//! # }
//! ```
//!
//! Records reference each other by identifier only. A trial never embeds its
//! patients or report; they are looked up through the registry.

pub mod errors;
pub mod ids;
pub mod patient;
pub mod report;
pub mod result;
pub mod trial;
pub mod user;

pub use errors::{LedgerError, RegistryError};
pub use ids::{PatientId, TrialId, UserId};
pub use patient::{Patient, PatientBuilder};
pub use report::Report;
pub use result::Result;
pub use trial::{Trial, TrialStatus};
pub use user::{Role, User};
