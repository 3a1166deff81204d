//! Ledger verification of generated reports
//!
//! A report is verified when the hash the ledger returns for its trial is
//! byte-for-byte equal to the hash of the stored report text.

pub mod report;
pub mod verify;

pub use report::{VerificationFailure, VerificationOutcome, VerificationReport};
pub use verify::Verifier;
