//! Report generation and digests

pub mod checksum;
pub mod generator;

pub use checksum::calculate_digest;
pub use generator::{ReportGenerator, DEFAULT_DATE_FORMAT};
