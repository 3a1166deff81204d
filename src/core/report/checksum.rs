//! Report digest calculation
//!
//! The digest binds a report to its text. It is shown to users and compared
//! for equality against the ledger, so the algorithm and encoding are fixed:
//! SHA-256 over the UTF-8 bytes, rendered as 64 lowercase hex characters.

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 hex digest of report text
///
/// # Examples
///
/// ```
/// use trialchain::core::report::checksum::calculate_digest;
///
/// let digest = calculate_digest("Clinical Trial Report");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn calculate_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_digest_deterministic() {
        let a = calculate_digest("Trial ID: t-1\nNumber of Patients: 3");
        let b = calculate_digest("Trial ID: t-1\nNumber of Patients: 3");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_calculate_digest_different_content() {
        let a = calculate_digest("Number of Patients: 3");
        let b = calculate_digest("Number of Patients: 4");
        assert_ne!(a, b);
    }

    #[test]
    fn test_calculate_digest_known_value() {
        assert_eq!(
            calculate_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            calculate_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
