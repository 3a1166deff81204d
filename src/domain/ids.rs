//! Domain identifier types
//!
//! Newtype wrappers for record identifiers. Fresh identifiers are UUID v4
//! strings; parsing accepts any non-blank string so that records written by
//! older stores keep loading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing string
            ///
            /// # Errors
            ///
            /// Returns an error if the string is empty or whitespace only
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Generates a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

record_id!(
    /// Identifier of a registered user
    ///
    /// # Examples
    ///
    /// ```
    /// use trialchain::domain::ids::UserId;
    ///
    /// let id = UserId::generate();
    /// assert_eq!(id.as_str().len(), 36);
    /// ```
    UserId,
    "User ID"
);

record_id!(
    /// Identifier of a clinical trial
    ///
    /// Also the key under which a report hash is published to the ledger.
    ///
    /// # Examples
    ///
    /// ```
    /// use trialchain::domain::ids::TrialId;
    /// use std::str::FromStr;
    ///
    /// let id = TrialId::from_str("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
    /// assert_eq!(id.to_string(), "0f8fad5b-d9cb-469f-a165-70867728950e");
    /// ```
    TrialId,
    "Trial ID"
);

record_id!(
    /// Identifier of an enrolled patient record
    PatientId,
    "Patient ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TrialId::generate();
        let b = TrialId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_empty_id_fails() {
        assert!(UserId::new("").is_err());
        assert!(TrialId::new("   ").is_err());
        assert_eq!(
            PatientId::new("").unwrap_err(),
            "Patient ID cannot be empty"
        );
    }

    #[test]
    fn test_id_from_str() {
        let id: UserId = "user-1".parse().unwrap();
        assert_eq!(id.as_str(), "user-1");
        assert_eq!(format!("{id}"), "user-1");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = TrialId::new("trial-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"trial-42\"");

        let back: TrialId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
