//! User domain model

use super::errors::RegistryError;
use super::ids::UserId;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a user acts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Pharma company: sponsors trials
    Pharma,
    /// Hospital: enrolls patients and produces reports
    Hospital,
    /// Regulator: verifies reports and decides trials
    Regulator,
}

impl Role {
    /// All roles in display order
    pub const ALL: [Role; 3] = [Role::Pharma, Role::Hospital, Role::Regulator];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pharma => "pharma",
            Role::Hospital => "hospital",
            Role::Regulator => "regulator",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Pharma => "Pharma Company",
            Role::Hospital => "Hospital",
            Role::Regulator => "Regulator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pharma" => Ok(Role::Pharma),
            "hospital" => Ok(Role::Hospital),
            "regulator" => Ok(Role::Regulator),
            other => Err(format!(
                "Invalid role '{other}'. Must be one of: pharma, hospital, regulator"
            )),
        }
    }
}

/// A registered user
///
/// Immutable after registration. "Logging in" selects a user by display
/// name; there are no credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Unique, non-empty display name
    pub display_name: String,

    /// Role the user acts in
    pub role: Role,
}

impl User {
    /// Creates a user with a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the display name is blank
    pub fn new(display_name: impl Into<String>, role: Role) -> Result<Self> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(RegistryError::Validation(
                "display name is required".to_string(),
            ));
        }

        Ok(Self {
            id: UserId::generate(),
            display_name,
            role,
        })
    }

    /// Returns true if the user acts in the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
