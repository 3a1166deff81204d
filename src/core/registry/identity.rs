//! Identity directory operations

use super::Registry;
use crate::domain::{RegistryError, Result, Role, User, UserId};

impl Registry {
    /// Register a user under a unique display name
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank name and `DuplicateName` if the exact
    /// name is already taken, regardless of role.
    pub fn register(&mut self, display_name: &str, role: Role) -> Result<User> {
        let user = User::new(display_name, role)?;

        let user = self.mutate(|state| {
            if state.users.iter().any(|u| u.display_name == user.display_name) {
                return Err(RegistryError::DuplicateName(user.display_name.clone()));
            }
            state.users.push(user.clone());
            Ok(user)
        })?;

        tracing::info!(
            user_id = %user.id,
            display_name = %user.display_name,
            role = user.role.as_str(),
            "User registered"
        );
        Ok(user)
    }

    /// Look up a user by exact display name
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nobody has that name.
    pub fn find_by_name(&self, display_name: &str) -> Result<&User> {
        self.state
            .users
            .iter()
            .find(|u| u.display_name == display_name)
            .ok_or_else(|| RegistryError::NotFound(format!("user '{display_name}'")))
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    pub fn find_by_id(&self, user_id: &UserId) -> Result<&User> {
        self.state
            .user(user_id)
            .ok_or_else(|| RegistryError::NotFound(format!("user {user_id}")))
    }

    /// Users acting in `role`, in registration order
    pub fn list_by_role(&self, role: Role) -> Vec<&User> {
        self.state
            .users
            .iter()
            .filter(|u| u.has_role(role))
            .collect()
    }

    /// Every registered user, in registration order
    pub fn list_users(&self) -> &[User] {
        &self.state.users
    }
}
