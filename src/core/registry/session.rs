//! Login session
//!
//! The current user is remembered by the record store so it survives
//! between CLI invocations.

use super::Registry;
use crate::domain::{RegistryError, Result, Role, User};

impl Registry {
    /// Make the user named `display_name` the current user
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name, or a storage error if the
    /// session cannot be saved.
    pub fn login(&mut self, display_name: &str) -> Result<User> {
        let user = self.find_by_name(display_name)?.clone();
        self.store.save_current_user(Some(&user.id))?;
        self.current_user = Some(user.id.clone());

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "Logged in");
        Ok(user)
    }

    /// Forget the current user
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session cannot be saved.
    pub fn logout(&mut self) -> Result<()> {
        self.store.save_current_user(None)?;
        if let Some(id) = self.current_user.take() {
            tracing::info!(user_id = %id, "Logged out");
        }
        Ok(())
    }

    /// The logged-in user
    ///
    /// A remembered id that no longer resolves counts as logged out.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user
            .as_ref()
            .and_then(|id| self.state.user(id))
    }

    /// The logged-in user, provided they act in `role`
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without a session and `Forbidden` for any other
    /// role.
    pub fn require_role(&self, role: Role) -> Result<&User> {
        let user = self.current_user().ok_or(RegistryError::NotLoggedIn)?;
        if !user.has_role(role) {
            return Err(RegistryError::Forbidden(format!(
                "{} is a {} user; this action requires the {} role",
                user.display_name,
                user.role.as_str(),
                role.as_str()
            )));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::registry::test_support::registry;
    use crate::core::registry::Registry;
    use crate::domain::{RegistryError, Role};

    #[test]
    fn test_login_and_require_role() {
        let (mut registry, _) = registry();
        registry.register("Reg", Role::Regulator).unwrap();

        assert!(matches!(
            registry.require_role(Role::Regulator),
            Err(RegistryError::NotLoggedIn)
        ));

        registry.login("Reg").unwrap();
        assert_eq!(registry.current_user().unwrap().display_name, "Reg");
        assert!(registry.require_role(Role::Regulator).is_ok());
        assert!(matches!(
            registry.require_role(Role::Hospital),
            Err(RegistryError::Forbidden(_))
        ));
    }

    #[test]
    fn test_login_unknown_user() {
        let (mut registry, _) = registry();
        assert!(matches!(
            registry.login("Ghost"),
            Err(RegistryError::NotFound(_))
        ));
        assert!(registry.current_user().is_none());
    }

    #[test]
    fn test_session_survives_reopen() {
        let (mut registry, store) = registry();
        registry.register("GenHosp", Role::Hospital).unwrap();
        registry.login("GenHosp").unwrap();

        let reopened = Registry::open(store.clone()).unwrap();
        assert_eq!(reopened.current_user().unwrap().display_name, "GenHosp");

        registry.logout().unwrap();
        let reopened = Registry::open(store).unwrap();
        assert!(reopened.current_user().is_none());
    }
}
