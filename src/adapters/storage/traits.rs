//! Record store abstraction
//!
//! This module defines the trait persistence backends implement. A store
//! loads and saves the whole registry state at once; there are no partial
//! updates and no migrations.

use crate::core::registry::RegistryState;
use crate::domain::{Result, UserId};

/// Persistence backend for the registry
///
/// Implementations replace each collection atomically: a later `load` sees
/// either the previous or the new version of every collection.
pub trait RecordStore: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Load every collection
    ///
    /// A store that has never been written returns an empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if existing data cannot be read or parsed.
    fn load(&self) -> Result<RegistryState>;

    /// Rewrite every collection
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&self, state: &RegistryState) -> Result<()>;

    /// Load the remembered current user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the session record cannot be read.
    fn load_current_user(&self) -> Result<Option<UserId>>;

    /// Remember (or forget, with `None`) the current user
    ///
    /// # Errors
    ///
    /// Returns an error if the session record cannot be written.
    fn save_current_user(&self, user_id: Option<&UserId>) -> Result<()>;
}
