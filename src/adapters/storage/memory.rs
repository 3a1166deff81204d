//! In-memory record store for tests and throwaway sessions

use super::traits::RecordStore;
use crate::core::registry::RegistryState;
use crate::domain::{RegistryError, Result, UserId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// Record store that keeps the last saved state in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<RegistryState>,
    current_user: RwLock<Option<UserId>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `state`
    pub fn with_state(state: RegistryState) -> Self {
        Self {
            state: RwLock::new(state),
            ..Self::default()
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make subsequent saves fail with a storage error
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the last saved state
    pub fn snapshot(&self) -> Result<RegistryState> {
        self.load()
    }
}

fn poisoned() -> RegistryError {
    RegistryError::Storage("in-memory store lock poisoned".to_string())
}

impl RecordStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<RegistryState> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.clone())
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RegistryError::Storage(
                "simulated save failure".to_string(),
            ));
        }

        let mut current = self.state.write().map_err(|_| poisoned())?;
        *current = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load_current_user(&self) -> Result<Option<UserId>> {
        let current = self.current_user.read().map_err(|_| poisoned())?;
        Ok(current.clone())
    }

    fn save_current_user(&self, user_id: Option<&UserId>) -> Result<()> {
        let mut current = self.current_user.write().map_err(|_| poisoned())?;
        *current = user_id.cloned();
        Ok(())
    }
}
