//! The registry: identity directory, trial store, patient store and report
//! store behind one explicit handle.
//!
//! [`Registry`] owns the in-memory [`RegistryState`] and the
//! [`RecordStore`] it was loaded from. Every mutation is applied to a copy of
//! the state, the copy is saved, and only then swapped in. A failed save
//! leaves the registry exactly as it was.
//!
//! There is a single writer. Two processes sharing a data directory will
//! overwrite each other's changes.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trialchain::adapters::storage::MemoryStore;
//! use trialchain::core::registry::Registry;
//! use trialchain::domain::{Patient, Role, TrialStatus};
//!
//! # fn example() -> trialchain::domain::Result<()> {
//! let mut registry = Registry::open(Arc::new(MemoryStore::new()))?;
//!
//! let hospital = registry.register("GenHosp", Role::Hospital)?;
//! let pharma = registry.register("PharmaCo", Role::Pharma)?;
//! let trial = registry.create_trial(&pharma.id, &hospital.id, "T1", "desc")?;
//!
//! registry.add_patient(
//!     Patient::builder(trial.id.clone())
//!         .name("A")
//!         .age("40")
//!         .diagnosis("D")
//!         .dosage("5mg")
//!         .result("ok"),
//! )?;
//! let report = registry.generate_report(&trial.id)?;
//! assert!(report.report_text.contains("Number of Patients: 1"));
//!
//! registry.set_status(&trial.id, TrialStatus::Approved)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod identity;
mod patients;
mod reports;
mod session;
pub mod state;
mod trials;

pub use state::RegistryState;
pub use trials::TrialScope;

use crate::adapters::storage::RecordStore;
use crate::core::report::ReportGenerator;
use crate::domain::{Result, UserId};
use std::sync::Arc;

/// Handle over the persisted registry
pub struct Registry {
    state: RegistryState,
    store: Arc<dyn RecordStore>,
    generator: ReportGenerator,
    current_user: Option<UserId>,
}

impl Registry {
    /// Load the registry from `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collections cannot be read.
    pub fn open(store: Arc<dyn RecordStore>) -> Result<Self> {
        let state = store.load()?;
        let current_user = store.load_current_user()?;

        tracing::debug!(
            store = store.name(),
            users = state.users.len(),
            trials = state.trials.len(),
            logged_in = current_user.is_some(),
            "Registry opened"
        );

        Ok(Self {
            state,
            store,
            generator: ReportGenerator::default(),
            current_user,
        })
    }

    /// Use `generator` for every report generated from now on
    pub fn with_generator(mut self, generator: ReportGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Read-only view of every record
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    /// Name of the backing store
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Write the current state to the store
    ///
    /// Mutations already save on their own; this is the explicit flush for
    /// callers that want one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.state)
    }

    /// Apply `change` to a copy of the state, persist it, then commit it
    fn mutate<T>(&mut self, change: impl FnOnce(&mut RegistryState) -> Result<T>) -> Result<T> {
        let mut next = self.state.clone();
        let value = change(&mut next)?;
        self.store.save(&next)?;
        self.state = next;
        Ok(value)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("store", &self.store.name())
            .field("users", &self.state.users.len())
            .field("trials", &self.state.trials.len())
            .field("patients", &self.state.patients.len())
            .field("reports", &self.state.reports.len())
            .field("current_user", &self.current_user)
            .finish()
    }
}
