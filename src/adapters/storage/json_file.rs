//! JSON file record store
//!
//! Each collection lives in its own file inside the data directory
//! (`users.json`, `trials.json`, `patients.json`, `reports.json`) and the
//! remembered login in `session.json`. Files are replaced by writing a
//! sibling temp file and renaming it over the original.
//!
//! A save stages every collection's temp file before renaming any of them,
//! so a failed write leaves all four files at their previous contents. The
//! renames themselves are not atomic as a group: a rename failing part way
//! through leaves the earlier collections updated and the later ones not.

use super::traits::RecordStore;
use crate::core::registry::RegistryState;
use crate::domain::{RegistryError, Result, UserId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const USERS_FILE: &str = "users.json";
const TRIALS_FILE: &str = "trials.json";
const PATIENTS_FILE: &str = "patients.json";
const REPORTS_FILE: &str = "reports.json";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    current_user: Option<UserId>,
}

/// Record store backed by JSON files in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| {
            RegistryError::Storage(format!(
                "Failed to create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        tracing::debug!(data_dir = %data_dir.display(), "Opened JSON record store");
        Ok(Self { data_dir })
    }

    /// Directory holding the collection files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_json<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.data_dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            RegistryError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if contents.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&contents).map_err(|e| {
            RegistryError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        let tmp_path = self.stage_json(file, value)?;
        self.commit(file, &tmp_path)
    }

    /// Write `value` to the temp sibling of `file` and return its path
    fn stage_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<PathBuf> {
        let tmp_path = self.data_dir.join(format!("{file}.tmp"));

        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp_path, bytes).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            RegistryError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        Ok(tmp_path)
    }

    fn commit(&self, file: &str, tmp_path: &Path) -> Result<()> {
        let path = self.data_dir.join(file);
        fs::rename(tmp_path, &path).map_err(|e| {
            RegistryError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })
    }

    fn stage_collections(
        &self,
        state: &RegistryState,
        staged: &mut Vec<(&'static str, PathBuf)>,
    ) -> Result<()> {
        staged.push((USERS_FILE, self.stage_json(USERS_FILE, &state.users)?));
        staged.push((TRIALS_FILE, self.stage_json(TRIALS_FILE, &state.trials)?));
        staged.push((PATIENTS_FILE, self.stage_json(PATIENTS_FILE, &state.patients)?));
        staged.push((REPORTS_FILE, self.stage_json(REPORTS_FILE, &state.reports)?));
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        self.read_json::<Vec<T>>(file)
    }
}

impl RecordStore for JsonFileStore {
    fn name(&self) -> &'static str {
        "json-file"
    }

    fn load(&self) -> Result<RegistryState> {
        let state = RegistryState {
            users: self.read_collection(USERS_FILE)?,
            trials: self.read_collection(TRIALS_FILE)?,
            patients: self.read_collection(PATIENTS_FILE)?,
            reports: self.read_collection(REPORTS_FILE)?,
        };

        tracing::debug!(
            users = state.users.len(),
            trials = state.trials.len(),
            patients = state.patients.len(),
            reports = state.reports.len(),
            "Loaded registry state"
        );
        Ok(state)
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        let mut staged = Vec::with_capacity(4);
        if let Err(e) = self.stage_collections(state, &mut staged) {
            for (_, tmp_path) in &staged {
                let _ = fs::remove_file(tmp_path);
            }
            return Err(e);
        }

        for (file, tmp_path) in &staged {
            self.commit(file, tmp_path)?;
        }
        Ok(())
    }

    fn load_current_user(&self) -> Result<Option<UserId>> {
        let record: SessionRecord = self.read_json(SESSION_FILE)?;
        Ok(record.current_user)
    }

    fn save_current_user(&self, user_id: Option<&UserId>) -> Result<()> {
        let record = SessionRecord {
            current_user: user_id.cloned(),
        };
        self.write_json(SESSION_FILE, &record)
    }
}
