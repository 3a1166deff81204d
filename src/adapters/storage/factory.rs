//! Record store factory

use super::{JsonFileStore, RecordStore};
use crate::config::StorageConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the record store described by `config`
///
/// # Errors
///
/// Returns `Storage` if the data directory cannot be created.
pub fn create_record_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>> {
    let store = JsonFileStore::open(&config.data_dir)?;
    tracing::info!(
        data_dir = %store.data_dir().display(),
        backend = store.name(),
        "Record store ready"
    );
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_json_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().join("data").to_string_lossy().into_owned(),
        };

        let store = create_record_store(&config).unwrap();
        assert_eq!(store.name(), "json-file");
        assert!(store.load().unwrap().is_empty());
    }
}
