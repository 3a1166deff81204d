//! Registry persistence
//!
//! [`RecordStore`] is the seam between the registry and disk. The JSON file
//! store is used by the CLI; the memory store backs tests.

pub mod factory;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use factory::create_record_store;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::RecordStore;
