//! Ledger oracle adapters
//!
//! Every backend implements [`LedgerOracle`]. [`create_ledger_oracle`] picks
//! one from configuration and bounds it with a [`TimeoutLedger`].

pub mod factory;
pub mod file;
pub mod http;
pub mod memory;
pub mod timeout;
pub mod traits;

pub use factory::create_ledger_oracle;
pub use file::FileLedger;
pub use http::HttpLedger;
pub use memory::InMemoryLedger;
pub use timeout::TimeoutLedger;
pub use traits::{LedgerOracle, LedgerResult};
