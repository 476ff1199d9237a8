//! spend-core
//!
//! Ledger operations, summaries and the persistence adapter for Spend Smart.
//! Depends on spend-domain. No CLI, no terminal I/O, no concrete storage medium.

pub mod error;
pub mod format;
pub mod ids;
pub mod ledger_service;
pub mod storage;
pub mod store;
pub mod summary_service;
pub mod time;

pub use error::CoreError;
pub use format::*;
pub use ids::ExpenseIdGenerator;
pub use ledger_service::*;
pub use storage::{KeyValueStore, LedgerRepository, MemoryStore, STORAGE_KEY};
pub use store::{LedgerStore, WritePolicy};
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};

#[cfg(test)]
mod tests;
