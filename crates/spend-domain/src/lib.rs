//! spend-domain
//!
//! Pure domain models (Ledger, MonthRecord, ExpenseEntry, MonthKey) and money helpers.
//! No I/O, no CLI, no storage. Only data types and the arithmetic they need.

pub mod ledger;
pub mod money;
pub mod month;
pub mod summary;

pub use ledger::*;
pub use month::*;
pub use summary::*;

pub use rust_decimal::Decimal;
