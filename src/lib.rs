#![doc(test(attr(deny(warnings))))]

//! Spend Smart keeps a monthly budget: income and dated expenses per month,
//! with monthly and yearly summaries, persisted as a single JSON entry.

pub mod app;
pub mod cli;
pub mod errors;
pub mod utils;

pub use spend_config as config;
pub use spend_core as ledger_core;
pub use spend_domain as domain;
pub use spend_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spend Smart tracing initialized.");
    });
}
