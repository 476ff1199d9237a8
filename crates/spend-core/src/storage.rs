use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use spend_domain::Ledger;
use tracing::{debug, error, warn};

use crate::CoreError;

/// Key under which the whole ledger is stored.
pub const STORAGE_KEY: &str = "monthlyData";

/// Abstraction over durable string key-value backends.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove_item(&self, key: &str) -> Result<(), CoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove_item(key)
    }
}

/// In-process store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value, handy for injecting stored blobs.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut items) = store.items.lock() {
            items.insert(key.into(), value.into());
        }
        store
    }

    fn items(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.items
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        self.items()?.remove(key);
        Ok(())
    }
}

/// Reads and writes the whole [`Ledger`] as one JSON value under [`STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct LedgerRepository<S> {
    store: S,
}

impl<S: KeyValueStore> LedgerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored ledger. A missing entry is an empty ledger; a stored
    /// value that is not a ledger object is a [`CoreError::Serde`].
    pub fn load(&self) -> Result<Ledger, CoreError> {
        let Some(raw) = self.store.get_item(STORAGE_KEY)? else {
            debug!(key = STORAGE_KEY, "no stored ledger, starting empty");
            return Ok(Ledger::new());
        };
        let ledger: Ledger =
            serde_json::from_str(&raw).map_err(|err| CoreError::Serde(err.to_string()))?;
        debug!(key = STORAGE_KEY, months = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    /// Loads the stored ledger, logging any failure and falling back to an
    /// empty ledger.
    pub fn load_or_empty(&self) -> Ledger {
        match self.load() {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!(key = STORAGE_KEY, error = %err, "failed to load ledger, using an empty one");
                Ledger::new()
            }
        }
    }

    /// Overwrites the stored ledger with `ledger`.
    pub fn save(&self, ledger: &Ledger) -> Result<(), CoreError> {
        let result = serde_json::to_string(ledger)
            .map_err(|err| CoreError::Serde(err.to_string()))
            .and_then(|json| self.store.set_item(STORAGE_KEY, &json));
        match &result {
            Ok(()) => debug!(key = STORAGE_KEY, months = ledger.len(), "ledger saved"),
            Err(err) => error!(key = STORAGE_KEY, error = %err, "failed to save ledger"),
        }
        result
    }
}
