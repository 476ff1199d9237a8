//! Wires configuration, storage and the ledger store together.

use std::path::{Path, PathBuf};

use spend_config::{default_base_dir, Config, ConfigManager, PersistMode};
use spend_core::{
    LedgerRepository, LedgerStore, PatternDateFormatter, SymbolCurrencyFormatter, WritePolicy,
};
use spend_storage_json::JsonFileStore;
use tracing::{info, warn};

use crate::errors::AppError;

/// Ledger store backed by the JSON file store.
pub type AppStore = LedgerStore<JsonFileStore>;

/// Loaded configuration plus the paths derived from it.
#[derive(Debug, Clone)]
pub struct App {
    config_manager: ConfigManager,
    config: Config,
}

impl App {
    /// Uses the base directory from `SPEND_SMART_HOME` or the platform default.
    pub fn from_env() -> Result<Self, AppError> {
        Self::with_base_dir(default_base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, AppError> {
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        info!(
            base = %config_manager.base_dir().display(),
            policy = %config.write_policy,
            "configuration loaded"
        );
        Ok(Self {
            config_manager,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_dir(&self) -> &Path {
        self.config_manager.base_dir()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.config.resolve_data_dir(self.base_dir())
    }

    /// Opens a store, failing when the stored ledger cannot be read.
    pub fn open_store(&self) -> Result<AppStore, AppError> {
        let repository = self.repository()?;
        let store = LedgerStore::open(repository)?;
        Ok(self.configure(store))
    }

    /// Opens a store, starting from an empty ledger when the stored one cannot be read.
    pub fn open_store_lenient(&self) -> Result<AppStore, AppError> {
        let repository = self.repository()?;
        Ok(self.configure(LedgerStore::open_lenient(repository)))
    }

    pub fn currency_formatter(&self) -> SymbolCurrencyFormatter {
        SymbolCurrencyFormatter::new(self.config.currency_symbol.clone())
    }

    fn repository(&self) -> Result<LedgerRepository<JsonFileStore>, AppError> {
        let backend = JsonFileStore::new(self.data_dir())?;
        Ok(LedgerRepository::new(backend))
    }

    fn configure(&self, store: AppStore) -> AppStore {
        let formatter = match PatternDateFormatter::try_new(self.config.date_format.clone()) {
            Ok(formatter) => formatter,
            Err(err) => {
                warn!(error = %err, "falling back to the default date pattern");
                PatternDateFormatter::default()
            }
        };
        store
            .with_date_formatter(formatter)
            .with_write_policy(write_policy(self.config.write_policy))
    }
}

fn write_policy(mode: PersistMode) -> WritePolicy {
    match mode {
        PersistMode::WriteThrough => WritePolicy::WriteThrough,
        PersistMode::Deferred => WritePolicy::Deferred,
    }
}
