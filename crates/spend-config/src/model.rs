use serde::{de::Deserializer, Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Stores user preferences for the ledger and its presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// `strftime` pattern stamped on new expenses.
    #[serde(default = "Config::default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub write_policy: PersistMode,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for ledger data. Defaults to `<base>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            date_format: Self::default_date_format(),
            write_policy: PersistMode::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_date_format() -> String {
        "%-m/%-d/%Y".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }
}

/// When ledger changes are written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    #[default]
    WriteThrough,
    Deferred,
}

impl PersistMode {
    /// Unknown values fall back to write-through.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "deferred" | "batched" => PersistMode::Deferred,
            _ => PersistMode::WriteThrough,
        }
    }
}

impl fmt::Display for PersistMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PersistMode::WriteThrough => "write_through",
            PersistMode::Deferred => "deferred",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for PersistMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|v| PersistMode::from_str(&v))
            .unwrap_or_default())
    }
}
