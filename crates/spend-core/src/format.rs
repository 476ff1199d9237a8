use std::fmt::Write;

use chrono::{
    format::{Item, StrftimeItems},
    NaiveDate,
};
use rust_decimal::Decimal;
use spend_domain::money;

use crate::CoreError;

/// Pattern matching the `en-US` short date, e.g. `3/21/2025`.
pub const DEFAULT_DATE_PATTERN: &str = "%-m/%-d/%Y";

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: Decimal) -> String;
}

/// Formats dates for presentation and for the date stamped on new expenses.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Prefixes a symbol to the amount rendered with two fraction digits.
#[derive(Debug, Clone)]
pub struct SymbolCurrencyFormatter {
    symbol: String,
}

impl SymbolCurrencyFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for SymbolCurrencyFormatter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl CurrencyFormatter for SymbolCurrencyFormatter {
    fn format_amount(&self, amount: Decimal) -> String {
        let text = money::format_cents(amount);
        match text.strip_prefix('-') {
            Some(magnitude) => format!("-{}{}", self.symbol, magnitude),
            None => format!("{}{}", self.symbol, text),
        }
    }
}

/// `strftime`-style date formatter.
#[derive(Debug, Clone)]
pub struct PatternDateFormatter {
    pattern: String,
}

impl PatternDateFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Like [`PatternDateFormatter::new`] but rejects patterns chrono cannot render.
    pub fn try_new(pattern: impl Into<String>) -> Result<Self, CoreError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(CoreError::Validation(format!(
                "invalid date pattern `{pattern}`"
            )));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for PatternDateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_PATTERN)
    }
}

impl DateFormatter for PatternDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.pattern)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}
