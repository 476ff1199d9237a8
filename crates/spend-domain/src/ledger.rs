//! The persisted ledger: every month's income and expense list in one object.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{money, month::MonthKey};

/// Full collection of month records, keyed by the month's display string.
///
/// This is the unit of persistence: it is serialized as a single JSON object
/// and always written back whole. Keys that do not parse as a [`MonthKey`] are
/// kept so a load/save cycle never drops data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    months: BTreeMap<String, MonthRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Number of months that have a stored record.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Record for `month`, if one has been written.
    pub fn month(&self, month: &MonthKey) -> Option<&MonthRecord> {
        self.months.get(&month.as_key())
    }

    /// Record for `month`, or an empty one when nothing was written yet.
    pub fn month_or_default(&self, month: &MonthKey) -> MonthRecord {
        self.month(month).cloned().unwrap_or_default()
    }

    /// Mutable record for `month`, created empty on first access.
    pub fn month_mut(&mut self, month: &MonthKey) -> &mut MonthRecord {
        self.months.entry(month.as_key()).or_default()
    }

    /// Stored month keys in lexical order, including unparseable ones.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.months.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MonthRecord)> {
        self.months.iter().map(|(key, record)| (key.as_str(), record))
    }
}

/// Income and expenses recorded for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Cumulative income; every recorded amount is added to it.
    #[serde(default, with = "money::serde_income")]
    pub income: Decimal,
    /// Expenses in the order they were added.
    #[serde(default, rename = "expense")]
    pub expenses: Vec<ExpenseEntry>,
}

impl MonthRecord {
    /// Sum of all parseable expense amounts, unrounded. Clamps rather than
    /// overflowing on oversized stored amounts.
    pub fn total_expense(&self) -> Decimal {
        money::saturating_sum(self.expenses.iter().map(ExpenseEntry::amount_value))
    }

    pub fn expense(&self, id: &str) -> Option<&ExpenseEntry> {
        self.expenses.iter().find(|entry| entry.id == id)
    }
}

/// One dated, described expense line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Amount as entered; see [`ExpenseEntry::amount_value`].
    #[serde(default, deserialize_with = "money::serde_amount_text::deserialize")]
    pub amount: String,
    /// Creation date, already formatted for display.
    #[serde(default)]
    pub date: String,
}

impl ExpenseEntry {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount: amount.into(),
            date: date.into(),
        }
    }

    /// Numeric value of the amount. Text without a leading number counts as zero.
    pub fn amount_value(&self) -> Decimal {
        money::parse_lenient(&self.amount)
    }
}
