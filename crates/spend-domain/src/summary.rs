//! Read-only report rows produced by the summary queries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::MonthKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Figures shown for a single selected month. Amounts are rounded to cents.
pub struct MonthSummary {
    pub month: MonthKey,
    pub income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One line of the yearly report.
pub struct YearlySummaryRow {
    pub month: MonthKey,
    pub income: Decimal,
    pub total_expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Year-wide totals across all twelve months.
pub struct YearlyTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}
