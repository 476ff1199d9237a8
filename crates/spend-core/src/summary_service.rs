//! Derived month and year figures. Always recomputed from the ledger, never cached.

use rust_decimal::Decimal;
use spend_domain::{
    money::{round_cents, saturating_sum},
    Ledger, MonthKey, MonthSummary, YearlySummaryRow, YearlyTotals,
};

pub struct SummaryService;

impl SummaryService {
    /// Income recorded for `month`, zero when absent.
    pub fn month_income(ledger: &Ledger, month: &MonthKey) -> Decimal {
        ledger
            .month(month)
            .map(|record| record.income)
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of the month's expense amounts, rounded to cents. Absent months and
    /// unparseable amounts contribute zero.
    pub fn month_total_expense(ledger: &Ledger, month: &MonthKey) -> Decimal {
        let total = ledger
            .month(month)
            .map(|record| record.total_expense())
            .unwrap_or(Decimal::ZERO);
        round_cents(total)
    }

    /// Income minus the rounded total expense, rounded to cents.
    pub fn month_balance(ledger: &Ledger, month: &MonthKey) -> Decimal {
        let income = Self::month_income(ledger, month);
        round_cents(income.saturating_sub(Self::month_total_expense(ledger, month)))
    }

    pub fn month_summary(ledger: &Ledger, month: &MonthKey) -> MonthSummary {
        MonthSummary {
            month: *month,
            income: round_cents(Self::month_income(ledger, month)),
            total_expense: Self::month_total_expense(ledger, month),
            balance: Self::month_balance(ledger, month),
            expense_count: ledger
                .month(month)
                .map(|record| record.expenses.len())
                .unwrap_or(0),
        }
    }

    /// One row per calendar month of `year`, January first. Months without
    /// data report zeros.
    pub fn yearly_summary(ledger: &Ledger, year: i32) -> Vec<YearlySummaryRow> {
        MonthKey::months_of_year(year)
            .map(|month| YearlySummaryRow {
                income: round_cents(Self::month_income(ledger, &month)),
                total_expense: Self::month_total_expense(ledger, &month),
                month,
            })
            .collect()
    }

    /// Income, expense and balance summed over the twelve monthly rows.
    pub fn yearly_totals(ledger: &Ledger, year: i32) -> YearlyTotals {
        let rows = Self::yearly_summary(ledger, year);
        let total_income = saturating_sum(rows.iter().map(|row| row.income));
        let total_expense = saturating_sum(rows.iter().map(|row| row.total_expense));
        YearlyTotals {
            total_income: round_cents(total_income),
            total_expense: round_cents(total_expense),
            balance: round_cents(total_income.saturating_sub(total_expense)),
        }
    }
}
