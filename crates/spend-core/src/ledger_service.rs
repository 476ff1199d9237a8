//! In-memory mutations of a [`Ledger`].

use rust_decimal::Decimal;
use spend_domain::{
    money::{self, MAX_AMOUNT},
    ExpenseEntry, Ledger, MonthKey,
};

use crate::CoreError;

/// Provides the mutation helpers for [`Ledger`] instances. None of them touch storage.
pub struct LedgerService;

impl LedgerService {
    /// Adds `delta` to the month's income and returns the new income.
    /// The month's expenses are left as they are. Fails without touching the
    /// ledger when the new income would not fit.
    pub fn record_income(
        ledger: &mut Ledger,
        month: &MonthKey,
        delta: Decimal,
    ) -> Result<Decimal, CoreError> {
        let current = ledger.month(month).map(|record| record.income);
        let income = current
            .unwrap_or(Decimal::ZERO)
            .checked_add(delta)
            .ok_or_else(|| CoreError::InvalidAmount {
                field: "income",
                input: delta.to_string(),
            })?;
        ledger.month_mut(month).income = income;
        Ok(income)
    }

    /// Appends `entry` to the month's expense list.
    pub fn add_expense(ledger: &mut Ledger, month: &MonthKey, entry: ExpenseEntry) {
        ledger.month_mut(month).expenses.push(entry);
    }

    /// Removes the expense with `id` from the month, keeping the order of the
    /// rest. Returns the removed entry, or `None` when nothing matched.
    pub fn delete_expense(ledger: &mut Ledger, month: &MonthKey, id: &str) -> Option<ExpenseEntry> {
        let record = ledger.month(month)?;
        let index = record.expenses.iter().position(|entry| entry.id == id)?;
        Some(ledger.month_mut(month).expenses.remove(index))
    }

    /// Validates income text: a non-negative decimal no larger than [`MAX_AMOUNT`].
    pub fn parse_income(text: &str) -> Result<Decimal, CoreError> {
        parse_non_negative("income", text)
    }

    /// Validates expense amount text: a non-negative decimal no larger than [`MAX_AMOUNT`].
    pub fn parse_expense_amount(text: &str) -> Result<Decimal, CoreError> {
        parse_non_negative("expense", text)
    }
}

fn parse_non_negative(field: &'static str, text: &str) -> Result<Decimal, CoreError> {
    match money::parse_strict(text) {
        Some(value) if (!value.is_sign_negative() || value.is_zero()) && value <= MAX_AMOUNT => {
            Ok(value)
        }
        _ => Err(CoreError::InvalidAmount {
            field,
            input: text.to_string(),
        }),
    }
}
