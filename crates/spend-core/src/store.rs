//! Owned ledger session backing one screen.

use rust_decimal::Decimal;
use spend_domain::{
    ExpenseEntry, Ledger, MonthKey, MonthSummary, YearlySummaryRow, YearlyTotals,
};
use tracing::{debug, info};

use crate::{
    format::{DateFormatter, PatternDateFormatter},
    ids::ExpenseIdGenerator,
    ledger_service::LedgerService,
    storage::{KeyValueStore, LedgerRepository},
    summary_service::SummaryService,
    time::{Clock, SystemClock},
    CoreError,
};

/// When mutations reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Every mutation rewrites the stored ledger immediately.
    #[default]
    WriteThrough,
    /// Mutations only mark the store dirty; [`LedgerStore::flush`] writes.
    Deferred,
}

/// In-memory ledger hydrated from a [`LedgerRepository`], with the mutations
/// and queries a screen needs.
///
/// Each store owns its copy of the ledger. Two stores over the same backend do
/// not see each other's changes; whichever writes last wins.
///
/// A failed write is returned to the caller but the in-memory change is kept
/// and the store stays dirty, so memory can run ahead of storage until the
/// next successful write.
pub struct LedgerStore<S> {
    ledger: Ledger,
    repository: LedgerRepository<S>,
    clock: Box<dyn Clock>,
    date_formatter: Box<dyn DateFormatter>,
    ids: ExpenseIdGenerator,
    policy: WritePolicy,
    dirty: bool,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Hydrates from storage, failing if the stored ledger cannot be read.
    pub fn open(repository: LedgerRepository<S>) -> Result<Self, CoreError> {
        let ledger = repository.load()?;
        Ok(Self::from_snapshot(ledger, repository))
    }

    /// Hydrates from storage, starting empty (and logging) if it cannot be read.
    pub fn open_lenient(repository: LedgerRepository<S>) -> Self {
        let ledger = repository.load_or_empty();
        Self::from_snapshot(ledger, repository)
    }

    /// Wraps an existing ledger snapshot without reading storage.
    pub fn from_snapshot(ledger: Ledger, repository: LedgerRepository<S>) -> Self {
        Self {
            ledger,
            repository,
            clock: Box::new(SystemClock),
            date_formatter: Box::new(PatternDateFormatter::default()),
            ids: ExpenseIdGenerator::new(),
            policy: WritePolicy::default(),
            dirty: false,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_date_formatter(mut self, formatter: impl DateFormatter + 'static) -> Self {
        self.date_formatter = Box::new(formatter);
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn repository(&self) -> &LedgerRepository<S> {
        &self.repository
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.policy
    }

    /// True when memory holds changes storage has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Month containing the clock's current date.
    pub fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.clock.today())
    }

    /// Adds the income in `amount_text` to `month` and returns the new total.
    pub fn record_income(&mut self, month: &MonthKey, amount_text: &str) -> Result<Decimal, CoreError> {
        let delta = LedgerService::parse_income(amount_text)?;
        let income = LedgerService::record_income(&mut self.ledger, month, delta)?;
        info!(month = %month, %delta, %income, "income recorded");
        self.after_mutation()?;
        Ok(income)
    }

    /// Appends a new expense dated today and returns it.
    pub fn add_expense(
        &mut self,
        month: &MonthKey,
        description: &str,
        amount_text: &str,
    ) -> Result<ExpenseEntry, CoreError> {
        LedgerService::parse_expense_amount(amount_text)?;
        let existing = self
            .ledger
            .month(month)
            .map(|record| record.expenses.as_slice())
            .unwrap_or(&[]);
        let id = self.ids.next_id(self.clock.now(), existing);
        let date = self.date_formatter.format_date(self.clock.today());
        let entry = ExpenseEntry::new(id, description, amount_text.trim(), date);
        LedgerService::add_expense(&mut self.ledger, month, entry.clone());
        info!(month = %month, id = %entry.id, amount = %entry.amount, "expense added");
        self.after_mutation()?;
        Ok(entry)
    }

    /// Removes the expense `id` from `month`. Returns whether one was removed;
    /// the ledger is persisted either way.
    pub fn delete_expense(&mut self, month: &MonthKey, id: &str) -> Result<bool, CoreError> {
        let removed = LedgerService::delete_expense(&mut self.ledger, month, id).is_some();
        if removed {
            info!(month = %month, id, "expense deleted");
        } else {
            debug!(month = %month, id, "no expense with that id");
        }
        self.after_mutation()?;
        Ok(removed)
    }

    /// Writes the ledger to storage if it has unsaved changes.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        if !self.dirty {
            return Ok(());
        }
        self.repository.save(&self.ledger)?;
        self.dirty = false;
        Ok(())
    }

    /// Replaces the in-memory ledger with what storage currently holds.
    pub fn reload(&mut self) -> Result<(), CoreError> {
        self.ledger = self.repository.load()?;
        self.dirty = false;
        Ok(())
    }

    pub fn month_total_expense(&self, month: &MonthKey) -> Decimal {
        SummaryService::month_total_expense(&self.ledger, month)
    }

    pub fn month_balance(&self, month: &MonthKey) -> Decimal {
        SummaryService::month_balance(&self.ledger, month)
    }

    pub fn month_summary(&self, month: &MonthKey) -> MonthSummary {
        SummaryService::month_summary(&self.ledger, month)
    }

    pub fn expenses(&self, month: &MonthKey) -> &[ExpenseEntry] {
        self.ledger
            .month(month)
            .map(|record| record.expenses.as_slice())
            .unwrap_or(&[])
    }

    pub fn yearly_summary(&self, year: i32) -> Vec<YearlySummaryRow> {
        SummaryService::yearly_summary(&self.ledger, year)
    }

    pub fn yearly_totals(&self, year: i32) -> YearlyTotals {
        SummaryService::yearly_totals(&self.ledger, year)
    }

    fn after_mutation(&mut self) -> Result<(), CoreError> {
        self.dirty = true;
        match self.policy {
            WritePolicy::WriteThrough => self.flush(),
            WritePolicy::Deferred => Ok(()),
        }
    }
}

impl<S> Drop for LedgerStore<S> {
    fn drop(&mut self) {
        if self.dirty {
            tracing::warn!("ledger store dropped with unsaved changes");
        }
    }
}
