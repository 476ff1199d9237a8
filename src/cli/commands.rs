//! Shell state and command handlers.

use dialoguer::{theme::ColorfulTheme, Confirm};
use serde::Serialize;
use spend_core::{CoreError, CurrencyFormatter, SymbolCurrencyFormatter};
use spend_domain::{MonthKey, YearlySummaryRow, YearlyTotals};
use thiserror::Error;

use crate::{
    app::{App, AppStore},
    cli::{help, output},
    errors::AppError,
    utils::build_info,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// A command failed; the shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error("Unknown command `{0}`. Type `help` for a list.")]
    UnknownCommand(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Could not render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct ShellContext {
    mode: CliMode,
    store: AppStore,
    currency: SymbolCurrencyFormatter,
    selected: MonthKey,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, AppError> {
        let app = App::from_env()?;
        output::set_color_enabled(mode == CliMode::Interactive && app.config().ui_color_enabled);

        let store = match app.open_store() {
            Ok(store) => store,
            Err(AppError::Core(err)) => {
                output::warning(format!(
                    "Stored ledger could not be read ({err}); starting with an empty ledger."
                ));
                app.open_store_lenient()?
            }
            Err(err) => return Err(err),
        };
        let selected = store.current_month();
        Ok(Self {
            mode,
            currency: app.currency_formatter(),
            store,
            selected,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        let marker = if self.store.is_dirty() { "*" } else { "" };
        format!("spend-smart [{}]{marker}> ", self.selected)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        help::command_names()
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(err);
    }

    pub fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "help" | "?" => self.cmd_help(args),
            "version" => self.cmd_version(),
            "month" => self.cmd_month(args),
            "income" => self.cmd_income(args),
            "add" => self.cmd_add(args),
            "delete" | "rm" => self.cmd_delete(args),
            "list" | "ls" => self.cmd_list(),
            "summary" => self.cmd_summary(args),
            "year" => self.cmd_year(args),
            "flush" | "save" => self.cmd_flush(),
            "exit" | "quit" => self.cmd_exit(),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Writes pending changes before the shell goes away.
    pub fn shutdown(&mut self) {
        if let Err(err) = self.store.flush() {
            output::error(format!("Unsaved changes could not be written: {err}"));
        }
    }

    fn money(&self, amount: spend_domain::Decimal) -> String {
        self.currency.format_amount(amount)
    }

    fn cmd_help(&self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args.first() {
            Some(name) => {
                let entry = help::find(&name.to_ascii_lowercase())
                    .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
                help::print_command(entry);
            }
            None => help::print_overview(),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_version(&self) -> Result<LoopControl, CommandError> {
        let build = build_info::current();
        output::info(format!(
            "Spend Smart version {} ({}, {} build, {})",
            build.version, build.git_hash, build.profile, build.timestamp
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_month(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        if !args.is_empty() {
            self.selected = args.join(" ").parse::<MonthKey>().map_err(CoreError::from)?;
            output::success(format!("Selected {}", self.selected));
        }
        self.print_month_summary();
        Ok(LoopControl::Continue)
    }

    fn cmd_income(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let [amount] = args else {
            return Err(usage("income"));
        };
        if self.mode == CliMode::Interactive && !self.confirm("Do you want to save your income?")? {
            output::info("Income not saved.");
            return Ok(LoopControl::Continue);
        }
        let total = self.store.record_income(&self.selected, amount)?;
        output::success(format!(
            "Income for {} is now {}",
            self.selected,
            self.money(total)
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_add(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let Some((amount, description)) = args.split_last() else {
            return Err(usage("add"));
        };
        let description = description.join(" ");
        let entry = self.store.add_expense(&self.selected, &description, amount)?;
        output::success(format!(
            "Added expense {} ({} {}) on {}",
            entry.id,
            entry.description,
            self.money(entry.amount_value()),
            entry.date
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_delete(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let [id] = args else {
            return Err(usage("delete"));
        };
        if self.store.delete_expense(&self.selected, id)? {
            output::success(format!("Deleted expense {id}"));
        } else {
            output::warning(format!("No expense {id} in {}", self.selected));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_list(&self) -> Result<LoopControl, CommandError> {
        let expenses = self.store.expenses(&self.selected);
        output::section(format!("Expenses for {}", self.selected));
        if expenses.is_empty() {
            output::info("No expenses recorded.");
        }
        for entry in expenses {
            output::info(format!(
                "  {:<12} {:<24} {:>12}  [{}]",
                entry.date,
                entry.description,
                self.money(entry.amount_value()),
                entry.id
            ));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_summary(&self, args: &[&str]) -> Result<LoopControl, CommandError> {
        if wants_json(args) {
            let summary = self.store.month_summary(&self.selected);
            output::info(serde_json::to_string_pretty(&summary)?);
        } else {
            self.print_month_summary();
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_year(&self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let year = match args.iter().find(|arg| !arg.starts_with("--")) {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| CommandError::Usage(format!("`{raw}` is not a year")))?,
            None => self.selected.year(),
        };
        let rows = self.store.yearly_summary(year);
        let totals = self.store.yearly_totals(year);

        if wants_json(args) {
            let report = YearReport {
                year,
                months: &rows,
                totals: &totals,
            };
            output::info(serde_json::to_string_pretty(&report)?);
            return Ok(LoopControl::Continue);
        }

        output::section(format!("Yearly Report {year}"));
        output::info(format!("Total Income: {}", self.money(totals.total_income)));
        output::info(format!("Total Expense: {}", self.money(totals.total_expense)));
        output::info(format!("Remaining Balance: {}", self.money(totals.balance)));
        for row in &rows {
            output::info(format!(
                "  {:<16} Income: {:>12}  Total Expense: {:>12}",
                row.month.to_string(),
                self.money(row.income),
                self.money(row.total_expense)
            ));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_flush(&mut self) -> Result<LoopControl, CommandError> {
        self.store.flush()?;
        output::success("Ledger saved.");
        Ok(LoopControl::Continue)
    }

    /// Pending changes are written by [`ShellContext::shutdown`] once the loop
    /// ends, so a failing write never keeps the user in the shell.
    fn cmd_exit(&self) -> Result<LoopControl, CommandError> {
        Ok(LoopControl::Exit)
    }

    fn print_month_summary(&self) {
        let summary = self.store.month_summary(&self.selected);
        output::section(format!("Monthly Report for {}", summary.month));
        output::info(format!("Total Income: {}", self.money(summary.income)));
        output::info(format!("Total Expense: {}", self.money(summary.total_expense)));
        output::info(format!("Remaining Balance: {}", self.money(summary.balance)));
        output::info(format!("Expenses: {}", summary.expense_count));
    }

    fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(true)
            .interact()?)
    }
}

#[derive(Serialize)]
struct YearReport<'a> {
    year: i32,
    months: &'a [YearlySummaryRow],
    totals: &'a YearlyTotals,
}

fn usage(command: &str) -> CommandError {
    let usage = help::find(command)
        .map(|entry| entry.usage)
        .unwrap_or(command);
    CommandError::Usage(format!("Usage: {usage}"))
}

fn wants_json(args: &[&str]) -> bool {
    args.iter().any(|arg| *arg == "--json")
}
