use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::{
    ledger_service::LedgerService,
    storage::{KeyValueStore, LedgerRepository, MemoryStore, STORAGE_KEY},
    store::{LedgerStore, WritePolicy},
    summary_service::SummaryService,
    time::FixedClock,
    CoreError,
};
use spend_domain::{money::MAX_AMOUNT, ExpenseEntry, Ledger, MonthKey};

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn month(year: i32, month: u32) -> MonthKey {
    MonthKey::new(year, month).unwrap()
}

fn march_clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 21, 12, 0, 0).unwrap())
}

fn memory_store(store: &MemoryStore) -> LedgerStore<&MemoryStore> {
    LedgerStore::open(LedgerRepository::new(store))
        .expect("open store")
        .with_clock(march_clock())
}

/// Store whose writes always fail.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("disk full".into()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), CoreError> {
        Ok(())
    }
}

#[test]
fn income_accumulates_across_records() {
    let mut ledger = Ledger::new();
    let march = month(2025, 3);
    let deltas = [cents(100000), cents(25050), cents(1), Decimal::ZERO];
    for delta in deltas {
        LedgerService::record_income(&mut ledger, &march, delta).unwrap();
    }
    let expected: Decimal = deltas.iter().copied().sum();
    assert_eq!(SummaryService::month_income(&ledger, &march), expected);
}

#[test]
fn income_keeps_existing_expenses() {
    let mut ledger = Ledger::new();
    let march = month(2025, 3);
    LedgerService::add_expense(&mut ledger, &march, ExpenseEntry::new("1", "Rent", "400", "d"));
    LedgerService::record_income(&mut ledger, &march, Decimal::from(10)).unwrap();
    assert_eq!(ledger.month(&march).unwrap().expenses.len(), 1);
}

#[test]
fn add_then_delete_restores_expense_list() {
    let store_backend = MemoryStore::new();
    let mut store = memory_store(&store_backend);
    let march = month(2025, 3);
    store.add_expense(&march, "Coffee", "3.20").unwrap();
    let before = store.expenses(&march).to_vec();

    let entry = store.add_expense(&march, "Lunch", "12").unwrap();
    assert!(store.delete_expense(&march, &entry.id).unwrap());

    assert_eq!(store.expenses(&march), before.as_slice());
}

#[test]
fn delete_preserves_order_and_ignores_unknown_ids() {
    let mut ledger = Ledger::new();
    let march = month(2025, 3);
    for (id, description) in [("1", "a"), ("2", "b"), ("3", "c")] {
        LedgerService::add_expense(&mut ledger, &march, ExpenseEntry::new(id, description, "1", "d"));
    }

    assert!(LedgerService::delete_expense(&mut ledger, &march, "missing").is_none());
    assert!(LedgerService::delete_expense(&mut ledger, &month(2025, 4), "1").is_none());
    let removed = LedgerService::delete_expense(&mut ledger, &march, "2").expect("removed");
    assert_eq!(removed.description, "b");

    let ids: Vec<&str> = ledger
        .month(&march)
        .unwrap()
        .expenses
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn empty_or_absent_month_totals_zero() {
    let mut ledger = Ledger::new();
    let march = month(2025, 3);
    assert_eq!(SummaryService::month_total_expense(&ledger, &march), Decimal::ZERO);
    ledger.month_mut(&march);
    assert_eq!(SummaryService::month_total_expense(&ledger, &march), Decimal::ZERO);
    assert_eq!(SummaryService::month_balance(&ledger, &march), Decimal::ZERO);
}

#[test]
fn unparseable_stored_amounts_count_as_zero() {
    let mut ledger = Ledger::new();
    let march = month(2025, 3);
    LedgerService::add_expense(&mut ledger, &march, ExpenseEntry::new("1", "ok", "10.10", "d"));
    LedgerService::add_expense(&mut ledger, &march, ExpenseEntry::new("2", "bad", "n/a", "d"));
    LedgerService::add_expense(&mut ledger, &march, ExpenseEntry::new("3", "empty", "", "d"));
    assert_eq!(SummaryService::month_total_expense(&ledger, &march), cents(1010));
}

#[test]
fn monthly_scenario_with_delete() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let march: MonthKey = "March 2025".parse().unwrap();

    let income = store.record_income(&march, "1000").unwrap();
    assert_eq!(income, cents(100000));

    let rent = store.add_expense(&march, "Rent", "400").unwrap();
    store.add_expense(&march, "Food", "50.25").unwrap();
    assert_eq!(store.month_total_expense(&march), cents(45025));
    assert_eq!(store.month_balance(&march), cents(54975));

    assert!(store.delete_expense(&march, &rent.id).unwrap());
    assert_eq!(store.month_total_expense(&march), cents(5025));
    assert_eq!(store.month_balance(&march), cents(94975));

    let summary = store.month_summary(&march);
    assert_eq!(summary.expense_count, 1);
    assert_eq!(summary.income, cents(100000));
}

#[test]
fn yearly_summary_always_has_twelve_ordered_rows() {
    let mut ledger = Ledger::new();
    LedgerService::record_income(&mut ledger, &month(2024, 12), Decimal::from(5)).unwrap();
    LedgerService::record_income(&mut ledger, &month(2025, 7), Decimal::from(5)).unwrap();

    for year in [2023, 2025] {
        let rows = SummaryService::yearly_summary(&ledger, year);
        assert_eq!(rows.len(), 12);
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(row.month, month(year, index as u32 + 1));
        }
    }
    assert!(SummaryService::yearly_summary(&Ledger::new(), 2025)
        .iter()
        .all(|row| row.income.is_zero() && row.total_expense.is_zero()));
}

#[test]
fn yearly_totals_with_single_populated_month() {
    let mut ledger = Ledger::new();
    let june = month(2025, 6);
    LedgerService::record_income(&mut ledger, &june, cents(320000)).unwrap();
    LedgerService::add_expense(&mut ledger, &june, ExpenseEntry::new("1", "Rent", "1200", "d"));
    LedgerService::add_expense(&mut ledger, &june, ExpenseEntry::new("2", "Food", "310.45", "d"));
    LedgerService::record_income(&mut ledger, &month(2024, 6), Decimal::from(999)).unwrap();

    let totals = SummaryService::yearly_totals(&ledger, 2025);
    assert_eq!(totals.total_income, SummaryService::month_income(&ledger, &june));
    assert_eq!(totals.total_expense, SummaryService::month_total_expense(&ledger, &june));
    assert_eq!(totals.balance, SummaryService::month_balance(&ledger, &june));
    assert_eq!(totals.balance, cents(168955));
}

#[test]
fn save_then_load_round_trips() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let march = month(2025, 3);
    let april = month(2025, 4);
    store.record_income(&march, "2500").unwrap();
    store.record_income(&april, "10.75").unwrap();
    store.add_expense(&march, "Groceries", "42.50").unwrap();
    store.add_expense(&april, "", "0").unwrap();

    let loaded = LedgerRepository::new(&backend).load().expect("reload");
    assert_eq!(&loaded, store.ledger());
}

#[test]
fn expenses_are_stamped_with_clock_date_and_unique_ids() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let march = month(2025, 3);
    let first = store.add_expense(&march, "a", "1").unwrap();
    let second = store.add_expense(&march, "b", "2").unwrap();

    assert_eq!(first.date, "3/21/2025");
    assert_ne!(first.id, second.id);
    assert_eq!(
        first.id,
        Utc.with_ymd_and_hms(2025, 3, 21, 12, 0, 0)
            .unwrap()
            .timestamp_millis()
            .to_string()
    );
    assert_eq!(store.current_month(), march);
}

#[test]
fn invalid_input_is_rejected_without_mutation() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let march = month(2025, 3);

    for bad in ["", "abc", "12abc", "-5"] {
        assert!(matches!(
            store.record_income(&march, bad),
            Err(CoreError::InvalidAmount { field: "income", .. })
        ));
        assert!(matches!(
            store.add_expense(&march, "x", bad),
            Err(CoreError::InvalidAmount { field: "expense", .. })
        ));
    }
    assert!(store.ledger().is_empty());
    assert!(!store.is_dirty());
    assert!(backend.get_item(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn high_precision_income_survives_save_and_load() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let march = month(2025, 3);
    store.record_income(&march, "1234567890.123456789").unwrap();
    store.record_income(&march, "0.1").unwrap();
    store.record_income(&month(2025, 4), "10.75").unwrap();

    let loaded = LedgerRepository::new(&backend).load().expect("reload");
    assert_eq!(&loaded, store.ledger());
    assert_eq!(
        loaded.month(&march).unwrap().income.to_string(),
        "1234567890.223456789"
    );
}

#[test]
fn amounts_above_the_limit_are_rejected() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let march = month(2025, 3);
    let too_big = [
        Decimal::MAX.to_string(),
        (MAX_AMOUNT + Decimal::ONE).to_string(),
    ];

    for input in &too_big {
        assert!(matches!(
            store.record_income(&march, input),
            Err(CoreError::InvalidAmount { field: "income", .. })
        ));
        assert!(matches!(
            store.add_expense(&march, "x", input),
            Err(CoreError::InvalidAmount { field: "expense", .. })
        ));
    }
    assert!(store.ledger().is_empty());

    let limit = MAX_AMOUNT.to_string();
    store.add_expense(&march, "big", &limit).unwrap();
    assert_eq!(store.month_total_expense(&march), MAX_AMOUNT);
}

#[test]
fn income_overflow_is_an_error_not_a_panic() {
    let mut ledger = Ledger::new();
    let march = month(2025, 3);
    ledger.month_mut(&march).income = Decimal::MAX;

    let err = LedgerService::record_income(&mut ledger, &march, Decimal::ONE).unwrap_err();
    assert!(matches!(err, CoreError::InvalidAmount { field: "income", .. }));
    assert_eq!(ledger.month(&march).unwrap().income, Decimal::MAX);
}

#[test]
fn oversized_stored_data_does_not_break_queries() {
    let mut ledger = Ledger::new();
    let march = month(2025, 3);
    let huge = Decimal::MAX.to_string();
    LedgerService::add_expense(&mut ledger, &march, ExpenseEntry::new("1", "a", huge.as_str(), "d"));
    LedgerService::add_expense(&mut ledger, &march, ExpenseEntry::new("2", "b", "1", "d"));
    LedgerService::add_expense(&mut ledger, &month(2025, 4), ExpenseEntry::new("3", "c", huge.as_str(), "d"));
    ledger.month_mut(&month(2025, 5)).income = Decimal::MAX;

    assert_eq!(SummaryService::month_total_expense(&ledger, &march), Decimal::MAX);
    assert_eq!(SummaryService::month_balance(&ledger, &march), Decimal::MIN);
    let totals = SummaryService::yearly_totals(&ledger, 2025);
    assert_eq!(totals.total_income, Decimal::MAX);
    assert_eq!(totals.total_expense, Decimal::MAX);
    assert_eq!(SummaryService::yearly_summary(&ledger, 2025).len(), 12);
}

#[test]
fn write_through_persists_every_mutation() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend);
    let march = month(2025, 3);

    store.record_income(&march, "5").unwrap();
    assert!(!store.is_dirty());
    let stored = LedgerRepository::new(&backend).load().unwrap();
    assert_eq!(stored.month(&march).unwrap().income, Decimal::from(5));
}

#[test]
fn deferred_policy_waits_for_flush() {
    let backend = MemoryStore::new();
    let mut store = memory_store(&backend).with_write_policy(WritePolicy::Deferred);
    let march = month(2025, 3);

    store.record_income(&march, "5").unwrap();
    store.add_expense(&march, "Tea", "1.5").unwrap();
    assert!(store.is_dirty());
    assert!(backend.get_item(STORAGE_KEY).unwrap().is_none());

    store.flush().unwrap();
    assert!(!store.is_dirty());
    let stored = LedgerRepository::new(&backend).load().unwrap();
    assert_eq!(&stored, store.ledger());
}

#[test]
fn failed_write_keeps_memory_and_stays_dirty() {
    let mut store = LedgerStore::open(LedgerRepository::new(BrokenStore))
        .unwrap()
        .with_clock(march_clock());
    let march = month(2025, 3);

    let err = store.record_income(&march, "100").unwrap_err();
    assert!(matches!(err, CoreError::Storage(_)));
    assert_eq!(store.ledger().month(&march).unwrap().income, Decimal::from(100));
    assert!(store.is_dirty());
}

#[test]
fn separate_stores_diverge_and_last_write_wins() {
    let backend = MemoryStore::new();
    let march = month(2025, 3);
    let mut first = memory_store(&backend);
    let mut second = memory_store(&backend);

    first.record_income(&march, "100").unwrap();
    second.record_income(&march, "1").unwrap();

    let stored = LedgerRepository::new(&backend).load().unwrap();
    assert_eq!(stored.month(&march).unwrap().income, Decimal::from(1));

    first.reload().unwrap();
    assert_eq!(first.ledger(), &stored);
}

#[test]
fn lenient_open_falls_back_to_empty_ledger() {
    let backend = MemoryStore::with_item(STORAGE_KEY, "garbage");
    assert!(LedgerStore::open(LedgerRepository::new(&backend)).is_err());
    let store = LedgerStore::open_lenient(LedgerRepository::new(&backend));
    assert!(store.ledger().is_empty());
}

#[test]
fn snapshot_injection_skips_storage() {
    let mut ledger = Ledger::new();
    let may = month(2025, 5);
    LedgerService::record_income(&mut ledger, &may, Decimal::from(42)).unwrap();
    let backend = MemoryStore::new();
    let store = LedgerStore::from_snapshot(ledger, LedgerRepository::new(&backend))
        .with_clock(FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()));

    assert_eq!(store.month_balance(&may), Decimal::from(42));
    assert_eq!(store.current_month(), may);
    assert!(backend.get_item(STORAGE_KEY).unwrap().is_none());
}
