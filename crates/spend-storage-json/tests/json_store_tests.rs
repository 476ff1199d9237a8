use std::fs;

use spend_core::{
    storage::{KeyValueStore, LedgerRepository, STORAGE_KEY},
    LedgerStore, WritePolicy,
};
use spend_domain::{Decimal, MonthKey};
use spend_storage_json::JsonFileStore;
use tempfile::tempdir;

#[test]
fn json_store_can_set_get_and_remove_items() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("data")).expect("create store");

    assert_eq!(store.get_item("monthlyData").expect("get"), None);
    store.set_item("monthlyData", "{}").expect("set");
    assert_eq!(store.get_item("monthlyData").expect("get").as_deref(), Some("{}"));

    let path = store.item_path("monthlyData").unwrap();
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert_eq!(store.list_keys().unwrap(), vec!["monthlyData".to_string()]);

    store.remove_item("monthlyData").expect("remove");
    assert!(!path.exists());
    store.remove_item("monthlyData").expect("removing twice is fine");
}

#[test]
fn ledger_persists_across_store_instances() {
    let dir = tempdir().expect("tempdir");
    let march = MonthKey::new(2025, 3).unwrap();

    {
        let backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let mut store = LedgerStore::open(LedgerRepository::new(backend)).expect("open");
        store.record_income(&march, "1000").unwrap();
        store.add_expense(&march, "Rent", "400").unwrap();
    }

    let backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
    let store = LedgerStore::open(LedgerRepository::new(backend)).expect("reopen");
    assert_eq!(store.month_balance(&march), Decimal::from(600));
    assert_eq!(store.expenses(&march)[0].description, "Rent");
}

#[test]
fn stored_file_matches_expected_layout() {
    let dir = tempdir().expect("tempdir");
    let backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
    let path = backend.item_path(STORAGE_KEY).unwrap();
    let march = MonthKey::new(2025, 3).unwrap();
    let mut store = LedgerStore::open(LedgerRepository::new(backend)).unwrap();
    store.record_income(&march, "2500").unwrap();
    store.add_expense(&march, "Groceries", "42.50").unwrap();

    let raw = fs::read_to_string(path).expect("read stored file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let month = &value["March 2025"];
    assert_eq!(month["income"], serde_json::json!(2500));
    assert_eq!(month["expense"][0]["description"], "Groceries");
    assert_eq!(month["expense"][0]["amount"], "42.50");
    assert!(month["expense"][0]["id"].is_string());
    assert!(month["expense"][0]["date"].is_string());
}

#[test]
fn corrupt_file_is_reported_by_strict_open() {
    let dir = tempdir().expect("tempdir");
    let backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
    fs::write(backend.item_path(STORAGE_KEY).unwrap(), "{\"March 2025\": ").unwrap();

    assert!(LedgerStore::open(LedgerRepository::new(backend.clone())).is_err());
    let store = LedgerStore::open_lenient(LedgerRepository::new(backend));
    assert!(store.ledger().is_empty());
}

#[test]
fn failed_write_leaves_previous_file_intact() {
    let dir = tempdir().expect("tempdir");
    let backend = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
    backend.set_item(STORAGE_KEY, "{}").unwrap();
    let path = backend.item_path(STORAGE_KEY).unwrap();

    // A directory where the temp file should go makes the write fail.
    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    fs::create_dir_all(&tmp).unwrap();

    let mut store = LedgerStore::open(LedgerRepository::new(backend))
        .unwrap()
        .with_write_policy(WritePolicy::WriteThrough);
    let march = MonthKey::new(2025, 3).unwrap();
    assert!(store.record_income(&march, "10").is_err());
    assert!(store.is_dirty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn distinct_keys_never_share_a_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();

    store.set_item("a_b", "first").unwrap();
    assert!(store.set_item("a b", "second").is_err());
    assert!(store.get_item("a b").is_err());
    assert!(store.remove_item("a/b").is_err());

    assert_eq!(store.get_item("a_b").unwrap().as_deref(), Some("first"));
    store.set_item("a-b", "third").unwrap();
    assert_eq!(
        store.list_keys().unwrap(),
        vec!["a-b".to_string(), "a_b".to_string()]
    );
}
