use rust_decimal::Decimal;
use stockroom::core::db;
use stockroom::core::error::StockroomError;
use stockroom::core::record::{RecordFields, RecordId};
use stockroom::core::store::{RecordStore, RecordWriter};
use std::collections::HashSet;
use std::str::FromStr;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn open_fresh(path: &std::path::Path) -> RecordStore {
    let store = RecordStore::open(path).expect("open store");
    store.create_schema_if_absent().expect("create schema");
    store
}

#[test]
fn insert_assigns_fresh_id_and_list_includes_it() {
    let tmp = tempdir().unwrap();
    let store = open_fresh(&tmp.path().join("inventory.db"));

    let before = store.count().unwrap();
    let created = store
        .insert(&RecordFields::new("Widget", 5, dec("9.99")))
        .unwrap();
    assert_eq!(store.count().unwrap(), before + 1);

    let all = store.list_all().unwrap();
    assert!(all.iter().any(|r| r == &created));
}

#[test]
fn identical_creates_get_distinct_ids() {
    let tmp = tempdir().unwrap();
    let store = open_fresh(&tmp.path().join("inventory.db"));
    let fields = RecordFields::new("Widget", 5, dec("9.99"));

    let a = store.insert(&fields).unwrap();
    let b = store.insert(&fields).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.fields, b.fields);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn ids_are_never_reused_within_a_store() {
    let tmp = tempdir().unwrap();
    let store = open_fresh(&tmp.path().join("inventory.db"));
    let mut seen = HashSet::new();
    for i in 0..20 {
        let r = store
            .insert(&RecordFields::new(format!("Item {i}"), i, Decimal::ONE))
            .unwrap();
        assert!(seen.insert(r.id), "id {} assigned twice", r.id);
    }
}

#[test]
fn update_is_a_full_replace() {
    let tmp = tempdir().unwrap();
    let store = open_fresh(&tmp.path().join("inventory.db"));
    let mut original = RecordFields::new("Car", 1, dec("12000.00"));
    original.vin = Some("1HGCM82633A004352".into());
    original.status = Some("pending".into());
    original.full_name = Some("Ivan Petrov".into());
    let created = store.insert(&original).unwrap();

    // vin and full_name omitted: they are cleared, not kept
    let mut replacement = RecordFields::new("Car", 1, dec("11500.00"));
    replacement.status = Some("sold".into());
    store.update(created.id, &replacement).unwrap();

    let stored = store.get(created.id).unwrap();
    assert_eq!(stored.fields, replacement);
    assert_eq!(stored.fields.vin, None);
    assert_eq!(stored.fields.full_name, None);
}

#[test]
fn update_unknown_id_is_not_found_and_leaves_store_unchanged() {
    let tmp = tempdir().unwrap();
    let store = open_fresh(&tmp.path().join("inventory.db"));
    store
        .insert(&RecordFields::new("Widget", 5, dec("9.99")))
        .unwrap();
    let before = store.list_all().unwrap();

    let err = store
        .update(RecordId(404), &RecordFields::new("Ghost", 1, Decimal::ONE))
        .unwrap_err();
    assert!(matches!(err, StockroomError::NotFound(RecordId(404))));
    assert_eq!(store.list_all().unwrap(), before);
}

#[test]
fn get_unknown_id_is_not_found() {
    let store = RecordStore::open_in_memory().unwrap();
    store.create_schema_if_absent().unwrap();
    assert!(matches!(
        store.get(RecordId(1)),
        Err(StockroomError::NotFound(RecordId(1)))
    ));
}

#[test]
fn empty_name_is_rejected_at_the_storage_layer() {
    let store = RecordStore::open_in_memory().unwrap();
    store.create_schema_if_absent().unwrap();
    let err = store
        .insert(&RecordFields::new("   ", 1, Decimal::ONE))
        .unwrap_err();
    assert!(matches!(err, StockroomError::PersistenceError(_)), "{err}");
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn missing_table_surfaces_as_persistence_error() {
    let store = RecordStore::open_in_memory().unwrap();
    let err = store.list_all().unwrap_err();
    assert!(matches!(err, StockroomError::PersistenceError(_)));
}

#[test]
fn records_survive_close_and_reopen() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("inventory.db");

    let store = open_fresh(&path);
    let created = store
        .insert(&RecordFields::new("Widget", 5, dec("9.990")))
        .unwrap();
    store.close().unwrap();

    let store = open_fresh(&path);
    let all = store.list_all().unwrap();
    assert_eq!(all, vec![created]);
    assert_eq!(all[0].fields.price.to_string(), "9.990");
    store.close().unwrap();
}

#[test]
fn price_is_stored_as_exact_decimal_text() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("inventory.db");
    let store = open_fresh(&path);
    store
        .insert(&RecordFields::new("Widget", 1, dec("0.10")))
        .unwrap();
    store.close().unwrap();

    let conn = db::db_connect(&path).unwrap();
    let (text, kind): (String, String) = conn
        .query_row("SELECT price, typeof(price) FROM items", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(text, "0.10");
    assert_eq!(kind, "text");
}

#[test]
fn list_all_is_ordered_by_id() {
    let store = RecordStore::open_in_memory().unwrap();
    store.create_schema_if_absent().unwrap();
    for name in ["c", "a", "b"] {
        store
            .insert(&RecordFields::new(name, 0, Decimal::ZERO))
            .unwrap();
    }
    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
