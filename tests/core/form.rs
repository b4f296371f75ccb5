use rust_decimal::Decimal;
use stockroom::core::db;
use stockroom::core::error::{StockroomError, ValidationError};
use stockroom::core::form::{FormOutcome, FormState, RecordForm};
use stockroom::core::listing::Listing;
use stockroom::core::record::{FormField, Record, RecordFields, RecordId};
use stockroom::core::store::{RecordStore, RecordWriter};
use std::str::FromStr;
use tempfile::tempdir;

fn store() -> RecordStore {
    let store = RecordStore::open_in_memory().expect("open store");
    store.create_schema_if_absent().expect("schema");
    store
}

fn create(store: &RecordStore, name: &str, quantity: &str, price: &str) -> Result<Record, StockroomError> {
    let mut form = RecordForm::create();
    form.set(FormField::Name, name);
    form.set(FormField::Quantity, quantity);
    form.set(FormField::Price, price);
    form.save(store)
}

#[test]
fn valid_create_adds_exactly_one_record() {
    let store = store();
    for (name, qty, price) in [
        ("Widget", "5", "9.99"),
        ("Gadget", "0", "0"),
        ("Refund", "-2", "-15.5"),
        ("Bulk", "1000000", "1e3"),
    ] {
        let before = store.list_all().unwrap();
        let record = create(&store, name, qty, price).unwrap();
        let after = store.list_all().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert!(before.iter().all(|r| r.id != record.id));
        assert!(after.contains(&record));
    }
}

#[test]
fn missing_required_field_leaves_store_unchanged() {
    let store = store();
    create(&store, "Seed", "1", "1").unwrap();

    for (name, qty, price) in [("", "1", "1"), ("Widget", "", "1"), ("Widget", "1", "")] {
        let err = create(&store, name, qty, price).unwrap_err();
        assert!(
            matches!(
                err,
                StockroomError::ValidationError(ValidationError::MissingRequiredField(_))
            ),
            "{err}"
        );
        assert!(err.to_string().contains("missing required field"));
        assert_eq!(store.count().unwrap(), 1);
    }
}

#[test]
fn type_mismatch_leaves_store_unchanged() {
    let store = store();
    let err = create(&store, "Widget", "abc", "1.00").unwrap_err();
    assert!(err.to_string().contains("type mismatch"));
    let err = create(&store, "Widget", "1", "xyz").unwrap_err();
    assert!(err.to_string().contains("type mismatch"));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn edit_prepopulates_every_field_as_text() {
    let store = store();
    let mut fields = RecordFields::new("Sedan", 1, Decimal::from_str("15250.50").unwrap());
    fields.description = Some("Grey, two owners\nminor scratches".into());
    fields.russian_license = Some("A123BC77".into());
    fields.phone_number = Some("+7 900 000-00-00".into());
    fields.vin = Some("XTA210990Y2765432".into());
    fields.status = Some("pending".into());
    fields.comments = Some("call before noon".into());
    fields.full_name = Some("Anna Ivanova".into());
    fields.passport_number = Some("4510 123456".into());
    let record = store.insert(&fields).unwrap();

    let form = RecordForm::edit(store.get(record.id).unwrap());
    assert_eq!(form.title(), "Edit Item");
    for field in FormField::ALL {
        assert_eq!(form.value(field), fields.text(field), "field {field}");
    }
    assert_eq!(form.value(FormField::Price), "15250.50");
    assert_eq!(form.value(FormField::Quantity), "1");
}

#[test]
fn no_op_edit_leaves_row_byte_identical() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("inventory.db");
    let store = RecordStore::open(&path).unwrap();
    store.create_schema_if_absent().unwrap();

    let mut fields = RecordFields::new("Widget", 5, Decimal::from_str("9.90").unwrap());
    fields.comments = Some("  spaced  ".into());
    let record = store.insert(&fields).unwrap();

    let raw_row = || -> Vec<String> {
        let conn = db::db_connect(&path).unwrap();
        conn.query_row(
            "SELECT quote(id), quote(name), quote(quantity), quote(price), quote(description),
                    quote(russian_license), quote(phone_number), quote(vin), quote(status),
                    quote(comments), quote(full_name), quote(passport_number)
             FROM items",
            [],
            |row| (0..12usize).map(|i| row.get::<_, String>(i)).collect(),
        )
        .unwrap()
    };
    let before = raw_row();

    let mut form = RecordForm::edit(store.get(record.id).unwrap());
    let saved = form.save(&store).unwrap();
    assert_eq!(saved, record);
    assert_eq!(raw_row(), before);
    assert_eq!(before[3], "'9.90'");
    assert_eq!(before[4], "NULL");
    assert_eq!(store.get(record.id).unwrap(), record);
    store.close().unwrap();
}

#[test]
fn changing_only_status_changes_only_status() {
    let store = store();
    let mut fields = RecordFields::new("Widget", 5, Decimal::from_str("9.99").unwrap());
    fields.status = Some("pending".into());
    fields.vin = Some("VIN-1".into());
    let record = store.insert(&fields).unwrap();

    let listing = Listing::load(&store).unwrap();
    let mut form = listing
        .edit_action(record.id)
        .expect("row for record")
        .open(&store)
        .unwrap();
    form.set(FormField::Status, "sold");
    form.save(&store).unwrap();

    let after = store.list_all().unwrap();
    assert_eq!(after.len(), 1);
    let mut expected = fields.clone();
    expected.status = Some("sold".into());
    assert_eq!(after[0].fields, expected);
    assert_eq!(after[0].id, record.id);
}

#[test]
fn edit_of_record_removed_behind_the_form_is_not_found() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("inventory.db");
    let store = RecordStore::open(&path).unwrap();
    store.create_schema_if_absent().unwrap();
    let record = store
        .insert(&RecordFields::new("Widget", 1, Decimal::ONE))
        .unwrap();

    let mut form = RecordForm::edit(record.clone());
    store.reset_schema().unwrap();

    let err = form.save(&store).unwrap_err();
    assert!(matches!(err, StockroomError::NotFound(id) if id == record.id));
    assert!(form.is_open());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn accepted_and_cancelled_are_terminal() {
    let store = store();
    let mut form = RecordForm::create();
    form.set(FormField::Name, "Widget");
    form.set(FormField::Quantity, "1");
    form.set(FormField::Price, "1");
    let record = form.save(&store).unwrap();
    assert_eq!(form.state(), &FormState::Closed(FormOutcome::Accepted(record)));
    assert!(matches!(form.cancel(), Err(StockroomError::FormClosed)));

    let mut form = RecordForm::create();
    form.cancel().unwrap();
    assert!(matches!(form.save(&store), Err(StockroomError::FormClosed)));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn listing_refresh_after_save_shows_new_row() {
    let store = store();
    let mut listing = Listing::load(&store).unwrap();
    assert!(listing.is_empty());

    let record = create(&store, "Widget", "5", "9.99").unwrap();
    listing.refresh(&store).unwrap();
    let ids: Vec<RecordId> = listing.rows().map(|row| row.edit.record_id()).collect();
    assert_eq!(ids, vec![record.id]);
}
