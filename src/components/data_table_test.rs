use serde_json::json;

use super::*;

#[test]
fn field_at_path_reads_top_level_field() {
    let row = json!({"status": "paid"});
    assert_eq!(field_at_path(&row, "status"), Some(&json!("paid")));
}

#[test]
fn field_at_path_walks_nested_objects() {
    let row = json!({"customer": {"address": {"city": "Lisbon"}}});
    assert_eq!(field_at_path(&row, "customer.address.city"), Some(&json!("Lisbon")));
}

#[test]
fn field_at_path_indexes_arrays() {
    let row = json!({"items": [{"sku": "A1"}, {"sku": "B2"}]});
    assert_eq!(field_at_path(&row, "items.1.sku"), Some(&json!("B2")));
    assert_eq!(field_at_path(&row, "items.5.sku"), None);
    assert_eq!(field_at_path(&row, "items.first.sku"), None);
}

#[test]
fn field_at_path_misses_through_scalars() {
    let row = json!({"total": 12});
    assert_eq!(field_at_path(&row, "total.amount"), None);
    assert_eq!(field_at_path(&row, "missing"), None);
}

#[test]
fn field_at_path_empty_returns_record() {
    let row = json!({"a": 1});
    assert_eq!(field_at_path(&row, ""), Some(&row));
}

#[test]
fn cell_text_formats_scalars() {
    assert_eq!(cell_text(Some(&json!("Mug"))), "Mug");
    assert_eq!(cell_text(Some(&json!(42))), "42");
    assert_eq!(cell_text(Some(&json!(19.5))), "19.5");
    assert_eq!(cell_text(Some(&json!(true))), "Yes");
    assert_eq!(cell_text(Some(&json!(false))), "No");
}

#[test]
fn cell_text_uses_placeholder_for_missing_null_and_empty() {
    assert_eq!(cell_text(None), EMPTY_CELL);
    assert_eq!(cell_text(Some(&Value::Null)), EMPTY_CELL);
    assert_eq!(cell_text(Some(&json!(""))), EMPTY_CELL);
}

#[test]
fn cell_text_serializes_compound_values_compactly() {
    assert_eq!(cell_text(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
}

#[test]
fn column_builder_sets_renderer() {
    let plain = Column::new("Total", "total");
    assert!(plain.render.is_none());
    let custom = plain.with_renderer(|row| cell_text(row.get("total")).into_any());
    assert!(custom.render.is_some());
    assert_eq!(custom.header, "Total");
    assert_eq!(custom.field, "total");
}
