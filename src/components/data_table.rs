//! Generic data table for dashboard collections.
//!
//! DESIGN
//! ======
//! Rows are raw JSON records. Each column names a dotted field path
//! (`customer.name`, `items.0.sku`) and may swap in a custom cell renderer that
//! receives the whole row. Missing or null fields render as [`EMPTY_CELL`].

#[cfg(test)]
#[path = "data_table_test.rs"]
mod data_table_test;

use std::sync::Arc;

use leptos::prelude::*;
use serde_json::Value;

pub const EMPTY_CELL: &str = "-";

/// Renders one cell from the full row.
pub type CellRenderer = Arc<dyn Fn(&Value) -> AnyView + Send + Sync>;

/// One table column.
#[derive(Clone)]
pub struct Column {
    pub header: String,
    pub field: String,
    pub render: Option<CellRenderer>,
}

impl Column {
    pub fn new(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            field: field.into(),
            render: None,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, render: impl Fn(&Value) -> AnyView + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }
}

/// Walk `path` through nested objects and arrays. Numeric segments index
/// arrays; an empty path returns the record itself.
#[must_use]
pub fn field_at_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(record);
    }
    path.split('.').try_fold(record, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Plain-text rendering of a cell value.
#[must_use]
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_owned(),
        Some(Value::String(s)) if s.is_empty() => EMPTY_CELL.to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "Yes" } else { "No" }.to_owned(),
        Some(other) => other.to_string(),
    }
}

fn render_cell(column: &Column, row: &Value) -> AnyView {
    match &column.render {
        Some(render) => render(row),
        None => cell_text(field_at_path(row, &column.field)).into_any(),
    }
}

#[component]
pub fn DataTable(
    columns: Vec<Column>,
    #[prop(into)] rows: Signal<Vec<Value>>,
    #[prop(into, default = Signal::stored(false))] loading: Signal<bool>,
    #[prop(into, default = "No records yet.".to_owned())] empty_text: String,
) -> impl IntoView {
    let headers = columns
        .iter()
        .map(|c| view! { <th>{c.header.clone()}</th> })
        .collect_view();
    let span = columns.len().max(1).to_string();

    let body = move || {
        let rows = rows.get();
        if rows.is_empty() {
            let text = if loading.get() { "Loading...".to_owned() } else { empty_text.clone() };
            return view! {
                <tr class="data-table__empty">
                    <td colspan=span.clone()>{text}</td>
                </tr>
            }
            .into_any();
        }
        rows.iter()
            .map(|row| {
                let cells = columns
                    .iter()
                    .map(|column| view! { <td>{render_cell(column, row)}</td> })
                    .collect_view();
                view! { <tr>{cells}</tr> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <table class="data-table">
            <thead>
                <tr>{headers}</tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
