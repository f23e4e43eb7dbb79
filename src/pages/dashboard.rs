//! Admin dashboard: headline stats and the most recent orders.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It loads the orders, products, and
//! users slices once on mount through the shared API client, whose 401 hook
//! turns an expired session into a logout.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::components::data_table::{Column, DataTable, EMPTY_CELL, cell_text, field_at_path};
use crate::components::page_header::PageHeader;
use crate::components::stat_card::StatCard;
use crate::net::api::ApiClient;
use crate::session::{BrowserTokenStorage, SessionState, TokenStorage};
use crate::state::resource::{Keyed, ResourceKind, ResourceSlice};

/// Orders shown in the recent-orders table.
pub const RECENT_ORDERS: usize = 10;

/// Fields an order total may arrive under.
const TOTAL_FIELDS: [&str; 3] = ["total", "totalAmount", "amount"];

/// Numeric total of one order, or zero when absent, non-numeric, or not finite.
pub(crate) fn order_total(order: &Value) -> f64 {
    TOTAL_FIELDS
        .iter()
        .find_map(|field| field_at_path(order, field))
        .and_then(|v| v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok())))
        .filter(|total: &f64| total.is_finite())
        .unwrap_or(0.0)
}

/// Sum of order totals.
pub(crate) fn revenue(orders: &[Value]) -> f64 {
    orders.iter().map(order_total).sum()
}

/// Two-decimal currency string with thousands separators.
pub(crate) fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Newest-first slice of at most `limit` orders (backends list oldest first).
pub(crate) fn recent(orders: &[Value], limit: usize) -> Vec<Value> {
    orders.iter().rev().take(limit).cloned().collect()
}

fn order_columns() -> Vec<Column> {
    vec![
        Column::new("Order", "id").with_renderer(|row| row.key().unwrap_or(EMPTY_CELL).to_owned().into_any()),
        Column::new("Customer", "customer.name"),
        Column::new("Placed", "createdAt"),
        Column::new("Total", "total").with_renderer(|row| format_currency(order_total(row)).into_any()),
        Column::new("Status", "status").with_renderer(|row| {
            let status = cell_text(field_at_path(row, "status"));
            let class = format!("badge badge--{}", status.to_ascii_lowercase());
            view! { <span class=class>{status}</span> }.into_any()
        }),
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let api = expect_context::<ApiClient>();

    let orders = RwSignal::new(ResourceSlice::<Value>::default());
    let products = RwSignal::new(ResourceSlice::<Value>::default());
    let customers = RwSignal::new(ResourceSlice::<Value>::default());

    #[cfg(feature = "hydrate")]
    {
        use crate::state::resource::fetch_all;

        let token = session.with_untracked(|s| s.token().map(str::to_owned));
        for (kind, slice) in [
            (ResourceKind::Orders, orders),
            (ResourceKind::Products, products),
            (ResourceKind::Users, customers),
        ] {
            let api = api.clone().with_token(token.as_deref());
            slice.update(ResourceSlice::pending);
            leptos::task::spawn_local(async move {
                let result = fetch_all::<Value>(&api, kind).await;
                slice.update(|s| s.settle_list(result));
            });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = api;

    let greeting = move || {
        session.with(|s| {
            s.user()
                .map(|u| format!("Signed in as {}", u.display_name()))
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| {
        session.update(SessionState::logout);
        BrowserTokenStorage.clear();
    };

    let order_count = Signal::derive(move || orders.with(|s| s.items.len().to_string()));
    let revenue_total = Signal::derive(move || orders.with(|s| format_currency(revenue(&s.items))));
    let product_count = Signal::derive(move || products.with(|s| s.items.len().to_string()));
    let customer_count = Signal::derive(move || customers.with(|s| s.items.len().to_string()));
    let recent_orders = Signal::derive(move || orders.with(|s| recent(&s.items, RECENT_ORDERS)));
    let orders_loading = Signal::derive(move || orders.with(|s| s.is_loading));
    let orders_error = move || orders.with(|s| s.error.clone());

    view! {
        <div class="dashboard">
            <PageHeader title="Dashboard" subtitle=greeting()>
                <button class="button button--ghost" on:click=on_logout>
                    "Log out"
                </button>
            </PageHeader>
            <section class="dashboard__stats">
                <StatCard label=ResourceKind::Orders.label() value=order_count/>
                <StatCard label="Revenue" value=revenue_total hint="All listed orders"/>
                <StatCard label=ResourceKind::Products.label() value=product_count/>
                <StatCard label="Customers" value=customer_count/>
            </section>
            <section class="dashboard__orders">
                <h2>"Recent orders"</h2>
                {move || orders_error().map(|e| view! { <p class="dashboard__error">{e}</p> })}
                <DataTable
                    columns=order_columns()
                    rows=recent_orders
                    loading=orders_loading
                    empty_text="No orders yet."
                />
            </section>
        </div>
    }
}
