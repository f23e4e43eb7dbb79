//! Per-entity resource slices for the admin dashboard.
//!
//! DESIGN
//! ======
//! Every backend collection (products, orders, plans, ...) follows the same
//! load -> pending -> fulfilled/rejected shape, so one generic slice covers all
//! of them. Records stay as `serde_json::Value`: the dashboard only renders
//! them through dotted-path table columns and never needs typed fields.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::net::api::{ApiClient, ApiError};

/// The backend collections the console manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Admins,
    Users,
    Products,
    Orders,
    Inventory,
    Payments,
    Plans,
    Subscriptions,
    Categories,
}

impl ResourceKind {
    pub const ALL: [Self; 9] = [
        Self::Admins,
        Self::Users,
        Self::Products,
        Self::Orders,
        Self::Inventory,
        Self::Payments,
        Self::Plans,
        Self::Subscriptions,
        Self::Categories,
    ];

    /// REST collection path.
    #[must_use]
    pub fn collection_path(self) -> &'static str {
        match self {
            Self::Admins => "/admins",
            Self::Users => "/users",
            Self::Products => "/products",
            Self::Orders => "/orders",
            Self::Inventory => "/inventory",
            Self::Payments => "/payments",
            Self::Plans => "/plans",
            Self::Subscriptions => "/subscriptions",
            Self::Categories => "/categories",
        }
    }

    /// REST path of one record.
    #[must_use]
    pub fn item_path(self, id: &str) -> String {
        format!("{}/{id}", self.collection_path())
    }

    /// Human label for headers and cards.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admins => "Admins",
            Self::Users => "Users",
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Inventory => "Inventory",
            Self::Payments => "Payments",
            Self::Plans => "Plans",
            Self::Subscriptions => "Subscriptions",
            Self::Categories => "Categories",
        }
    }
}

/// Records that carry a stable identifier.
pub trait Keyed {
    fn key(&self) -> Option<&str>;
}

impl Keyed for serde_json::Value {
    fn key(&self) -> Option<&str> {
        self.get("id")
            .or_else(|| self.get("_id"))
            .and_then(serde_json::Value::as_str)
    }
}

/// `{ data, is_loading, error }` state for one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceSlice<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceSlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

impl<T: Keyed> ResourceSlice<T> {
    pub fn pending(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn fulfilled(&mut self, items: Vec<T>) {
        self.items = items;
        self.is_loading = false;
        self.error = None;
    }

    pub fn rejected(&mut self, error: &ApiError) {
        self.is_loading = false;
        self.error = Some(error.to_string());
    }

    /// Replace the record with the same key, or append it.
    pub fn upsert(&mut self, item: T) {
        let existing = item
            .key()
            .and_then(|key| self.items.iter().position(|i| i.key() == Some(key)));
        match existing {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }

    /// Settle a list fetch.
    pub fn settle_list(&mut self, result: Result<Vec<T>, ApiError>) {
        match result {
            Ok(items) => self.fulfilled(items),
            Err(err) => self.rejected(&err),
        }
    }

    /// Settle a create or update.
    pub fn settle_item(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(item) => {
                self.upsert(item);
                self.is_loading = false;
                self.error = None;
            }
            Err(err) => self.rejected(&err),
        }
    }
}

/// List responses arrive either bare or wrapped in `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// Single-record responses arrive bare or as `{ "data": {...} }`. A record
/// that carries its own id is never unwrapped, even when it has a `data` field.
pub(crate) fn unwrap_item(body: serde_json::Value) -> serde_json::Value {
    if body.key().is_none() {
        if let Some(inner) = body.get("data").filter(|d| d.is_object()) {
            return inner.clone();
        }
    }
    body
}

fn decode_item<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(unwrap_item(body)).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET` the whole collection.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the request.
pub async fn fetch_all<T: DeserializeOwned>(api: &ApiClient, kind: ResourceKind) -> Result<Vec<T>, ApiError> {
    let envelope: ListEnvelope<T> = api.get_json(kind.collection_path()).await?;
    Ok(envelope.into_items())
}

/// `POST` a new record.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the request.
pub async fn create<B: Serialize, T: DeserializeOwned>(
    api: &ApiClient,
    kind: ResourceKind,
    body: &B,
) -> Result<T, ApiError> {
    let response: serde_json::Value = api.post_json(kind.collection_path(), body).await?;
    decode_item(response)
}

/// `PUT` an existing record.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the request.
pub async fn update<B: Serialize, T: DeserializeOwned>(
    api: &ApiClient,
    kind: ResourceKind,
    id: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response: serde_json::Value = api.put_json(&kind.item_path(id), body).await?;
    decode_item(response)
}
