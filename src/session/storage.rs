//! Persisted token storage.
//!
//! The token is read once by bootstrap, written by the login page, and removed
//! on logout or failed validation.

use crate::util::local_storage;

/// `localStorage` key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "storefront_session_token";

/// Key-value home of the bearer token between page loads.
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage`. Always empty during SSR.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStorage;

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        local_storage::load(TOKEN_STORAGE_KEY).filter(|token| !token.trim().is_empty())
    }

    fn save(&self, token: &str) {
        local_storage::save(TOKEN_STORAGE_KEY, token);
    }

    fn clear(&self) {
        local_storage::remove(TOKEN_STORAGE_KEY);
    }
}
