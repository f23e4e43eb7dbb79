//! # storefront
//!
//! Leptos + WASM console for the multi-tenant storefront platform: the public
//! site shell, the sign-in page, and the admin dashboard.
//!
//! The crate's one piece of real state management is the session layer in
//! [`session`]: a bootstrap controller that validates the persisted token once
//! per client, and a pure route guard that decides what every route renders.
//! Everything else (resource slices, tables, cards, pages) is glue over the
//! backend REST API.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

/// WASM entry point: installs the console logger and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
