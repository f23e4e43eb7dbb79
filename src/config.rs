//! Frontend configuration: build-time defaults with an optional runtime
//! override read from `window.STOREFRONT_CONFIG`, so static deployments can
//! repoint the API without rebuilding. Values here are public; never put
//! secrets in this struct.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::session::PublicRoutes;

/// Login route. Router segments are static, so this is not overridable.
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const LOGIN_SEGMENT: &str = "login";
pub const DEFAULT_HOME_PATH: &str = "/dashboard";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Client configuration shared through Leptos context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend API origin plus prefix, e.g. `https://api.example.com/v1`.
    pub api_base_url: String,
    /// Where unauthenticated users are sent. Always part of `public_routes`.
    pub login_path: String,
    /// Landing route after sign-in.
    pub home_path: String,
    /// Per-request timeout for backend calls.
    pub request_timeout_ms: u32,
    /// Routes that render without a session.
    pub public_routes: PublicRoutes,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            home_path: DEFAULT_HOME_PATH.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            public_routes: PublicRoutes::default(),
        }
    }
}

impl AppConfig {
    /// Load build-time values and apply runtime overrides.
    pub fn load() -> Self {
        let mut config = Self {
            api_base_url: option_env!("STOREFRONT_API_BASE_URL").unwrap_or("").to_owned(),
            ..Self::default()
        };
        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }
        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    home_path: Option<String>,
    request_timeout_ms: Option<u32>,
    public_routes: Option<Vec<String>>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.home_path {
        config.home_path = value;
    }
    if let Some(value) = runtime.request_timeout_ms.filter(|ms| *ms > 0) {
        config.request_timeout_ms = value;
    }
    if let Some(routes) = runtime.public_routes.filter(|r| !r.is_empty()) {
        config.public_routes = PublicRoutes::new(routes);
    }
    config.public_routes.insert(&config.login_path);
}

#[cfg(feature = "hydrate")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Array, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("STOREFRONT_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let read = |key: &str| {
        Reflect::get(&config, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .and_then(|v| normalize_runtime_value(&v))
    };
    let timeout = Reflect::get(&config, &JsValue::from_str("request_timeout_ms"))
        .ok()
        .and_then(|v| v.as_f64())
        .and_then(parse_timeout);
    let routes = Reflect::get(&config, &JsValue::from_str("public_routes"))
        .ok()
        .filter(Array::is_array)
        .map(|v| {
            Array::from(&v)
                .iter()
                .filter_map(|item| item.as_string())
                .filter_map(|item| normalize_runtime_value(&item))
                .collect()
        });

    Some(RuntimeConfig {
        api_base_url: read("api_base_url"),
        home_path: read("home_path"),
        request_timeout_ms: timeout,
        public_routes: routes,
    })
}

#[cfg(not(feature = "hydrate"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

#[cfg(any(test, feature = "hydrate"))]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_timeout(ms: f64) -> Option<u32> {
    if ms.is_finite() && ms >= 1.0 && ms <= f64::from(u32::MAX) {
        Some(ms as u32)
    } else {
        None
    }
}
