//! Router assembly: Leptos SSR pages, hydration assets under `/pkg`, and a
//! health probe.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Failures while assembling the router.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("leptos configuration: {0}")]
    LeptosConfig(#[from] leptos::config::errors::LeptosConfigError),
}

/// Routes that do not depend on the Leptos configuration.
pub fn base_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Full application router.
///
/// # Errors
///
/// Returns [`RouterError::LeptosConfig`] if the Leptos configuration cannot be
/// loaded (missing or malformed `[package.metadata.leptos]` section).
pub fn app() -> Result<Router, RouterError> {
    let conf = get_configuration(None)?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(storefront::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || storefront::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
