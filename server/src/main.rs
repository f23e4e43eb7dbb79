mod config;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    // `.env` is optional; real environment variables take precedence.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    let config = ServerConfig::from_env().expect("invalid server configuration");
    let app = routes::app().expect("failed to build router");

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .expect("failed to bind");

    tracing::info!(addr = %config.addr(), "storefront listening");
    axum::serve(listener, app).await.expect("server failed");
}
