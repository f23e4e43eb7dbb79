//! Root application component with routing and context providers.
//!
//! Context provided to the whole tree:
//! - `RwSignal<SessionState>`: the single session store;
//! - `Arc<BootstrapController>`: the one-shot bootstrap latch;
//! - `AppConfig`;
//! - `ApiClient` with the global 401 hook installed.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::RouteGuard;
use crate::components::session_bootstrap::SessionBootstrap;
use crate::config::{AppConfig, LOGIN_SEGMENT};
use crate::net::api::ApiClient;
use crate::pages::{dashboard::DashboardPage, landing::LandingPage, login::LoginPage};
use crate::session::{BootstrapController, BrowserTokenStorage, SessionState, TokenStorage};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    let session = RwSignal::new(SessionState::default());
    let controller = Arc::new(BootstrapController::new(
        config.public_routes.clone(),
        config.login_path.clone(),
    ));
    let api = ApiClient::new(&config).on_unauthorized(move || {
        session.update(SessionState::logout);
        BrowserTokenStorage.clear();
    });

    provide_context(session);
    provide_context(controller);
    provide_context(config);
    provide_context(api);

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="Storefront Console"/>

        <Router>
            <SessionBootstrap>
                <RouteGuard>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=LandingPage/>
                        <Route path=StaticSegment(LOGIN_SEGMENT) view=LoginPage/>
                        <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    </Routes>
                </RouteGuard>
            </SessionBootstrap>
        </Router>
    }
}
