//! Mounts the one-shot session bootstrap.
//!
//! The synchronous half runs in the component body, before any effect, so the
//! route guard's first evaluation already sees the restored token and the
//! loading flag. The validator round-trip is spawned on the local executor.
//! During SSR nothing runs: the persisted token lives in the browser.

use leptos::prelude::*;

#[component]
pub fn SessionBootstrap(children: Children) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    start();
    children()
}

#[cfg(feature = "hydrate")]
fn start() {
    use std::sync::Arc;

    use leptos_router::NavigateOptions;
    use leptos_router::hooks::{use_location, use_navigate};

    use crate::config::AppConfig;
    use crate::session::{BootstrapController, BootstrapStart, BrowserTokenStorage, HttpSessionValidator, SessionState};

    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<AppConfig>();
    let controller = expect_context::<Arc<BootstrapController>>();
    let pathname = use_location().pathname.get_untracked();
    let navigate = use_navigate();
    let replace = || NavigateOptions {
        replace: true,
        ..NavigateOptions::default()
    };

    match controller.start(&session, &BrowserTokenStorage, &pathname) {
        BootstrapStart::AlreadyStarted | BootstrapStart::Settled(None) => {}
        BootstrapStart::Settled(Some(navigation)) => {
            leptos::task::spawn_local(async move {
                navigate(&navigation.to, replace());
            });
        }
        BootstrapStart::Validate(ticket) => {
            let validator = HttpSessionValidator::new(&config);
            leptos::task::spawn_local(async move {
                let navigation = controller
                    .complete(&session, &validator, &BrowserTokenStorage, ticket, &pathname)
                    .await;
                if let Some(navigation) = navigation {
                    navigate(&navigation.to, replace());
                }
            });
        }
    }
}
