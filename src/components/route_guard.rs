//! Route guard component.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the router outlet. Re-runs the pure `decide` function on every
//! pathname or session change; renders children only on `RenderChildren`,
//! shows the spinner otherwise, and performs the login redirect as an effect.
//! Logout and the global 401 hook only clear the session; this component is
//! what turns that into a redirect.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::spinner::Spinner;
use crate::config::AppConfig;
use crate::session::{RenderDecision, SessionState, decide};

#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<AppConfig>();
    let location = use_location();
    let navigate = use_navigate();

    let public_routes = config.public_routes;
    let decision = Memo::new(move |_| {
        let pathname = location.pathname.get();
        session.with(|state| decide(&pathname, state, &public_routes))
    });

    // Bootstrap may return the same redirect; a second replace to the login
    // path is a no-op for the router.
    let login_path = config.login_path;
    Effect::new(move || {
        if decision.get() == RenderDecision::RedirectToLogin {
            navigate(
                &login_path,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    view! {
        <Show
            when=move || decision.get() == RenderDecision::RenderChildren
            fallback=|| view! { <Spinner/> }
        >
            {children()}
        </Show>
    }
}
