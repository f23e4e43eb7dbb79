//! Sign-in page: email + password exchanged for a bearer token.
//!
//! On success the token is persisted and the browser does a full navigation to
//! the home route, so the session is established by the regular bootstrap
//! path rather than by writing to the session store from here.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::api::ApiError;

/// Message shown for a failed sign-in.
pub(crate) fn login_failed_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized | ApiError::Status { status: 400 | 403 | 404 } => "Invalid email or password.".to_owned(),
        ApiError::Timeout(_) | ApiError::Network(_) => "Could not reach the server. Try again.".to_owned(),
        other => format!("Sign-in failed: {other}"),
    }
}

/// Validate form input before any request is made.
pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    let config = expect_context::<crate::config::AppConfig>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if let Err(message) = validate_credentials(&email_value, &password_value) {
            info.set(message.to_owned());
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            use crate::net::api::{ApiClient, login};
            use crate::session::{BrowserTokenStorage, TokenStorage};

            let config = config.clone();
            leptos::task::spawn_local(async move {
                let api = ApiClient::new(&config);
                match login(&api, &email_value, &password_value).await {
                    Ok(response) => {
                        BrowserTokenStorage.save(&response.token);
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&config.home_path);
                        }
                    }
                    Err(err) => {
                        log::warn!("sign-in failed: {err}");
                        info.set(login_failed_message(&err));
                        busy.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Storefront"</h1>
                <p class="login-card__subtitle">"Sign in to your console"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
