//! Public landing route.

use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <main class="landing">
            <h1>"Storefront"</h1>
            <p class="landing__tagline">"Run every store you own from one console."</p>
            <a class="button" href="/login">"Sign in"</a>
        </main>
    }
}
