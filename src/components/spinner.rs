//! Loading indicator shown while the session is being validated.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(into, default = "Loading...".to_owned())] label: String) -> impl IntoView {
    view! {
        <div class="spinner" role="status" aria-live="polite">
            <span class="spinner__ring" aria-hidden="true"></span>
            <span class="spinner__label">{label}</span>
        </div>
    }
}
