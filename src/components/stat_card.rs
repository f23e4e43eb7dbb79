//! Dashboard metric card.

use leptos::prelude::*;

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into, optional)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__label">{label}</span>
            <span class="stat-card__value">{move || value.get()}</span>
            {hint.map(|h| view! { <span class="stat-card__hint">{h}</span> })}
        </div>
    }
}
