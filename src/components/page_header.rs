//! Page title bar with an optional subtitle and trailing actions.

use leptos::prelude::*;

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(into, optional)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="page-header__text">
                <h1 class="page-header__title">{title}</h1>
                {subtitle.map(|s| view! { <p class="page-header__subtitle">{s}</p> })}
            </div>
            <div class="page-header__actions">{children.map(|c| c())}</div>
        </header>
    }
}
