use leptos::prelude::*;

use crate::services::error::Failure;

#[component]
pub fn Loader(#[prop(into)] text: String) -> impl IntoView {
    view! {
        <div class="vertical align-center gap padded">
            <div class="loading"></div>
            <p>{text}</p>
        </div>
    }
}

/// Failure box with a retry button. `title` is shown above the message
/// when given.
#[component]
pub fn FailurePanel(
    failure: Failure,
    on_retry: Callback<()>,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    view! {
        <div class="error rounded padded vertical gap">
            {title.map(|title| view! { <h3 class="h3">{title}</h3> })}
            <p>{failure.message}</p>
            <button class="interactive rounded padded" on:click=move |_| on_retry.run(())>
                "Reintentar"
            </button>
        </div>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] title: String, #[prop(into)] subtitle: String) -> impl IntoView {
    view! {
        <div class="empty vertical align-center padded">
            <h3 class="h3">{title}</h3>
            <p class="muted">{subtitle}</p>
        </div>
    }
}
