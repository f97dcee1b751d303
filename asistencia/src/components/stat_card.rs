use leptos::prelude::*;

#[component]
pub fn StatCard(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] label: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    view! {
        <div class=format!("stat-card rounded padded background-2 vertical {class}")>
            <span class="stat-value">{move || value.get()}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}
