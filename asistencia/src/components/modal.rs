use leptos::ev;
use leptos::prelude::*;

/// Overlay dialog. Clicking the backdrop or pressing Escape closes it.
#[component]
pub fn Modal(
    #[prop(into)] is_open: Signal<bool>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" && is_open.get_untracked() {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div class="overlay" class:hidden=move || !is_open.get() on:click=move |_| on_close.run(())>
            <div class="modal rounded vertical gap" on:click=|e| e.stop_propagation()>
                <Show when=move || is_open.get()>{children()}</Show>
            </div>
        </div>
    }
}
