use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::{
    components::snackbar::Snackbar,
    config::AppConfig,
    pages::{callback::CallbackPage, groups::GroupsPage, login::LoginPage},
    services::{
        credentials::{BrowserSession, Profile},
        Api,
    },
};

/// Profile of the signed-in user, `None` while signed out.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub RwSignal<Option<Profile>>);

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_env();
    let session = BrowserSession::default();
    let api = Api::new(config.api.clone(), session.clone());
    let user = CurrentUser(RwSignal::new(session.profile()));

    provide_context(config);
    provide_context(session);
    provide_context(api);
    provide_context(user);

    view! {
        <Title text="Asistencia UCO" />

        <Router>
            <Snackbar>
                <Routes fallback=|| "Página no encontrada".into_view()>
                    <Route path=path!("/callback") view=CallbackPage />
                    <Route
                        path=path!("/")
                        view=move || {
                            view! {
                                <Show when=move || user.0.with(Option::is_some) fallback=LoginPage>
                                    <GroupsPage />
                                </Show>
                            }
                        }
                    />
                </Routes>
            </Snackbar>
        </Router>
    }
}
