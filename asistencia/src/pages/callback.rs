use chrono::Utc;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::app::CurrentUser;
use crate::auth::parse_callback;
use crate::components::loader::Loader;
use crate::components::snackbar::use_snackbar;
use crate::config::AppConfig;
use crate::pages::login::login_or_report;
use crate::services::credentials::BrowserSession;
use crate::services::error::AuthError;

/// Landing page for the identity provider's redirect.
#[component]
pub fn CallbackPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let session = expect_context::<BrowserSession>();
    let user = expect_context::<CurrentUser>();
    let snackbar = use_snackbar();
    let navigate = use_navigate();

    let outcome = window()
        .location()
        .hash()
        .map_err(|e| AuthError::Callback(format!("{e:?}")))
        .and_then(|fragment| parse_callback(&fragment, Utc::now()));

    let failure = match outcome {
        Ok(signed_in) => {
            log!(
                "Signed in as {}, token valid until {}",
                signed_in.profile.email.as_deref().unwrap_or("<unknown>"),
                signed_in.expires_at
            );
            user.0.set(Some(signed_in.profile.clone()));
            session.sign_in(signed_in);
            request_animation_frame(move || {
                navigate(
                    "/",
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                )
            });
            None
        }
        Err(e) => {
            error!("Login callback rejected: {}", e);
            Some(e)
        }
    };

    match failure {
        None => view! { <Loader text="Iniciando sesión..." /> }.into_any(),
        Some(e) => view! {
            <div class="login-container vertical align-center justify-center">
                <div class="error rounded padded vertical gap">
                    <h3 class="h3">"No se pudo iniciar sesión"</h3>
                    <p>{e.to_string()}</p>
                    <button
                        class="interactive rounded padded"
                        on:click=move |_| login_or_report(&config.auth, &snackbar)
                    >
                        "Reintentar"
                    </button>
                </div>
            </div>
        }
        .into_any(),
    }
}
