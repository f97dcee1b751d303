use leptos::logging::error;
use leptos::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use crate::components::snackbar::{use_snackbar, SnackbarContext};
use crate::config::{AppConfig, AuthConfig};
use crate::services::error::AuthError;

pub const CALLBACK_PATH: &str = "/callback";

#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("browser location unavailable: {0}")]
    Location(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

fn origin() -> Result<String, RedirectError> {
    window()
        .location()
        .origin()
        .map_err(|e| RedirectError::Location(format!("{e:?}")))
}

fn redirect(url: &str) -> Result<(), RedirectError> {
    window()
        .location()
        .set_href(url)
        .map_err(|e| RedirectError::Location(format!("{e:?}")))
}

/// Sends the browser to the identity provider's login page.
pub fn start_login(auth: &AuthConfig) -> Result<(), RedirectError> {
    let redirect_uri = format!("{}{CALLBACK_PATH}", origin()?);
    let nonce = Uuid::new_v4().simple().to_string();
    let url = auth.authorize_url(&redirect_uri, &nonce)?;
    redirect(url.as_str())
}

/// Ends the provider session and comes back to the app's origin.
pub fn start_logout(auth: &AuthConfig) -> Result<(), RedirectError> {
    let url = auth.logout_url(&origin()?)?;
    redirect(url.as_str())
}

/// Runs [`start_login`], reporting a failure on the snackbar.
pub fn login_or_report(auth: &AuthConfig, snackbar: &impl SnackbarContext) {
    if let Err(e) = start_login(auth) {
        error!("Failed to start login: {}", e);
        snackbar.error("No se pudo iniciar sesión", e);
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let snackbar = use_snackbar();

    view! {
        <div class="login-container vertical align-center justify-center">
            <div class="login-box rounded padded background-2 vertical gap align-center">
                <h2 class="h2">"Bienvenido a Asistencia UCO"</h2>
                <p class="muted">"Inicia sesión con tu cuenta institucional para continuar"</p>
                <button
                    class="interactive rounded padded"
                    on:click=move |_| login_or_report(&config.auth, &snackbar)
                >
                    "Iniciar sesión"
                </button>
            </div>
        </div>
    }
}
