//! Main screen: the professor's groups, and the sessions dialog that drills
//! into one group and records attendance for one of its sessions.

use chrono::Local;
use dto::group::GroupDto;
use dto::session::SessionDto;
use leptos::ev::MouseEvent;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::CurrentUser;
use crate::components::group_card::GroupCard;
use crate::components::loader::{EmptyState, FailurePanel, Loader};
use crate::components::sessions_dialog::{DialogActions, SessionsDialog};
use crate::components::snackbar::{use_snackbar, SnackbarContext};
use crate::components::stat_card::StatCard;
use crate::config::AppConfig;
use crate::format::long_date;
use crate::pages::login::{login_or_report, start_logout};
use crate::services::credentials::BrowserSession;
use crate::services::error::{ApiError, Failure};
use crate::services::Api;
use crate::state::attendance::COMPLETION_DELAY;
use crate::state::drill_down::{DrillDown, FetchRequest, FetchTarget};
use crate::state::load::Load;
use crate::state::stats::GroupStats;

const COMPLETION_MESSAGE: &str = "Asistencia registrada con éxito";

/// Converts a request error into view state. Authentication failures are
/// also raised to the page so it can block on them.
fn report(error: ApiError, what: &str, auth: RwSignal<Option<Failure>>) -> Failure {
    let failure = Failure::from(error);
    error!("{} failed: {}", what, failure.message);
    if failure.is_auth() {
        auth.try_set(Some(failure.clone()));
    }
    failure
}

#[component]
pub fn GroupsPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let api = expect_context::<Api>();
    let session = expect_context::<BrowserSession>();
    let user = expect_context::<CurrentUser>();
    let snackbar = use_snackbar();

    let groups = RwSignal::new(Load::<Vec<GroupDto>>::Idle);
    let nav = RwSignal::new(DrillDown::default());
    let auth_failure = RwSignal::new(None::<Failure>);

    let refresh = Callback::new({
        let api = api.clone();
        move |()| {
            groups.set(Load::Loading);
            let api = api.clone();
            spawn_local(async move {
                let result = api
                    .groups()
                    .await
                    .map_err(|e| report(e, "Loading groups", auth_failure));
                if let Ok(list) = &result {
                    log!("Loaded {} groups", list.len());
                }
                groups.try_set(Load::from(result));
            });
        }
    });

    let fetch = Callback::new({
        let api = api.clone();
        move |request: FetchRequest| {
            let api = api.clone();
            spawn_local(async move {
                match &request.target {
                    FetchTarget::Sessions { group_id } => {
                        let result = api
                            .sessions(group_id)
                            .await
                            .map_err(|e| report(e, "Loading sessions", auth_failure));
                        nav.try_update(|nav| nav.apply_sessions(&request, result));
                    }
                    FetchTarget::Roster { group_id, .. } => {
                        let result = api
                            .students(group_id)
                            .await
                            .map_err(|e| report(e, "Loading roster", auth_failure));
                        nav.try_update(|nav| nav.apply_roster(&request, result));
                    }
                }
            });
        }
    });

    let toggle = Callback::new(move |(student_id, present): (String, bool)| {
        let mark = match nav.try_update(|nav| nav.toggle_attendance(&student_id, present)) {
            Some(Ok(mark)) => mark,
            Some(Err(e)) => {
                warn!("Attendance for {} not sent: {}", student_id, e);
                snackbar.error("No se pudo registrar la asistencia", e);
                return;
            }
            None => return,
        };

        let api = api.clone();
        spawn_local(async move {
            let result = api
                .record_attendance(&mark.submission.body)
                .await
                .map(|message| log!("Attendance saved for {}: {}", mark.submission.student_id, message))
                .map_err(|e| report(e, "Recording attendance", auth_failure));

            let applied = nav
                .try_update(|nav| nav.resolve_attendance(&mark, result))
                .unwrap_or(false);
            if !applied || !nav.with_untracked(DrillDown::is_complete) {
                return;
            }

            snackbar.success(COMPLETION_MESSAGE);
            let epoch = mark.epoch;
            set_timeout(
                move || {
                    if nav.try_update(|nav| nav.finish(epoch)) == Some(true) {
                        log!("Attendance complete, closing session view");
                    }
                },
                COMPLETION_DELAY,
            );
        });
    });

    let actions = DialogActions {
        select_session: Callback::new(move |session: SessionDto| {
            match nav.try_update(|nav| nav.select_session(session)) {
                Some(Ok(request)) => fetch.run(request),
                Some(Err(e)) => warn!("Session not opened: {}", e),
                None => {}
            }
        }),
        toggle,
        back: Callback::new(move |()| {
            nav.update(|nav| {
                nav.go_back();
            })
        }),
        retry: Callback::new(move |()| {
            if let Some(Some(request)) = nav.try_update(DrillDown::retry) {
                fetch.run(request);
            }
        }),
        close: Callback::new(move |()| {
            nav.update(|nav| {
                nav.close();
            })
        }),
    };

    let select_group = Callback::new(move |group: GroupDto| {
        log!("Opening group {} ({})", group.id, group.subject);
        if let Some(Some(request)) = nav.try_update(|nav| nav.select_group(group)) {
            fetch.run(request);
        }
    });

    let logout = {
        let auth = config.auth.clone();
        move |_: MouseEvent| {
            session.sign_out();
            user.0.set(None);
            if let Err(e) = start_logout(&auth) {
                error!("Failed to reach logout endpoint: {}", e);
            }
        }
    };

    refresh.run(());

    let stats = Memo::new(move |_| {
        groups.with(|groups| {
            GroupStats::from_groups(groups.ready().map(Vec::as_slice).unwrap_or_default())
        })
    });
    let active_card = Signal::derive(move || stats.get().cards()[0].0.clone());
    let students_card = Signal::derive(move || stats.get().cards()[1].0.clone());

    let email = move || user.0.get().and_then(|profile| profile.email);
    let today = long_date(&Local::now().date_naive());

    let content = move || match groups.get() {
        Load::Idle | Load::Loading => view! { <Loader text="Cargando grupos..." /> }.into_any(),
        Load::Failed(_) => ().into_any(),
        Load::Ready(list) if list.is_empty() => view! {
            <EmptyState
                title="No hay grupos disponibles"
                subtitle="No se encontraron grupos en el sistema."
            />
        }
        .into_any(),
        Load::Ready(list) => view! {
            <div class="group-grid">
                {list
                    .into_iter()
                    .map(|group| view! { <GroupCard group=group on_select=select_group /> })
                    .collect_view()}
            </div>
        }
        .into_any(),
    };

    let auth = config.auth.clone();
    let blocking = move || {
        auth_failure.get().map(|failure| {
            let auth = auth.clone();
            view! {
                <div class="login-container vertical align-center justify-center">
                    <div class="error rounded padded vertical gap">
                        <h3 class="h3">"Tu sesión no es válida"</h3>
                        <p>{failure.message}</p>
                        <button
                            class="interactive rounded padded"
                            on:click=move |_| login_or_report(&auth, &snackbar)
                        >
                            "Reintentar"
                        </button>
                    </div>
                </div>
            }
        })
    };

    view! {
        <Show when=move || auth_failure.with(Option::is_none) fallback=blocking>
            <div class="content vertical gap padded">
                <header class="horizontal gap space-between align-center">
                    <div class="vertical">
                        <div class="horizontal gap align-center">
                            <h1 class="h1">"Asistencia UCO"</h1>
                            {move || email().map(|email| view! { <span class="muted">{email}</span> })}
                            <button class="interactive rounded padded" on:click=logout.clone()>
                                "Cerrar Sesión"
                            </button>
                        </div>
                        <p class="muted">{today.clone()}</p>
                    </div>
                    <button
                        class="interactive rounded padded"
                        disabled=move || groups.with(Load::is_loading)
                        on:click=move |_| refresh.run(())
                    >
                        "Actualizar"
                    </button>
                </header>
                {move || {
                    groups
                        .with(|groups| groups.failure().cloned())
                        .map(|failure| {
                            view! {
                                <FailurePanel
                                    failure=failure
                                    on_retry=refresh
                                    title="Error de conexión"
                                />
                            }
                        })
                }}
                <div class="horizontal gap">
                    <StatCard value=active_card label="Grupos Activos" />
                    <StatCard value=students_card label="Total Estudiantes" />
                </div>
                {content}
            </div>
            <SessionsDialog nav=nav actions=actions />
        </Show>
    }
}
