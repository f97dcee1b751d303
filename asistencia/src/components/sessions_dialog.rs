use dto::session::SessionDto;
use leptos::either::EitherOf4;
use leptos::prelude::*;

use crate::components::attendance_sheet::AttendanceSheetView;
use crate::components::loader::{EmptyState, FailurePanel, Loader};
use crate::components::modal::Modal;
use crate::components::stat_card::StatCard;
use crate::format::session_date;
use crate::state::drill_down::{DrillDown, Level, SessionsView};
use crate::state::load::Load;

/// Actions the dialog reports back to the page that owns the navigation.
#[derive(Clone, Copy)]
pub struct DialogActions {
    pub select_session: Callback<SessionDto>,
    pub toggle: Callback<(String, bool)>,
    pub back: Callback<()>,
    pub retry: Callback<()>,
    pub close: Callback<()>,
}

#[component]
pub fn SessionsDialog(nav: RwSignal<DrillDown>, actions: DialogActions) -> impl IntoView {
    let is_open = Signal::derive(move || nav.with(DrillDown::is_open));
    let level = Memo::new(move |_| nav.with(DrillDown::level));

    let title = move || match level.get() {
        Level::Attendance => "Tomar asistencia",
        _ => "Sesiones del grupo",
    };
    let subtitle = move || {
        nav.with(|nav| match (nav.session(), nav.group()) {
            (Some(session), _) => format!("Sesión del {}", session_date(&session.date)),
            (None, Some(group)) => group.subject.clone(),
            (None, None) => String::new(),
        })
    };

    view! {
        <Modal is_open=is_open on_close=actions.close>
            <div class="horizontal gap space-between">
                <div class="vertical">
                    <Show when=move || { level.get() == Level::Attendance }>
                        <button
                            class="interactive rounded padded"
                            on:click=move |_| actions.back.run(())
                        >
                            "Volver a sesiones"
                        </button>
                    </Show>
                    <h2 class="h2">{title}</h2>
                    <p class="muted">{subtitle}</p>
                </div>
                <button
                    class="interactive rounded padded"
                    aria-label="Cerrar"
                    on:click=move |_| actions.close.run(())
                >
                    "✕"
                </button>
            </div>
            <div class="modal-content vertical gap">
                {move || match level.get() {
                    Level::Attendance => view! { <RosterPane nav=nav actions=actions /> }.into_any(),
                    _ => view! { <SessionList nav=nav actions=actions /> }.into_any(),
                }}
            </div>
        </Modal>
    }
}

#[component]
fn SessionList(nav: RwSignal<DrillDown>, actions: DialogActions) -> impl IntoView {
    let state = Memo::new(move |_| nav.with(DrillDown::sessions_view));

    move || match state.get() {
        SessionsView::Loading => EitherOf4::A(view! { <Loader text="Cargando datos..." /> }),
        SessionsView::Failed(failure) => {
            EitherOf4::B(view! { <FailurePanel failure=failure on_retry=actions.retry /> })
        }
        SessionsView::Empty => EitherOf4::C(view! {
            <EmptyState
                title="No hay sesiones disponibles"
                subtitle="Este grupo aún no tiene sesiones registradas"
            />
        }),
        SessionsView::List(sessions) => {
            let count = sessions.len().to_string();
            EitherOf4::D(view! {
                <StatCard value=count label="Sesiones registradas" />
                <div class="vertical gap">
                    {sessions
                        .into_iter()
                        .map(|session| {
                            let label = session_date(&session.date);
                            view! {
                                <div
                                    class="session-item interactive rounded padded background-2"
                                    on:click=move |_| actions.select_session.run(session.clone())
                                >
                                    {label}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            })
        }
    }
}

#[component]
fn RosterPane(nav: RwSignal<DrillDown>, actions: DialogActions) -> impl IntoView {
    let failure = Memo::new(move |_| nav.with(|nav| nav.roster().failure().cloned()));
    let loading = Memo::new(move |_| nav.with(|nav| matches!(nav.roster(), Load::Loading | Load::Idle)));

    move || {
        if let Some(failure) = failure.get() {
            view! { <FailurePanel failure=failure on_retry=actions.retry /> }.into_any()
        } else if loading.get() {
            view! { <Loader text="Cargando datos..." /> }.into_any()
        } else {
            view! { <AttendanceSheetView nav=nav on_toggle=actions.toggle /> }.into_any()
        }
    }
}
