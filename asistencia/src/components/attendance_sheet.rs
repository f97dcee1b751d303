use leptos::prelude::*;

use crate::components::loader::EmptyState;
use crate::components::stat_card::StatCard;
use crate::state::attendance::{AttendanceCounts, AttendanceRow, AttendanceSheet, RowStatus};
use crate::state::drill_down::DrillDown;

/// Roster of the open session with one present/absent toggle per student.
/// Each toggle is reported through `on_toggle` as `(student_id, present)`.
#[component]
pub fn AttendanceSheetView(
    nav: RwSignal<DrillDown>,
    on_toggle: Callback<(String, bool)>,
) -> impl IntoView {
    let (search, set_search) = signal(String::new());

    let counts = Memo::new(move |_| {
        nav.with(|nav| {
            nav.roster()
                .ready()
                .map(AttendanceSheet::counts)
                .unwrap_or_default()
        })
    });

    let rows = move || {
        let term = search.get();
        nav.with(|nav| {
            nav.roster()
                .ready()
                .map(|sheet| sheet.filtered(&term))
                .unwrap_or_default()
        })
    };

    let stat = move |pick: fn(&AttendanceCounts) -> usize| {
        Signal::derive(move || pick(&counts.get()).to_string())
    };

    view! {
        <div class="vertical gap">
            <div class="horizontal gap">
                <StatCard value=stat(|c| c.total) label="Total" />
                <StatCard value=stat(|c| c.present) label="Presentes" class="success" />
                <StatCard value=stat(|c| c.absent) label="Ausentes" class="warning" />
            </div>
            <input
                class="padded rounded"
                placeholder="Buscar por nombre o identificación..."
                bind:value=(search, set_search)
            />
            <Show
                when=move || { counts.get().total > 0 }
                fallback=|| {
                    view! {
                        <EmptyState
                            title="No hay estudiantes registrados"
                            subtitle="Este grupo aún no tiene estudiantes asignados"
                        />
                    }
                }
            >
                <Show
                    when=move || !rows().is_empty()
                    fallback=|| {
                        view! {
                            <EmptyState
                                title="No se encontraron estudiantes"
                                subtitle="Intenta con otros términos de búsqueda"
                            />
                        }
                    }
                >
                    <div class="vertical gap">
                        <For
                            each=rows
                            key=|row| (row.student.id.clone(), row.present, row.status.clone())
                            let:row
                        >
                            <StudentRow row=row on_toggle=on_toggle />
                        </For>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn StudentRow(row: AttendanceRow, on_toggle: Callback<(String, bool)>) -> impl IntoView {
    let editable = row.status.is_editable();
    let marked = row.status != RowStatus::Unmarked;
    let present_id = row.student.id.clone();
    let absent_id = row.student.id.clone();

    let status = match &row.status {
        RowStatus::Unmarked => None,
        RowStatus::Submitting => Some("Guardando..."),
        RowStatus::Saved => Some("Guardado"),
        RowStatus::Failed(_) => Some("No guardado"),
    };
    let error = match row.status {
        RowStatus::Failed(message) => Some(message),
        _ => None,
    };

    view! {
        <div
            class="student-row rounded padded background-2 horizontal gap align-center"
            class:saved=!editable
        >
            <div class="vertical flex-1">
                <h4 class="h4">{row.student.full_name}</h4>
                <p class="muted">{row.student.identification}</p>
                {error.map(|message| view! { <p class="error-text">{message}</p> })}
            </div>
            {status.map(|status| view! { <span class="muted">{status}</span> })}
            <div class="horizontal gap">
                <button
                    class="interactive rounded padded"
                    class:green={marked && row.present}
                    disabled=!editable
                    on:click=move |_| on_toggle.run((present_id.clone(), true))
                >
                    "Presente"
                </button>
                <button
                    class="interactive rounded padded"
                    class:red={marked && !row.present}
                    disabled=!editable
                    on:click=move |_| on_toggle.run((absent_id.clone(), false))
                >
                    "Ausente"
                </button>
            </div>
        </div>
    }
}
