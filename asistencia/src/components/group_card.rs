use dto::group::GroupDto;
use leptos::prelude::*;

use crate::format::subject_color;

#[component]
pub fn GroupCard(group: GroupDto, on_select: Callback<GroupDto>) -> impl IntoView {
    let color = subject_color(&group.subject);
    let subject = group.subject.clone();
    let professor = group.professor.clone();
    let student_count = group.student_count;

    view! {
        <div
            class="group-card interactive rounded padded background-2 vertical gap"
            on:click=move |_| on_select.run(group.clone())
        >
            <div class="course-color rounded" style:background-color=color></div>
            <h3 class="h3">{subject}</h3>
            <p class="muted">"Profesor: " {professor}</p>
            <div class="horizontal gap space-between">
                <span>{student_count} " estudiantes"</span>
                <span class="badge success">"Activo"</span>
            </div>
        </div>
    }
}
