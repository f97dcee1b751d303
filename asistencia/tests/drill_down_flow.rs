mod common;

use asistencia::services::error::Failure;
use asistencia::state::attendance::RowStatus;
use asistencia::state::drill_down::{DrillDown, FetchTarget, Level, SessionsView};
use common::{respond, ScriptedServer};
use dto::group::GroupDto;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn group() -> GroupDto {
    GroupDto {
        id: "g1".into(),
        professor_id: Some("p1".into()),
        professor: "Ana Ruiz".into(),
        subject: "Cálculo".into(),
        student_count: 2,
    }
}

#[tokio::test]
async fn professor_marks_a_whole_session() {
    let server = ScriptedServer::new(vec![
        respond(
            200,
            json!({"success": true, "message": "", "data": [{"id": "ses1", "grupoId": "g1", "fecha": "2025-05-05T14:00:00"}]}),
        ),
        respond(
            200,
            json!({"success": true, "message": "", "data": [
                {"id": "s1", "nombresCompletos": "María Pérez", "numeroIdentificacion": "1001", "estudianteGrupoId": "sg1"},
                {"id": "s2", "nombresCompletos": "Juan Díaz", "numeroIdentificacion": "1002", "estudianteGrupoId": "sg2"}
            ]}),
        ),
        respond(201, json!({"success": true, "message": "ok", "data": null})),
        respond(201, json!({"success": true, "message": "ok", "data": null})),
    ])
    .await;
    let client = server.client("tok");
    let mut nav = DrillDown::default();

    let request = nav.select_group(group()).expect("fetch sessions");
    let FetchTarget::Sessions { group_id } = &request.target else {
        panic!("expected a session fetch, got {:?}", request.target);
    };
    let sessions = client.sessions(group_id).await.map_err(Failure::from);
    assert!(nav.apply_sessions(&request, sessions));

    let SessionsView::List(sessions) = nav.sessions_view() else {
        panic!("expected sessions");
    };
    let request = nav.select_session(sessions[0].clone()).expect("fetch roster");
    let FetchTarget::Roster { group_id, .. } = &request.target else {
        panic!("expected a roster fetch, got {:?}", request.target);
    };
    let students = client.students(group_id).await.map_err(Failure::from);
    assert!(nav.apply_roster(&request, students));
    assert_eq!(nav.level(), Level::Attendance);

    for (student, present) in [("s1", true), ("s2", false)] {
        let mark = nav.toggle_attendance(student, present).expect("toggle");
        let result = client
            .record_attendance(&mark.submission.body)
            .await
            .map(|_| ())
            .map_err(Failure::from);
        assert!(nav.resolve_attendance(&mark, result));
    }

    assert!(nav.is_complete());
    assert!(nav.finish(nav.epoch()));
    assert_eq!(nav.level(), Level::Groups);

    let bodies: Vec<Value> = server
        .requests()
        .iter()
        .filter(|r| r.method == "POST")
        .map(|r| serde_json::from_str(&r.body).expect("json body"))
        .collect();
    assert_eq!(
        bodies,
        vec![
            json!({"sesion": "ses1", "profesor": "p1", "estudianteGrupo": "sg1", "asistio": true}),
            json!({"sesion": "ses1", "profesor": "p1", "estudianteGrupo": "sg2", "asistio": false}),
        ]
    );
}

#[tokio::test]
async fn rejected_write_leaves_row_editable() {
    let server = ScriptedServer::new(vec![
        respond(
            200,
            json!({"success": true, "message": "", "data": [
                {"id": "s1", "nombresCompletos": "María Pérez", "numeroIdentificacion": "1001", "estudianteGrupoId": "sg1"}
            ]}),
        ),
        respond(
            400,
            json!({"success": false, "message": "La sesión ya fue cerrada", "data": null}),
        ),
    ])
    .await;
    let client = server.client("tok");
    let mut nav = DrillDown::default();

    nav.select_group(group());
    let request = nav
        .select_session(dto::session::SessionDto {
            id: "ses1".into(),
            group_id: "g1".into(),
            date: "2025-05-05".into(),
        })
        .expect("fetch roster");
    let students = client.students("g1").await.map_err(Failure::from);
    nav.apply_roster(&request, students);

    let mark = nav.toggle_attendance("s1", true).expect("toggle");
    let result = client
        .record_attendance(&mark.submission.body)
        .await
        .map(|_| ())
        .map_err(Failure::from);
    assert!(nav.resolve_attendance(&mark, result));

    let sheet = nav.roster().ready().expect("roster");
    let row = sheet.row("s1").expect("row");
    assert_eq!(row.status, RowStatus::Failed("La sesión ya fue cerrada".into()));
    assert!(row.status.is_editable());
    assert!(!nav.is_complete());
}
