use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/asistencias`: one mark for one student in one
/// session.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreateAttendanceDto {
    #[serde(rename = "sesion")]
    pub session: String,
    #[serde(rename = "profesor")]
    pub professor: String,
    #[serde(rename = "estudianteGrupo")]
    pub student_group: String,
    #[serde(rename = "asistio")]
    pub present: bool,
}
