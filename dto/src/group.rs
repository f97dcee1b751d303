use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GroupDto {
    pub id: String,
    #[serde(rename = "profesorId", default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
    #[serde(rename = "profesor")]
    pub professor: String,
    #[serde(rename = "materia")]
    pub subject: String,
    #[serde(rename = "cantidadEstudiantes", default)]
    pub student_count: u32,
}
