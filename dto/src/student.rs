use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StudentDto {
    pub id: String,
    #[serde(rename = "nombresCompletos")]
    pub full_name: String,
    #[serde(rename = "numeroIdentificacion", default)]
    pub identification: String,
    /// Enrollment record linking the student to the group. Attendance is
    /// written against this id, not against `id`.
    #[serde(rename = "estudianteGrupoId", default, skip_serializing_if = "Option::is_none")]
    pub student_group_id: Option<String>,
}

impl StudentDto {
    /// Case-insensitive match on the name, plain substring match on the
    /// identification number. An empty term matches everyone.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }

        self.full_name.to_lowercase().contains(&term.to_lowercase())
            || self.identification.contains(term)
    }
}
