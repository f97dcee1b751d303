use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionDto {
    pub id: String,
    #[serde(rename = "grupoId", default)]
    pub group_id: String,
    /// Date and time exactly as the API sends it.
    #[serde(rename = "fecha")]
    pub date: String,
}
