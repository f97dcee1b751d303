use serde::{Deserialize, Serialize};

/// Uniform wrapper around every API response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// Validation messages attached by the backend, if any.
    pub fn error_list(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failure_without_data() {
        let response: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"success":false,"message":"Grupo no encontrado"}"#).unwrap();

        assert!(!response.success);
        assert_eq!(response.message, "Grupo no encontrado");
        assert_eq!(response.data, None);
        assert!(response.error_list().is_empty());
    }

    #[test]
    fn null_data_and_error_list() {
        let response: ApiResponse<Vec<String>> = serde_json::from_str(
            r#"{"success":false,"message":"Datos inválidos","data":null,"errors":["sesion requerida"]}"#,
        )
        .unwrap();

        assert_eq!(response.data, None);
        assert_eq!(response.error_list(), ["sesion requerida".to_string()]);
    }
}
