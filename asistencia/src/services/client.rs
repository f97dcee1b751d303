use dto::attendance::CreateAttendanceDto;
use dto::envelope::ApiResponse;
use dto::group::GroupDto;
use dto::session::SessionDto;
use dto::student::StudentDto;
use leptos::logging::{log, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::services::credentials::CredentialProvider;
use crate::services::error::ApiError;

const API_PREFIX: [&str; 2] = ["api", "v1"];
const FALLBACK_FAILURE: &str = "La solicitud no pudo completarse";

/// Authenticated client for the attendance API.
#[derive(Debug, Clone)]
pub struct ApiClient<P> {
    http: Client,
    config: ApiConfig,
    credentials: P,
}

impl<P: CredentialProvider> ApiClient<P> {
    pub fn new(config: ApiConfig, credentials: P) -> Self {
        Self {
            http: Client::new(),
            config,
            credentials,
        }
    }

    /// `{base_url}/api/v1/{segments...}` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(self.config.base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.config.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    pub async fn groups(&self) -> Result<Vec<GroupDto>, ApiError> {
        self.get_data(&["grupos"]).await
    }

    pub async fn sessions(&self, group_id: &str) -> Result<Vec<SessionDto>, ApiError> {
        self.get_data(&["grupos", group_id, "sesiones"]).await
    }

    pub async fn students(&self, group_id: &str) -> Result<Vec<StudentDto>, ApiError> {
        self.get_data(&["grupos", group_id, "estudiantes"]).await
    }

    /// Writes one mark. Returns the server's confirmation message.
    pub async fn record_attendance(&self, dto: &CreateAttendanceDto) -> Result<String, ApiError> {
        let url = self.endpoint(&["asistencias"])?;
        log!(
            "Recording attendance: session {} student-group {} present {}",
            dto.session,
            dto.student_group,
            dto.present
        );
        let envelope = self.execute(Method::POST, url, Some(dto)).await?;
        Ok(envelope.message)
    }

    async fn get_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        log!("Fetching {}", url);
        let envelope = self.execute::<()>(Method::GET, url, None).await?;
        match envelope.data {
            None | Some(Value::Null) => Err(ApiError::MissingData),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }

    /// The token is resolved before the request is built, so a missing or
    /// expired login never produces traffic.
    async fn execute<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let token = self.credentials.access_token().await.map_err(|e| {
            warn!("No usable token for {}: {}", url, e);
            e
        })?;

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {token}"));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        read_envelope(status, &body)
    }
}

/// Interprets a response body as the API envelope.
pub fn read_envelope(status: StatusCode, body: &str) -> Result<ApiResponse<Value>, ApiError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized(status));
    }

    match serde_json::from_str::<ApiResponse<Value>>(body) {
        Ok(envelope) if !envelope.success => {
            let message = if envelope.message.trim().is_empty() {
                FALLBACK_FAILURE.to_string()
            } else {
                envelope.message.clone()
            };
            Err(ApiError::Application {
                message,
                errors: envelope.error_list().to_vec(),
            })
        }
        Ok(envelope) if status.is_success() => Ok(envelope),
        Ok(_) => Err(ApiError::Status {
            status,
            body: body.to_string(),
        }),
        Err(error) if status.is_success() => Err(ApiError::Decode(error)),
        Err(_) => Err(ApiError::Status {
            status,
            body: if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.to_string()
            },
        }),
    }
}
