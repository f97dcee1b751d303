use reqwest::StatusCode;
use thiserror::Error;

/// Failure to produce a bearer token. Nothing reaches the network when one
/// of these is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("access token expired")]
    Expired,
    #[error("identity provider refused the login: {0}")]
    Denied(String),
    #[error("malformed login callback: {0}")]
    Callback(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("server rejected the credentials (HTTP {0})")]
    Unauthorized(StatusCode),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// `success: false` in the envelope. Displays the server message as is.
    #[error("{message}")]
    Application {
        message: String,
        errors: Vec<String>,
    },
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response carried no data")]
    MissingData,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Coarse classification driving how a failure is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Auth,
    Network,
    Application,
    Validation,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Auth(_) | Self::Unauthorized(_) => FailureKind::Auth,
            Self::Application { .. } => FailureKind::Application,
            Self::Network(_)
            | Self::Status { .. }
            | Self::Decode(_)
            | Self::MissingData
            | Self::InvalidUrl(_) => FailureKind::Network,
        }
    }
}

/// Clonable snapshot of an error, suitable for keeping in view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn is_auth(&self) -> bool {
        self.kind == FailureKind::Auth
    }
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        Self::new(error.kind(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_displays_server_message_verbatim() {
        let error = ApiError::Application {
            message: "Grupo no encontrado".into(),
            errors: vec![],
        };
        assert_eq!(error.to_string(), "Grupo no encontrado");
        assert_eq!(Failure::from(error).kind, FailureKind::Application);
    }

    #[test]
    fn credential_failures_classify_as_auth() {
        assert!(Failure::from(ApiError::from(AuthError::Expired)).is_auth());
        assert!(Failure::from(ApiError::Unauthorized(StatusCode::UNAUTHORIZED)).is_auth());
    }

    #[test]
    fn unexpected_status_classifies_as_network() {
        let error = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".into(),
        };
        assert_eq!(error.kind(), FailureKind::Network);
        assert_eq!(error.to_string(), "HTTP 502 Bad Gateway: upstream down");
    }
}
