pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_AUTH0_DOMAIN: &str = "dev-jewoi3myj56ypvrl.us.auth0.com";
pub const DEFAULT_AUTH0_CLIENT_ID: &str = "ZByGSZ2ozCTIGZ3xjdOGx4HGSsZBFUYj";
pub const DEFAULT_AUTH0_AUDIENCE: &str = "https://dev-jewoi3myj56ypvrl.us.auth0.com/api/v2/";
pub const DEFAULT_SCOPE: &str = "openid profile email";

/// Where the attendance API lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    pub domain: String,
    pub client_id: String,
    pub audience: String,
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_AUTH0_DOMAIN.to_string(),
            client_id: DEFAULT_AUTH0_CLIENT_ID.to_string(),
            audience: DEFAULT_AUTH0_AUDIENCE.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl AuthConfig {
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Reads the build-time environment. A wasm bundle has no process
    /// environment at runtime, so values are baked in by `option_env!`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty(option_env!("ASISTENCIA_API_URL")) {
            config.api = ApiConfig::new(url);
        }
        if let Some(domain) = non_empty(option_env!("ASISTENCIA_AUTH0_DOMAIN")) {
            config.auth = config.auth.with_domain(domain);
        }
        if let Some(client_id) = non_empty(option_env!("ASISTENCIA_AUTH0_CLIENT_ID")) {
            config.auth = config.auth.with_client_id(client_id);
        }
        if let Some(audience) = non_empty(option_env!("ASISTENCIA_AUTH0_AUDIENCE")) {
            config.auth = config.auth.with_audience(audience);
        }

        config
    }
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
