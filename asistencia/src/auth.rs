//! Auth0 implicit-flow plumbing: building the login and logout redirects
//! and turning the callback fragment into a [`SignedIn`] session.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use url::Url;

use crate::config::AuthConfig;
use crate::services::credentials::{Profile, SignedIn};
use crate::services::error::AuthError;

/// Lifetime assumed when the provider omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

impl AuthConfig {
    fn tenant_url(&self, path: &str) -> Result<Url, AuthError> {
        let domain = self
            .domain
            .trim()
            .trim_start_matches("https://")
            .trim_end_matches('/');
        Url::parse(&format!("https://{domain}{path}"))
            .map_err(|e| AuthError::Callback(format!("invalid identity domain {domain}: {e}")))
    }

    pub fn authorize_url(&self, redirect_uri: &str, nonce: &str) -> Result<Url, AuthError> {
        let mut url = self.tenant_url("/authorize")?;
        url.query_pairs_mut()
            .append_pair("response_type", "token id_token")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("audience", &self.audience)
            .append_pair("scope", &self.scope)
            .append_pair("nonce", nonce);
        Ok(url)
    }

    pub fn logout_url(&self, return_to: &str) -> Result<Url, AuthError> {
        let mut url = self.tenant_url("/v2/logout")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("returnTo", return_to);
        Ok(url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct IdTokenClaims {
    email: Option<String>,
    name: Option<String>,
}

/// Parses the `#access_token=...&expires_in=...&id_token=...` fragment the
/// provider appends to the redirect URI.
pub fn parse_callback(fragment: &str, now: DateTime<Utc>) -> Result<SignedIn, AuthError> {
    let fragment = fragment.trim_start_matches('#');

    let mut access_token = None;
    let mut expires_in = None;
    let mut id_token = None;
    let mut error = None;
    let mut error_description = None;

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "expires_in" => expires_in = Some(value.into_owned()),
            "id_token" => id_token = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::Denied(error_description.unwrap_or(error)));
    }

    let access_token = access_token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| AuthError::Callback("missing access_token".into()))?;

    let lifetime = match expires_in {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AuthError::Callback(format!("invalid expires_in: {raw}")))?,
        None => DEFAULT_EXPIRES_IN_SECS,
    };

    let profile = id_token
        .as_deref()
        .and_then(decode_claims)
        .map(|claims| Profile {
            email: claims.email,
            name: claims.name,
        })
        .unwrap_or_default();

    let expires_at = Duration::try_seconds(lifetime)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AuthError::Callback(format!("invalid expires_in: {lifetime}")))?;

    Ok(SignedIn {
        access_token,
        expires_at,
        profile,
    })
}

/// Reads the payload segment of a JWT without verifying it. Only used for
/// display data; the API verifies the access token itself.
fn decode_claims(token: &str) -> Option<IdTokenClaims> {
    let mut parts = token.split('.');
    let _header = parts.next()?;
    let payload = parts.next()?;
    let _signature = parts.next()?;

    let decoded = general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| general_purpose::URL_SAFE.decode(payload))
        .ok()?;
    serde_json::from_slice(&decoded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn id_token(claims: serde_json::Value) -> String {
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("header.{payload}.signature")
    }

    #[test]
    fn authorize_url_carries_audience_and_scope() {
        let config = AuthConfig::default()
            .with_domain("tenant.example.com")
            .with_client_id("abc")
            .with_audience("https://api.example.com/");
        let url = config
            .authorize_url("http://localhost:3000/callback", "n-1")
            .unwrap();

        assert_eq!(url.host_str(), Some("tenant.example.com"));
        assert_eq!(url.path(), "/authorize");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("response_type".into(), "token id_token".into())));
        assert!(pairs.contains(&("client_id".into(), "abc".into())));
        assert!(pairs.contains(&("audience".into(), "https://api.example.com/".into())));
        assert!(pairs.contains(&("scope".into(), "openid profile email".into())));
        assert!(pairs.contains(&("redirect_uri".into(), "http://localhost:3000/callback".into())));
        assert!(pairs.contains(&("nonce".into(), "n-1".into())));
    }

    #[test]
    fn logout_url_returns_to_origin() {
        let url = AuthConfig::default()
            .with_domain("https://tenant.example.com/")
            .logout_url("http://localhost:3000")
            .unwrap();

        assert_eq!(url.host_str(), Some("tenant.example.com"));
        assert_eq!(url.path(), "/v2/logout");
        assert!(url
            .query_pairs()
            .any(|(k, v)| k == "returnTo" && v == "http://localhost:3000"));
    }

    #[test]
    fn callback_yields_token_expiry_and_profile() {
        let now = Utc::now();
        let token = id_token(json!({"email": "docente@uco.edu.co", "name": "Ana Ruiz"}));
        let fragment = format!("#access_token=abc&token_type=Bearer&expires_in=7200&id_token={token}");

        let signed_in = parse_callback(&fragment, now).unwrap();

        assert_eq!(signed_in.access_token, "abc");
        assert_eq!(signed_in.expires_at, now + Duration::seconds(7200));
        assert_eq!(
            signed_in.profile,
            Profile {
                email: Some("docente@uco.edu.co".into()),
                name: Some("Ana Ruiz".into()),
            }
        );
    }

    #[test]
    fn callback_without_id_token_has_empty_profile() {
        let now = Utc::now();
        let signed_in = parse_callback("access_token=abc", now).unwrap();

        assert_eq!(signed_in.profile, Profile::default());
        assert_eq!(
            signed_in.expires_at,
            now + Duration::seconds(DEFAULT_EXPIRES_IN_SECS)
        );
    }

    #[test]
    fn provider_error_is_denied() {
        assert_matches!(
            parse_callback("#error=access_denied&error_description=User%20cancelled", Utc::now()),
            Err(AuthError::Denied(ref message)) if message == "User cancelled"
        );
    }

    #[test]
    fn missing_token_is_rejected() {
        assert_matches!(
            parse_callback("#expires_in=60", Utc::now()),
            Err(AuthError::Callback(_))
        );
        assert_matches!(
            parse_callback("#access_token=abc&expires_in=soon", Utc::now()),
            Err(AuthError::Callback(_))
        );
    }

    #[test]
    fn out_of_range_lifetime_is_rejected() {
        for lifetime in [i64::MAX, i64::MIN] {
            let fragment = format!("#access_token=abc&expires_in={lifetime}");
            assert_matches!(
                parse_callback(&fragment, Utc::now()),
                Err(AuthError::Callback(ref message)) if message.starts_with("invalid expires_in")
            );
        }
    }
}
