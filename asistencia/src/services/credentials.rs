use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::services::error::AuthError;

/// Tokens this close to expiry are treated as expired.
pub const EXPIRY_LEEWAY_SECS: i64 = 30;

/// Source of bearer tokens for API calls: "the current token, refreshing it
/// if needed". Refresh itself belongs to the identity provider.
#[allow(async_fn_in_trait)]
pub trait CredentialProvider {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// Display data taken from the id token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: Profile,
}

impl SignedIn {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_LEEWAY_SECS) >= self.expires_at
    }
}

/// In-memory login state for the running page. Nothing is written to
/// browser storage; reloading the page means signing in again.
#[derive(Debug, Clone, Default)]
pub struct BrowserSession {
    inner: Arc<RwLock<Option<SignedIn>>>,
}

impl BrowserSession {
    pub fn sign_in(&self, signed_in: SignedIn) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(signed_in);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }

    pub fn current(&self) -> Option<SignedIn> {
        self.inner.read().ok().and_then(|slot| slot.clone())
    }

    pub fn profile(&self) -> Option<Profile> {
        self.current().map(|signed_in| signed_in.profile)
    }

    fn token_at(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let signed_in = self.current().ok_or(AuthError::NotSignedIn)?;
        if signed_in.is_expired(now) {
            return Err(AuthError::Expired);
        }
        Ok(signed_in.access_token)
    }
}

impl CredentialProvider for BrowserSession {
    async fn access_token(&self) -> Result<String, AuthError> {
        self.token_at(Utc::now())
    }
}

/// Fixed token. An empty token behaves like a signed-out session.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    async fn access_token(&self) -> Result<String, AuthError> {
        let token = self.0.trim();
        if token.is_empty() {
            return Err(AuthError::NotSignedIn);
        }
        Ok(token.to_owned())
    }
}
