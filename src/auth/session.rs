//! Session state for TastyTrade API authentication.

use chrono::{DateTime, NaiveDateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Expiry used when the server's `session-expiration` cannot be parsed.
const FALLBACK_LIFETIME_HOURS: i64 = 24;

/// Offset-carrying timestamp layouts accepted for `session-expiration`,
/// tried in order after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Offset-less layout, read as UTC.
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Authentication session for the TastyTrade API.
///
/// Holds the session token, the optional remember-me token, the token's
/// expiry and the session id used for logout. A session starts out
/// unauthenticated and is populated by
/// [`SessionsService::login`](crate::api::SessionsService::login).
///
/// # Thread Safety
///
/// `Session` is cheap to clone and every clone sees the same state.
/// Login and logout take the write lock; authenticated requests take a
/// read lock only long enough to copy the token.
///
/// There is no silent refresh. Once the token is inside the safety margin
/// of its expiry, authenticated calls fail with [`Error::SessionExpired`]
/// and the caller has to log in again.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionInner>>,
}

#[derive(Default)]
struct SessionInner {
    session_token: Option<SecretString>,
    remember_token: Option<SecretString>,
    expires_at: Option<DateTime<Utc>>,
    session_id: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a session token is held, expired or not.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.session_token.is_some()
    }

    /// Check if the session token has expired.
    ///
    /// An unauthenticated session counts as expired.
    pub async fn is_expired(&self) -> bool {
        let inner = self.inner.read().await;
        inner.expires_at.map_or(true, |at| Utc::now() >= at)
    }

    /// Get the session expiration time.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.expires_at
    }

    /// Get the id the session is logged out with.
    pub async fn session_id(&self) -> Option<String> {
        self.inner.read().await.session_id.clone()
    }

    /// Get the current user (if available).
    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.user.clone()
    }

    /// Get the remember token (if available).
    ///
    /// Store this securely to create future sessions without re-entering
    /// credentials.
    pub async fn remember_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .remember_token
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }

    /// Return the session token if it may be used for an authenticated
    /// call.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] if no token is held
    /// - [`Error::SessionExpired`] if the token expires within `margin`
    pub async fn ensure_valid_token(&self, margin: std::time::Duration) -> Result<SecretString> {
        let margin = chrono::Duration::from_std(margin)
            .map_err(|_| Error::InvalidInput("token safety margin out of range".to_string()))?;
        let inner = self.inner.read().await;
        check_token(
            inner.session_token.is_some(),
            inner.expires_at,
            Utc::now(),
            margin,
        )?;
        inner.session_token.clone().ok_or(Error::NotAuthenticated)
    }

    /// Replace the session state with a decoded login response.
    ///
    /// A response with an empty `session-token` leaves the session
    /// untouched and yields [`Error::NotAuthenticated`].
    pub(crate) async fn establish(&self, response: LoginResponse) -> Result<SessionInfo> {
        if response.session_token.is_empty() {
            tracing::warn!("Login response carried an empty session token");
            return Err(Error::NotAuthenticated);
        }
        let expires_at = expiry_or_fallback(response.session_expiration.as_deref(), Utc::now());
        let session_id = response
            .session_id
            .or_else(|| response.user.as_ref().and_then(|u| u.external_id.clone()));
        let info = SessionInfo {
            session_token: SecretString::from(response.session_token),
            remember_token: response.remember_token.map(SecretString::from),
            expires_at,
            session_id,
            user: response.user,
        };

        let mut inner = self.inner.write().await;
        inner.session_token = Some(info.session_token.clone());
        inner.remember_token = info.remember_token.clone();
        inner.expires_at = Some(info.expires_at);
        inner.session_id = info.session_id.clone();
        inner.user = info.user.clone();
        Ok(info)
    }

    /// Session id to log out, if a token is held alongside it.
    pub(crate) async fn logout_target(&self) -> Result<String> {
        let inner = self.inner.read().await;
        match (&inner.session_token, &inner.session_id) {
            (Some(_), Some(id)) if !id.is_empty() => Ok(id.clone()),
            _ => Err(Error::NotAuthenticated),
        }
    }

    /// Drop the session token and session id.
    pub(crate) async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.session_token = None;
        inner.session_id = None;
        inner.expires_at = None;
    }

    /// Forget the stored remember token if it is `token`.
    pub(crate) async fn forget_remember_token(&self, token: &str) -> bool {
        let mut inner = self.inner.write().await;
        let matches = inner
            .remember_token
            .as_ref()
            .is_some_and(|stored| stored.expose_secret() == token);
        if matches {
            inner.remember_token = None;
        }
        matches
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_token", &"[REDACTED]")
            .field("remember_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// What a successful login established.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Token sent in the `Authorization` header
    pub session_token: SecretString,
    /// Long-lived remember-me token, if one was requested
    pub remember_token: Option<SecretString>,
    /// When the session token expires
    pub expires_at: DateTime<Utc>,
    /// Id used to log the session out
    pub session_id: Option<String>,
    /// The logged-in user
    pub user: Option<User>,
}

/// User information from login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct User {
    /// User's email address
    #[serde(default)]
    pub email: String,
    /// Username
    #[serde(default)]
    pub username: String,
    /// External ID
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Body of a successful `POST /sessions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct LoginResponse {
    pub(crate) session_token: String,
    #[serde(default)]
    pub(crate) remember_token: Option<String>,
    #[serde(default)]
    pub(crate) session_expiration: Option<String>,
    #[serde(default)]
    pub(crate) session_id: Option<String>,
    #[serde(default)]
    pub(crate) user: Option<User>,
}

fn check_token(
    has_token: bool,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    margin: chrono::Duration,
) -> Result<()> {
    if !has_token {
        return Err(Error::NotAuthenticated);
    }
    match expires_at {
        Some(at) if now + margin < at => Ok(()),
        _ => Err(Error::SessionExpired),
    }
}

/// Parse a `session-expiration` value in any accepted layout.
pub(crate) fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(at) = DateTime::parse_from_str(raw, format) {
            return Some(at.with_timezone(&Utc));
        }
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn expiry_or_fallback(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    if let Some(at) = raw.and_then(parse_expiration) {
        return at;
    }
    let fallback = now + chrono::Duration::hours(FALLBACK_LIFETIME_HOURS);
    tracing::warn!(
        raw = raw.unwrap_or(""),
        %fallback,
        "Could not parse session expiration, assuming 24h lifetime"
    );
    fallback
}
