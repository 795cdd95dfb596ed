//! Sessions service: login, logout and remember-token management.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use crate::auth::{LoginResponse, SessionInfo};
use crate::client::ClientInner;
use crate::{Error, Result};

/// Service for session lifecycle operations.
///
/// Every operation updates the client's [`Session`](crate::Session) only
/// after the server has answered successfully; a failed, cancelled or
/// timed-out call leaves it as it was.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tastytrade_oms::TastytradeClient) -> tastytrade_oms::Result<()> {
/// let info = client.sessions().login("username", "password", true).await?;
/// println!("logged in until {}", info.expires_at);
///
/// client.sessions().logout().await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionsService {
    inner: Arc<ClientInner>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct PasswordLogin<'a> {
    login: &'a str,
    password: &'a str,
    remember_me: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct RememberTokenLogin<'a> {
    login: &'a str,
    remember_token: &'a str,
    remember_me: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct RememberTokenDestroy<'a> {
    remember_me_token: &'a str,
}

impl SessionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Log in with username and password.
    ///
    /// With `remember_me` the server also issues a remember token, kept on
    /// the session and returned in [`SessionInfo::remember_token`].
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<SessionInfo> {
        let body = PasswordLogin {
            login: username,
            password,
            remember_me,
        };
        let response: LoginResponse = self
            .inner
            .request(Method::POST, "/sessions", Some(&body), false)
            .await?;

        let info = self.inner.session.establish(response).await?;
        tracing::info!(
            username,
            expires_at = %info.expires_at,
            remember_me,
            "Logged in"
        );
        Ok(info)
    }

    /// Log in with a remember token from an earlier login.
    ///
    /// The server rotates the token; the new one replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] without contacting the server if
    /// `remember_token` is empty.
    pub async fn login_with_remember_token(
        &self,
        username: &str,
        remember_token: &str,
    ) -> Result<SessionInfo> {
        if remember_token.is_empty() {
            return Err(Error::InvalidInput(
                "remember token must not be empty".to_string(),
            ));
        }

        let body = RememberTokenLogin {
            login: username,
            remember_token,
            remember_me: true,
        };
        let response: LoginResponse = self
            .inner
            .request(Method::POST, "/sessions", Some(&body), false)
            .await?;

        let info = self.inner.session.establish(response).await?;
        tracing::info!(username, expires_at = %info.expires_at, "Logged in with remember token");
        Ok(info)
    }

    /// Destroy the current session on the server and forget it locally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if there is no active session.
    pub async fn logout(&self) -> Result<()> {
        let session_id = self.inner.session.logout_target().await?;

        self.inner
            .delete(&format!("/sessions/{}", session_id))
            .await?;

        self.inner.session.clear().await;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Invalidate a remember token on the server.
    ///
    /// If `token` is the one stored on the session it is dropped locally
    /// as well.
    pub async fn destroy_remember_token(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(Error::InvalidInput(
                "remember token must not be empty".to_string(),
            ));
        }

        let body = RememberTokenDestroy {
            remember_me_token: token,
        };
        self.inner
            .request_empty(Method::DELETE, "/sessions/remember-me", Some(&body), true)
            .await?;

        let forgotten = self.inner.session.forget_remember_token(token).await;
        tracing::info!(forgotten, "Destroyed remember token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_bodies_are_kebab_case() {
        let password = serde_json::to_value(PasswordLogin {
            login: "trader",
            password: "hunter2",
            remember_me: true,
        })
        .unwrap();
        assert_eq!(
            password,
            json!({"login": "trader", "password": "hunter2", "remember-me": true})
        );

        let remember = serde_json::to_value(RememberTokenLogin {
            login: "trader",
            remember_token: "tok",
            remember_me: true,
        })
        .unwrap();
        assert_eq!(
            remember,
            json!({"login": "trader", "remember-token": "tok", "remember-me": true})
        );

        let destroy = serde_json::to_value(RememberTokenDestroy {
            remember_me_token: "tok",
        })
        .unwrap();
        assert_eq!(destroy, json!({"remember-me-token": "tok"}));
    }
}
