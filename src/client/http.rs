//! HTTP client implementation for TastyTrade API.

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::api::{OrdersService, SessionsService};
use crate::auth::Session;
use crate::error::ApiError;
use crate::{Environment, Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the TastyTrade API.
///
/// This client provides access to the API services through method calls
/// that return service structs. The client owns the session, builds
/// requests and decodes responses.
///
/// # Example
///
/// ```no_run
/// use tastytrade_oms::{TastytradeClient, Environment, AccountNumber};
///
/// # async fn example() -> tastytrade_oms::Result<()> {
/// let client = TastytradeClient::login("username", "password", Environment::Sandbox).await?;
///
/// let account = AccountNumber::new("5WV12345");
/// let orders = client.orders().live(&account).await?;
/// println!("{} working orders", orders.len());
/// # Ok(())
/// # }
/// ```
pub struct TastytradeClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

impl TastytradeClient {
    /// Create an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Fails if the configured base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session: Session::new(),
                config,
            }),
        })
    }

    /// Login with username/password against one of the hosted
    /// environments, requesting a remember token.
    pub async fn login(
        username: impl Into<String>,
        password: impl Into<String>,
        env: Environment,
    ) -> Result<Self> {
        Self::login_with_config(username, password, ClientConfig::for_environment(env)).await
    }

    /// Login with username/password and custom configuration.
    pub async fn login_with_config(
        username: impl Into<String>,
        password: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = Self::new(config)?;
        client
            .sessions()
            .login(&username.into(), &password.into(), true)
            .await?;
        Ok(client)
    }

    /// Get the sessions service.
    pub fn sessions(&self) -> SessionsService {
        SessionsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Join `path` onto the base URL. A `?query` suffix is set verbatim
    /// rather than being encoded as part of the path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?;
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    /// Send a request and decode the response into `T`.
    ///
    /// The body may be wrapped in a `{"data": ...}` envelope or be the bare
    /// value; both decode the same way.
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        requires_auth: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.execute(method, path, body, requires_auth).await?;
        decode_body(&text)
    }

    /// Send a request whose success carries no payload the caller needs.
    pub(crate) async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        requires_auth: bool,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, body, requires_auth).await?;
        Ok(())
    }

    /// Make an authenticated GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None, true).await
    }

    /// Make an authenticated POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body), true).await
    }

    /// Make an authenticated PUT request.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PUT, path, Some(body), true).await
    }

    /// Make an authenticated DELETE request, ignoring the response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.request_empty::<()>(Method::DELETE, path, None, true)
            .await
    }

    /// Build, send and status-check one request, returning the raw body.
    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        requires_auth: bool,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let token = if requires_auth {
            Some(
                self.session
                    .ensure_valid_token(self.config.token_safety_margin)
                    .await?,
            )
        } else {
            None
        };

        let url = self.url(path)?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(token.expose_secret())
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }

        if let Some(ref version) = self.config.api_version {
            request = request.header(
                "Api-Version",
                HeaderValue::from_str(version.as_str())
                    .map_err(|_| Error::InvalidInput("Invalid API version".to_string()))?,
            );
        }

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)?;
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(bytes);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        tracing::debug!(%method, path, status, "API request");

        let text = response.text().await?;
        if status >= 400 {
            let error = ApiError::from_response(status, &text);
            tracing::debug!(%method, path, status, message = %error.message, "API error");
            return Err(error.into());
        }
        Ok(text)
    }
}

/// `{"data": ...}` response envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Decode an enveloped or bare response body into `T`.
///
/// When both shapes fail and the body has a `data` key, the error from
/// decoding `data` is the one reported.
pub(crate) fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope_err = match serde_json::from_str::<Envelope<T>>(text) {
        Ok(envelope) => return Ok(envelope.data),
        Err(err) => err,
    };
    serde_json::from_str(text).map_err(|bare_err| {
        let source = if has_data_key(text) {
            envelope_err
        } else {
            bare_err
        };
        Error::Decode {
            context: std::any::type_name::<T>().to_string(),
            source,
        }
    })
}

fn has_data_key(text: &str) -> bool {
    serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(text)
        .is_ok_and(|object| object.contains_key("data"))
}

impl Clone for TastytradeClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TastytradeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TastytradeClient")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i64,
    }

    fn inner(base_url: &str) -> ClientInner {
        ClientInner {
            http: reqwest::Client::new(),
            session: Session::new(),
            config: ClientConfig::new(base_url),
        }
    }

    #[test]
    fn test_decode_enveloped_body() {
        let point: Point = decode_body(r#"{"data":{"x":1}}"#).unwrap();
        assert_eq!(point, Point { x: 1 });
    }

    #[test]
    fn test_decode_bare_body() {
        let point: Point = decode_body(r#"{"x":1}"#).unwrap();
        assert_eq!(point, Point { x: 1 });
    }

    #[test]
    fn test_decode_failure_names_target() {
        let err = decode_body::<Point>(r#"{"y":1}"#).unwrap_err();
        match err {
            Error::Decode { context, .. } => assert!(context.ends_with("Point"), "{context}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_failure_inside_envelope_reports_data_error() {
        let err = decode_body::<Point>(r#"{"data":{"x":"not a number"}}"#).unwrap_err();
        match err {
            Error::Decode { source, .. } => {
                let message = source.to_string();
                assert!(message.contains("invalid type"), "{message}");
                assert!(!message.contains("missing field"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_url_joins_path() {
        let inner = inner("https://api.cert.tastyworks.com/");
        let url = inner.url("/accounts/5WV12345/orders").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.cert.tastyworks.com/accounts/5WV12345/orders"
        );
    }

    #[test]
    fn test_url_keeps_query_verbatim() {
        let inner = inner("https://api.cert.tastyworks.com");
        let url = inner
            .url("/accounts/5WV12345/orders?status[]=Live&underlying-symbol=AAPL")
            .unwrap();
        assert_eq!(url.path(), "/accounts/5WV12345/orders");
        assert_eq!(
            url.query(),
            Some("status[]=Live&underlying-symbol=AAPL")
        );
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let inner = inner("http://localhost:8080/proxy");
        let url = inner.url("/sessions").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/sessions");
    }

    #[tokio::test]
    async fn test_authenticated_request_without_session_fails_closed() {
        let inner = inner("http://127.0.0.1:9");
        let result: Result<Point> = inner.get("/customers/me").await;
        assert!(matches!(result, Err(Error::NotAuthenticated)));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let result = TastytradeClient::new(ClientConfig::new("not a url"));
        assert!(matches!(result, Err(Error::UrlParse(_))));
    }
}
