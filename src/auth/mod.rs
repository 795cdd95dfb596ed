//! Authentication and session management for the TastyTrade API.
//!
//! Sessions are created with username/password or with a remember-me
//! token obtained from an earlier login:
//!
//! ```no_run
//! use tastytrade_oms::{ClientConfig, Environment, TastytradeClient};
//!
//! # async fn example() -> tastytrade_oms::Result<()> {
//! let client = TastytradeClient::new(ClientConfig::for_environment(Environment::Sandbox))?;
//! let info = client.sessions().login("username", "password", true).await?;
//! println!("session valid until {}", info.expires_at);
//!
//! // Later, without the password
//! if let Some(token) = client.session().remember_token().await {
//!     client.sessions().login_with_remember_token("username", &token).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Session tokens are never refreshed behind the caller's back. Once a
//! token is inside the configured safety margin of its expiry every
//! authenticated call fails with [`Error::SessionExpired`](crate::Error::SessionExpired).

mod session;

pub use session::{Session, SessionInfo, User};
pub(crate) use session::LoginResponse;
