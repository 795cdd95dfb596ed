//! HTTP client and service layer for the TastyTrade API.
//!
//! This module provides the main entry point [`TastytradeClient`], its
//! [`ClientConfig`], and the [`cancel`] helpers for bounding any client
//! operation by a cancellation token or deadline.
//!
//! # Example
//!
//! ```no_run
//! use tastytrade_oms::{TastytradeClient, ClientConfig, Environment};
//!
//! # async fn example() -> tastytrade_oms::Result<()> {
//! let client = TastytradeClient::new(ClientConfig::for_environment(Environment::Sandbox))?;
//! client.sessions().login("username", "password", false).await?;
//! # Ok(())
//! # }
//! ```

pub mod cancel;
mod config;
mod http;

pub use config::{ClientConfig, ReconcileConfig};
pub use http::TastytradeClient;
pub(crate) use http::ClientInner;
