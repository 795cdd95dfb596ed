//! Cancellation and deadlines for client operations.
//!
//! Every client operation is a future, so dropping it aborts the
//! in-flight request. These helpers turn a cancellation token or a
//! deadline into the matching [`Error`] variant.
//!
//! ```no_run
//! use std::time::Duration;
//! use tastytrade_oms::{with_timeout, ClientConfig, TastytradeClient};
//!
//! # async fn example() -> tastytrade_oms::Result<()> {
//! let client = TastytradeClient::new(ClientConfig::default())?;
//! with_timeout(
//!     Duration::from_secs(5),
//!     client.sessions().login("user", "pass", false),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Run `fut` until it completes or `token` is cancelled.
///
/// A token that is already cancelled wins over a ready future.
pub async fn cancellable<F, T>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Error::Cancelled),
        result = fut => result,
    }
}

/// Run `fut` until it completes or `deadline` passes.
pub async fn with_deadline<F, T>(deadline: Instant, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout_at(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout),
    }
}

/// Run `fut` for at most `duration`.
pub async fn with_timeout<F, T>(duration: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout),
    }
}
