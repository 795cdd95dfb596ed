//! API service modules for TastyTrade endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the TastyTrade API.

mod orders;
mod sessions;

pub use orders::{OrdersService, ReplaceOutcome};
pub use sessions::SessionsService;
