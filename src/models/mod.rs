//! Data models for the TastyTrade order API.
//!
//! - [`primitives`] - Core types like `AccountNumber`, `OrderId`, etc.
//! - [`enums`] - Enumeration types for order types, statuses, etc.
//! - [`order`] - New orders, complex orders and server-side orders
//! - [`trading`] - Submission responses (fees, buying power, warnings)

pub mod primitives;
pub mod enums;
pub mod order;
mod validation;
pub mod trading;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use order::*;
pub use trading::*;
