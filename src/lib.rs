//! # tastytrade-oms
//!
//! An order-management client for the TastyTrade brokerage API.
//!
//! The crate covers the trading core of the API: session lifecycle, local
//! order validation, order placement, dry runs, cancellation,
//! cancel-replace with reconciliation, and complex (OCO/OTO/OTOCO) orders.
//!
//! ## Features
//!
//! - **Sessions**: username/password and remember-me login, logout,
//!   remember-token destruction, expiry checks before every call
//! - **Typed orders**: each order type carries only its legal fields, and
//!   every structural rule is checked before anything is sent
//! - **Uniform responses**: enveloped and bare JSON bodies decode the same
//!   way; every non-2xx response becomes an [`ApiError`]
//! - **Cancel-replace reconciliation**: the replacement order is located
//!   among the live orders and reported as matched or unmatched
//! - **Async-first**: built on Tokio; any operation can be bounded by a
//!   cancellation token or deadline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tastytrade_oms::{TastytradeClient, Environment, AccountNumber};
//! use tastytrade_oms::models::{NewOrderBuilder, OrderType, TimeInForce, OrderLeg, PriceEffect};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> tastytrade_oms::Result<()> {
//!     let client = TastytradeClient::login("user", "pass", Environment::Sandbox).await?;
//!     let account = AccountNumber::new("5WV12345");
//!
//!     // Build a limit order
//!     let order = NewOrderBuilder::new()
//!         .time_in_force(TimeInForce::Day)
//!         .order_type(OrderType::Limit)
//!         .price(dec!(150.00))
//!         .price_effect(PriceEffect::Debit)
//!         .add_leg(OrderLeg::buy_equity("AAPL", dec!(1)))
//!         .build()?;
//!
//!     // Dry run first to check buying power
//!     let dry_run = client.orders().dry_run(&account, order.clone()).await?;
//!     println!("Buying power effect: {:?}", dry_run.buying_power_effect);
//!
//!     // Place the order
//!     let response = client.orders().place(&account, order).await?;
//!     println!("Order placed: {}", response.order.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Cancel-replace
//!
//! ```rust,no_run
//! use tastytrade_oms::{AccountNumber, OrderId, ReplaceOutcome};
//! use tastytrade_oms::models::{NewOrderBuilder, OrderType, TimeInForce, OrderLeg, PriceEffect};
//! use rust_decimal_macros::dec;
//!
//! # async fn example(client: tastytrade_oms::TastytradeClient) -> tastytrade_oms::Result<()> {
//! let account = AccountNumber::new("5WV12345");
//! let replacement = NewOrderBuilder::new()
//!     .time_in_force(TimeInForce::Day)
//!     .order_type(OrderType::Limit)
//!     .price(dec!(0.90))
//!     .price_effect(PriceEffect::Debit)
//!     .add_leg(OrderLeg::buy_equity("AAPL", dec!(1)))
//!     .build()?;
//!
//! match client.orders().cancel_replace(&account, &OrderId::new("12345"), replacement).await? {
//!     ReplaceOutcome::Matched(order) => println!("replaced by {}", order.id),
//!     ReplaceOutcome::Unmatched(order) => println!("replace accepted: {:?}", order.status),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{ApiError, Error, Result};
pub use models::{AccountNumber, ApiVersion, Environment, OrderId};
pub use client::cancel::{cancellable, with_deadline, with_timeout};
pub use client::{ClientConfig, ReconcileConfig, TastytradeClient};
pub use api::{OrdersService, ReplaceOutcome, SessionsService};
pub use auth::{Session, SessionInfo};

/// Prelude module for convenient imports.
///
/// ```rust
/// use tastytrade_oms::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ApiError, Error, Result};
    pub use crate::models::{
        // Primitives
        AccountNumber, OrderId, Environment, ApiVersion,
        // Enums
        InstrumentType, OrderType, OrderAction, TimeInForce, OrderStatus,
        PriceEffect, ComplexOrderType,
        // Order models
        NewOrder, NewOrderBuilder, OrderKind, NewComplexOrder, Order, OrderLeg, Fill,
        // Responses
        PlacedOrderResponse, DryRunResponse, PlacedComplexOrderResponse,
    };
    pub use crate::client::{TastytradeClient, ClientConfig, ReconcileConfig};
    pub use crate::client::cancel::{cancellable, with_deadline, with_timeout};
    pub use crate::api::ReplaceOutcome;
    pub use crate::auth::{Session, SessionInfo};
}
