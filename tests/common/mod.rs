//! Shared fixtures for the mock-server integration tests.

#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use chrono::Utc;
use httpmock::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use tastytrade_oms::models::{NewOrder, NewOrderBuilder, OrderLeg, OrderType, PriceEffect, TimeInForce};
use tastytrade_oms::{AccountNumber, ClientConfig, ReconcileConfig, TastytradeClient};

pub const TOKEN: &str = "session-token-abc";
pub const REMEMBER_TOKEN: &str = "remember-token-xyz";
pub const ACCOUNT: &str = "5WV12345";

static INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn account() -> AccountNumber {
    AccountNumber::new(ACCOUNT)
}

/// Client config pointed at the mock server, with fast reconciliation.
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.base_url()).with_reconcile(
        ReconcileConfig::default().with_backoff_step(Duration::from_millis(10)),
    )
}

pub fn future_expiration() -> String {
    (Utc::now() + chrono::Duration::hours(24)).to_rfc3339()
}

pub fn login_response(expiration: &str) -> Value {
    json!({
        "data": {
            "session-token": TOKEN,
            "remember-token": REMEMBER_TOKEN,
            "session-expiration": expiration,
            "user": {
                "email": "trader@example.com",
                "username": "trader",
                "external-id": "U0001"
            }
        },
        "context": "/sessions"
    })
}

/// A client logged in against `server`.
pub async fn logged_in_client(server: &MockServer) -> TastytradeClient {
    init_logging();
    let expiration = future_expiration();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(201).json_body(login_response(&expiration));
        })
        .await;

    let client = TastytradeClient::new(test_config(server)).unwrap();
    client
        .sessions()
        .login("trader", "secret", true)
        .await
        .unwrap();
    client
}

/// Server-side order with a single equity leg.
pub fn order_json(id: i64, status: &str, price: &str, symbol: &str, quantity: &str) -> Value {
    json!({
        "id": id,
        "account-number": ACCOUNT,
        "time-in-force": "Day",
        "order-type": "Limit",
        "status": status,
        "price": price,
        "price-effect": "Debit",
        "cancellable": true,
        "editable": true,
        "received-at": Utc::now().to_rfc3339(),
        "legs": [{
            "instrument-type": "Equity",
            "symbol": symbol,
            "quantity": quantity,
            "remaining-quantity": quantity,
            "action": "Buy to Open",
            "fills": []
        }]
    })
}

/// Single-leg Day limit buy of one share.
pub fn limit_order(symbol: &str, price: Decimal) -> NewOrder {
    NewOrderBuilder::new()
        .time_in_force(TimeInForce::Day)
        .order_type(OrderType::Limit)
        .price(price)
        .price_effect(PriceEffect::Debit)
        .add_leg(OrderLeg::buy_equity(symbol, Decimal::ONE))
        .build()
        .unwrap()
}
