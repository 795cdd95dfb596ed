//! Live integration tests against the TastyTrade sandbox.
//!
//! Every test here is `#[ignore]`d; they need credentials and network.
//!
//! Environment variables required:
//! - TASTYTRADE_USERNAME: Username for authentication
//! - TASTYTRADE_PASSWORD: Password for authentication
//! - TASTYTRADE_ACCOUNT: Account number for testing
//!
//! Run with: cargo test --test sandbox_tests -- --ignored --test-threads=1

use std::env;
use std::sync::Once;
use std::time::Duration;

use chrono::Utc;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

use tastytrade_oms::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Get environment variables for testing
fn get_test_credentials() -> (String, String, String) {
    let username = env::var("TASTYTRADE_USERNAME").expect("TASTYTRADE_USERNAME must be set");
    let password = env::var("TASTYTRADE_PASSWORD").expect("TASTYTRADE_PASSWORD must be set");
    let account = env::var("TASTYTRADE_ACCOUNT").expect("TASTYTRADE_ACCOUNT must be set");
    (username, password, account)
}

/// Create an authenticated sandbox client
async fn create_client() -> TastytradeClient {
    init_logging();
    let (username, password, _) = get_test_credentials();

    TastytradeClient::login(&username, &password, Environment::Sandbox)
        .await
        .expect("Failed to create client")
}

/// Get the test account number
fn get_test_account() -> AccountNumber {
    let (_, _, account) = get_test_credentials();
    AccountNumber::new(account)
}

/// A limit buy far enough below the market that it will not fill
fn resting_limit_buy(price: rust_decimal::Decimal) -> NewOrder {
    NewOrderBuilder::new()
        .time_in_force(TimeInForce::Day)
        .order_type(OrderType::Limit)
        .price(price)
        .price_effect(PriceEffect::Debit)
        .add_leg(OrderLeg::buy_equity("AAPL", dec!(1)))
        .build()
        .expect("Should build order")
}

// ============================================================================
// SESSION TESTS
// ============================================================================

mod session_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_login_sets_future_expiry() {
        let client = create_client().await;

        assert!(client.session().is_authenticated().await);
        let expires_at = client.session().expires_at().await.expect("expiry set");
        assert!(expires_at > Utc::now());
        tracing::info!("Session valid until {}", expires_at);
    }

    #[tokio::test]
    #[ignore]
    async fn test_remember_token_login_and_logout() {
        let client = create_client().await;
        let (username, _, _) = get_test_credentials();

        let remember = client
            .session()
            .remember_token()
            .await
            .expect("login requested a remember token");

        let fresh = TastytradeClient::new(ClientConfig::for_environment(Environment::Sandbox))
            .expect("client");
        fresh
            .sessions()
            .login_with_remember_token(&username, &remember)
            .await
            .expect("remember-token login");
        assert!(fresh.session().is_authenticated().await);

        fresh.sessions().logout().await.expect("logout");
        assert!(!fresh.session().is_authenticated().await);
    }
}

// ============================================================================
// ORDERS SERVICE TESTS
// ============================================================================

mod orders_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_list_live_orders() {
        let client = create_client().await;
        let account = get_test_account();

        let orders = client.orders().live(&account).await;
        assert!(orders.is_ok(), "Should list live orders: {:?}", orders);

        let orders = orders.unwrap();
        tracing::info!("Found {} live orders", orders.len());
    }

    #[tokio::test]
    #[ignore]
    async fn test_dry_run_equity_order() {
        let client = create_client().await;
        let account = get_test_account();

        let dry_run = client
            .orders()
            .dry_run(&account, resting_limit_buy(dec!(100.00)))
            .await;
        assert!(dry_run.is_ok(), "Should dry run order: {:?}", dry_run);

        let dry_run = dry_run.unwrap();
        tracing::info!(
            "Dry run - Buying power effect: {:?}, Fees: {:?}",
            dry_run.buying_power_effect,
            dry_run.fee_calculation
        );
    }

    #[tokio::test]
    #[ignore]
    async fn test_dry_run_market_order() {
        let client = create_client().await;
        let account = get_test_account();

        let order = NewOrderBuilder::new()
            .time_in_force(TimeInForce::Day)
            .order_type(OrderType::Market)
            .add_leg(OrderLeg::buy_equity("SPY", dec!(1)))
            .build()
            .expect("Should build market order");

        let dry_run = client.orders().dry_run(&account, order).await;
        assert!(dry_run.is_ok(), "Should dry run market order: {:?}", dry_run);
    }

    #[tokio::test]
    #[ignore]
    async fn test_place_replace_and_cancel_order() {
        let client = create_client().await;
        let account = get_test_account();

        let placed = client
            .orders()
            .place(&account, resting_limit_buy(dec!(1.00)))
            .await
            .expect("Should place order");
        assert!(matches!(
            placed.order.status,
            OrderStatus::Received | OrderStatus::Live | OrderStatus::Routed
        ));
        tracing::info!("Placed order: {}", placed.order.id);

        // Give the order a moment to go live before replacing it
        tokio::time::sleep(Duration::from_secs(1)).await;

        let outcome = client
            .orders()
            .cancel_replace(&account, &placed.order.id, resting_limit_buy(dec!(0.90)))
            .await
            .expect("replace accepted");
        tracing::info!(
            "Replace matched: {}, order {}",
            outcome.is_matched(),
            outcome.order().id
        );
        if outcome.is_matched() {
            assert_eq!(outcome.order().price, Some(dec!(0.90)));
        }

        let working_id = outcome.order().id.clone();
        if let Err(e) = client.orders().cancel(&account, &working_id).await {
            tracing::warn!("Could not cancel order: {:?}", e);
        }
    }
}
