//! Order placement example.
//!
//! Validates an order locally, dry-runs it against the sandbox and shows
//! how a cancel-replace reports its outcome.
//!
//! Run with: cargo run --example place_order

use rust_decimal_macros::dec;
use tastytrade_oms::models::{NewOrderBuilder, OrderLeg, OrderType, PriceEffect, TimeInForce};
use tastytrade_oms::{AccountNumber, Environment, ReplaceOutcome, TastytradeClient};

#[tokio::main]
async fn main() -> tastytrade_oms::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get credentials from environment variables
    let username = std::env::var("TASTYTRADE_USERNAME")
        .expect("TASTYTRADE_USERNAME environment variable required");
    let password = std::env::var("TASTYTRADE_PASSWORD")
        .expect("TASTYTRADE_PASSWORD environment variable required");
    let account_num = std::env::var("TASTYTRADE_ACCOUNT")
        .expect("TASTYTRADE_ACCOUNT environment variable required");

    println!("Connecting to TastyTrade sandbox...");

    // Login to sandbox environment (never use Production for examples!)
    let client = TastytradeClient::login(&username, &password, Environment::Sandbox).await?;
    let account = AccountNumber::new(account_num);

    // A market order with a price is rejected before anything is sent
    let rejected = NewOrderBuilder::new()
        .time_in_force(TimeInForce::Day)
        .order_type(OrderType::Market)
        .price(dec!(400.00))
        .add_leg(OrderLeg::buy_equity("SPY", dec!(1)))
        .build();
    if let Err(e) = rejected {
        println!("Rejected locally: {e}");
    }

    // Build a limit order to buy 1 share of SPY
    let order = NewOrderBuilder::new()
        .time_in_force(TimeInForce::Day)
        .order_type(OrderType::Limit)
        .price(dec!(400.00))
        .price_effect(PriceEffect::Debit)
        .add_leg(OrderLeg::buy_equity("SPY", dec!(1)))
        .build()?;

    println!("\nValidating order with dry run...");

    let dry_run = client.orders().dry_run(&account, order.clone()).await?;

    println!("Dry run result:");
    println!("  Accepted: {}", dry_run.is_valid());
    println!("  Buying Power Effect: {:?}", dry_run.buying_power_effect);
    println!("  Fee Calculation: {:?}", dry_run.fee_calculation);

    if let Some(warnings) = &dry_run.warnings {
        for warning in warnings {
            println!("  Warning [{}]: {}", warning.code, warning.message);
        }
    }

    if std::env::var("PLACE_ORDER").is_err() {
        println!("\n(Order not placed - set PLACE_ORDER=1 to place, reprice and cancel it)");
        return Ok(());
    }

    println!("\nPlacing order...");
    let placed = client.orders().place(&account, order).await?;
    println!("Order placed! ID: {} Status: {:?}", placed.order.id, placed.order.status);

    let lower = NewOrderBuilder::new()
        .time_in_force(TimeInForce::Day)
        .order_type(OrderType::Limit)
        .price(dec!(390.00))
        .price_effect(PriceEffect::Debit)
        .add_leg(OrderLeg::buy_equity("SPY", dec!(1)))
        .build()?;

    let working = match client
        .orders()
        .cancel_replace(&account, &placed.order.id, lower)
        .await?
    {
        ReplaceOutcome::Matched(order) => {
            println!("Replaced by order {}", order.id);
            order
        }
        ReplaceOutcome::Unmatched(order) => {
            println!("Replace accepted; replacement not located yet");
            order
        }
    };

    match client.orders().cancel(&account, &working.id).await {
        Ok(()) => println!("Cancelled order {}", working.id),
        Err(e) => println!("Could not cancel order {}: {e}", working.id),
    }

    println!("Done!");
    Ok(())
}
