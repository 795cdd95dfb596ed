//! Basic authentication example.
//!
//! Logs in to the sandbox, shows the session state, exchanges the
//! remember token for a second session and logs both out.
//!
//! Run with: cargo run --example basic_auth

use tastytrade_oms::{ClientConfig, Environment, TastytradeClient};

#[tokio::main]
async fn main() -> tastytrade_oms::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get credentials from environment variables
    let username = std::env::var("TASTYTRADE_USERNAME")
        .expect("TASTYTRADE_USERNAME environment variable required");
    let password = std::env::var("TASTYTRADE_PASSWORD")
        .expect("TASTYTRADE_PASSWORD environment variable required");

    println!("Connecting to TastyTrade sandbox...");

    let client = TastytradeClient::new(ClientConfig::for_environment(Environment::Sandbox))?;
    let info = client.sessions().login(&username, &password, true).await?;

    println!("Successfully authenticated!");
    println!("  Session expires at: {}", info.expires_at);
    if let Some(user) = &info.user {
        println!("  User: {} <{}>", user.username, user.email);
    }

    // A remember token lets a second session start without the password
    if let Some(remember) = client.session().remember_token().await {
        let second = TastytradeClient::new(client.config().clone())?;
        second
            .sessions()
            .login_with_remember_token(&username, &remember)
            .await?;
        println!("Second session established from remember token");
        second.sessions().logout().await?;
    }

    client.sessions().logout().await?;
    println!("\nLogged out. Done!");
    Ok(())
}
