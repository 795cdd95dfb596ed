//! Session lifecycle against an in-process mock server.

mod common;

use std::time::Duration;

use chrono::Utc;
use httpmock::prelude::*;
use serde_json::json;

use common::*;
use tastytrade_oms::prelude::*;

#[tokio::test]
async fn test_login_establishes_session() {
    init_logging();
    let server = MockServer::start_async().await;
    let expiration = future_expiration();

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sessions")
                .json_body(json!({
                    "login": "trader",
                    "password": "secret",
                    "remember-me": true
                }));
            then.status(201).json_body(login_response(&expiration));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    assert!(!client.session().is_authenticated().await);

    let info = client.sessions().login("trader", "secret", true).await.unwrap();

    mock.assert_async().await;
    assert!(info.expires_at > Utc::now());
    assert_eq!(info.session_id.as_deref(), Some("U0001"));
    assert!(info.remember_token.is_some());
    assert!(client.session().is_authenticated().await);
    assert!(!client.session().is_expired().await);
    assert_eq!(
        client.session().remember_token().await.as_deref(),
        Some(REMEMBER_TOKEN)
    );
    assert_eq!(
        client.session().user().await.map(|u| u.username),
        Some("trader".to_string())
    );
}

#[tokio::test]
async fn test_login_prefers_explicit_session_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(201).json_body(json!({
                "data": {
                    "session-token": TOKEN,
                    "session-expiration": future_expiration(),
                    "session-id": "sess-42",
                    "user": { "external-id": "U0001" }
                }
            }));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    client.sessions().login("trader", "secret", false).await.unwrap();

    assert_eq!(client.session().session_id().await.as_deref(), Some("sess-42"));
    assert!(client.session().remember_token().await.is_none());
}

#[tokio::test]
async fn test_login_with_empty_token_stays_unauthenticated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(201).json_body(json!({
                "data": {
                    "session-token": "",
                    "session-expiration": "2099-01-01T00:00:00Z"
                }
            }));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    let err = client
        .sessions()
        .login("trader", "secret", false)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotAuthenticated), "{err:?}");
    assert!(!client.session().is_authenticated().await);
    assert!(matches!(
        client
            .session()
            .ensure_valid_token(Duration::from_secs(300))
            .await,
        Err(Error::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_failed_login_leaves_session_unauthenticated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(401).json_body(json!({
                "error": {
                    "code": "invalid_credentials",
                    "message": "Invalid login, please check your username and password"
                }
            }));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    let err = client
        .sessions()
        .login("trader", "wrong", false)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!client.session().is_authenticated().await);
}

#[tokio::test]
async fn test_timed_out_login_commits_nothing() {
    let server = MockServer::start_async().await;
    let expiration = future_expiration();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(201)
                .json_body(login_response(&expiration))
                .delay(Duration::from_secs(2));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    let result = with_timeout(
        Duration::from_millis(50),
        client.sessions().login("trader", "secret", true),
    )
    .await;

    assert!(matches!(result, Err(Error::Timeout)));
    assert!(!client.session().is_authenticated().await);
    assert!(client.session().remember_token().await.is_none());
}

#[tokio::test]
async fn test_login_with_remember_token() {
    let server = MockServer::start_async().await;
    let expiration = future_expiration();
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sessions")
                .json_body(json!({
                    "login": "trader",
                    "remember-token": "old-remember-token",
                    "remember-me": true
                }));
            then.status(201).json_body(login_response(&expiration));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    client
        .sessions()
        .login_with_remember_token("trader", "old-remember-token")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(client.session().is_authenticated().await);
    assert_eq!(
        client.session().remember_token().await.as_deref(),
        Some(REMEMBER_TOKEN)
    );
}

#[tokio::test]
async fn test_empty_remember_token_rejected_locally() {
    let server = MockServer::start_async().await;
    let client = TastytradeClient::new(test_config(&server)).unwrap();

    let err = client
        .sessions()
        .login_with_remember_token("trader", "")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_unparseable_expiration_assumes_a_day() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(201).json_body(login_response("sometime tomorrow"));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    let before = Utc::now();
    let info = client.sessions().login("trader", "secret", false).await.unwrap();

    assert!(info.expires_at >= before + chrono::Duration::hours(24));
    assert!(info.expires_at <= Utc::now() + chrono::Duration::hours(24));
}

#[tokio::test]
async fn test_token_inside_safety_margin_is_expired() {
    let server = MockServer::start_async().await;
    let expiration = (Utc::now() + chrono::Duration::minutes(2)).to_rfc3339();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sessions");
            then.status(201).json_body(login_response(&expiration));
        })
        .await;

    let client = TastytradeClient::new(test_config(&server)).unwrap();
    client.sessions().login("trader", "secret", false).await.unwrap();

    let err = client.orders().live(&account()).await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));

    // A smaller margin lets the same token through the local check
    let relaxed = TastytradeClient::new(
        test_config(&server).with_token_safety_margin(Duration::from_secs(30)),
    )
    .unwrap();
    relaxed.sessions().login("trader", "secret", false).await.unwrap();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/5WV12345/orders/live");
            then.status(200).json_body(json!({ "data": { "items": [] } }));
        })
        .await;
    assert!(relaxed.orders().live(&account()).await.is_ok());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start_async().await;
    let client = logged_in_client(&server).await;

    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/sessions/U0001")
                .header("Authorization", TOKEN);
            then.status(204);
        })
        .await;

    client.sessions().logout().await.unwrap();

    mock.assert_async().await;
    assert!(!client.session().is_authenticated().await);
    assert!(client.session().session_id().await.is_none());

    let err = client.sessions().logout().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));
}

#[tokio::test]
async fn test_logout_without_session() {
    let server = MockServer::start_async().await;
    let client = TastytradeClient::new(test_config(&server)).unwrap();

    let err = client.sessions().logout().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));
}

#[tokio::test]
async fn test_destroy_remember_token() {
    let server = MockServer::start_async().await;
    let client = logged_in_client(&server).await;

    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/sessions/remember-me")
                .header("Authorization", TOKEN)
                .json_body(json!({ "remember-me-token": REMEMBER_TOKEN }));
            then.status(204);
        })
        .await;

    client
        .sessions()
        .destroy_remember_token(REMEMBER_TOKEN)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(client.session().remember_token().await.is_none());
    assert!(client.session().is_authenticated().await);
}

#[tokio::test]
async fn test_destroy_other_remember_token_keeps_stored_one() {
    let server = MockServer::start_async().await;
    let client = logged_in_client(&server).await;

    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/sessions/remember-me");
            then.status(204);
        })
        .await;

    client
        .sessions()
        .destroy_remember_token("some-other-device-token")
        .await
        .unwrap();

    assert_eq!(
        client.session().remember_token().await.as_deref(),
        Some(REMEMBER_TOKEN)
    );
}
