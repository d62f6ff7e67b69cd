//! End-to-end tests: typed client against a live server.

mod helpers;

use std::sync::Arc;

use sessiongate_client::{
    ApiClient, ClientError, Principal, RequestSigner, SignedOutProvider, SigningTokenProvider,
    StaticTokenProvider,
};
use sessiongate_core::types::Identity;

fn signed_in(base_url: &str, user: &str, session: &str) -> ApiClient {
    let identity = Identity::new(user, session);
    let provider = SigningTokenProvider::from_config(&helpers::issuer_auth_config(), identity)
        .expect("Failed to build provider");
    let principal = Principal::new(user, Arc::new(provider)).with_first_name("Test");
    ApiClient::new(base_url, RequestSigner::new(Some(principal))).expect("Failed to build client")
}

#[tokio::test]
async fn test_signed_out_client_reaches_public_routes() {
    let base_url = helpers::TestApp::new().spawn().await;
    let client = ApiClient::new(&base_url, RequestSigner::signed_out()).expect("client");

    let info = client.public_info().await.expect("public info");
    assert_eq!(
        info.message,
        "This is a public endpoint - no authentication required"
    );

    let health = client.health().await.expect("health");
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_signed_out_client_is_unauthorized() {
    let base_url = helpers::TestApp::new().spawn().await;

    let client = ApiClient::new(&base_url, RequestSigner::signed_out()).expect("client");
    assert!(matches!(
        client.user_info().await,
        Err(ClientError::Unauthorized)
    ));

    let ended = Principal::new("user_1", Arc::new(SignedOutProvider));
    let client = ApiClient::new(&base_url, RequestSigner::new(Some(ended))).expect("client");
    assert!(matches!(
        client.protected_data().await,
        Err(ClientError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_signed_in_client_sees_own_identity() {
    let base_url = helpers::TestApp::new().spawn().await;
    let client = signed_in(&base_url, "user_42", "sess_abc");

    let echo = client.user_info().await.expect("user info");
    assert_eq!(echo.message, "You are authenticated!");
    assert_eq!(echo.user_id, "user_42");
    assert_eq!(echo.session_id, "sess_abc");

    let data = client.protected_data().await.expect("data");
    assert_eq!(data.user_id, "user_42");
    assert_eq!(data.items, vec!["Item 1", "Item 2", "Item 3"]);
}

#[tokio::test]
async fn test_concurrent_requests_each_signed() {
    let base_url = helpers::TestApp::new().spawn().await;
    let client = signed_in(&base_url, "user_42", "sess_abc");

    let calls = (0..8).map(|_| client.user_info());
    let results = futures::future::join_all(calls).await;

    for result in results {
        assert_eq!(result.expect("user info").user_id, "user_42");
    }
}

#[tokio::test]
async fn test_issued_token_works_for_a_script() {
    let base_url = helpers::TestApp::new().spawn().await;
    let client = signed_in(&base_url, "user_42", "sess_abc");

    let issued = client.generate_long_lived_token().await.expect("issued");
    assert_eq!(issued.user_id, "user_42");
    assert_eq!(issued.expires_in_seconds, 2_592_000);

    let principal = Principal::new("user_42", Arc::new(StaticTokenProvider::new(issued.jwt)));
    let script = ApiClient::new(&base_url, RequestSigner::new(Some(principal))).expect("client");
    let echo = script.user_info().await.expect("user info");
    assert_eq!(echo.user_id, "user_42");
    assert_eq!(echo.session_id, "sess_abc");
}

#[tokio::test]
async fn test_issuance_declined_surfaces_reason() {
    let base_url = helpers::TestApp::without_signing_key().spawn().await;
    let client = signed_in(&base_url, "user_42", "sess_abc");

    match client.generate_long_lived_token().await {
        Err(ClientError::IssuanceDeclined(reason)) => {
            assert_eq!(reason, "Token issuance is not configured");
        }
        other => panic!("expected IssuanceDeclined, got {other:?}"),
    }
}

#[tokio::test]
async fn test_verify_token_reports_both_outcomes() {
    let app = helpers::TestApp::new();
    let token = app.session_token("user_5", "sess_5");
    let base_url = app.spawn().await;
    let client = ApiClient::new(&base_url, RequestSigner::signed_out()).expect("client");

    let ok = client.verify_token(&token).await.expect("verify");
    assert_eq!(ok.verified, Some(true));
    assert!(ok.payload.is_some());

    let bad = client.verify_token("not-a-jwt").await.expect("verify");
    assert_eq!(bad.verified, Some(false));
    assert_eq!(bad.error.as_deref(), Some("Invalid token"));
}

#[tokio::test]
async fn test_unreachable_is_not_unauthorized() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let client = signed_in(&format!("http://127.0.0.1:{}", port), "user_1", "sess_1");
    assert!(matches!(
        client.user_info().await,
        Err(ClientError::Unreachable(_))
    ));
}
