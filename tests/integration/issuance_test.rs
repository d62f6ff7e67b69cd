//! Integration tests for long-lived token issuance.

mod helpers;

use http::StatusCode;

use sessiongate_auth::{TokenKind, TokenVerifier};

#[tokio::test]
async fn test_issued_token_echoes_same_identity() {
    let app = helpers::TestApp::new();
    let session = app.session_token("user_42", "sess_abc");

    let response = app
        .request(
            "POST",
            "/api/protected/generate-long-lived-token",
            None,
            Some(&session),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "user_42");
    assert_eq!(response.body["sessionId"], "sess_abc");
    assert_eq!(response.body["expiresInSeconds"], 2_592_000);
    let jwt = response.body["jwt"].as_str().expect("jwt").to_string();

    let echo = app
        .request("GET", "/api/protected/user", None, Some(&jwt))
        .await;
    assert_eq!(echo.status, StatusCode::OK);
    assert_eq!(echo.body["userId"], "user_42");
    assert_eq!(echo.body["sessionId"], "sess_abc");
}

#[tokio::test]
async fn test_issued_token_claims() {
    let app = helpers::TestApp::new();
    let session = app.session_token("user_42", "sess_abc");

    let response = app
        .request(
            "POST",
            "/api/protected/generate-long-lived-token",
            None,
            Some(&session),
        )
        .await;
    let jwt = response.body["jwt"].as_str().expect("jwt");

    let verifier = TokenVerifier::from_config(&app.config.auth).expect("verifier");
    let claims = verifier.verify(jwt).expect("verified");
    assert_eq!(claims.kind, TokenKind::LongLived);
    assert_eq!(claims.exp - claims.iat, 2_592_000);
    assert_eq!(claims.iss, app.config.auth.issuer);
    assert!(claims.jti.is_some());
}

#[tokio::test]
async fn test_two_issuances_are_distinct_and_both_valid() {
    let app = helpers::TestApp::new();
    let session = app.session_token("user_42", "sess_abc");

    let mut tokens = Vec::new();
    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                "/api/protected/generate-long-lived-token",
                None,
                Some(&session),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        tokens.push(response.body["jwt"].as_str().expect("jwt").to_string());
    }
    assert_ne!(tokens[0], tokens[1]);

    for token in &tokens {
        let echo = app
            .request("GET", "/api/protected/user", None, Some(token))
            .await;
        assert_eq!(echo.status, StatusCode::OK);
        assert_eq!(echo.body["userId"], "user_42");
    }
}

#[tokio::test]
async fn test_missing_session_declines_with_200() {
    let app = helpers::TestApp::new();
    let token = app.sessionless_token("user_42");

    let response = app
        .request(
            "POST",
            "/api/protected/generate-long-lived-token",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({ "error": "Session ID not found" })
    );
}

#[tokio::test]
async fn test_long_lived_token_cannot_issue_another() {
    let app = helpers::TestApp::new();
    let session = app.session_token("user_42", "sess_abc");

    let response = app
        .request(
            "POST",
            "/api/protected/generate-long-lived-token",
            None,
            Some(&session),
        )
        .await;
    let long_lived = response.body["jwt"].as_str().expect("jwt").to_string();

    let response = app
        .request(
            "POST",
            "/api/protected/generate-long-lived-token",
            None,
            Some(&long_lived),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("jwt").is_none());
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_no_signing_key_declines_with_200() {
    let app = helpers::TestApp::without_signing_key();
    let session = app.session_token("user_42", "sess_abc");

    let response = app
        .request(
            "POST",
            "/api/protected/generate-long-lived-token",
            None,
            Some(&session),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({ "error": "Token issuance is not configured" })
    );

    // Verification still works without the signing half.
    let echo = app
        .request("GET", "/api/protected/user", None, Some(&session))
        .await;
    assert_eq!(echo.status, StatusCode::OK);
}
