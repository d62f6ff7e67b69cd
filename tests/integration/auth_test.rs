//! Integration tests for the identity gate and public routes.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;

#[tokio::test]
async fn test_public_info_without_header() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/public/info", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "This is a public endpoint - no authentication required"
    );
    assert!(response.body["app"].is_string());
}

#[tokio::test]
async fn test_health_without_header() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}

#[tokio::test]
async fn test_protected_without_header_is_rejected() {
    let app = helpers::TestApp::new();

    for path in ["/api/protected/user", "/api/protected/data"] {
        let response = app.request("GET", path, None, None).await;
        response.assert_unauthorized();
    }

    let response = app
        .request("POST", "/api/protected/generate-long-lived-token", None, None)
        .await;
    response.assert_unauthorized();
    assert!(response.body.get("jwt").is_none());
}

#[tokio::test]
async fn test_malformed_headers_are_rejected_uniformly() {
    let app = helpers::TestApp::new();
    let token = app.session_token("user_1", "sess_1");

    // Claims of another user spliced under user_1's signature.
    let other = app.session_token("admin", "sess_1");
    let parts: Vec<&str> = token.split('.').collect();
    let other_payload = other.split('.').nth(1).expect("payload segment");
    let spliced = format!("{}.{}.{}", parts[0], other_payload, parts[2]);

    let headers = [
        "".to_string(),
        "Bearer".to_string(),
        "Bearer ".to_string(),
        format!("Basic {}", token),
        "Bearer not-a-jwt".to_string(),
        format!("Bearer {}", spliced),
    ];

    for header in &headers {
        let response = app
            .request_with_header("GET", "/api/protected/user", None, Some(header))
            .await;
        response.assert_unauthorized();
    }
}

#[tokio::test]
async fn test_session_token_echoes_identity() {
    let app = helpers::TestApp::new();
    let token = app.session_token("user_42", "sess_abc");

    let response = app
        .request("GET", "/api/protected/user", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({
            "message": "You are authenticated!",
            "userId": "user_42",
            "sessionId": "sess_abc",
        })
    );
}

#[tokio::test]
async fn test_scheme_is_case_insensitive() {
    let app = helpers::TestApp::new();
    let token = app.session_token("user_42", "sess_abc");

    let response = app
        .request_with_header(
            "GET",
            "/api/protected/user",
            None,
            Some(&format!("bearer {}", token)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_session_renders_unknown() {
    let app = helpers::TestApp::new();
    let token = app.sessionless_token("user_42");

    let response = app
        .request("GET", "/api/protected/user", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sessionId"], "unknown");
}

#[tokio::test]
async fn test_protected_data_for_caller() {
    let app = helpers::TestApp::new();
    let token = app.session_token("user_7", "sess_7");

    let response = app
        .request("GET", "/api/protected/data", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "user_7");
    assert_eq!(
        response.body["secretData"],
        "This is protected data only visible to authenticated users"
    );
    assert_eq!(
        response.body["items"],
        serde_json::json!(["Item 1", "Item 2", "Item 3"])
    );
}

#[tokio::test]
async fn test_expired_token_is_401_not_5xx() {
    let app = helpers::TestApp::new();
    let token = app.expired_token("user_1", "sess_1");

    let response = app
        .request("GET", "/api/protected/user", None, Some(&token))
        .await;

    response.assert_unauthorized();
}

#[tokio::test]
async fn test_not_yet_valid_token_is_rejected() {
    let app = helpers::TestApp::new();
    let token = app.token_at("user_1", "sess_1", Utc::now() + Duration::minutes(10));

    let response = app
        .request("GET", "/api/protected/user", None, Some(&token))
        .await;

    response.assert_unauthorized();
}

#[tokio::test]
async fn test_foreign_key_is_rejected_whatever_the_expiry() {
    let app = helpers::TestApp::new();

    for issued_at in [
        Utc::now(),
        Utc::now() - Duration::hours(2),
        Utc::now() + Duration::hours(2),
    ] {
        let token = helpers::foreign_token("user_1", "sess_1", issued_at);
        let response = app
            .request("GET", "/api/protected/user", None, Some(&token))
            .await;
        response.assert_unauthorized();
    }
}

#[tokio::test]
async fn test_cors_preflight_passes_gate() {
    let app = helpers::TestApp::new();

    let request = http::Request::builder()
        .method("OPTIONS")
        .uri("/api/protected/user")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "authorization")
        .body(axum::body::Body::empty())
        .expect("Failed to build request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_verify_token_endpoint() {
    let app = helpers::TestApp::new();
    let token = app.session_token("user_5", "sess_5");

    let response = app
        .request(
            "POST",
            "/api/public/verify-token",
            Some(serde_json::json!({ "token": token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["verified"], true);
    assert_eq!(response.body["payload"]["sub"], "user_5");
    assert_eq!(response.body["payload"]["sid"], "sess_5");

    let expired = app.expired_token("user_5", "sess_5");
    let response = app
        .request(
            "POST",
            "/api/public/verify-token",
            Some(serde_json::json!({ "token": expired })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        serde_json::json!({ "verified": false, "error": "Invalid token" })
    );

    let response = app
        .request(
            "POST",
            "/api/public/verify-token",
            Some(serde_json::json!({ "token": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Token is required");
}
