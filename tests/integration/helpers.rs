//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Duration, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use sessiongate_api::{AppState, build_app};
use sessiongate_auth::{LongLivedIssuer, TokenKind, TokenMinter, TokenVerifier};
use sessiongate_core::config::{AppConfig, AuthConfig, SigningAlgorithm};
use sessiongate_core::types::Identity;

/// Path to a key under `tests/fixtures/keys`.
pub fn key_path(name: &str) -> String {
    format!("{}/tests/fixtures/keys/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Ed25519 issuer configuration with both key halves.
pub fn issuer_auth_config() -> AuthConfig {
    AuthConfig {
        issuer: "https://issuer.sessiongate.test".to_string(),
        algorithm: SigningAlgorithm::EdDSA,
        public_key_path: Some(key_path("issuer_ed25519.pub.pem")),
        private_key_path: Some(key_path("issuer_ed25519.pem")),
        ..AuthConfig::default()
    }
}

/// Same issuer name, but signing with a key the server does not trust.
pub fn foreign_auth_config() -> AuthConfig {
    AuthConfig {
        private_key_path: Some(key_path("foreign_ed25519.pem")),
        ..issuer_auth_config()
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Mints tokens the server trusts
    pub minter: TokenMinter,
}

impl TestApp {
    /// Create a new test application that can verify and issue
    pub fn new() -> Self {
        let config = AppConfig {
            auth: issuer_auth_config(),
            ..AppConfig::default()
        };
        let state = AppState::from_config(config.clone()).expect("Failed to build state");
        Self::with_state(config, state)
    }

    /// Create a test application that verifies but has no signing key
    pub fn without_signing_key() -> Self {
        let config = AppConfig {
            auth: issuer_auth_config(),
            ..AppConfig::default()
        };
        let verifier = TokenVerifier::from_config(&config.auth).expect("Failed to load verifier");
        let issuer = LongLivedIssuer::new(None, config.auth.long_lived_ttl_seconds);
        let state = AppState::new(config.clone(), verifier, issuer);
        Self::with_state(config, state)
    }

    fn with_state(config: AppConfig, state: AppState) -> Self {
        let minter = TokenMinter::from_config(&config.auth)
            .expect("Failed to load signing key")
            .expect("Signing key configured");
        Self {
            router: build_app(state),
            config,
            minter,
        }
    }

    /// Short-lived session token for `(user, session)`
    pub fn session_token(&self, user: &str, session: &str) -> String {
        self.minter
            .mint_session_token(&Identity::new(user, session), 60)
            .expect("Failed to mint token")
            .token
    }

    /// Session token for a user with no session id
    pub fn sessionless_token(&self, user: &str) -> String {
        self.minter
            .mint_session_token(&Identity::without_session(user), 60)
            .expect("Failed to mint token")
            .token
    }

    /// Validly signed token whose window ended before now
    pub fn expired_token(&self, user: &str, session: &str) -> String {
        self.token_at(user, session, Utc::now() - Duration::hours(1))
    }

    /// Validly signed 60-second token minted at `issued_at`
    pub fn token_at(&self, user: &str, session: &str, issued_at: DateTime<Utc>) -> String {
        self.minter
            .mint(
                &Identity::new(user, session),
                TokenKind::Session,
                Duration::seconds(60),
                issued_at,
            )
            .expect("Failed to mint token")
            .token
    }

    /// Make a request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let header = token.map(|t| format!("Bearer {}", t));
        self.request_with_header(method, path, body, header.as_deref())
            .await
    }

    /// Make a request with a raw `Authorization` header value
    pub async fn request_with_header(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let www_authenticate = response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            www_authenticate,
        }
    }

    /// Serve the app on an ephemeral local port; returns the base URL
    pub async fn spawn(self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, self.router)
                .await
                .expect("Test server failed");
        });
        format!("http://{}", addr)
    }
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `WWW-Authenticate` header, if any
    pub www_authenticate: Option<String>,
}

impl TestResponse {
    /// Asserts the uniform identity-rejection response
    pub fn assert_unauthorized(&self) {
        assert_eq!(self.status, StatusCode::UNAUTHORIZED);
        assert_eq!(self.www_authenticate.as_deref(), Some("Bearer"));
        assert_eq!(
            self.body,
            serde_json::json!({
                "error": "UNAUTHORIZED",
                "message": "Invalid or missing token",
            })
        );
    }
}

/// Mints a token with a key the test server does not trust
pub fn foreign_token(user: &str, session: &str, issued_at: DateTime<Utc>) -> String {
    TokenMinter::from_config(&foreign_auth_config())
        .expect("Failed to load foreign key")
        .expect("Foreign key configured")
        .mint(
            &Identity::new(user, session),
            TokenKind::Session,
            Duration::seconds(60),
            issued_at,
        )
        .expect("Failed to mint foreign token")
        .token
}
