//! Common test utilities for school registry integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use axum_test::{TestRequest, TestServer};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use school_registry_service::auth::JwtClaims;
use school_registry_service::{create_router, AppState, ServiceConfig};
use school_registry_store::MemoryStore;

/// Secret the harness signs its tokens with.
pub const JWT_SECRET: &str = "test-jwt-secret";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
}

impl TestHarness {
    /// Create a new test harness with an empty store.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            jwt_secret: Some(JWT_SECRET.into()),
            ..ServiceConfig::default()
        })
    }

    /// Create a harness with a custom configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server }
    }

    /// A valid bearer header for the test caller.
    pub fn auth_header() -> (HeaderName, HeaderValue) {
        bearer(&token(JWT_SECRET, 3600))
    }

    /// POST a school and return the response.
    pub async fn create(&self, body: &Value) -> axum_test::TestResponse {
        authed(self.server.post("/api/schools")).json(body).await
    }

    /// POST a school that must succeed and return its body.
    pub async fn create_ok(&self, body: &Value) -> Value {
        let response = self.create(body).await;
        assert_eq!(response.status_code(), 201, "{}", response.text());
        response.json()
    }

    /// GET a school by id.
    pub async fn get(&self, id: &str) -> axum_test::TestResponse {
        authed(self.server.get(&format!("/api/schools/{id}"))).await
    }

    /// GET all schools.
    pub async fn list(&self) -> axum_test::TestResponse {
        authed(self.server.get("/api/schools")).await
    }

    /// PUT changes to a school.
    pub async fn update(&self, id: &str, body: &Value) -> axum_test::TestResponse {
        authed(self.server.put(&format!("/api/schools/{id}")))
            .json(body)
            .await
    }

    /// DELETE a school.
    pub async fn delete(&self, id: &str) -> axum_test::TestResponse {
        authed(self.server.delete(&format!("/api/schools/{id}"))).await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach the harness bearer token to a request.
pub fn authed(request: TestRequest) -> TestRequest {
    let (name, value) = TestHarness::auth_header();
    request.add_header(name, value)
}

/// Sign a token for `test-caller` expiring `expires_in` seconds from now.
pub fn token(secret: &str, expires_in: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        sub: "test-caller".into(),
        exp: now + expires_in,
        iat: Some(now),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// An `Authorization: Bearer` header.
pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header value"),
    )
}

/// A complete school body with the given domain.
pub fn school_body(domain: &str) -> Value {
    json!({
        "fa_name": "مدرسه نمونه",
        "en_name": "Sample School",
        "domain": domain,
        "storage_bucket": "sample-bucket",
        "mariadb_db_name": "sample_db",
        "mariadb_username": "sample_user",
        "mariadb_password": "sample-password"
    })
}
