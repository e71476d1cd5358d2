//! Test app wrapper for integration tests
//!
//! Builds the real router over a fresh SQLite file in a temporary directory
//! and drives it with `oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use podlog_common::api::TokenSigner;
use podlog_common::db::init_database;
use podlog_server::{build_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

pub const TEST_SECRET: &str = "test-signing-secret";

pub struct TestApp {
    // Keeps the database file alive for the test's duration
    _dir: TempDir,
    pub pool: SqlitePool,
    pub router: Router,
    pub signer: TokenSigner,
}

impl TestApp {
    pub async fn start() -> Self {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let pool = init_database(&dir.path().join("podlog.db"))
            .await
            .expect("Should initialize database");

        let signer = TokenSigner::new(TEST_SECRET, 900);
        let router = build_router(AppState::new(pool.clone(), signer.clone()));

        Self {
            _dir: dir,
            pool,
            router,
            signer,
        }
    }

    /// Valid token for a test user
    pub fn token(&self) -> String {
        self.signer.issue("tester")
    }

    /// Send a request with an optional raw body and bearer token
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    /// Authenticated JSON POST
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let token = self.token();
        self.send(Method::POST, uri, Some(body.to_string()), Some(&token))
            .await
    }

    /// Authenticated DELETE
    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let token = self.token();
        self.send(Method::DELETE, uri, None, Some(&token)).await
    }

    /// Seed guest 1 and episode 1
    pub async fn seed(&self) {
        let (status, _) = self
            .post(
                "/guests",
                serde_json::json!({"name": "Michael J. Fox", "occupation": "actor"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = self
            .post("/episodes", serde_json::json!({"date": "1/11/99", "number": 1}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    pub async fn appearance_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM appearances")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
