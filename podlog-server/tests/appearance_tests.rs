//! Integration tests for `POST /appearances`
//!
//! Covers check ordering, status codes and exact response bodies, and what
//! ends up persisted.

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::TestApp;
use serde_json::{json, Value};

fn message(text: &str) -> Value {
    json!({ "message": text })
}

#[tokio::test]
async fn test_valid_appearance_created() {
    let app = TestApp::start().await;
    app.seed().await;

    let (status, body) = app
        .post("/appearances", json!({"rating": 5, "guest_id": 1, "episode_id": 1}))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, message("Appearance created successfully"));

    let (status, stored) = app.get("/appearances/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["rating"], 5);
    assert_eq!(stored["guest_id"], 1);
    assert_eq!(stored["episode_id"], 1);
}

#[tokio::test]
async fn test_rating_out_of_range_rejected() {
    let app = TestApp::start().await;
    app.seed().await;

    let (status, body) = app
        .post("/appearances", json!({"rating": 6, "guest_id": 1, "episode_id": 1}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Rating must be between 1 and 5"));
    assert_eq!(app.appearance_count().await, 0);
}

#[tokio::test]
async fn test_non_integer_ratings_rejected() {
    let app = TestApp::start().await;
    app.seed().await;

    for rating in [json!(0), json!(2.5), json!("4"), json!(null), json!([3])] {
        let (status, body) = app
            .post(
                "/appearances",
                json!({"rating": rating, "guest_id": 1, "episode_id": 1}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {}", rating);
        assert_eq!(body, message("Rating must be between 1 and 5"));
    }
    assert_eq!(app.appearance_count().await, 0);
}

#[tokio::test]
async fn test_unknown_guest_rejected() {
    let app = TestApp::start().await;
    app.seed().await;

    let (status, body) = app
        .post("/appearances", json!({"rating": 3, "guest_id": 999, "episode_id": 1}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Guest not found"));
    assert_eq!(app.appearance_count().await, 0);
}

#[tokio::test]
async fn test_unknown_episode_rejected() {
    let app = TestApp::start().await;
    app.seed().await;

    let (status, body) = app
        .post("/appearances", json!({"rating": 3, "guest_id": 1, "episode_id": 999}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Episode not found"));
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let app = TestApp::start().await;
    app.seed().await;

    for payload in [
        json!({"guest_id": 1, "episode_id": 1}),
        json!({"rating": 3, "episode_id": 1}),
        json!({"rating": 3, "guest_id": 1}),
        json!({}),
    ] {
        let (status, body) = app.post("/appearances", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body, message("Missing required fields"));
    }
}

#[tokio::test]
async fn test_unparseable_body_is_missing_fields() {
    let app = TestApp::start().await;
    let token = app.token();

    for body in ["", "not json", "[1, 2, 3]", "\"rating\""] {
        let (status, response) = app
            .send(
                Method::POST,
                "/appearances",
                Some(body.to_string()),
                Some(&token),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(response, message("Missing required fields"));
    }
}

#[tokio::test]
async fn test_structural_errors_win_over_referential() {
    // Empty store: nothing resolves, but the rating error must come first
    let app = TestApp::start().await;

    let (status, body) = app
        .post("/appearances", json!({"rating": 0, "guest_id": 999, "episode_id": 999}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, message("Rating must be between 1 and 5"));

    let (status, body) = app
        .post("/appearances", json!({"rating": 3, "guest_id": 999, "episode_id": 999}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Guest not found"));
}

#[tokio::test]
async fn test_duplicate_payload_creates_two_records() {
    let app = TestApp::start().await;
    app.seed().await;

    let payload = json!({"rating": 4, "guest_id": 1, "episode_id": 1});
    let (first, _) = app.post("/appearances", payload.clone()).await;
    let (second, _) = app.post("/appearances", payload).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);

    let (_, all) = app.get("/appearances").await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_ne!(all[0]["id"], all[1]["id"]);
}

#[tokio::test]
async fn test_extra_fields_ignored() {
    let app = TestApp::start().await;
    app.seed().await;

    let (status, _) = app
        .post(
            "/appearances",
            json!({"rating": 1, "guest_id": 1, "episode_id": 1, "notes": "great"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.appearance_count().await, 1);
}

#[tokio::test]
async fn test_unknown_appearance_id() {
    let app = TestApp::start().await;
    let (status, body) = app.get("/appearances/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, message("Appearance not found"));
}
