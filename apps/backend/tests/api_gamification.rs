//! Gamification API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;

use common::fixtures;
use common::TestContext;

/// Test a fresh user has an empty ledger.
#[tokio::test]
#[ignore = "requires database"]
async fn test_points_empty_for_new_user() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .get("/api/gamification/points")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_points"], 0);
    assert_eq!(body["recent"].as_array().unwrap().len(), 0);

    ctx.cleanup_user(user_id).await;
}

/// Test review points accumulate in the ledger.
#[tokio::test]
#[ignore = "requires database"]
async fn test_points_accumulate_across_reviews() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let mut card_ids = Vec::new();
    for _ in 0..2 {
        let card: serde_json::Value = server
            .post("/api/flashcards")
            .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
            .json(&fixtures::create_flashcard_request("Q", "A", None, None))
            .await
            .json();
        card_ids.push(card["id"].as_i64().unwrap());
    }

    // Perfect recall: 10 points
    server
        .post(&format!("/api/flashcards/{}/review", card_ids[0]))
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .json(&fixtures::rating_review_request(5))
        .await
        .assert_status_ok();

    // Hesitant recall: 6 points
    server
        .post(&format!("/api/flashcards/{}/review", card_ids[1]))
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .json(&fixtures::rating_review_request(3))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/gamification/points")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_points"], 16);

    let recent = body["recent"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["activity_type"], "flashcard_review");

    ctx.cleanup_user(user_id).await;
}

/// Test skipped reviews never touch the ledger.
#[tokio::test]
#[ignore = "requires database"]
async fn test_skipped_review_awards_nothing() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let card: serde_json::Value = server
        .post("/api/flashcards")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .json(&fixtures::create_flashcard_request("Q", "A", None, None))
        .await
        .json();
    let card_id = card["id"].as_i64().unwrap();

    server
        .post(&format!("/api/flashcards/{card_id}/review"))
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .json(&fixtures::skipped_review_request())
        .await
        .assert_status_ok();

    let response = server
        .get("/api/gamification/points")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_points"], 0);

    ctx.cleanup_user(user_id).await;
}
