//! Test fixtures and factory functions for creating test data.

use serde_json::json;

/// Create a flashcard creation request body.
pub fn create_flashcard_request(
    front: &str,
    back: &str,
    subject_id: Option<i64>,
    difficulty: Option<&str>,
) -> serde_json::Value {
    json!({
        "front_content": front,
        "back_content": back,
        "subject_id": subject_id,
        "difficulty": difficulty,
    })
}

/// Create a review submission with a 1-5 rating.
pub fn rating_review_request(rating: i32) -> serde_json::Value {
    json!({ "rating": rating })
}

/// Create a review submission from the binary study mode.
pub fn binary_review_request(correct: bool) -> serde_json::Value {
    json!({ "correct": correct })
}

/// Create a skipped review submission.
pub fn skipped_review_request() -> serde_json::Value {
    json!({ "skipped": true })
}

/// Create a user register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}
