//! Flashcard endpoints: creation, due listing and review submission

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::gamification::GamificationService;
use crate::AppState;
use srs_core::ReviewResult;

const DEFAULT_DUE_LIMIT: i64 = 20;
const MAX_DUE_LIMIT: i64 = 100;

/// POST /api/flashcards
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateFlashcardRequest>,
) -> Result<Json<Flashcard>> {
    if payload.front_content.trim().is_empty() || payload.back_content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "front_content and back_content are required".to_string(),
        ));
    }

    let schedule = state.scheduler.initial_schedule(Utc::now());
    let flashcard = state
        .db
        .create_flashcard(auth.user_id, &payload, &schedule)
        .await?;

    Ok(Json(flashcard.to_api()))
}

/// GET /api/flashcards/due
pub async fn due(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<DueQuery>,
) -> Result<Json<DueFlashcardsResponse>> {
    let difficulty = query
        .difficulty
        .as_deref()
        .map(|s| {
            Difficulty::from_str(s)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown difficulty: {s}")))
        })
        .transpose()?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_DUE_LIMIT)
        .clamp(1, MAX_DUE_LIMIT);

    let flashcards = state
        .db
        .due_flashcards(auth.user_id, query.subject_id, difficulty, limit)
        .await?;

    let total_for_review = flashcards.len();

    Ok(Json(DueFlashcardsResponse {
        flashcards: flashcards.iter().map(|c| c.to_api()).collect(),
        total_for_review,
    }))
}

/// POST /api/flashcards/:id/review
///
/// Loads the card, checks ownership, schedules the review, persists the
/// new schedule and forwards the earned points to the gamification
/// ledger. Nothing is written when the submission is declined.
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(flashcard_id): Path<i64>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    let card = state
        .db
        .get_flashcard(flashcard_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("flashcard {flashcard_id}")))?;

    if card.user_id != auth.user_id {
        return Err(ApiError::Forbidden(
            "flashcard belongs to another user".to_string(),
        ));
    }

    let decoded = payload.decode()?;
    let schedule = card.to_schedule();
    let now = Utc::now();

    let result: ReviewResult = match decoded {
        DecodedOutcome::Rated(value) => state.scheduler.review_rated(&schedule, value, now)?,
        DecodedOutcome::Outcome(outcome) => state.scheduler.review(&schedule, outcome, now),
    };

    // A skipped card mutates nothing and earns nothing.
    let recorded_rating = match decoded {
        DecodedOutcome::Rated(value) => Some(i32::from(value)),
        DecodedOutcome::Outcome(ReviewOutcome::Binary { correct: true }) => Some(5),
        DecodedOutcome::Outcome(ReviewOutcome::Binary { correct: false }) => Some(1),
        _ => None,
    };

    if let Some(rating) = recorded_rating {
        let review = DbReview {
            id: Uuid::new_v4(),
            flashcard_id: card.id,
            user_id: auth.user_id,
            rating,
            interval_before: card.interval_days,
            interval_after: result.schedule.interval_days as i32,
            ease_before: card.ease_factor,
            ease_after: result.schedule.ease_factor,
            reviewed_at: now,
        };
        let ledger = GamificationService::review_entry(result.points, &card.front_content);

        let applied = state
            .db
            .apply_review(&review, card.review_count, &result.schedule, ledger.as_ref())
            .await?;
        if !applied {
            return Err(ApiError::Conflict(
                "flashcard was reviewed concurrently".to_string(),
            ));
        }
    }

    Ok(Json(SubmitReviewResponse {
        flashcard: card.with_schedule(&result.schedule).to_api(),
        points_earned: result.points,
        next_review_at: result.next_review_at,
    }))
}
