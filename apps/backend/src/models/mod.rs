//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;

// Re-export shared types from srs-core
pub use srs_core::types::{CardSchedule, Difficulty, Rating, ReviewOutcome};

// === Database Entity Types ===

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Flashcard stored in PostgreSQL with denormalized schedule columns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFlashcard {
    pub id: i64,
    pub user_id: Uuid,
    pub subject_id: Option<i64>,
    pub front_content: String,
    pub back_content: String,
    pub difficulty: String,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub review_count: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbFlashcard {
    /// Extract the scheduling state for srs-core.
    pub fn to_schedule(&self) -> CardSchedule {
        CardSchedule {
            interval_days: self.interval_days.max(0) as u32,
            ease_factor: self.ease_factor,
            review_count: self.review_count.max(0) as u32,
            correct_count: self.correct_count.max(0) as u32,
            incorrect_count: self.incorrect_count.max(0) as u32,
            next_review_at: self.next_review_at,
            last_reviewed_at: self.last_reviewed_at,
        }
    }

    /// Convert to API flashcard type.
    pub fn to_api(&self) -> Flashcard {
        Flashcard {
            id: self.id,
            subject_id: self.subject_id,
            front_content: self.front_content.clone(),
            back_content: self.back_content.clone(),
            difficulty: Difficulty::from_str(&self.difficulty).unwrap_or_default(),
            interval_days: self.interval_days.max(0) as u32,
            ease_factor: self.ease_factor,
            review_count: self.review_count.max(0) as u32,
            correct_count: self.correct_count.max(0) as u32,
            incorrect_count: self.incorrect_count.max(0) as u32,
            next_review_at: self.next_review_at,
            last_reviewed_at: self.last_reviewed_at,
        }
    }

    /// Copy of this flashcard with an updated schedule applied.
    pub fn with_schedule(&self, schedule: &CardSchedule) -> Self {
        Self {
            interval_days: schedule.interval_days as i32,
            ease_factor: schedule.ease_factor,
            review_count: schedule.review_count as i32,
            correct_count: schedule.correct_count as i32,
            incorrect_count: schedule.incorrect_count as i32,
            next_review_at: schedule.next_review_at,
            last_reviewed_at: schedule.last_reviewed_at,
            ..self.clone()
        }
    }
}

/// Review history row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub flashcard_id: i64,
    pub user_id: Uuid,
    pub rating: i32,
    pub interval_before: i32,
    pub interval_after: i32,
    pub ease_before: f64,
    pub ease_after: f64,
    pub reviewed_at: DateTime<Utc>,
}

/// Gamification ledger entry to be appended alongside a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGamificationEvent {
    pub activity_type: String,
    pub points_earned: i32,
    pub description: String,
}

/// Gamification ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GamificationEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: String,
    pub points_earned: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// === API Types ===

/// Flashcard as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub subject_id: Option<i64>,
    pub front_content: String,
    pub back_content: String,
    pub difficulty: Difficulty,
    pub interval_days: u32,
    pub ease_factor: f64,
    pub review_count: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub next_review_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFlashcardRequest {
    pub front_content: String,
    pub back_content: String,
    pub subject_id: Option<i64>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DueQuery {
    pub subject_id: Option<i64>,
    pub difficulty: Option<String>,
    pub limit: Option<i64>,
}

/// Review submission accepting both call shapes: a 1-5 `rating` from the
/// flashcard review screen, or a binary `correct` flag from the quick
/// study mode. `skipped` short-circuits both.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: Option<i32>,
    pub correct: Option<bool>,
    #[serde(default)]
    pub skipped: bool,
}

/// How a submission maps onto the scheduler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedOutcome {
    /// Raw 1-5 value, validated by the scheduler.
    Rated(u8),
    Outcome(ReviewOutcome),
}

impl SubmitReviewRequest {
    pub fn decode(&self) -> Result<DecodedOutcome, ApiError> {
        if self.skipped {
            return Ok(DecodedOutcome::Outcome(ReviewOutcome::Skipped));
        }
        if let Some(rating) = self.rating {
            let value = u8::try_from(rating).map_err(|_| {
                ApiError::BadRequest(format!("invalid rating {rating}: must be between 1 and 5"))
            })?;
            return Ok(DecodedOutcome::Rated(value));
        }
        if let Some(correct) = self.correct {
            return Ok(DecodedOutcome::Outcome(ReviewOutcome::Binary { correct }));
        }
        Err(ApiError::BadRequest(
            "review outcome required: rating, correct or skipped".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReviewResponse {
    pub flashcard: Flashcard,
    pub points_earned: u32,
    pub next_review_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DueFlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
    pub total_for_review: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsResponse {
    pub total_points: i64,
    pub recent: Vec<GamificationEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flashcard() -> DbFlashcard {
        DbFlashcard {
            id: 1,
            user_id: Uuid::new_v4(),
            subject_id: Some(7),
            front_content: "Qual a capital do Brasil?".to_string(),
            back_content: "Brasília".to_string(),
            difficulty: "hard".to_string(),
            interval_days: 6,
            ease_factor: 2.5,
            review_count: 3,
            correct_count: 2,
            incorrect_count: 1,
            next_review_at: Utc::now(),
            last_reviewed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn schedule_roundtrip_through_db_row() {
        let card = flashcard();
        let schedule = card.to_schedule();
        assert_eq!(schedule.interval_days, 6);
        assert_eq!(schedule.review_count, 3);

        let updated = card.with_schedule(&schedule);
        assert_eq!(updated.to_schedule(), schedule);
    }

    #[test]
    fn capped_interval_survives_db_row_roundtrip() {
        // The scheduler caps intervals at max_interval_days, which must
        // stay within i32 range for the INTEGER columns. A schedule at
        // the cap round-trips without sign flips or truncation.
        let card = flashcard();
        let mut schedule = card.to_schedule();
        schedule.interval_days = srs_core::Scheduler::default().max_interval_days;
        schedule.review_count = 40;
        schedule.correct_count = 40;

        let updated = card.with_schedule(&schedule);
        assert!(updated.interval_days > 0);
        assert_eq!(updated.to_schedule(), schedule);
    }

    #[test]
    fn unknown_difficulty_falls_back_to_medium() {
        let mut card = flashcard();
        card.difficulty = "impossible".to_string();
        assert_eq!(card.to_api().difficulty, Difficulty::Medium);
    }

    #[test]
    fn decode_prefers_skip() {
        let request = SubmitReviewRequest {
            rating: Some(5),
            correct: Some(true),
            skipped: true,
        };
        assert_eq!(
            request.decode().unwrap(),
            DecodedOutcome::Outcome(ReviewOutcome::Skipped)
        );
    }

    #[test]
    fn decode_rating() {
        let request = SubmitReviewRequest {
            rating: Some(4),
            correct: None,
            skipped: false,
        };
        assert_eq!(request.decode().unwrap(), DecodedOutcome::Rated(4));
    }

    #[test]
    fn decode_binary() {
        let request = SubmitReviewRequest {
            rating: None,
            correct: Some(false),
            skipped: false,
        };
        assert_eq!(
            request.decode().unwrap(),
            DecodedOutcome::Outcome(ReviewOutcome::Binary { correct: false })
        );
    }

    #[test]
    fn decode_negative_rating_is_rejected() {
        let request = SubmitReviewRequest {
            rating: Some(-1),
            correct: None,
            skipped: false,
        };
        assert!(request.decode().is_err());
    }

    #[test]
    fn decode_empty_submission_is_rejected() {
        let request = SubmitReviewRequest {
            rating: None,
            correct: None,
            skipped: false,
        };
        assert!(request.decode().is_err());
    }
}
