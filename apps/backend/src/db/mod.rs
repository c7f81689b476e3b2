//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, name)
            VALUES ($1, $2)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Resolve a token to its user, bumping last_seen_at in the same
    /// statement. Returns None for unknown tokens.
    pub async fn touch_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE token = $1
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // === Flashcard Repository ===

    /// Insert a flashcard with its initial schedule
    pub async fn create_flashcard(
        &self,
        user_id: Uuid,
        request: &CreateFlashcardRequest,
        schedule: &CardSchedule,
    ) -> Result<DbFlashcard> {
        let difficulty = request.difficulty.unwrap_or_default();
        let flashcard = sqlx::query_as::<_, DbFlashcard>(
            r#"
            INSERT INTO flashcards
                (user_id, subject_id, front_content, back_content, difficulty,
                 interval_days, ease_factor, review_count, correct_count,
                 incorrect_count, next_review_at, last_reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, user_id, subject_id, front_content, back_content, difficulty,
                      interval_days, ease_factor, review_count, correct_count,
                      incorrect_count, next_review_at, last_reviewed_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(request.subject_id)
        .bind(&request.front_content)
        .bind(&request.back_content)
        .bind(difficulty.as_str())
        .bind(schedule.interval_days as i32)
        .bind(schedule.ease_factor)
        .bind(schedule.review_count as i32)
        .bind(schedule.correct_count as i32)
        .bind(schedule.incorrect_count as i32)
        .bind(schedule.next_review_at)
        .bind(schedule.last_reviewed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(flashcard)
    }

    /// Get flashcard by ID
    pub async fn get_flashcard(&self, flashcard_id: i64) -> Result<Option<DbFlashcard>> {
        let flashcard = sqlx::query_as::<_, DbFlashcard>(
            r#"
            SELECT id, user_id, subject_id, front_content, back_content, difficulty,
                   interval_days, ease_factor, review_count, correct_count,
                   incorrect_count, next_review_at, last_reviewed_at,
                   created_at, updated_at
            FROM flashcards
            WHERE id = $1
            "#,
        )
        .bind(flashcard_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flashcard)
    }

    /// Get due flashcards for a user, optionally filtered by subject
    /// and difficulty. Ordered by next_review_at with a random tiebreak;
    /// callers must not depend on the tiebreak.
    pub async fn due_flashcards(
        &self,
        user_id: Uuid,
        subject_id: Option<i64>,
        difficulty: Option<Difficulty>,
        limit: i64,
    ) -> Result<Vec<DbFlashcard>> {
        let flashcards = sqlx::query_as::<_, DbFlashcard>(
            r#"
            SELECT id, user_id, subject_id, front_content, back_content, difficulty,
                   interval_days, ease_factor, review_count, correct_count,
                   incorrect_count, next_review_at, last_reviewed_at,
                   created_at, updated_at
            FROM flashcards
            WHERE user_id = $1
              AND next_review_at <= NOW()
              AND ($2::bigint IS NULL OR subject_id = $2)
              AND ($3::text IS NULL OR difficulty = $3)
            ORDER BY next_review_at ASC, RANDOM()
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(subject_id)
        .bind(difficulty.map(|d| d.as_str()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(flashcards)
    }

    /// Persist a review: schedule write-back, history row and optional
    /// ledger entry in a single transaction.
    ///
    /// The write-back is conditional on the review_count observed when
    /// the card was read, so two concurrent reviews cannot both apply:
    /// the loser matches zero rows, the transaction rolls back and the
    /// submission is declined. Returns whether the review applied.
    pub async fn apply_review(
        &self,
        review: &DbReview,
        expected_review_count: i32,
        schedule: &CardSchedule,
        ledger: Option<&NewGamificationEvent>,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE flashcards
            SET interval_days = $1,
                ease_factor = $2,
                review_count = $3,
                correct_count = $4,
                incorrect_count = $5,
                next_review_at = $6,
                last_reviewed_at = $7,
                updated_at = NOW()
            WHERE id = $8 AND user_id = $9 AND review_count = $10
            "#,
        )
        .bind(schedule.interval_days as i32)
        .bind(schedule.ease_factor)
        .bind(schedule.review_count as i32)
        .bind(schedule.correct_count as i32)
        .bind(schedule.incorrect_count as i32)
        .bind(schedule.next_review_at)
        .bind(schedule.last_reviewed_at)
        .bind(review.flashcard_id)
        .bind(review.user_id)
        .bind(expected_review_count)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != 1 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO flashcard_reviews
                (id, flashcard_id, user_id, rating, interval_before, interval_after,
                 ease_before, ease_after, reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(review.id)
        .bind(review.flashcard_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(review.interval_before)
        .bind(review.interval_after)
        .bind(review.ease_before)
        .bind(review.ease_after)
        .bind(review.reviewed_at)
        .execute(&mut *tx)
        .await?;

        if let Some(event) = ledger {
            sqlx::query(
                r#"
                INSERT INTO gamification_log (user_id, activity_type, points_earned, description)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(review.user_id)
            .bind(&event.activity_type)
            .bind(event.points_earned)
            .bind(&event.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    // === Gamification Repository ===

    /// Total points accumulated by a user
    pub async fn total_points(&self, user_id: Uuid) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(points_earned), 0)::bigint AS total
            FROM gamification_log
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("total"))
    }

    /// Most recent ledger entries for a user
    pub async fn recent_gamification_events(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<GamificationEvent>> {
        let events = sqlx::query_as::<_, GamificationEvent>(
            r#"
            SELECT id, user_id, activity_type, points_earned, description, created_at
            FROM gamification_log
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
