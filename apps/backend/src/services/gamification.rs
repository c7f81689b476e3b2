//! Gamification point ledger.
//!
//! Independent collaborator: review scheduling stays correct whether or
//! not points land in the ledger, so failures here surface as errors to
//! the caller but never roll back a persisted review.

use std::sync::Arc;

use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::{NewGamificationEvent, PointsResponse};

const ACTIVITY_FLASHCARD_REVIEW: &str = "flashcard_review";
const RECENT_EVENTS_LIMIT: i64 = 20;
const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// Accumulates a per-user point ledger
#[derive(Clone)]
pub struct GamificationService {
    db: Arc<Database>,
}

impl GamificationService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Ledger entry for a flashcard review, to be persisted with the
    /// review itself. Zero-point reviews produce no entry.
    pub fn review_entry(points: u32, front_content: &str) -> Option<NewGamificationEvent> {
        if points == 0 {
            return None;
        }

        let preview: String = front_content.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        Some(NewGamificationEvent {
            activity_type: ACTIVITY_FLASHCARD_REVIEW.to_string(),
            points_earned: points as i32,
            description: format!("Reviewed flashcard: {preview}"),
        })
    }

    /// Point total plus the most recent ledger entries for a user
    pub async fn summary(&self, user_id: Uuid) -> Result<PointsResponse> {
        let total_points = self.db.total_points(user_id).await?;
        let recent = self
            .db
            .recent_gamification_events(user_id, RECENT_EVENTS_LIMIT)
            .await?;

        Ok(PointsResponse {
            total_points,
            recent,
        })
    }
}
