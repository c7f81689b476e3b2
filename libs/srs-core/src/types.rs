//! Core types for spaced-repetition scheduling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recall quality rating on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
    Perfect,
}

impl Rating {
    /// Convert to numeric value (1-5).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
            Self::Perfect => 5,
        }
    }

    /// Create from numeric value (1-5).
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            5 => Some(Self::Perfect),
            _ => None,
        }
    }

    /// Ratings of 3 and above count as a successful recall.
    pub fn is_success(self) -> bool {
        self.to_value() >= 3
    }
}

/// Review outcome as reported by a client.
///
/// Two call shapes exist: the flashcard review endpoint submits a 1-5
/// rating, while the quick study mode only reports correct/incorrect.
/// Binary outcomes map onto the rating scale by sign (correct -> 5,
/// incorrect -> 1) so a single algorithm serves both. A skipped card
/// changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ReviewOutcome {
    Rated(Rating),
    Binary { correct: bool },
    Skipped,
}

impl ReviewOutcome {
    /// Rating equivalent used for interval/ease scheduling.
    /// `None` for skipped outcomes.
    pub fn as_rating(self) -> Option<Rating> {
        match self {
            Self::Rated(rating) => Some(rating),
            Self::Binary { correct: true } => Some(Rating::Perfect),
            Self::Binary { correct: false } => Some(Rating::Again),
            Self::Skipped => None,
        }
    }
}

/// Difficulty tag assigned at card creation, used for due-set filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// Scheduling state of a single card.
///
/// Invariants upheld by the scheduler:
/// - `ease_factor >= 1.3` at all times
/// - `interval_days >= 1` after any rated review (0 only before the
///   first successful review)
/// - `review_count == correct_count + incorrect_count`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSchedule {
    pub interval_days: u32,
    pub ease_factor: f64,
    pub review_count: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub next_review_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl CardSchedule {
    /// Whether the card is due for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}
