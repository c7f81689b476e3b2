//! SM-2 style review scheduling.
//!
//! Based on SuperMemo 2 with configurable parameters. Pure computation:
//! the caller supplies the card's current schedule and a review outcome,
//! and gets back the next schedule plus the points to forward to the
//! gamification ledger. Persistence is the caller's problem.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, SchedulerError};
use crate::types::{CardSchedule, Rating, ReviewOutcome};

/// Result of scheduling a card after review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    pub schedule: CardSchedule,
    pub next_review_at: DateTime<Utc>,
    pub points: u32,
}

/// Point rewards forwarded to the gamification ledger.
///
/// A policy knob, not a correctness invariant: success on the rating
/// scale earns `rating * success_multiplier`, a failure earns the flat
/// `failure_points`, and the binary study mode earns a fixed
/// `binary_correct_points` regardless of ease impact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardPolicy {
    pub success_multiplier: u32,
    pub failure_points: u32,
    pub binary_correct_points: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            success_multiplier: 2,
            failure_points: 1,
            binary_correct_points: 2,
        }
    }
}

impl RewardPolicy {
    /// Points earned for a review outcome.
    pub fn points_for(&self, outcome: ReviewOutcome) -> u32 {
        match outcome {
            ReviewOutcome::Rated(rating) if rating.is_success() => {
                u32::from(rating.to_value()) * self.success_multiplier
            }
            ReviewOutcome::Rated(_) => self.failure_points,
            ReviewOutcome::Binary { correct: true } => self.binary_correct_points,
            ReviewOutcome::Binary { correct: false } => self.failure_points,
            ReviewOutcome::Skipped => 0,
        }
    }
}

/// SM-2 scheduler with configurable parameters.
///
/// Successful reviews multiply the interval by the ease factor, so an
/// unbounded streak would overflow both the calendar arithmetic and the
/// persisted columns. `max_interval_days` caps the growth; the default
/// of 100 years is far beyond any review horizon.
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub lapse_interval: u32,
    pub lapse_penalty: f64,
    pub max_interval_days: u32,
    pub rewards: RewardPolicy,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
            lapse_interval: 1,
            lapse_penalty: 0.2,
            max_interval_days: 36_500,
            rewards: RewardPolicy::default(),
        }
    }
}

impl Scheduler {
    /// Schedule for a freshly created card: never reviewed, due immediately.
    pub fn initial_schedule(&self, now: DateTime<Utc>) -> CardSchedule {
        CardSchedule {
            interval_days: 0,
            ease_factor: self.initial_ease,
            review_count: 0,
            correct_count: 0,
            incorrect_count: 0,
            next_review_at: now,
            last_reviewed_at: None,
        }
    }

    /// Calculate the next schedule after a review.
    ///
    /// Skipped outcomes return the schedule unchanged with zero points.
    pub fn review(
        &self,
        schedule: &CardSchedule,
        outcome: ReviewOutcome,
        now: DateTime<Utc>,
    ) -> ReviewResult {
        let Some(rating) = outcome.as_rating() else {
            return ReviewResult {
                schedule: schedule.clone(),
                next_review_at: schedule.next_review_at,
                points: 0,
            };
        };

        let (new_interval, new_ease) = if rating.is_success() {
            self.schedule_success(schedule, rating)
        } else {
            self.schedule_lapse(schedule)
        };

        let next_review_at = now + Duration::days(i64::from(new_interval));
        let success = rating.is_success();

        ReviewResult {
            schedule: CardSchedule {
                interval_days: new_interval,
                ease_factor: new_ease,
                review_count: schedule.review_count + 1,
                correct_count: schedule.correct_count + u32::from(success),
                incorrect_count: schedule.incorrect_count + u32::from(!success),
                next_review_at,
                last_reviewed_at: Some(now),
            },
            next_review_at,
            points: self.rewards.points_for(outcome),
        }
    }

    /// Like [`review`](Self::review), but takes a raw 1-5 rating value
    /// as submitted over the wire.
    pub fn review_rated(
        &self,
        schedule: &CardSchedule,
        value: u8,
        now: DateTime<Utc>,
    ) -> Result<ReviewResult> {
        let rating =
            Rating::from_value(value).ok_or(SchedulerError::InvalidRating { value })?;
        Ok(self.review(schedule, ReviewOutcome::Rated(rating), now))
    }

    fn schedule_success(&self, schedule: &CardSchedule, rating: Rating) -> (u32, f64) {
        let new_interval = match schedule.interval_days {
            0 => self.first_interval,
            1 => self.second_interval,
            days => (f64::from(days) * schedule.ease_factor).round() as u32,
        }
        .min(self.max_interval_days);
        // SM-2 ease adjustment: +0.1 for a perfect recall, shrinking
        // with distance from 5.
        let q = f64::from(rating.to_value());
        let delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        let new_ease = (schedule.ease_factor + delta).max(self.minimum_ease);
        (new_interval, new_ease)
    }

    fn schedule_lapse(&self, schedule: &CardSchedule) -> (u32, f64) {
        let new_ease = (schedule.ease_factor - self.lapse_penalty).max(self.minimum_ease);
        (self.lapse_interval, new_ease)
    }
}
