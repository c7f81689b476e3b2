//! Core spaced-repetition library shared by the backend application.
//!
//! Provides:
//! - SM-2 style review scheduling (interval / ease-factor update)
//! - Point-reward policy for the gamification ledger
//! - Due-set selection over card schedules
//! - Shared types (CardSchedule, Rating, ReviewOutcome, etc.)

pub mod error;
pub mod queue;
pub mod scheduler;
pub mod types;

pub use error::{Result, SchedulerError};
pub use queue::{due_set, DueCandidate, DueFilter};
pub use scheduler::{ReviewResult, RewardPolicy, Scheduler};
pub use types::{CardSchedule, Difficulty, Rating, ReviewOutcome};
