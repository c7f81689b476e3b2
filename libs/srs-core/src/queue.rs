//! Due-set selection.

use chrono::{DateTime, Utc};

use crate::types::{CardSchedule, Difficulty};

/// A card that can appear in a review queue.
pub trait DueCandidate {
    fn schedule(&self) -> &CardSchedule;

    fn subject_id(&self) -> Option<i64> {
        None
    }

    fn difficulty(&self) -> Option<Difficulty> {
        None
    }
}

/// Optional filters applied before due-date selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueFilter {
    pub subject_id: Option<i64>,
    pub difficulty: Option<Difficulty>,
}

impl DueFilter {
    fn matches<C: DueCandidate>(&self, card: &C) -> bool {
        if let Some(subject_id) = self.subject_id {
            if card.subject_id() != Some(subject_id) {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if card.difficulty() != Some(difficulty) {
                return false;
            }
        }
        true
    }
}

/// Select the cards due for review at `now`.
///
/// A card is due when `next_review_at <= now`. Results are ordered by
/// `next_review_at` ascending; the tiebreak between equal timestamps is
/// unspecified and callers must not depend on it.
pub fn due_set<'a, C: DueCandidate>(
    cards: &'a [C],
    now: DateTime<Utc>,
    filter: &DueFilter,
) -> Vec<&'a C> {
    let mut due: Vec<&C> = cards
        .iter()
        .filter(|c| filter.matches(*c) && c.schedule().is_due(now))
        .collect();
    due.sort_by_key(|c| c.schedule().next_review_at);
    due
}
