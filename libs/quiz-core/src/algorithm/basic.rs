//! Basic streak scheduling without leech tracking.
//!
//! Any miss resets the streak and makes the item due immediately. Kept for
//! parity with pools recorded before leech handling existed.

use super::{next_review_delay, ReviewPolicy};
use crate::types::{FeedbackKind, Item};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPolicy;

impl ReviewPolicy for BasicPolicy {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn apply(
        &self,
        item: &mut Item,
        was_correct: bool,
        now: DateTime<Utc>,
    ) -> Option<FeedbackKind> {
        if was_correct {
            item.correct = item.correct.saturating_add(1);
            item.streak = item.streak.saturating_add(1);
            item.next_review = Some(now + next_review_delay(item.streak));
        } else {
            item.incorrect = item.incorrect.saturating_add(1);
            item.streak = 0;
            item.next_review = Some(now);
        }
        None
    }
}
