//! Review scheduling: how an item's stats and next review change after an answer.

pub mod basic;
pub mod streak;

use chrono::{DateTime, Duration, Utc};

use crate::types::{
    AnswerOutcome, AnswerReason, Feedback, FeedbackKind, Item, ItemKey, ItemPool,
};

/// Review intervals indexed by streak; longer streaks reuse the last entry.
pub const STREAK_INTERVALS_HOURS: [i64; 8] = [
    4,       // 4 hours
    8,       // 8 hours
    24,      // 1 day
    3 * 24,  // 3 days
    7 * 24,  // 7 days
    14 * 24, // 14 days
    30 * 24, // 30 days
    60 * 24, // 60 days
];

/// Delay until the next review for an item on `streak`.
pub fn next_review_delay(streak: u32) -> Duration {
    let index = (streak as usize).min(STREAK_INTERVALS_HOURS.len() - 1);
    Duration::hours(STREAK_INTERVALS_HOURS[index])
}

/// Trait for review scheduling policies.
pub trait ReviewPolicy: Send + Sync {
    /// Policy identifier.
    fn name(&self) -> &'static str;

    /// Update `item` in place after an answer at `now`.
    ///
    /// Returns the feedback kind for a miss that should override the default
    /// incorrect/skipped wording, if any.
    fn apply(
        &self,
        item: &mut Item,
        was_correct: bool,
        now: DateTime<Utc>,
    ) -> Option<FeedbackKind>;
}

/// Get policy by name.
pub fn get_policy(name: &str) -> Option<Box<dyn ReviewPolicy>> {
    match name {
        "streak" => Some(Box::new(streak::StreakPolicy::default())),
        "basic" => Some(Box::new(basic::BasicPolicy)),
        _ => None,
    }
}

/// Record an answer with the default leech-aware policy.
pub fn record_answer(
    pool: &ItemPool,
    key: ItemKey<'_>,
    was_correct: bool,
    reason: AnswerReason,
    now: DateTime<Utc>,
) -> AnswerOutcome {
    record_answer_with(&streak::StreakPolicy::default(), pool, key, was_correct, reason, now)
}

/// Record an answer for the item identified by `key`.
///
/// The caller's pool is left untouched; the returned pool shares every item
/// except the one that was answered.
pub fn record_answer_with(
    policy: &dyn ReviewPolicy,
    pool: &ItemPool,
    key: ItemKey<'_>,
    was_correct: bool,
    reason: AnswerReason,
    now: DateTime<Utc>,
) -> AnswerOutcome {
    let Some(index) = pool.position(key) else {
        tracing::warn!(?key, "answer recorded for an item that is not in the pool");
        return AnswerOutcome {
            feedback: Feedback::new(FeedbackKind::NotFound, None),
            pool: pool.clone(),
        };
    };

    let mut override_kind = None;
    let mut answer = String::new();
    let updated = pool.with_updated(index, |item| {
        item.last_answered = Some(now);
        override_kind = policy.apply(item, was_correct, now);
        answer = item.name.clone();
    });

    let kind = if was_correct {
        FeedbackKind::Correct
    } else {
        override_kind.unwrap_or(match reason {
            AnswerReason::Answered => FeedbackKind::Incorrect,
            AnswerReason::Skipped => FeedbackKind::Skipped,
        })
    };

    AnswerOutcome {
        feedback: Feedback::new(kind, Some(&answer)),
        pool: updated,
    }
}
