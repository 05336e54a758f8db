//! Streak scheduling with decay and leech isolation.
//!
//! A miss halves a long streak instead of wiping it, and an item missed too
//! often is set aside as a leech until it is answered correctly again.

use super::{next_review_delay, ReviewPolicy};
use crate::types::{FeedbackKind, Item};
use chrono::{DateTime, Duration, Utc};

/// Streak policy with configurable leech handling.
#[derive(Debug, Clone)]
pub struct StreakPolicy {
    /// Lapses above this mark the item as a leech.
    pub leech_threshold: u32,
    /// Streaks longer than `decay_floor` are multiplied by this on a miss.
    pub streak_decay: f64,
    /// Streaks at or below this reset to zero on a miss.
    pub decay_floor: u32,
    /// How far out a leech's next review is pushed.
    pub leech_retirement: Duration,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            leech_threshold: 4,
            streak_decay: 0.5,
            decay_floor: 2,
            leech_retirement: Duration::days(10 * 365),
        }
    }
}

impl ReviewPolicy for StreakPolicy {
    fn name(&self) -> &'static str {
        "streak"
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
            item.is_leech = false;
            item.lapses = item.lapses.saturating_sub(1);
            item.next_review = Some(now + next_review_delay(item.streak));
            return None;
        }

        item.incorrect = item.incorrect.saturating_add(1);
        item.lapses = item.lapses.saturating_add(1);
        item.streak = self.decayed_streak(item.streak);

        if item.lapses > self.leech_threshold {
            tracing::debug!(code = %item.code, lapses = item.lapses, "item marked as leech");
            item.is_leech = true;
            item.next_review = Some(now + self.leech_retirement);
            Some(FeedbackKind::SetAside)
        } else {
            item.next_review = Some(now);
            None
        }
    }
}

impl StreakPolicy {
    fn decayed_streak(&self, streak: u32) -> u32 {
        if streak > self.decay_floor {
            (f64::from(streak) * self.streak_decay).floor() as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::record_answer;
    use crate::types::{AnswerReason, ItemKey, ItemPool};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 18, 0, 0).unwrap()
    }

    fn item_with(streak: u32, lapses: u32) -> Item {
        let mut item = Item::new("CH", "Switzerland");
        item.streak = streak;
        item.lapses = lapses;
        item
    }

    fn answer(item: Item, was_correct: bool) -> (Item, FeedbackKind) {
        let pool = ItemPool::from_items([item]);
        let outcome = record_answer(
            &pool,
            ItemKey::Code("CH"),
            was_correct,
            AnswerReason::Answered,
            now(),
        );
        let updated = outcome.pool.get("CH").unwrap().clone();
        (updated, outcome.feedback.kind)
    }

    #[test]
    fn correct_answer_advances_streak_and_schedule() {
        let mut item = item_with(2, 3);
        item.correct = 5;
        let (updated, kind) = answer(item, true);

        assert_eq!(kind, FeedbackKind::Correct);
        assert_eq!(updated.correct, 6);
        assert_eq!(updated.streak, 3);
        assert_eq!(updated.lapses, 2);
        assert_eq!(updated.last_answered, Some(now()));
        assert_eq!(updated.next_review, Some(now() + Duration::days(3)));
        assert!(updated.next_review > updated.last_answered);
    }

    #[test]
    fn correct_answer_clears_leech() {
        let mut item = item_with(0, 0);
        item.is_leech = true;
        let (updated, _) = answer(item, true);
        assert!(!updated.is_leech);
        assert_eq!(updated.lapses, 0);
    }

    #[test]
    fn long_streak_decays_on_miss() {
        let (updated, kind) = answer(item_with(7, 0), false);
        assert_eq!(kind, FeedbackKind::Incorrect);
        assert_eq!(updated.streak, 3);
        assert_eq!(updated.incorrect, 1);
        assert_eq!(updated.lapses, 1);
        assert_eq!(updated.next_review, Some(now()));

        let (updated, _) = answer(item_with(3, 0), false);
        assert_eq!(updated.streak, 1);
    }

    #[test]
    fn short_streak_resets_on_miss() {
        for streak in 0..=2 {
            let (updated, _) = answer(item_with(streak, 0), false);
            assert_eq!(updated.streak, 0);
        }
    }

    #[test]
    fn fifth_lapse_sets_item_aside() {
        let (updated, kind) = answer(item_with(0, 4), false);
        assert_eq!(kind, FeedbackKind::SetAside);
        assert_eq!(updated.lapses, 5);
        assert!(updated.is_leech);
        assert_eq!(updated.next_review, Some(now() + Duration::days(3650)));
    }

    #[test]
    fn fourth_lapse_is_not_a_leech() {
        let (updated, kind) = answer(item_with(0, 3), false);
        assert_eq!(kind, FeedbackKind::Incorrect);
        assert!(!updated.is_leech);
    }
}
