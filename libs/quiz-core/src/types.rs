//! Core types for the quiz engine.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of codes kept in the recent-history window.
pub const RECENT_HISTORY_CAPACITY: usize = 5;

/// A single learnable flashcard unit with its performance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub lapses: u32,
    #[serde(default)]
    pub is_leech: bool,
    #[serde(default)]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_answered: Option<DateTime<Utc>>,
}

impl Item {
    /// Create a fresh item with zeroed stats.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            aliases: Vec::new(),
            tags: Vec::new(),
            correct: 0,
            incorrect: 0,
            streak: 0,
            lapses: 0,
            is_leech: false,
            next_review: None,
            last_answered: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the item is eligible for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review {
            None => true,
            Some(next) => next <= now,
        }
    }

    /// Whether the item has never been answered.
    pub fn is_unseen(&self) -> bool {
        self.correct == 0 && self.incorrect == 0
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Reset performance stats, keeping static fields.
    pub fn reset_stats(&mut self) {
        self.correct = 0;
        self.incorrect = 0;
        self.streak = 0;
        self.lapses = 0;
        self.is_leech = false;
        self.next_review = None;
        self.last_answered = None;
    }
}

/// Lookup key for an item inside a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKey<'a> {
    Code(&'a str),
    Name(&'a str),
}

impl ItemKey<'_> {
    fn matches(&self, item: &Item) -> bool {
        match self {
            Self::Code(code) => item.code == *code,
            Self::Name(name) => item.name == *name,
        }
    }
}

/// Collection of items, unique by code.
///
/// Entries are shared behind `Arc`, so cloning a pool is cheap and updating
/// one item only copies that item. Deserializing goes through
/// [`ItemPool::from_items`], so a saved file with repeated codes still loads
/// as a unique pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Item>", into = "Vec<Item>")]
pub struct ItemPool {
    items: Vec<Arc<Item>>,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool, keeping the first item seen for each code.
    pub fn from_items<I: IntoIterator<Item = Item>>(items: I) -> Self {
        let mut pool = Self::new();
        for item in items {
            if pool.get(&item.code).is_none() {
                pool.items.push(Arc::new(item));
            }
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().map(|item| item.as_ref())
    }

    pub fn get(&self, code: &str) -> Option<&Item> {
        self.find(ItemKey::Code(code))
    }

    pub fn find(&self, key: ItemKey<'_>) -> Option<&Item> {
        self.iter().find(|item| key.matches(item))
    }

    pub(crate) fn position(&self, key: ItemKey<'_>) -> Option<usize> {
        self.items.iter().position(|item| key.matches(item))
    }

    /// Return a new pool where the item at `index` has been modified.
    ///
    /// Only the touched entry is copied; every other entry is shared with `self`.
    pub(crate) fn with_updated<F>(&self, index: usize, update: F) -> Self
    where
        F: FnOnce(&mut Item),
    {
        let mut items = self.items.clone();
        update(Arc::make_mut(&mut items[index]));
        Self { items }
    }

    /// Copy of the pool with every item's stats reset.
    pub fn with_stats_reset(&self) -> Self {
        Self::from_items(self.iter().cloned().map(|mut item| {
            item.reset_stats();
            item
        }))
    }

    /// Whether two pools share the same allocation for `code`.
    pub fn shares_item(&self, other: &Self, code: &str) -> bool {
        let lhs = self.items.iter().find(|item| item.code == code);
        let rhs = other.items.iter().find(|item| item.code == code);
        match (lhs, rhs) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl FromIterator<Item> for ItemPool {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::from_items(iter)
    }
}

impl From<Vec<Item>> for ItemPool {
    fn from(items: Vec<Item>) -> Self {
        Self::from_items(items)
    }
}

impl From<ItemPool> for Vec<Item> {
    fn from(pool: ItemPool) -> Self {
        pool.items
            .into_iter()
            .map(|item| Arc::try_unwrap(item).unwrap_or_else(|shared| (*shared).clone()))
            .collect()
    }
}

/// Bounded FIFO of the codes most recently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHistory {
    codes: VecDeque<String>,
    capacity: usize,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::with_capacity(RECENT_HISTORY_CAPACITY)
    }
}

impl RecentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a shown code, dropping the oldest entry when full.
    pub fn push(&mut self, code: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        while self.codes.len() >= self.capacity {
            self.codes.pop_front();
        }
        self.codes.push_back(code.into());
    }

    /// The most recently shown code.
    pub fn last(&self) -> Option<&str> {
        self.codes.back().map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.codes.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for RecentHistory {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut history = Self::default();
        for code in iter {
            history.push(code);
        }
        history
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Exact case-insensitive match against the name or an alias.
    Strict,
    /// Edit-distance similarity at or above the fuzzy threshold.
    #[default]
    Fuzzy,
}

impl MatchingMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Fuzzy }
    }
}

/// Why an answer is being recorded. Only changes feedback wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerReason {
    #[default]
    Answered,
    Skipped,
}

/// Kind of feedback produced after recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Correct,
    Incorrect,
    Skipped,
    /// The item crossed the leech threshold and was retired from rotation.
    SetAside,
    /// The requested item is not in the pool.
    NotFound,
}

impl FeedbackKind {
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Feedback shown to the user after an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
    /// The correct answer, revealed after a miss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, answer: Option<&str>) -> Self {
        let text = match kind {
            FeedbackKind::Correct => "Correct!",
            FeedbackKind::Incorrect => "Incorrect. The answer was:",
            FeedbackKind::Skipped => "Skipped. The answer was:",
            FeedbackKind::SetAside => {
                "This one seems tricky, so we'll set it aside for now. The answer was:"
            }
            FeedbackKind::NotFound => "Error: item not found.",
        };
        let answer = match kind {
            FeedbackKind::Correct | FeedbackKind::NotFound => None,
            _ => answer.map(str::to_string),
        };
        Self {
            kind,
            text: text.to_string(),
            answer,
        }
    }
}

/// Result of recording an answer: feedback plus the updated pool.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub feedback: Feedback,
    pub pool: ItemPool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_item() -> Item {
        Item::new("FR", "France")
            .with_aliases(["French Republic"])
            .with_tags(["region:europe", "colors:blue"])
    }

    #[test]
    fn history_drops_oldest_when_full() {
        let mut history = RecentHistory::new();
        for code in ["A", "B", "C", "D", "E", "F"] {
            history.push(code);
        }
        assert_eq!(history.len(), RECENT_HISTORY_CAPACITY);
        assert!(!history.contains("A"));
        assert_eq!(history.last(), Some("F"));
        assert_eq!(history.codes().collect::<Vec<_>>(), vec!["B", "C", "D", "E", "F"]);
    }

    #[test]
    fn pool_is_unique_by_code() {
        let pool = ItemPool::from_items([
            Item::new("FR", "France"),
            Item::new("FR", "Duplicate"),
            Item::new("DE", "Germany"),
        ]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get("FR").map(|i| i.name.as_str()), Some("France"));
    }

    #[test]
    fn updating_one_item_shares_the_rest() {
        let pool = ItemPool::from_items([Item::new("FR", "France"), Item::new("DE", "Germany")]);
        let index = pool.position(ItemKey::Code("FR")).unwrap();
        let updated = pool.with_updated(index, |item| item.correct += 1);

        assert_eq!(pool.get("FR").unwrap().correct, 0);
        assert_eq!(updated.get("FR").unwrap().correct, 1);
        assert!(updated.shares_item(&pool, "DE"));
        assert!(!updated.shares_item(&pool, "FR"));
    }

    #[test]
    fn due_when_never_scheduled_or_past() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut item = sample_item();
        assert!(item.is_due(now));

        item.next_review = Some(now);
        assert!(item.is_due(now));

        item.next_review = Some(now + chrono::Duration::hours(1));
        assert!(!item.is_due(now));
    }

    #[test]
    fn pool_round_trips_through_json() {
        let answered = Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap();
        let mut reviewed = sample_item();
        reviewed.correct = 4;
        reviewed.incorrect = 2;
        reviewed.streak = 3;
        reviewed.lapses = 1;
        reviewed.last_answered = Some(answered);
        reviewed.next_review = Some(answered + chrono::Duration::days(3));
        let mut leech = Item::new("BT", "Bhutan");
        leech.is_leech = true;
        let pool = ItemPool::from_items([reviewed, leech, Item::new("NP", "Nepal")]);

        let json = serde_json::to_string(&pool).unwrap();
        let restored: ItemPool = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, pool);
        assert_eq!(restored.get("NP").unwrap().next_review, None);
    }

    #[test]
    fn saved_duplicates_collapse_to_first_code() {
        let json = r#"[
            {"code":"FR","name":"France","correct":3},
            {"code":"FR","name":"France","correct":9},
            {"code":"DE","name":"Germany"}
        ]"#;
        let pool: ItemPool = serde_json::from_str(json).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get("FR").unwrap().correct, 3);
        let value = serde_json::to_value(&pool).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn persisted_item_uses_camel_case_and_defaults() {
        let json = r#"[{
            "code": "JP",
            "name": "Japan",
            "correct": 2,
            "incorrect": 1,
            "streak": 1,
            "nextReview": null,
            "lastAnswered": null
        }]"#;
        let pool: ItemPool = serde_json::from_str(json).unwrap();
        let item = pool.get("JP").unwrap();
        assert_eq!(item.correct, 2);
        assert_eq!(item.lapses, 0);
        assert!(!item.is_leech);
        assert!(item.tags.is_empty());

        let value = serde_json::to_value(item).unwrap();
        assert!(value.get("isLeech").is_some());
        assert!(value.get("nextReview").unwrap().is_null());
    }

    #[test]
    fn feedback_reveals_answer_only_on_miss() {
        assert_eq!(Feedback::new(FeedbackKind::Correct, Some("France")).answer, None);
        assert_eq!(
            Feedback::new(FeedbackKind::Skipped, Some("France")).answer.as_deref(),
            Some("France")
        );
    }
}
