//! Core flag quiz library.
//!
//! Provides:
//! - Weighted next-item selection with recent-history avoidance
//! - Streak-based spaced repetition with leech retirement
//! - Similarity-ranked distractors for multiple choice
//! - Typed answer matching (Levenshtein distance)
//! - Longest border-chain search and the chain quiz run
//! - Shared types (Item, ItemPool, RecentHistory, Feedback, etc.)

pub mod algorithm;
pub mod category;
pub mod clock;
pub mod dataset;
pub mod distractors;
pub mod error;
pub mod matching;
pub mod routes;
pub mod selection;
pub mod stats;
pub mod store;
pub mod types;

pub use algorithm::basic::BasicPolicy;
pub use algorithm::streak::StreakPolicy;
pub use algorithm::{
    get_policy, next_review_delay, record_answer, record_answer_with, ReviewPolicy,
};
pub use category::Category;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dataset::{merge_saved, ItemRecord};
pub use distractors::{generate_distractors, generate_distractors_in};
pub use error::{Result, RouteError, StoreError};
pub use matching::{
    check_answer, is_correct_answer, levenshtein_distance, normalized_similarity, MatchResult,
};
pub use routes::{
    find_longest_chain, haversine_km, BorderGraph, Chain, ChainRun, ChainStep, Coordinates,
    Country, SearchLimit,
};
pub use selection::{run_weighted_selection, select_next};
pub use stats::ProgressSummary;
pub use store::{MemoryStore, PoolStore};
pub use types::{
    AnswerOutcome, AnswerReason, Feedback, FeedbackKind, Item, ItemKey, ItemPool, MatchingMode,
    RecentHistory,
};
