//! Quiz session: owns the authoritative pool and recent history, and saves
//! after every answer.

use quiz_core::{
    check_answer, generate_distractors_in, merge_saved, record_answer_with, select_next,
    AnswerReason, Category, Clock, Feedback, FeedbackKind, ItemKey, ItemPool, ItemRecord,
    MatchingMode, PoolStore, ProgressSummary, RecentHistory, ReviewPolicy, StreakPolicy,
};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;

/// Options shown in a multiple-choice question, the answer included.
pub const CHOICE_COUNT: usize = 4;

/// A question ready to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub code: String,
    pub answer: String,
    /// Shuffled options; empty for free response.
    pub choices: Vec<String>,
}

/// What the learner did with a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Typed(String),
    Choice(String),
    Skip,
}

pub struct QuizSession<S, C, R> {
    pool: ItemPool,
    history: RecentHistory,
    category: Category,
    matching: MatchingMode,
    policy: Box<dyn ReviewPolicy>,
    store: S,
    clock: C,
    rng: R,
}

impl<S, C, R> QuizSession<S, C, R>
where
    S: PoolStore,
    C: Clock,
    R: Rng,
{
    /// Merge the dataset with whatever the store has saved.
    pub fn open(records: &[ItemRecord], store: S, clock: C, rng: R) -> Result<Self> {
        let saved = store.load()?;
        let pool = merge_saved(records, saved.as_ref());
        tracing::info!(items = pool.len(), resumed = saved.is_some(), "opened quiz session");

        Ok(Self {
            pool,
            history: RecentHistory::new(),
            category: Category::All,
            matching: MatchingMode::default(),
            policy: Box::new(StreakPolicy::default()),
            store,
            clock,
            rng,
        })
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_matching(mut self, matching: MatchingMode) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_policy(mut self, policy: Box<dyn ReviewPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    pub fn history(&self) -> &RecentHistory {
        &self.history
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary::from_pool(&self.pool)
    }

    /// Pick the next item in the session's category, or `None` when the
    /// category has nothing left to ask.
    pub fn next_question(&mut self, with_choices: bool) -> Option<Question> {
        let now = self.clock.now();
        let scope = self.category.filter(&self.pool, now);
        let item = select_next(&scope, &self.history, now, &mut self.rng)?.clone();
        self.history.push(item.code.clone());

        let mut choices = Vec::new();
        if with_choices {
            let recent: Vec<&str> = self.history.codes().collect();
            choices = generate_distractors_in(
                &self.category,
                &item,
                &self.pool,
                CHOICE_COUNT - 1,
                &recent,
                &mut self.rng,
            );
            choices.push(item.name.clone());
            choices.shuffle(&mut self.rng);
        }

        Some(Question {
            code: item.code,
            answer: item.name,
            choices,
        })
    }

    /// Record the response for `code`, persist the new pool and return feedback.
    pub fn answer(&mut self, code: &str, response: Response) -> Result<Feedback> {
        let now = self.clock.now();
        let (was_correct, reason) = match (&response, self.pool.get(code)) {
            (Response::Skip, _) => (false, AnswerReason::Skipped),
            (Response::Typed(guess), Some(item)) => (
                check_answer(guess, item, self.matching).is_correct,
                AnswerReason::Answered,
            ),
            (Response::Choice(choice), Some(item)) => {
                (*choice == item.name, AnswerReason::Answered)
            }
            (_, None) => (false, AnswerReason::Answered),
        };

        let outcome = record_answer_with(
            self.policy.as_ref(),
            &self.pool,
            ItemKey::Code(code),
            was_correct,
            reason,
            now,
        );
        if outcome.feedback.kind != FeedbackKind::NotFound {
            self.pool = outcome.pool;
            self.store.save(&self.pool)?;
        }
        Ok(outcome.feedback)
    }

    /// Forget saved progress and start every item from zero.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.pool = self.pool.with_stats_reset();
        self.history.clear();
        tracing::info!("progress reset");
        Ok(())
    }
}
