//! Choosing the next item to ask about.
//!
//! Selection avoids the item just shown, prefers items outside the recent
//! history, prefers due items among those, and finally samples with a weight
//! that favours items the learner struggles with.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::types::{Item, ItemPool, RecentHistory};

/// Weight multiplier for the incorrect/correct ratio.
const STRUGGLE_WEIGHT: f64 = 10.0;
/// Flat bonus for items that have never been answered.
const UNSEEN_BONUS: f64 = 2.0;

/// Sampling weight of an item: `1 + 10 * incorrect / (correct + 1)`, plus 2 if unseen.
pub fn selection_weight(item: &Item) -> f64 {
    let struggle = f64::from(item.incorrect) / (f64::from(item.correct) + 1.0);
    let mut weight = 1.0 + struggle * STRUGGLE_WEIGHT;
    if item.is_unseen() {
        weight += UNSEEN_BONUS;
    }
    weight
}

/// Roulette-wheel selection over `candidates` by [`selection_weight`].
pub fn run_weighted_selection<'a, R: Rng + ?Sized>(
    candidates: &[&'a Item],
    rng: &mut R,
) -> Option<&'a Item> {
    let last = *candidates.last()?;

    let weights: Vec<f64> = candidates.iter().map(|item| selection_weight(item)).collect();
    let total: f64 = weights.iter().sum();
    let mut draw = rng.gen::<f64>() * total;

    for (item, weight) in candidates.iter().zip(&weights) {
        draw -= weight;
        if draw < 0.0 {
            return Some(*item);
        }
    }

    // Rounding can leave a tiny positive remainder.
    Some(last)
}

/// Pick the next item to present, or `None` when nothing is available.
pub fn select_next<'a, R: Rng + ?Sized>(
    pool: &'a ItemPool,
    history: &RecentHistory,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a Item> {
    let available: Vec<&Item> = pool.iter().filter(|item| !item.is_leech).collect();
    if available.is_empty() {
        return None;
    }

    let primary: Vec<&Item> = match history.last() {
        Some(last_code) if available.len() > 1 => {
            let without_last: Vec<&Item> = available
                .iter()
                .copied()
                .filter(|item| item.code != last_code)
                .collect();
            if without_last.is_empty() {
                available
            } else {
                without_last
            }
        }
        _ => available,
    };

    let not_recent: Vec<&Item> = primary
        .iter()
        .copied()
        .filter(|item| !history.contains(&item.code))
        .collect();

    let candidates = if not_recent.is_empty() { primary } else { not_recent };
    let due: Vec<&Item> = candidates
        .iter()
        .copied()
        .filter(|item| item.is_due(now))
        .collect();

    if due.is_empty() {
        run_weighted_selection(&candidates, rng)
    } else {
        run_weighted_selection(&due, rng)
    }
}
