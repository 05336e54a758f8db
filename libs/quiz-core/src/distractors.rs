//! Wrong-answer options for multiple-choice questions.
//!
//! Candidates are ranked by how many tags they share with the correct item,
//! with extra weight for shared region, colour and layout tags, so the
//! options look plausible next to the right answer.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::category::Category;
use crate::types::{Item, ItemPool};

/// Number of best-scoring candidates shuffled before picking.
pub const TOP_CANDIDATES: usize = 30;

/// Extra score for a shared tag, on top of the base point every shared tag earns.
fn tag_bonus(tag: &str) -> usize {
    if tag.starts_with("region:") {
        3
    } else if tag.starts_with("colors:") || tag.starts_with("layout:") {
        2
    } else {
        0
    }
}

/// Similarity of `other` to `correct` by tag overlap.
pub fn tag_overlap_score(correct: &Item, other: &Item) -> usize {
    let correct_tags: HashSet<&str> = correct.tags.iter().map(String::as_str).collect();
    let other_tags: HashSet<&str> = other.tags.iter().map(String::as_str).collect();

    correct_tags
        .intersection(&other_tags)
        .map(|tag| 1 + tag_bonus(tag))
        .sum()
}

/// Pick `count` distinct wrong-answer names for `correct`.
///
/// Items whose code is in `exclude_codes` are skipped during ranking. When
/// ranking cannot fill `count`, the rest is drawn at random from the whole
/// pool.
pub fn generate_distractors<R: Rng + ?Sized>(
    correct: &Item,
    pool: &ItemPool,
    count: usize,
    exclude_codes: &[&str],
    rng: &mut R,
) -> Vec<String> {
    generate_distractors_in(&Category::All, correct, pool, count, exclude_codes, rng)
}

/// Like [`generate_distractors`], restricting ranked candidates to the
/// category's region when it is a region category.
pub fn generate_distractors_in<R: Rng + ?Sized>(
    category: &Category,
    correct: &Item,
    pool: &ItemPool,
    count: usize,
    exclude_codes: &[&str],
    rng: &mut R,
) -> Vec<String> {
    let excluded: HashSet<&str> = exclude_codes.iter().copied().collect();
    let region_tag = category.region_tag();

    let mut scored: Vec<(&Item, usize)> = pool
        .iter()
        .filter(|item| item.name != correct.name && !excluded.contains(item.code.as_str()))
        .filter(|item| region_tag.as_deref().map_or(true, |tag| item.has_tag(tag)))
        .map(|item| (item, tag_overlap_score(correct, item)))
        .collect();

    // Stable sort keeps pool order among equal scores before the shuffle.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(TOP_CANDIDATES);
    scored.shuffle(rng);

    let mut chosen: Vec<String> = Vec::with_capacity(count);
    for (item, _) in scored {
        if chosen.len() == count {
            break;
        }
        if !chosen.contains(&item.name) {
            chosen.push(item.name.clone());
        }
    }

    if chosen.len() < count {
        let mut remaining: Vec<&str> = pool
            .iter()
            .map(|item| item.name.as_str())
            .filter(|name| *name != correct.name && !chosen.iter().any(|c| c == name))
            .collect();

        while chosen.len() < count && !remaining.is_empty() {
            let index = rng.gen_range(0..remaining.len());
            let name = remaining.swap_remove(index);
            if !chosen.iter().any(|c| c == name) {
                chosen.push(name.to_string());
            }
        }
    }

    chosen
}
