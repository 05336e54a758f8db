//! Answer matching for free-response questions.

use crate::types::{Item, MatchingMode};
use serde::{Deserialize, Serialize};

/// Minimum similarity for a fuzzy answer to be accepted.
pub const FUZZY_THRESHOLD: f64 = 0.8;

/// Result of comparing a typed answer against an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Best similarity score between 0.0 and 1.0 across all candidates.
    pub similarity: f64,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
    /// Candidate answer (name or alias) that scored best.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl MatchResult {
    fn rejected(mode: MatchingMode) -> Self {
        Self {
            is_correct: false,
            similarity: 0.0,
            matching_mode: mode,
            matched: None,
        }
    }
}

/// Compare a typed guess to an item's name and aliases.
pub fn check_answer(guess: &str, item: &Item, mode: MatchingMode) -> MatchResult {
    let guess = guess.trim().to_lowercase();
    if guess.is_empty() {
        return MatchResult::rejected(mode);
    }

    let mut candidates = std::iter::once(&item.name).chain(item.aliases.iter());

    match mode {
        MatchingMode::Strict => candidates
            .find(|candidate| candidate.trim().to_lowercase() == guess)
            .map(|candidate| MatchResult {
                is_correct: true,
                similarity: 1.0,
                matching_mode: mode,
                matched: Some(candidate.clone()),
            })
            .unwrap_or_else(|| MatchResult::rejected(mode)),
        MatchingMode::Fuzzy => {
            let mut best = MatchResult::rejected(mode);
            for candidate in candidates {
                let similarity = normalized_similarity(&guess, &candidate.to_lowercase());
                if best.matched.is_none() || similarity > best.similarity {
                    best.similarity = similarity;
                    best.matched = Some(candidate.clone());
                }
            }
            best.is_correct = best.similarity >= FUZZY_THRESHOLD;
            best
        }
    }
}

/// Whether `guess` is an acceptable answer for `item`.
pub fn is_correct_answer(guess: &str, item: &Item, strict: bool) -> bool {
    check_answer(guess, item, MatchingMode::from_strict(strict)).is_correct
}

/// Fuzzy check of a guess against a single expected name.
pub fn matches_name(guess: &str, expected: &str) -> bool {
    let guess = guess.trim().to_lowercase();
    if guess.is_empty() {
        return false;
    }
    normalized_similarity(&guess, &expected.to_lowercase()) >= FUZZY_THRESHOLD
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Calculate normalized similarity (0.0 to 1.0) based on Levenshtein distance.
///
/// Lengths are counted in characters, so accented names score the same as
/// their ASCII spelling would.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}
