//! Progress summary across the pool.

use serde::{Deserialize, Serialize};

use crate::types::ItemPool;

/// Streak above which an item counts as mastered.
pub const MASTERED_STREAK: u32 = 5;

/// Counts of items by how well they are known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub mastered: usize,
    pub learning: usize,
    pub needs_practice: usize,
    pub leeches: usize,
    /// Name of the item with the longest streak.
    pub best_known: Option<String>,
    /// Name of the item with the shortest streak.
    pub worst_known: Option<String>,
}

impl ProgressSummary {
    pub fn from_pool(pool: &ItemPool) -> Self {
        let mut summary = Self {
            total: pool.len(),
            ..Self::default()
        };

        for item in pool.iter() {
            match item.streak {
                0 => summary.needs_practice += 1,
                s if s > MASTERED_STREAK => summary.mastered += 1,
                _ => summary.learning += 1,
            }
            if item.is_leech {
                summary.leeches += 1;
            }
        }

        // First maximum / last minimum, matching a stable descending sort.
        let mut best: Option<(&str, u32)> = None;
        let mut worst: Option<(&str, u32)> = None;
        for item in pool.iter() {
            if best.map_or(true, |(_, s)| item.streak > s) {
                best = Some((item.name.as_str(), item.streak));
            }
            if worst.map_or(true, |(_, s)| item.streak <= s) {
                worst = Some((item.name.as_str(), item.streak));
            }
        }
        summary.best_known = best.map(|(name, _)| name.to_string());
        summary.worst_known = worst.map(|(name, _)| name.to_string());

        summary
    }
}
