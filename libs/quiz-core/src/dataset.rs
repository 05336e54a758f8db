//! Static item records and merging them with saved progress.

use serde::{Deserialize, Serialize};

use crate::types::{Item, ItemPool};

/// Static fields of an item as shipped in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub code: String,
    #[serde(rename = "country", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ItemRecord {
    /// Fresh item with zeroed stats.
    pub fn to_item(&self) -> Item {
        Item::new(self.code.clone(), self.name.clone())
            .with_aliases(self.aliases.iter().cloned())
            .with_tags(self.tags.iter().cloned())
    }

    /// Saved item with its static fields refreshed from this record.
    fn refresh(&self, saved: &Item) -> Item {
        Item {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            tags: self.tags.clone(),
            ..saved.clone()
        }
    }
}

/// Build the working pool from the dataset and any previously saved pool.
///
/// Records are matched by code. Matched items keep their stats and take the
/// dataset's name, aliases and tags; new records start with zeroed stats.
/// Saved items that no longer appear in the dataset are dropped.
pub fn merge_saved(fresh: &[ItemRecord], saved: Option<&ItemPool>) -> ItemPool {
    let mut carried = 0usize;
    let pool: ItemPool = fresh
        .iter()
        .map(|record| match saved.and_then(|pool| pool.get(&record.code)) {
            Some(previous) => {
                carried += 1;
                record.refresh(previous)
            }
            None => record.to_item(),
        })
        .collect();

    tracing::debug!(
        items = pool.len(),
        carried,
        "merged dataset with saved progress"
    );
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn records() -> Vec<ItemRecord> {
        serde_json::from_str(
            r#"[
                {"code": "FR", "country": "France", "aliases": [],
                 "tags": ["region:europe"], "borders": ["Spain"]},
                {"code": "CI", "country": "Côte d'Ivoire", "aliases": ["Ivory Coast"],
                 "tags": ["region:africa"]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn fresh_dataset_starts_zeroed() {
        let pool = merge_saved(&records(), None);
        assert_eq!(pool.len(), 2);
        let item = pool.get("CI").unwrap();
        assert_eq!(item.aliases, vec!["Ivory Coast".to_string()]);
        assert!(item.is_unseen());
        assert_eq!(item.next_review, None);
    }

    #[test]
    fn saved_stats_survive_and_static_fields_refresh() {
        let answered = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let mut old = Item::new("FR", "French Republic").with_tags(["region:old"]);
        old.correct = 7;
        old.streak = 3;
        old.last_answered = Some(answered);
        let stale = Item::new("YU", "Yugoslavia");
        let saved = ItemPool::from_items([old, stale]);

        let pool = merge_saved(&records(), Some(&saved));

        let france = pool.get("FR").unwrap();
        assert_eq!(france.name, "France");
        assert_eq!(france.tags, vec!["region:europe".to_string()]);
        assert_eq!(france.correct, 7);
        assert_eq!(france.streak, 3);
        assert_eq!(france.last_answered, Some(answered));
        assert!(pool.get("YU").is_none());
        assert!(pool.get("CI").unwrap().is_unseen());
    }
}
