//! Quiz categories used to narrow the pool before selection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Item, ItemPool};

/// Which part of the pool a quiz draws from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Category {
    /// Every item.
    #[default]
    All,
    /// Items that have been scheduled and whose review time has passed.
    Review,
    /// Items carrying the tag `<kind>:<value>`, e.g. `region:europe`.
    Tag { kind: String, value: String },
}

impl Category {
    pub fn region(value: impl Into<String>) -> Self {
        Self::Tag {
            kind: "region".to_string(),
            value: value.into(),
        }
    }

    /// The full `kind:value` tag for tag categories.
    pub fn tag(&self) -> Option<String> {
        match self {
            Self::Tag { kind, value } => Some(format!("{kind}:{value}")),
            _ => None,
        }
    }

    /// The region tag when this category is a region filter.
    pub fn region_tag(&self) -> Option<String> {
        match self {
            Self::Tag { kind, .. } if kind == "region" => self.tag(),
            _ => None,
        }
    }

    pub fn matches(&self, item: &Item, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            // Unscheduled items are not "up for review" here, unlike `Item::is_due`.
            Self::Review => item.next_review.is_some_and(|next| next <= now),
            Self::Tag { .. } => self.tag().is_some_and(|tag| item.has_tag(&tag)),
        }
    }

    /// Narrow a pool to the items in this category.
    pub fn filter(&self, pool: &ItemPool, now: DateTime<Utc>) -> ItemPool {
        if *self == Self::All {
            return pool.clone();
        }
        pool.iter()
            .filter(|item| self.matches(item, now))
            .cloned()
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Review => f.write_str("review"),
            Self::Tag { kind, value } => write!(f, "{kind}:{value}"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            "review" => Ok(Self::Review),
            other => match other.split_once(':') {
                Some((kind, value)) if !kind.is_empty() && !value.is_empty() => Ok(Self::Tag {
                    kind: kind.to_string(),
                    value: value.to_string(),
                }),
                _ => Err(format!(
                    "invalid category '{other}': expected all, review or <kind>:<value>"
                )),
            },
        }
    }
}
