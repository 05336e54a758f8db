//! Persistence collaborator for the item pool.
//!
//! The core never calls a store itself; the host loads the pool once at
//! startup and saves it whenever an answer changes it.

use std::sync::Mutex;

use crate::error::StoreError;
use crate::types::ItemPool;

/// Key-value style storage for a single saved pool.
pub trait PoolStore {
    /// Load the saved pool, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<ItemPool>, StoreError>;

    /// Replace the saved pool.
    fn save(&self, pool: &ItemPool) -> Result<(), StoreError>;

    /// Forget any saved progress.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory store holding the pool as serialized JSON, like a browser's
/// local storage slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored JSON, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl PoolStore for MemoryStore {
    fn load(&self) -> Result<Option<ItemPool>, StoreError> {
        match self.raw() {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, pool: &ItemPool) -> Result<(), StoreError> {
        let json = serde_json::to_string(pool)?;
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(json);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}
