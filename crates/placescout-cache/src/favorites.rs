use std::collections::HashSet;

use rusqlite::params;
use tracing::warn;

use crate::items::ItemStore;
use crate::models::Item;
use crate::{Result, StoreHandle};

/// Per-user favorite associations, keyed by `(user_id, item_id)`.
///
/// Favorites reference items by id only - they are never cascaded and
/// survive independently of whether the item is still cached. Both
/// mutations are idempotent; the surrounding request layer cannot
/// guarantee exactly-once delivery.
pub struct FavoritesStore<'a> {
    handle: &'a StoreHandle,
}

impl<'a> FavoritesStore<'a> {
    pub fn new(handle: &'a StoreHandle) -> Self {
        Self { handle }
    }

    /// Mark items as favorites. Pairs that already exist, or repeat within
    /// `item_ids`, are absorbed silently - set union, not an error.
    pub fn add(&self, user_id: &str, item_ids: &[String]) -> Result<()> {
        self.update(
            "INSERT OR IGNORE INTO history (user_id, item_id) VALUES (?1, ?2)",
            user_id,
            item_ids,
        )
    }

    /// Unmark items. Removing a pair that was never added is a no-op.
    pub fn remove(&self, user_id: &str, item_ids: &[String]) -> Result<()> {
        self.update(
            "DELETE FROM history WHERE user_id = ?1 AND item_id = ?2",
            user_id,
            item_ids,
        )
    }

    /// Both mutations are the same statement-per-id loop. A row that fails
    /// to execute is logged and skipped; the rest of the batch proceeds.
    fn update(&self, sql: &str, user_id: &str, item_ids: &[String]) -> Result<()> {
        let mut stmt = self.handle.conn().prepare(sql)?;
        for item_id in item_ids {
            if let Err(e) = stmt.execute(params![user_id, item_id]) {
                warn!("Skipping favorite row ({}, {}): {}", user_id, item_id, e);
            }
        }
        Ok(())
    }

    /// Ids of everything the user has favorited. Empty for an unknown
    /// user - never an error.
    pub fn item_ids(&self, user_id: &str) -> Result<HashSet<String>> {
        let mut stmt = self
            .handle
            .conn()
            .prepare("SELECT item_id FROM history WHERE user_id = ?1")?;
        let rows = stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?;

        let mut ids = HashSet::new();
        for row in rows {
            ids.insert(row?);
        }
        Ok(ids)
    }

    /// Hydrated favorite items. Ids with no cached item are dropped from
    /// the result; the association itself is kept.
    pub fn items(&self, user_id: &str) -> Result<Vec<Item>> {
        let ids = self.item_ids(user_id)?;
        ItemStore::new(self.handle).get_many(&ids)
    }
}
