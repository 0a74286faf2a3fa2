use std::collections::HashSet;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::warn;

use crate::models::Item;
use crate::{Result, StoreError, StoreHandle};

/// Read/write access to cached items and their category rows.
pub struct ItemStore<'a> {
    handle: &'a StoreHandle,
}

impl<'a> ItemStore<'a> {
    pub fn new(handle: &'a StoreHandle) -> Self {
        Self { handle }
    }

    /// Insert an item and its category rows unless the id is already cached.
    ///
    /// First write wins: re-inserting an existing id leaves every stored
    /// field untouched. Safe to call repeatedly for the same provider
    /// result, including from overlapping requests.
    pub fn upsert(&self, item: &Item) -> Result<()> {
        let conn = self.handle.conn();
        conn.execute(
            "INSERT OR IGNORE INTO items
             (item_id, name, rating, address, image_url, url, distance, cached_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.item_id,
                item.name,
                item.rating,
                item.address,
                item.image_url,
                item.url,
                item.distance,
                Utc::now().timestamp(),
            ],
        )?;

        let mut stmt = conn
            .prepare("INSERT OR IGNORE INTO categories (item_id, category) VALUES (?1, ?2)")?;
        for category in &item.categories {
            stmt.execute(params![item.item_id, category])?;
        }

        Ok(())
    }

    /// Full hydration of one cached item, categories included.
    pub fn get(&self, item_id: &str) -> Result<Item> {
        let conn = self.handle.conn();
        let row = conn
            .query_row(
                "SELECT item_id, name, rating, address, image_url, url, distance
                 FROM items WHERE item_id = ?1",
                params![item_id],
                Self::row_to_item,
            )
            .optional()?;

        match row {
            Some(mut item) => {
                item.categories = self.categories(&item.item_id)?;
                Ok(item)
            }
            None => Err(StoreError::NotFound(item_id.to_string())),
        }
    }

    /// Category set for an item. Empty when the item has no categories or
    /// is not cached at all - never an error.
    pub fn categories(&self, item_id: &str) -> Result<HashSet<String>> {
        let conn = self.handle.conn();
        let mut stmt = conn.prepare("SELECT category FROM categories WHERE item_id = ?1")?;
        let rows = stmt.query_map(params![item_id], |row| row.get::<_, String>(0))?;

        let mut categories = HashSet::new();
        for row in rows {
            categories.insert(row?);
        }
        Ok(categories)
    }

    /// Batch hydration. Ids with no cached row are skipped silently; a row
    /// that fails to load is logged and skipped. The batch returns its
    /// best-effort remainder instead of failing wholesale.
    pub fn get_many(&self, item_ids: &HashSet<String>) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        for item_id in item_ids {
            match self.get(item_id) {
                Ok(item) => items.push(item),
                Err(StoreError::NotFound(_)) => {}
                Err(e) => warn!("Skipping item {}: {}", item_id, e),
            }
        }
        Ok(items)
    }

    fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
        Ok(Item {
            item_id: row.get(0)?,
            name: row.get(1)?,
            rating: row.get(2)?,
            address: row.get(3)?,
            image_url: row.get(4)?,
            url: row.get(5)?,
            distance: row.get(6)?,
            categories: HashSet::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(id: &str) -> Item {
        Item {
            item_id: id.to_string(),
            name: format!("Place {}", id),
            rating: 4.5,
            address: "375 Valencia St, San Francisco, CA 94103".to_string(),
            image_url: format!("https://img.example.com/{}.jpg", id),
            url: format!("https://example.com/biz/{}", id),
            distance: 812.3,
            categories: ["Jazz & Blues", "Bars"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    #[test]
    fn test_upsert_then_get_round_trips() {
        let handle = StoreHandle::in_memory().unwrap();
        let store = ItemStore::new(&handle);
        let item = sample_item("tm-1");

        store.upsert(&item).unwrap();
        assert_eq!(store.get("tm-1").unwrap(), item);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let handle = StoreHandle::in_memory().unwrap();
        let store = ItemStore::new(&handle);
        let item = sample_item("tm-1");

        store.upsert(&item).unwrap();
        store.upsert(&item).unwrap();

        let count: i64 = handle
            .conn()
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        let pairs: i64 = handle
            .conn()
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .unwrap();
        assert_eq!(pairs, 2);
    }

    #[test]
    fn test_first_write_wins() {
        let handle = StoreHandle::in_memory().unwrap();
        let store = ItemStore::new(&handle);

        store.upsert(&sample_item("tm-1")).unwrap();

        let mut changed = sample_item("tm-1");
        changed.name = "Renamed".to_string();
        changed.rating = 1.0;
        store.upsert(&changed).unwrap();

        let stored = store.get("tm-1").unwrap();
        assert_eq!(stored.name, "Place tm-1");
        assert_eq!(stored.rating, 4.5);
    }

    #[test]
    fn test_get_miss_is_not_found() {
        let handle = StoreHandle::in_memory().unwrap();
        let store = ItemStore::new(&handle);

        let err = store.get("nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_categories_of_unknown_item_are_empty() {
        let handle = StoreHandle::in_memory().unwrap();
        let store = ItemStore::new(&handle);

        assert!(store.categories("unknown-item").unwrap().is_empty());
    }

    #[test]
    fn test_item_without_categories_hydrates_empty_set() {
        let handle = StoreHandle::in_memory().unwrap();
        let store = ItemStore::new(&handle);

        let mut item = sample_item("tm-2");
        item.categories = HashSet::new();
        store.upsert(&item).unwrap();

        assert!(store.get("tm-2").unwrap().categories.is_empty());
    }

    #[test]
    fn test_get_many_skips_missing_ids() {
        let handle = StoreHandle::in_memory().unwrap();
        let store = ItemStore::new(&handle);

        store.upsert(&sample_item("tm-1")).unwrap();
        store.upsert(&sample_item("tm-2")).unwrap();

        let ids: HashSet<String> = ["tm-1", "tm-2", "ghost"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let items = store.get_many(&ids).unwrap();

        let mut found: Vec<&str> = items.iter().map(|i| i.item_id.as_str()).collect();
        found.sort_unstable();
        assert_eq!(found, vec!["tm-1", "tm-2"]);
    }
}
