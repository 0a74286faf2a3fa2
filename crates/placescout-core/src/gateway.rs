// Search gateway - provider search with cache-on-read persistence
use placescout_cache::{ItemStore, StoreHandle};
use tracing::{debug, info};

use crate::{
    models::{Item, NearbySearch},
    search::SearchProvider,
    Result,
};

/// Front door for nearby search.
///
/// Every provider result is persisted through the item store before it is
/// returned, so a search doubles as a cache fill with no explicit save
/// step. The store makes the writes idempotent; repeating a search, or two
/// overlapping searches returning the same items, changes nothing.
pub struct SearchGateway {
    provider: Box<dyn SearchProvider>,
}

impl SearchGateway {
    pub fn new(provider: Box<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Search near a point, caching every result under the given handle.
    ///
    /// A single item that fails to cache is logged and skipped - the
    /// search result is returned regardless. Provider failures propagate.
    pub async fn search(&self, handle: &StoreHandle, query: &NearbySearch) -> Result<Vec<Item>> {
        let items = self.provider.search_nearby(query).await?;

        let store = ItemStore::new(handle);
        for item in &items {
            if let Err(e) = store.upsert(item) {
                debug!("Failed to cache {}: {}", item.item_id, e);
            }
        }
        info!("Cached {} items", items.len());

        Ok(items)
    }
}
