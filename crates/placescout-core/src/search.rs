use crate::{
    models::{Item, NearbySearch},
    Result,
};

/// Trait for search providers - makes testing easier and keeps things flexible
///
/// The directory backend implements this trait; the gateway only ever sees
/// the trait. Implementations translate their native record schema into
/// [`Item`]s.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_nearby(&self, query: &NearbySearch) -> Result<Vec<Item>>;
}
