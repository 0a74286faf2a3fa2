// Yelp provider - bridges the API client with the SearchProvider trait
use async_trait::async_trait;
use placescout_api::{Business, YelpClient};

use crate::{
    models::{Item, NearbySearch},
    search::SearchProvider,
    Error, Result,
};

/// Wrapper around YelpClient that implements SearchProvider
pub struct YelpProvider {
    client: YelpClient,
}

impl YelpProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: YelpClient::new(api_key),
        }
    }

    /// Use a pre-built client (custom base URL, retry configuration).
    pub fn with_client(client: YelpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchProvider for YelpProvider {
    async fn search_nearby(&self, query: &NearbySearch) -> Result<Vec<Item>> {
        let businesses = self
            .client
            .search_businesses(
                query.lat,
                query.lon,
                query.term.as_deref(),
                query.radius_m,
                query.limit,
            )
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        Ok(businesses.into_iter().map(business_to_item).collect())
    }
}

/// Convert a provider business record to our cached Item model
fn business_to_item(business: Business) -> Item {
    // The provider pre-formats display_address; fall back to the raw
    // street line for sparse records.
    let address = if business.location.display_address.is_empty() {
        business.location.address1.unwrap_or_default()
    } else {
        business.location.display_address.join(", ")
    };

    Item {
        item_id: business.id,
        name: business.name,
        rating: business.rating,
        address,
        image_url: business.image_url,
        url: business.url,
        distance: business.distance,
        categories: business
            .categories
            .into_iter()
            .map(|c| c.title)
            .collect(),
    }
}
