use serde::{Deserialize, Serialize};

// The cached item shape is owned by the store; callers see it through here.
pub use placescout_cache::Item;

/// Nearby-search parameters as the gateway consumes them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearch {
    pub lat: f64,
    pub lon: f64,
    /// Narrows the search; `None` means an unfiltered nearby search.
    pub term: Option<String>,
    pub radius_m: u32,
    pub limit: u32,
}

impl Default for NearbySearch {
    fn default() -> Self {
        Self {
            lat: 0.0,
            lon: 0.0,
            term: None,
            radius_m: 10_000,
            limit: 20,
        }
    }
}
