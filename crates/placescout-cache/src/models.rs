use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Cached point of interest, sourced from the directory provider.
///
/// Items are immutable once cached: the first write wins and there is no
/// update or delete path. `item_id` is the provider-assigned identifier and
/// the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub name: String,
    pub rating: f64,
    pub address: String,
    pub image_url: String,
    pub url: String,
    /// Distance from the search point, in meters.
    pub distance: f64,
    /// Unordered, unique per item. May be empty.
    pub categories: HashSet<String>,
}
