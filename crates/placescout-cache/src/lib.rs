// SQLite-backed persistence layer
// Owns the cached items, their categories, and per-user favorites

pub mod favorites;
pub mod handle;
pub mod items;
pub mod models;

pub use favorites::FavoritesStore;
pub use handle::StoreHandle;
pub use items::ItemStore;
pub use models::Item;

use thiserror::Error;

/// All the ways persistence can go wrong
#[derive(Error, Debug)]
pub enum StoreError {
    /// No live storage handle could be acquired. Surfaced before any
    /// operation runs, for reads and writes alike.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// Single-entity lookup miss. Collection lookups return empty instead.
    #[error("Item not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
