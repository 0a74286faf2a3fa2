use thiserror::Error;

/// All the ways a search-and-cache round trip can go wrong
#[derive(Error, Debug)]
pub enum Error {
    /// Provider call failure. The gateway performs no retry of its own;
    /// whatever the provider client could not recover from lands here.
    #[error("Search failed: {0}")]
    Search(String),

    #[error(transparent)]
    Store(#[from] placescout_cache::StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
