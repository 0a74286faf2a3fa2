// Core business logic lives here - the brain of the operation
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod providers;
pub mod search;

pub use config::Config;
pub use error::Error;
pub use gateway::SearchGateway;
pub use models::{Item, NearbySearch};
pub use search::SearchProvider;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
