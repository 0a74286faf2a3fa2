// Directory provider client
pub mod retry;
pub mod yelp;

// Re-export common types
pub use retry::RetryConfig;
pub use yelp::{Business, Category, Location, SearchResponse, YelpClient, YelpError};
