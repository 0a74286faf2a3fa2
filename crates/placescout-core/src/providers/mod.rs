// Provider implementations for directory backends
pub mod yelp;

pub use yelp::YelpProvider;
