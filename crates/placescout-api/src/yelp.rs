use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retry::{is_retryable_status, with_retry, RetryConfig};

const YELP_API_BASE: &str = "https://api.yelp.com/v3";

#[derive(Error, Debug)]
pub enum YelpError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Provider returned status {0}")]
    ServerError(reqwest::StatusCode),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication failed - check the API key")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, YelpError>;

/// Transient failures are worth another attempt; everything else is
/// returned to the caller immediately.
fn is_retryable(err: &YelpError) -> bool {
    match err {
        YelpError::RateLimitExceeded | YelpError::ServerError(_) => true,
        YelpError::NetworkError(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}

/// Client for the Yelp Fusion API.
pub struct YelpClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    retry_config: RetryConfig,
}

impl YelpClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, YELP_API_BASE.to_string())
    }

    /// For tests and proxy deployments with a custom API URL
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("PlaceScout/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url,
            retry_config: RetryConfig::default(),
        }
    }

    /// Create client with custom retry configuration
    pub fn with_retry_config(api_key: String, retry_config: RetryConfig) -> Self {
        let mut client = Self::new(api_key);
        client.retry_config = retry_config;
        client
    }

    /// Search businesses around a point. `term` narrows the search; with
    /// no term the provider returns whatever is nearby. `radius_m` is
    /// capped by the provider at 40000.
    pub async fn search_businesses(
        &self,
        lat: f64,
        lon: f64,
        term: Option<&str>,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<Business>> {
        let url = format!("{}/businesses/search", self.base_url);
        let auth = format!("Bearer {}", self.api_key);

        with_retry(&self.retry_config, is_retryable, || async {
            let mut request = self
                .client
                .get(&url)
                .header(reqwest::header::AUTHORIZATION, &auth)
                .query(&[
                    ("latitude", lat.to_string()),
                    ("longitude", lon.to_string()),
                    ("radius", radius_m.to_string()),
                    ("limit", limit.to_string()),
                ]);

            if let Some(term) = term {
                request = request.query(&[("term", term)]);
            }

            let response = request.send().await?;
            let status = response.status();

            if status == 401 || status == 403 {
                return Err(YelpError::AuthRequired);
            }

            if status == 429 {
                return Err(YelpError::RateLimitExceeded);
            }

            if is_retryable_status(status) {
                return Err(YelpError::ServerError(status));
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(YelpError::RequestFailed(format!(
                    "Status {}: {}",
                    status, body
                )));
            }

            let results: SearchResponse = response.json().await?;
            Ok(results.businesses)
        })
        .await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub businesses: Vec<Business>,
    #[serde(default)]
    pub total: u32,
}

/// Business record as the search endpoint returns it. Everything beyond
/// the id and name is optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    /// Meters from the search point. Only present on search results.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub alias: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    /// Ready-to-display address lines, in order.
    #[serde(default)]
    pub display_address: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SEARCH: &str = r#"{
        "businesses": [
            {
                "id": "gR9DTbKCvezQlqvD7_FzPw",
                "name": "North India Restaurant",
                "image_url": "https://s3-media4.fl.yelpcdn.com/bphoto/photo.jpg",
                "url": "https://www.yelp.com/biz/north-india-restaurant-san-francisco",
                "rating": 4.0,
                "distance": 1604.23,
                "categories": [
                    {"alias": "indpak", "title": "Indian"},
                    {"alias": "bars", "title": "Bars"}
                ],
                "location": {
                    "address1": "123 Second St",
                    "city": "San Francisco",
                    "zip_code": "94105",
                    "display_address": ["123 Second St", "San Francisco, CA 94105"]
                }
            }
        ],
        "total": 1
    }"#;

    #[test]
    fn test_parse_search_response() {
        let parsed: SearchResponse = serde_json::from_str(SAMPLE_SEARCH).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.businesses.len(), 1);

        let business = &parsed.businesses[0];
        assert_eq!(business.id, "gR9DTbKCvezQlqvD7_FzPw");
        assert_eq!(business.rating, 4.0);
        assert_eq!(business.categories[1].title, "Bars");
        assert_eq!(business.location.display_address.len(), 2);
    }

    #[test]
    fn test_parse_minimal_business() {
        // Sparse records come back for businesses with no photos,
        // categories, or resolvable address.
        let parsed: Business =
            serde_json::from_str(r#"{"id": "abc", "name": "Nameless Diner"}"#).unwrap();
        assert_eq!(parsed.id, "abc");
        assert_eq!(parsed.rating, 0.0);
        assert_eq!(parsed.distance, 0.0);
        assert!(parsed.image_url.is_empty());
        assert!(parsed.categories.is_empty());
        assert!(parsed.location.display_address.is_empty());
    }

    #[test]
    fn test_parse_empty_search_response() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"businesses": [], "total": 0}"#).unwrap();
        assert!(parsed.businesses.is_empty());
    }

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(is_retryable(&YelpError::RateLimitExceeded));
        assert!(is_retryable(&YelpError::ServerError(
            reqwest::StatusCode::BAD_GATEWAY
        )));
        assert!(!is_retryable(&YelpError::AuthRequired));
        assert!(!is_retryable(&YelpError::RequestFailed("400".into())));
    }
}
