use crate::clients::rate_limit::RateLimitedClient;
use crate::domain::AppListing;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

const SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Hard cap enforced by the search endpoint.
pub const MAX_RESULTS: usize = 200;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<AppListing>,
}

pub struct ListingSearchService {
    client: Arc<RateLimitedClient>,
}

impl ListingSearchService {
    pub fn new(client: Arc<RateLimitedClient>) -> Self {
        Self { client }
    }

    /// Fetches up to `limit` listings for a term, in upstream relevance
    /// order (rank 1 first). A missing or malformed response comes back as
    /// an empty list.
    pub async fn search(&self, term: &str, country: &str, limit: usize) -> Vec<AppListing> {
        let params = [
            ("term", term.to_string()),
            ("entity", "software".to_string()),
            ("country", country.to_string()),
            ("limit", limit.min(MAX_RESULTS).to_string()),
        ];

        let response = match self.client.request(SEARCH_URL, &params, &[]).await {
            Some(response) => response,
            None => {
                warn!("Search for '{term}' returned no response");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<SearchResponse>(&response.body) {
            Ok(data) => data.results,
            Err(e) => {
                warn!("Malformed search response for '{term}': {e}");
                Vec::new()
            }
        }
    }
}
