use crate::clients::rate_limit::RateLimitedClient;
use crate::error::Result;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

const HINTS_URL: &str = "https://search.itunes.apple.com/WebObjects/MZSearchHints.woa/wa/hints";

/// Storefront identifier for the US App Store; without it the hints
/// endpoint answers for the whole iTunes catalog.
const STORE_FRONT_HEADER: (&str, &str) = ("X-Apple-Store-Front", "143441-1,29");

#[derive(Debug, Deserialize)]
struct HintsResponse {
    #[serde(default)]
    hints: Vec<Hint>,
}

#[derive(Debug, Deserialize)]
struct Hint {
    term: Option<String>,
}

pub struct SuggestionService {
    client: Arc<RateLimitedClient>,
}

impl SuggestionService {
    pub fn new(client: Arc<RateLimitedClient>) -> Self {
        Self { client }
    }

    /// Autocomplete suggestions for a term, in upstream relevance order.
    /// Scoping the request with `clientApplication=Software` yields up to 10
    /// app-search hints instead of a single catalog-wide one. Decode
    /// failures and missing responses come back as an empty list.
    pub async fn suggest(&self, term: &str) -> Vec<String> {
        let params = [
            ("term", term.to_string()),
            ("clientApplication", "Software".to_string()),
        ];

        let response = match self
            .client
            .request(HINTS_URL, &params, &[STORE_FRONT_HEADER])
            .await
        {
            Some(response) => response,
            None => {
                warn!("Hints for '{term}' returned no response");
                return Vec::new();
            }
        };

        match parse_hints(&response.body) {
            Ok(terms) => terms,
            Err(e) => {
                warn!("Malformed hints response for '{term}': {e}");
                Vec::new()
            }
        }
    }
}

/// The hints endpoint answers with a binary property list carrying a `hints`
/// array; entries without a `term` are skipped.
fn parse_hints(body: &[u8]) -> Result<Vec<String>> {
    let data: HintsResponse = plist::from_bytes(body)?;
    Ok(data.hints.into_iter().filter_map(|h| h.term).collect())
}
