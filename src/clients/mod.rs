pub(crate) mod rate_limit;
mod search;
mod suggest;

pub use rate_limit::{RateLimitedClient, RawResponse, Transport};
pub use search::{ListingSearchService, MAX_RESULTS};
pub use suggest::SuggestionService;
