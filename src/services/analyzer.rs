use crate::clients::{ListingSearchService, RateLimitedClient, SuggestionService, MAX_RESULTS};
use crate::domain::{Competitor, KeywordAnalysis};
use crate::error::{AsoError, Result};
use crate::services::{difficulty, scoring, traffic};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::info;

/// Competitors carried in the analysis for display.
const TOP_COMPETITORS: usize = 5;

pub struct KeywordAnalyzer {
    search: ListingSearchService,
    suggest: SuggestionService,
}

impl KeywordAnalyzer {
    /// Both services share one rate-limited client, so the call spacing
    /// spans the search and suggestion endpoints.
    pub fn new(client: Arc<RateLimitedClient>) -> Self {
        Self {
            search: ListingSearchService::new(client.clone()),
            suggest: SuggestionService::new(client),
        }
    }

    /// Runs the full pipeline for one keyword: fetch listings, fetch
    /// suggestions, score both composites, derive the opportunity ratio.
    /// Keywords with no discoverable data come back with minimum scores,
    /// never an error.
    pub async fn analyze(&self, keyword: &str, country: &str) -> KeywordAnalysis {
        let listings = self.search.search(keyword, country, MAX_RESULTS).await;
        let suggestions = self.suggest.suggest(keyword).await;

        let difficulty = difficulty::compute_difficulty(keyword, &listings);
        let traffic = traffic::compute_traffic(keyword, &listings, &suggestions);
        let opportunity = scoring::opportunity(traffic.score, difficulty.score);

        let top_competitors = listings
            .iter()
            .take(TOP_COMPETITORS)
            .map(Competitor::from_listing)
            .collect();

        KeywordAnalysis {
            keyword: keyword.to_string(),
            difficulty,
            traffic,
            opportunity,
            result_count: listings.len(),
            top_competitors,
        }
    }

    /// Analyzes keywords sequentially in input order. Batching stays
    /// sequential so the client's call spacing holds across the whole run.
    pub async fn analyze_all(
        &self,
        keywords: &[String],
        country: &str,
    ) -> Result<Vec<KeywordAnalysis>> {
        let pb = ProgressBar::new(keywords.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .map_err(|e| AsoError::Other(e.to_string()))?,
        );

        let mut results = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            pb.set_message(format!("Analyzing \"{keyword}\""));
            let analysis = self.analyze(keyword, country).await;
            info!(
                "{keyword}: difficulty {} traffic {} opportunity {:.2}",
                analysis.difficulty.score, analysis.traffic.score, analysis.opportunity
            );
            results.push(analysis);
            pb.inc(1);
        }
        pb.finish_with_message("Done");

        Ok(results)
    }
}
