use crate::clients::MAX_RESULTS;
use crate::domain::{
    AppListing, RatingSpreadScore, ResultCountScore, SuggestionCountScore, SuggestionMatchScore,
    TrafficScore,
};
use crate::services::scoring::{round2, weighted_aggregate};

const SUGGEST_COUNT_WEIGHT: f64 = 6.0;
const SUGGEST_MATCH_WEIGHT: f64 = 2.0;
const RESULT_COUNT_WEIGHT: f64 = 1.0;
const RATING_SPREAD_WEIGHT: f64 = 1.0;

/// Suggestion list length at which the count signal saturates.
const MAX_SUGGESTIONS: usize = 10;

/// Suggestions carried in the diagnostics for display.
const SHOWN_SUGGESTIONS: usize = 5;

/// Mid-tier rank window (ranks 11-25).
const MID_TIER_START: usize = 10;
const MID_TIER_END: usize = 25;

/// Mid-tier rating average at which the spread signal saturates.
const MAX_MID_TIER_RATINGS: f64 = 10_000.0;

/// Estimates search demand for a keyword (0-100, higher = more searches).
/// The autocomplete suggestion count is the primary signal; suggestion
/// match, result count and mid-tier rating spread are secondary.
pub fn compute_traffic(
    keyword: &str,
    listings: &[AppListing],
    suggestions: &[String],
) -> TrafficScore {
    let suggestion_count = score_suggestion_count(suggestions);
    let suggestion_match = score_suggestion_match(keyword, suggestions);
    let result_count = score_result_count(listings);
    let rating_spread = score_rating_spread(listings);

    let score = weighted_aggregate(&[
        (SUGGEST_COUNT_WEIGHT, suggestion_count.score),
        (SUGGEST_MATCH_WEIGHT, suggestion_match.score),
        (RESULT_COUNT_WEIGHT, result_count.score),
        (RATING_SPREAD_WEIGHT, rating_spread.score),
    ]);

    TrafficScore {
        score,
        suggestion_count,
        suggestion_match,
        result_count,
        rating_spread,
    }
}

/// How many autocomplete hints the storefront returns (0-10). Zero means
/// nobody searches this; a full list marks an active niche.
fn score_suggestion_count(suggestions: &[String]) -> SuggestionCountScore {
    let count = suggestions.len();
    let score = 1.0 + 9.0 * count.min(MAX_SUGGESTIONS) as f64 / MAX_SUGGESTIONS as f64;

    SuggestionCountScore {
        suggestion_count: count,
        suggestions: suggestions.iter().take(SHOWN_SUGGESTIONS).cloned().collect(),
        score: round2(score),
    }
}

/// Whether the keyword itself shows up in the suggestions. An exact echo
/// means people search it verbatim; a prefix match means variations of it
/// are searched; unrelated suggestions still beat none at all.
fn score_suggestion_match(keyword: &str, suggestions: &[String]) -> SuggestionMatchScore {
    let keyword = keyword.trim().to_lowercase();
    let exact_match = suggestions.iter().any(|s| s.to_lowercase() == keyword);
    let prefix_match = suggestions
        .iter()
        .any(|s| s.to_lowercase().starts_with(&keyword));

    let score = if exact_match {
        10.0
    } else if prefix_match {
        6.0
    } else if !suggestions.is_empty() {
        3.0
    } else {
        1.0
    };

    SuggestionMatchScore {
        exact_match,
        prefix_match,
        score,
    }
}

/// Total listing count, a weak breadth signal since search matching is
/// loose.
fn score_result_count(listings: &[AppListing]) -> ResultCountScore {
    let count = listings.len();
    let score = 1.0 + 9.0 * count.min(MAX_RESULTS) as f64 / MAX_RESULTS as f64;

    ResultCountScore {
        result_count: count,
        hit_max: count >= MAX_RESULTS,
        score: round2(score),
    }
}

/// Average rating count of the mid-tier listings (ranks 11-25). Keywords
/// with real traffic feed installs well below the top spots.
fn score_rating_spread(listings: &[AppListing]) -> RatingSpreadScore {
    let mid_tier = if listings.len() > MID_TIER_START {
        &listings[MID_TIER_START..listings.len().min(MID_TIER_END)]
    } else {
        listings
    };
    if mid_tier.is_empty() {
        return RatingSpreadScore {
            mid_tier_avg_ratings: 0,
            score: 1.0,
        };
    }

    let avg = mid_tier
        .iter()
        .map(AppListing::rating_count)
        .sum::<u64>() as f64
        / mid_tier.len() as f64;
    let score = 1.0 + 9.0 * avg.min(MAX_MID_TIER_RATINGS) / MAX_MID_TIER_RATINGS;

    RatingSpreadScore {
        mid_tier_avg_ratings: avg.round() as u64,
        score: round2(score),
    }
}
