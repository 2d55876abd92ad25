use crate::domain::AppListing;
use serde::Serialize;

/// How many of the inspected titles fell into each match tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub exact: usize,
    pub broad: usize,
    pub partial: usize,
    pub none: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleMatchScore {
    pub counts: MatchCounts,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCountScore {
    pub avg_ratings: u64,
    pub max_ratings: u64,
    pub min_ratings: u64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaturationScore {
    pub title_match_count: usize,
    pub total_checked: usize,
    pub percentage: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreshnessScore {
    pub avg_days_since_update: i64,
    pub score: f64,
}

/// Difficulty composite (0-100, lower = easier to rank) with the sub-scores
/// it was aggregated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyScore {
    pub score: u8,
    pub title_matches: TitleMatchScore,
    pub rating_counts: RatingCountScore,
    pub saturation: SaturationScore,
    pub freshness: FreshnessScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionCountScore {
    pub suggestion_count: usize,
    pub suggestions: Vec<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionMatchScore {
    pub exact_match: bool,
    pub prefix_match: bool,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCountScore {
    pub result_count: usize,
    pub hit_max: bool,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSpreadScore {
    pub mid_tier_avg_ratings: u64,
    pub score: f64,
}

/// Traffic composite (0-100, higher = more searches) with the sub-scores it
/// was aggregated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficScore {
    pub score: u8,
    pub suggestion_count: SuggestionCountScore,
    pub suggestion_match: SuggestionMatchScore,
    pub result_count: ResultCountScore,
    pub rating_spread: RatingSpreadScore,
}

/// Top-ranked listing summarized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competitor {
    pub name: String,
    pub developer: String,
    pub ratings: u64,
    pub rating: f64,
    pub genre: String,
}

impl Competitor {
    pub fn from_listing(listing: &AppListing) -> Self {
        Self {
            name: listing
                .track_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            developer: listing
                .artist_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            ratings: listing.rating_count(),
            rating: listing.average_user_rating.unwrap_or(0.0),
            genre: listing.primary_genre_name.clone().unwrap_or_default(),
        }
    }
}

/// Full analysis for one keyword, the unit handed to rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub difficulty: DifficultyScore,
    pub traffic: TrafficScore,
    pub opportunity: f64,
    pub result_count: usize,
    pub top_competitors: Vec<Competitor>,
}
