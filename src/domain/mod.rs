mod analysis;
mod listing;

pub use analysis::{
    Competitor, DifficultyScore, FreshnessScore, KeywordAnalysis, MatchCounts, RatingCountScore,
    RatingSpreadScore, ResultCountScore, SaturationScore, SuggestionCountScore,
    SuggestionMatchScore, TitleMatchScore, TrafficScore,
};
pub use listing::AppListing;
