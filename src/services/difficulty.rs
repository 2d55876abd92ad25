use crate::domain::{
    AppListing, DifficultyScore, FreshnessScore, MatchCounts, RatingCountScore, SaturationScore,
    TitleMatchScore,
};
use crate::matcher::{self, TitleMatch};
use crate::services::scoring::{round1, round2, weighted_aggregate};
use chrono::{DateTime, Utc};

/// Listings considered for the per-app sub-scores.
const TOP_N: usize = 10;

/// Listings considered for saturation.
const SATURATION_N: usize = 25;

const TITLE_MATCH_WEIGHT: f64 = 4.0;
const RATING_COUNT_WEIGHT: f64 = 5.0;
const SATURATION_WEIGHT: f64 = 3.0;
const FRESHNESS_WEIGHT: f64 = 1.0;

/// Average rating count at which competitor strength saturates.
const MAX_AVG_RATINGS: f64 = 100_000.0;

/// Days since the last update after which a listing counts as fully stale.
const MAX_STALE_DAYS: f64 = 500.0;

/// Diagnostic age reported when no top listing has a parseable date.
const UNKNOWN_AGE_DAYS: i64 = 999;

/// Scores how hard it would be to rank for a keyword (0-100, lower =
/// easier), from how the top listings compete for it.
pub fn compute_difficulty(keyword: &str, listings: &[AppListing]) -> DifficultyScore {
    let title_matches = score_title_matches(keyword, listings);
    let rating_counts = score_rating_counts(listings);
    let saturation = score_saturation(keyword, listings);
    let freshness = score_freshness(listings, Utc::now());

    let score = weighted_aggregate(&[
        (TITLE_MATCH_WEIGHT, title_matches.score),
        (RATING_COUNT_WEIGHT, rating_counts.score),
        (SATURATION_WEIGHT, saturation.score),
        (FRESHNESS_WEIGHT, freshness.score),
    ]);

    DifficultyScore {
        score,
        title_matches,
        rating_counts,
        saturation,
        freshness,
    }
}

/// How precisely the top apps target the keyword in their names. Exact
/// matches dominate the raw value, broad and partial matches count less.
fn score_title_matches(keyword: &str, listings: &[AppListing]) -> TitleMatchScore {
    let top = &listings[..listings.len().min(TOP_N)];
    if top.is_empty() {
        return TitleMatchScore {
            counts: MatchCounts::default(),
            score: 1.0,
        };
    }

    let mut counts = MatchCounts::default();
    for listing in top {
        match matcher::classify(keyword, listing.title()) {
            TitleMatch::Exact => counts.exact += 1,
            TitleMatch::Broad => counts.broad += 1,
            TitleMatch::Partial => counts.partial += 1,
            TitleMatch::None => counts.none += 1,
        }
    }

    let raw =
        10.0 * counts.exact as f64 + 5.0 * counts.broad as f64 + 2.5 * counts.partial as f64;
    let score = (raw / top.len() as f64).clamp(1.0, 10.0);

    TitleMatchScore {
        counts,
        score: round2(score),
    }
}

/// Average rating count of the top apps, a proxy for installed base.
fn score_rating_counts(listings: &[AppListing]) -> RatingCountScore {
    let top = &listings[..listings.len().min(TOP_N)];
    if top.is_empty() {
        return RatingCountScore {
            avg_ratings: 0,
            max_ratings: 0,
            min_ratings: 0,
            score: 1.0,
        };
    }

    let counts: Vec<u64> = top.iter().map(AppListing::rating_count).collect();
    let avg = counts.iter().sum::<u64>() as f64 / counts.len() as f64;
    let score = 1.0 + 9.0 * avg.min(MAX_AVG_RATINGS) / MAX_AVG_RATINGS;

    RatingCountScore {
        avg_ratings: avg.round() as u64,
        max_ratings: counts.iter().copied().max().unwrap_or(0),
        min_ratings: counts.iter().copied().min().unwrap_or(0),
        score: round2(score),
    }
}

/// Share of the top listings carrying the keyword verbatim in their title.
fn score_saturation(keyword: &str, listings: &[AppListing]) -> SaturationScore {
    let top = &listings[..listings.len().min(SATURATION_N)];
    if top.is_empty() {
        return SaturationScore {
            title_match_count: 0,
            total_checked: 0,
            percentage: 0.0,
            score: 1.0,
        };
    }

    let needle = keyword.to_lowercase();
    let with_keyword = top
        .iter()
        .filter(|listing| listing.title().to_lowercase().contains(&needle))
        .count();
    let fraction = with_keyword as f64 / top.len() as f64;

    SaturationScore {
        title_match_count: with_keyword,
        total_checked: top.len(),
        percentage: round1(fraction * 100.0),
        score: round2(1.0 + 9.0 * fraction),
    }
}

/// Recency of the top apps' updates. Freshly maintained competitors are
/// harder to displace, so low average age scores high.
fn score_freshness(listings: &[AppListing], now: DateTime<Utc>) -> FreshnessScore {
    let top = &listings[..listings.len().min(TOP_N)];

    let mut ages = Vec::new();
    for listing in top {
        if let Some(raw) = listing.last_updated() {
            if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
                ages.push((now - date.with_timezone(&Utc)).num_days().max(0));
            }
        }
    }

    if ages.is_empty() {
        return FreshnessScore {
            avg_days_since_update: UNKNOWN_AGE_DAYS,
            score: 1.0,
        };
    }

    let avg_days = ages.iter().sum::<i64>() as f64 / ages.len() as f64;
    let score = 1.0 + 9.0 * (MAX_STALE_DAYS - avg_days.min(MAX_STALE_DAYS)) / MAX_STALE_DAYS;

    FreshnessScore {
        avg_days_since_update: avg_days.round() as i64,
        score: round2(score),
    }
}
