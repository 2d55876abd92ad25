use crate::domain::{KeywordAnalysis, MatchCounts};
use crate::error::Result;
use colored::{ColoredString, Colorize};

pub fn difficulty_label(score: u8) -> &'static str {
    match score {
        0..=20 => "Very Easy",
        21..=40 => "Easy",
        41..=60 => "Moderate",
        61..=80 => "Hard",
        _ => "Very Hard",
    }
}

fn colored_label(score: u8) -> ColoredString {
    // pad before coloring so the escape codes don't break column widths
    let label = format!("{:<9}", difficulty_label(score));
    match score {
        0..=40 => label.green(),
        41..=60 => label.yellow(),
        _ => label.red(),
    }
}

/// Compact "2 exact / 1 partial" rendering of the title match counts.
pub fn format_title_matches(counts: &MatchCounts) -> String {
    let parts: Vec<String> = [
        (counts.exact, "exact"),
        (counts.broad, "broad"),
        (counts.partial, "partial"),
        (counts.none, "none"),
    ]
    .iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, kind)| format!("{count} {kind}"))
    .collect();

    if parts.is_empty() {
        "0".to_string()
    } else {
        parts.join(" / ")
    }
}

/// Summary table over all analyzed keywords, sorted by the caller.
pub fn print_summary(results: &[KeywordAnalysis]) {
    println!();
    println!("  App Store Keyword Analysis");
    println!("  {}", "=".repeat(94));
    println!();
    println!(
        "  {:<24} {:>4}  {:<9} {:>7} {:>11} {:>12}  {}",
        "Keyword", "Diff", "Level", "Traffic", "Opportunity", "Avg Ratings", "Title Matches"
    );
    println!("  {}", "-".repeat(94));

    for result in results {
        println!(
            "  {:<24} {:>4}  {} {:>7} {:>11.2} {:>12}  {}",
            result.keyword,
            result.difficulty.score,
            colored_label(result.difficulty.score),
            result.traffic.score,
            result.opportunity,
            result.difficulty.rating_counts.avg_ratings,
            format_title_matches(&result.difficulty.title_matches.counts),
        );
    }

    println!();
    println!("  Sorted by: Opportunity (higher = better keyword to target)");
    println!("  Difficulty: 0-100 (lower = easier) | Traffic: 0-100 (higher = more searches)");
    println!();
}

/// Per-keyword breakdown of every sub-score and its diagnostics.
pub fn print_detailed(result: &KeywordAnalysis) {
    let difficulty = &result.difficulty;
    let traffic = &result.traffic;

    println!();
    println!("  {}", "=".repeat(50));
    println!("  KEYWORD: \"{}\"", result.keyword);
    println!("  {}", "=".repeat(50));
    println!();

    println!(
        "  DIFFICULTY: {}/100 ({})",
        difficulty.score,
        difficulty_label(difficulty.score)
    );
    println!("  |");
    println!("  +-- Title Match Score: {}/10", difficulty.title_matches.score);
    println!(
        "  |   {}",
        format_title_matches(&difficulty.title_matches.counts)
    );
    println!(
        "  +-- Competitor Strength: {}/10",
        difficulty.rating_counts.score
    );
    println!("  |   Avg ratings: {}", difficulty.rating_counts.avg_ratings);
    println!(
        "  |   Range: {} - {}",
        difficulty.rating_counts.min_ratings, difficulty.rating_counts.max_ratings
    );
    println!("  +-- Saturation: {}/10", difficulty.saturation.score);
    println!(
        "  |   {}/{} top results have keyword in title ({}%)",
        difficulty.saturation.title_match_count,
        difficulty.saturation.total_checked,
        difficulty.saturation.percentage
    );
    println!("  +-- Freshness: {}/10", difficulty.freshness.score);
    println!(
        "      Avg days since update: {}",
        difficulty.freshness.avg_days_since_update
    );
    println!();

    println!("  TRAFFIC: {}/100", traffic.score);
    println!("  |");
    println!(
        "  +-- Suggestion Count: {}/10 (score: {}/10)",
        traffic.suggestion_count.suggestion_count, traffic.suggestion_count.score
    );
    for suggestion in &traffic.suggestion_count.suggestions {
        println!("  |   - \"{suggestion}\"");
    }
    let match_status = if traffic.suggestion_match.exact_match {
        "exact"
    } else if traffic.suggestion_match.prefix_match {
        "prefix"
    } else {
        "none"
    };
    println!(
        "  +-- Keyword Match: {match_status} (score: {}/10)",
        traffic.suggestion_match.score
    );
    println!(
        "  +-- Result count: {}{}",
        traffic.result_count.result_count,
        if traffic.result_count.hit_max { "+ (max)" } else { "" }
    );
    println!(
        "  +-- Mid-tier avg ratings: {}",
        traffic.rating_spread.mid_tier_avg_ratings
    );
    println!();

    println!("  OPPORTUNITY: {:.2}", result.opportunity);
    println!();

    if !result.top_competitors.is_empty() {
        println!("  TOP COMPETITORS:");
        for (rank, competitor) in result.top_competitors.iter().enumerate() {
            let stars = if competitor.rating > 0.0 {
                format!("{:.1}", competitor.rating)
            } else {
                "N/A".to_string()
            };
            println!("  {}. {}", rank + 1, competitor.name);
            println!(
                "     {} ratings | {} stars | {} | {}",
                competitor.ratings, stars, competitor.genre, competitor.developer
            );
        }
        println!();
    }
}

pub fn print_json(results: &[KeywordAnalysis]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    Ok(())
}
