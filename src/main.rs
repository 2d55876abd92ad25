use crate::clients::RateLimitedClient;
use crate::config::Config;
use crate::error::Result;
use crate::services::KeywordAnalyzer;
use std::sync::Arc;
use tracing::info;

mod clients;
mod config;
mod domain;
mod error;
mod matcher;
mod report;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;
    init_tracing(&config.args.log_level);

    let country = config.country()?;
    let keywords = config::collect_keywords(&config.args)?;
    info!(
        "Analyzing {} keyword(s) for storefront '{country}'",
        keywords.len()
    );

    let client = Arc::new(RateLimitedClient::new(config.http_client.clone()));
    let analyzer = KeywordAnalyzer::new(client);

    let mut results = analyzer.analyze_all(&keywords, &country).await?;
    results.sort_by(|a, b| b.opportunity.total_cmp(&a.opportunity));

    if config.args.json {
        report::print_json(&results)?;
    } else {
        report::print_summary(&results);
        if config.args.detailed {
            for result in &results {
                report::print_detailed(result);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so `--json` output stays clean on stdout.
fn init_tracing(level: &str) {
    let level = level.parse().unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
