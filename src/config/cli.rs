use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Args {
    /// Keywords to analyze
    pub keywords: Vec<String>,

    /// File with keywords, one per line (blank lines and # comments skipped)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Two-letter storefront country code
    #[arg(short, long, env = "KEYSCOUT_COUNTRY", default_value = "us")]
    pub country: String,

    /// Show the full sub-score breakdown for each keyword
    #[arg(short, long)]
    pub detailed: bool,

    /// Emit results as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
