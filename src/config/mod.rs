use crate::config::cli::Args;
use crate::error::{AsoError, Result};
use clap::Parser;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

pub(crate) mod cli;

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "keyscout/0.1";

pub struct Config {
    pub args: Args,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { args, http_client })
    }

    /// Storefront country codes are exactly two ASCII letters, lowercased.
    pub fn country(&self) -> Result<String> {
        let code = self.args.country.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(code.to_ascii_lowercase())
        } else {
            Err(AsoError::InvalidCountry(code.to_string()))
        }
    }
}

/// Gathers keywords from the positional arguments and the optional keyword
/// file, then deduplicates them case-insensitively while preserving
/// first-seen order and spelling.
pub fn collect_keywords(args: &Args) -> Result<Vec<String>> {
    let mut keywords = args.keywords.clone();

    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)?;
        keywords.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    let mut seen = HashSet::new();
    let keywords: Vec<String> = keywords
        .iter()
        .map(|kw| kw.trim())
        .filter(|kw| !kw.is_empty() && seen.insert(kw.to_lowercase()))
        .map(String::from)
        .collect();

    if keywords.is_empty() {
        return Err(AsoError::Other(
            "Provide keywords as arguments or via --file".to_string(),
        ));
    }

    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args_with_keywords(keywords: &[&str]) -> Args {
        Args {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            country: "us".to_string(),
            ..Args::default()
        }
    }

    #[test]
    fn country_accepts_two_letter_codes() {
        let config = Config::from_args(args_with_keywords(&["pet"])).unwrap();
        assert_eq!(config.country().unwrap(), "us");
    }

    #[test]
    fn country_is_lowercased() {
        let mut args = args_with_keywords(&["pet"]);
        args.country = "DE".to_string();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.country().unwrap(), "de");
    }

    #[test]
    fn country_rejects_bad_codes() {
        for bad in ["usa", "u", "u1", ""] {
            let mut args = args_with_keywords(&["pet"]);
            args.country = bad.to_string();
            let config = Config::from_args(args).unwrap();
            assert!(matches!(
                config.country(),
                Err(AsoError::InvalidCountry(_))
            ));
        }
    }

    #[test]
    fn collect_keywords_dedupes_case_insensitively() {
        let args = args_with_keywords(&["Virtual Pet", "virtual pet", "pet game"]);
        let keywords = collect_keywords(&args).unwrap();
        assert_eq!(keywords, vec!["Virtual Pet", "pet game"]);
    }

    #[test]
    fn collect_keywords_trims_and_drops_empty() {
        let args = args_with_keywords(&["  spirit pet  ", "   "]);
        let keywords = collect_keywords(&args).unwrap();
        assert_eq!(keywords, vec!["spirit pet"]);
    }

    #[test]
    fn collect_keywords_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha pets\n# a comment\n\nbeta pets\nAlpha Pets").unwrap();

        let mut args = args_with_keywords(&[]);
        args.file = Some(file.path().to_path_buf());
        let keywords = collect_keywords(&args).unwrap();
        assert_eq!(keywords, vec!["alpha pets", "beta pets"]);
    }

    #[test]
    fn collect_keywords_requires_input() {
        let args = args_with_keywords(&[]);
        assert!(collect_keywords(&args).is_err());
    }

    #[test]
    fn collect_keywords_missing_file_is_an_error() {
        let mut args = args_with_keywords(&[]);
        args.file = Some("does-not-exist.txt".into());
        assert!(matches!(collect_keywords(&args), Err(AsoError::Io(_))));
    }
}
