//! Command-line interface definitions for Daily Health News.
//!
//! Every option has a default or is read from the environment, so running the
//! binary with no arguments performs the standard daily update.

use crate::api::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::digest::DEFAULT_MAX_ARTICLES;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::path::PathBuf;

/// Command-line arguments for the Daily Health News updater.
///
/// # Examples
///
/// ```sh
/// # Standard run: key from the environment, output to data/daily_news.json
/// NEWS_API_KEY=... daily_health_news
///
/// # Write somewhere else
/// daily_health_news -o /var/www/data/daily_news.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON file to write
    #[arg(short, long, default_value = "data/daily_news.json")]
    pub output_file: PathBuf,

    /// NewsAPI key; without one, fallback data is written
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// NewsAPI root URL
    #[arg(long, env = "NEWS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// User-Agent header sent to NewsAPI
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Maximum number of articles to keep (at least 1)
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ARTICLES,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_articles: usize,
}

impl Cli {
    /// The API key, treating an empty or blank value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["daily_health_news", "--base-url", DEFAULT_BASE_URL]);

        assert_eq!(cli.output_file, PathBuf::from("data/daily_news.json"));
        assert_eq!(cli.base_url, "https://newsapi.org/v2/");
        assert_eq!(cli.user_agent, "HealthApp/1.0");
        assert_eq!(cli.max_articles, 10);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["daily_health_news", "-o", "/tmp/news.json"]);

        assert_eq!(cli.output_file, PathBuf::from("/tmp/news.json"));
    }

    #[test]
    fn test_cli_explicit_key() {
        let cli = Cli::parse_from(["daily_health_news", "--api-key", "abc123"]);

        assert_eq!(cli.api_key(), Some("abc123"));
    }

    #[test]
    fn test_cli_blank_key_is_absent() {
        let cli = Cli::parse_from(["daily_health_news", "--api-key", "   "]);

        assert_eq!(cli.api_key(), None);
    }

    #[test]
    fn test_cli_max_articles() {
        let cli = Cli::parse_from(["daily_health_news", "--max-articles", "5"]);

        assert_eq!(cli.max_articles, 5);
    }

    #[test]
    fn test_cli_rejects_zero_max_articles() {
        let err = Cli::try_parse_from(["daily_health_news", "--max-articles", "0"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
