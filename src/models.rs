//! Data models for health articles and the bundle written to disk.
//!
//! This module defines the structures that end up in the output file:
//! - [`Article`]: A single headline with its link and image
//! - [`Source`]: The publisher attribution NewsAPI attaches to an article
//! - [`NewsBundle`]: The timestamped set of articles produced by one run
//!
//! Field names follow NewsAPI's camelCase where the two overlap (`urlToImage`,
//! `publishedAt`) so live and fallback articles serialize identically.

use serde::{Deserialize, Serialize};

/// The publisher of a live article as reported by NewsAPI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    /// NewsAPI's identifier for the outlet, if it has one.
    pub id: Option<String>,
    /// The human-readable outlet name.
    pub name: Option<String>,
}

/// A health article, either returned by NewsAPI or taken from fallback data.
///
/// Only `title` and `url_to_image` are guaranteed non-empty for live articles;
/// they are the fields the filter in [`crate::digest`] checks. Fallback
/// articles fill every field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// A short summary of the article.
    pub description: Option<String>,
    /// Link to the full article.
    pub url: Option<String>,
    /// Link to the article's lead image.
    #[serde(rename = "urlToImage")]
    pub url_to_image: String,
    /// Publisher attribution (live articles only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Author byline (live articles only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publication time as reported by NewsAPI (live articles only).
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<String>,
    /// Truncated article body (live articles only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The result of one run: a timestamp, a tip of the day, and up to ten articles.
///
/// A fresh bundle is built on every execution and written once; there is no
/// merging with a previous file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsBundle {
    /// Local time the bundle was built, `YYYY-MM-DDTHH:MM:SS.ffffff`.
    pub updated_at: String,
    /// The tip of the day shown alongside the articles.
    pub tip: String,
    /// The articles, in the order NewsAPI (or the fallback) returned them.
    pub articles: Vec<Article>,
}
