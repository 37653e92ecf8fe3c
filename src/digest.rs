//! The fetch-and-fallback routine that produces a [`NewsBundle`].
//!
//! Strategies from [`Strategy::ALL`] run one after another until one returns
//! a non-empty article list. That list is filtered and truncated. Anything
//! short of at least one usable article (no key, transport or parse failure,
//! every strategy empty, everything filtered out) yields the fallback bundle
//! instead, so callers always get something to write.

use crate::api::{ArticleSource, RawArticle, Strategy};
use crate::error::FetchError;
use crate::fallback::{LIVE_TIP, fallback_bundle};
use crate::models::{Article, NewsBundle};
use crate::utils::now_timestamp;
use tracing::{error, info, instrument, warn};

/// Marker NewsAPI puts in the title of articles that were taken down.
pub const REMOVED_MARKER: &str = "[Removed]";

/// Number of articles kept from a live response.
pub const DEFAULT_MAX_ARTICLES: usize = 10;

/// Build today's bundle from `source`, or the fallback bundle.
///
/// `source` is `None` when no API key is configured.
/// This function never fails; errors are logged and replaced by fallback data.
#[instrument(level = "info", skip_all, fields(max_articles = max_articles))]
pub async fn fetch_health_news<S: ArticleSource>(
    source: Option<&S>,
    max_articles: usize,
) -> NewsBundle {
    let Some(source) = source else {
        warn!("No API key found; generating static fallback data");
        return fallback_bundle();
    };

    match fetch_live(source, max_articles).await {
        Ok(Some(bundle)) => bundle,
        Ok(None) => fallback_bundle(),
        Err(e) => {
            error!(error = %e, "Error fetching news");
            fallback_bundle()
        }
    }
}

/// Run the strategies and build a live bundle.
///
/// `Ok(None)` means the API answered but nothing usable came back. A failed
/// request aborts immediately rather than moving on to the next strategy.
async fn fetch_live<S: ArticleSource>(
    source: &S,
    max_articles: usize,
) -> Result<Option<NewsBundle>, FetchError> {
    let mut raw = Vec::new();
    for strategy in Strategy::ALL {
        let resp = source.query(strategy).await?;
        if !resp.is_ok() {
            warn!(
                strategy = strategy.name(),
                status = ?resp.status,
                code = ?resp.code,
                message = ?resp.message,
                "NewsAPI returned an error"
            );
        }
        let total_results = resp.total_results;
        raw = resp.into_articles();
        info!(
            strategy = strategy.name(),
            count = raw.len(),
            total_results = ?total_results,
            "Strategy finished"
        );
        if !raw.is_empty() {
            break;
        }
    }

    if raw.is_empty() {
        warn!("All strategies failed to find articles");
        return Ok(None);
    }

    let received = raw.len();
    let articles: Vec<Article> = raw
        .into_iter()
        .filter_map(into_valid_article)
        .take(max_articles)
        .collect();
    info!(received, kept = articles.len(), "Filtered articles");

    if articles.is_empty() {
        warn!("No article had a title and an image");
        return Ok(None);
    }

    Ok(Some(NewsBundle {
        updated_at: now_timestamp(),
        tip: LIVE_TIP.to_string(),
        articles,
    }))
}

/// Convert a raw article, dropping it unless it has a title, an image, and
/// no [`REMOVED_MARKER`] in its title.
pub fn into_valid_article(raw: RawArticle) -> Option<Article> {
    let title = raw
        .title
        .filter(|t| !t.is_empty() && !t.contains(REMOVED_MARKER))?;
    let url_to_image = raw.url_to_image.filter(|u| !u.is_empty())?;
    Some(Article {
        title,
        description: raw.description,
        url: raw.url,
        url_to_image,
        source: raw.source,
        author: raw.author,
        published_at: raw.published_at,
        content: raw.content,
    })
}
