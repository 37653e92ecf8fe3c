use thiserror::Error;

/// Failures that can occur while querying NewsAPI.
///
/// None of these reach the caller of [`crate::digest::fetch_health_news`];
/// they are logged and turned into the fallback bundle there.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON document NewsAPI returns.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be joined with an endpoint.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
