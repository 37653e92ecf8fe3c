//! NewsAPI access: the query strategies, the wire format, and the HTTP client.
//!
//! The routine in [`crate::digest`] is written against the [`ArticleSource`]
//! trait rather than the client directly, so it can be driven by scripted
//! responses in tests.
//!
//! # Strategies
//!
//! | Strategy | Endpoint | Parameters |
//! |----------|----------|------------|
//! | [`Strategy::ArabicKeyword`] | `everything` | `q=صحة`, `language=ar`, `sortBy=publishedAt` |
//! | [`Strategy::ArabicHeadlines`] | `top-headlines` | `category=health`, `language=ar` |
//! | [`Strategy::EnglishHeadlines`] | `top-headlines` | `category=health`, `language=en` |
//!
//! NewsAPI reports failures (bad key, rate limiting) in the JSON body with
//! `status: "error"`, usually alongside a 4xx status code. The HTTP status is
//! therefore not checked here; the body is parsed either way.

use crate::error::FetchError;
use crate::models::Source;
use crate::utils::truncate_for_log;
use serde::Deserialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Production NewsAPI endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// User agent sent with every request; NewsAPI rejects some anonymous clients.
pub const DEFAULT_USER_AGENT: &str = "HealthApp/1.0";

/// One of the fixed queries tried, in order, until one yields articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full-text search for "صحة" (health) in Arabic, newest first.
    ArabicKeyword,
    /// Arabic top headlines in the health category.
    ArabicHeadlines,
    /// English top headlines in the health category.
    EnglishHeadlines,
}

impl Strategy {
    /// All strategies in the order they are attempted.
    pub const ALL: [Strategy; 3] = [
        Strategy::ArabicKeyword,
        Strategy::ArabicHeadlines,
        Strategy::EnglishHeadlines,
    ];

    /// Short name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::ArabicKeyword => "everything-ar-keyword",
            Strategy::ArabicHeadlines => "top-headlines-health-ar",
            Strategy::EnglishHeadlines => "top-headlines-health-en",
        }
    }

    /// Endpoint path relative to the API root.
    pub fn endpoint(self) -> &'static str {
        match self {
            Strategy::ArabicKeyword => "everything",
            Strategy::ArabicHeadlines | Strategy::EnglishHeadlines => "top-headlines",
        }
    }

    /// Query parameters, excluding the API key.
    pub fn params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Strategy::ArabicKeyword => &[("q", "صحة"), ("language", "ar"), ("sortBy", "publishedAt")],
            Strategy::ArabicHeadlines => &[("category", "health"), ("language", "ar")],
            Strategy::EnglishHeadlines => &[("category", "health"), ("language", "en")],
        }
    }
}

/// Top-level NewsAPI response document.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiResponse {
    /// `"ok"` on success, `"error"` otherwise.
    pub status: Option<String>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    pub articles: Option<Vec<RawArticle>>,
    /// Machine-readable error code, present when `status` is `"error"`.
    pub code: Option<String>,
    /// Human-readable error message, present when `status` is `"error"`.
    pub message: Option<String>,
}

impl NewsApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }

    /// The article list of a successful response; empty for error responses.
    pub fn into_articles(self) -> Vec<RawArticle> {
        if self.is_ok() {
            self.articles.unwrap_or_default()
        } else {
            Vec::new()
        }
    }
}

/// An article exactly as NewsAPI sends it. Any field may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    pub source: Option<Source>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub content: Option<String>,
}

/// Something that can answer a [`Strategy`] with a NewsAPI response.
pub trait ArticleSource {
    /// Run one strategy and return the parsed response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not valid JSON.
    /// An API-level error (`status: "error"`) is *not* an `Err`.
    async fn query(&self, strategy: Strategy) -> Result<NewsApiResponse, FetchError>;
}

/// HTTP client for NewsAPI.
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl NewsApiClient {
    /// Build a client against `base_url` that authenticates with `api_key`.
    ///
    /// A missing trailing slash on `base_url` is added so endpoints join
    /// beneath it rather than replacing its last segment.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Full request URL for a strategy, including the API key.
    pub fn strategy_url(&self, strategy: Strategy) -> Result<Url, FetchError> {
        self.strategy_url_with_key(strategy, &self.api_key)
    }

    /// The request URL with the key replaced by `HIDDEN`, for logging.
    pub fn redacted_url(&self, strategy: Strategy) -> Result<Url, FetchError> {
        self.strategy_url_with_key(strategy, "HIDDEN")
    }

    fn strategy_url_with_key(&self, strategy: Strategy, key: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.join(strategy.endpoint())?;
        url.query_pairs_mut()
            .extend_pairs(strategy.params())
            .append_pair("apiKey", key);
        Ok(url)
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"HIDDEN")
            .finish()
    }
}

impl ArticleSource for NewsApiClient {
    #[instrument(level = "info", skip_all, fields(strategy = strategy.name()))]
    async fn query(&self, strategy: Strategy) -> Result<NewsApiResponse, FetchError> {
        let url = self.strategy_url(strategy)?;
        info!(url = %self.redacted_url(strategy)?, "Fetching news");

        let t0 = Instant::now();
        // reqwest errors carry the request URL, which contains the key.
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = resp.status();
        let body = resp.text().await.map_err(reqwest::Error::without_url)?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Received NewsAPI response"
        );

        match serde_json::from_str::<NewsApiResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!(
                    status = status.as_u16(),
                    error = %e,
                    body_preview = %truncate_for_log(&body, 300),
                    "NewsAPI returned a non-JSON body"
                );
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    fn client_for(server: &MockServer) -> NewsApiClient {
        NewsApiClient::new(&server.url("/v2"), "test-key", DEFAULT_USER_AGENT).unwrap()
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            Strategy::ALL,
            [
                Strategy::ArabicKeyword,
                Strategy::ArabicHeadlines,
                Strategy::EnglishHeadlines
            ]
        );
    }

    #[test]
    fn test_strategy_url_keyword_search() {
        let client = NewsApiClient::new(DEFAULT_BASE_URL, "k123", DEFAULT_USER_AGENT).unwrap();
        let url = client.strategy_url(Strategy::ArabicKeyword).unwrap();
        assert_eq!(url.path(), "/v2/everything");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "صحة".to_string()),
                ("language".to_string(), "ar".to_string()),
                ("sortBy".to_string(), "publishedAt".to_string()),
                ("apiKey".to_string(), "k123".to_string()),
            ]
        );
    }

    #[test]
    fn test_strategy_url_without_trailing_slash() {
        let client =
            NewsApiClient::new("https://newsapi.org/v2", "k123", DEFAULT_USER_AGENT).unwrap();
        let url = client.strategy_url(Strategy::EnglishHeadlines).unwrap();
        assert_eq!(url.path(), "/v2/top-headlines");
        assert!(url.query().unwrap().contains("language=en"));
        assert!(url.query().unwrap().contains("category=health"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = NewsApiClient::new("not a url", "k", DEFAULT_USER_AGENT).unwrap_err();
        assert!(matches!(err, FetchError::Url(_)));
    }

    #[test]
    fn test_error_response_has_no_articles() {
        let resp: NewsApiResponse = serde_json::from_value(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        }))
        .unwrap();
        assert!(!resp.is_ok());
        assert_eq!(resp.code.as_deref(), Some("apiKeyInvalid"));
        assert!(resp.into_articles().is_empty());
    }

    #[test]
    fn test_ok_response_without_articles_key() {
        let resp: NewsApiResponse =
            serde_json::from_value(json!({ "status": "ok", "totalResults": 0 })).unwrap();
        assert!(resp.is_ok());
        assert!(resp.into_articles().is_empty());
    }

    #[tokio::test]
    async fn test_query_sends_params_and_user_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/top-headlines")
                .query_param("category", "health")
                .query_param("language", "ar")
                .query_param("apiKey", "test-key")
                .header("user-agent", DEFAULT_USER_AGENT);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "ok",
                    "totalResults": 1,
                    "articles": [{
                        "source": { "id": null, "name": "Example" },
                        "author": null,
                        "title": "Headline",
                        "description": null,
                        "url": "https://example.com/a",
                        "urlToImage": "https://example.com/a.jpg",
                        "publishedAt": "2025-05-06T10:00:00Z",
                        "content": null
                    }]
                }));
        });

        let resp = client_for(&server)
            .query(Strategy::ArabicHeadlines)
            .await
            .unwrap();

        mock.assert();
        assert!(resp.is_ok());
        let articles = resp.into_articles();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("Headline"));
        assert_eq!(
            articles[0].source.as_ref().and_then(|s| s.name.as_deref()),
            Some("Example")
        );
    }

    #[tokio::test]
    async fn test_query_parses_error_body_on_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "error",
                    "code": "apiKeyInvalid",
                    "message": "Your API key is invalid or incorrect."
                }));
        });

        let resp = client_for(&server)
            .query(Strategy::ArabicKeyword)
            .await
            .unwrap();
        assert!(!resp.is_ok());
        assert_eq!(resp.code.as_deref(), Some("apiKeyInvalid"));
    }

    #[tokio::test]
    async fn test_query_rejects_non_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(502).body("<html>Bad Gateway</html>");
        });

        let err = client_for(&server)
            .query(Strategy::ArabicKeyword)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[test]
    fn test_redacted_url_hides_key_with_reserved_characters() {
        let key = "ab+c/d=";
        let client = NewsApiClient::new(DEFAULT_BASE_URL, key, DEFAULT_USER_AGENT).unwrap();

        for strategy in Strategy::ALL {
            let real = client.strategy_url(strategy).unwrap();
            let logged = client.redacted_url(strategy).unwrap();

            let real_key = real
                .query_pairs()
                .find(|(k, _)| k == "apiKey")
                .map(|(_, v)| v.into_owned());
            assert_eq!(real_key.as_deref(), Some(key));

            let logged = logged.as_str();
            assert!(logged.ends_with("apiKey=HIDDEN"));
            assert!(!logged.contains("ab%2Bc%2Fd%3D"));
            assert!(!logged.contains(key));
            assert_eq!(logged.split('?').next(), real.as_str().split('?').next());
        }
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = NewsApiClient::new(DEFAULT_BASE_URL, "s3cret", DEFAULT_USER_AGENT).unwrap();
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("s3cret"));
        assert!(dbg.contains("newsapi.org"));
    }

    #[tokio::test]
    async fn test_query_connection_error() {
        // Reserve a free port, then release it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base_url = format!("http://127.0.0.1:{port}/v2/");
        let client = NewsApiClient::new(&base_url, "test-key", DEFAULT_USER_AGENT).unwrap();
        let err = client.query(Strategy::ArabicKeyword).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert!(!err.to_string().contains("test-key"));
    }
}
