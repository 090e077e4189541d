use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::NewsProvider;
use crate::errors::{redact_query, CoreError};
use crate::models::news::Article;

const BASE_URL: &str = "https://newsapi.org/v2/everything";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// NewsAPI provider for the news tab.
///
/// - **Requires**: API key (set via settings as "newsapi").
/// - **Endpoint**: `/v2/everything`, English articles, newest first.
///
/// Every failure (transport, non-2xx status, malformed body) is reported
/// as `CoreError::FeedUnavailable`.
pub struct NewsApiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiProvider {
    pub fn new(api_key: String) -> Self {
        let builder = Client::builder().user_agent(USER_AGENT);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different `/everything`-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Decode a successful `/everything` body into at most `max_count` articles.
    pub fn parse_articles(body: &str, max_count: usize) -> Result<Vec<Article>, CoreError> {
        let resp: EverythingResponse = serde_json::from_str(body)
            .map_err(|e| CoreError::FeedUnavailable(format!("Malformed response: {e}")))?;

        Ok(resp
            .articles
            .into_iter()
            .take(max_count)
            .map(RawArticle::into_article)
            .collect())
    }

    /// Build the error for a non-success response, using the API's own
    /// message when the body carries one.
    fn status_error(status: reqwest::StatusCode, body: &str) -> CoreError {
        let detail = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message);
        match detail {
            Some(message) => CoreError::FeedUnavailable(format!("HTTP {status}: {message}")),
            None => CoreError::FeedUnavailable(format!("HTTP {status}")),
        }
    }
}

// ── NewsAPI response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
}

impl RawArticle {
    fn into_article(self) -> Article {
        Article {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            image_url: self.url_to_image.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_latest_articles(
        &self,
        query: &str,
        max_count: usize,
    ) -> Result<Vec<Article>, CoreError> {
        let page_size = max_count.clamp(1, 100).to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CoreError::FeedUnavailable(redact_query(&e.to_string())))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::FeedUnavailable(redact_query(&e.to_string())))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        Self::parse_articles(&body, max_count)
    }
}
