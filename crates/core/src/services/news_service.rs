use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::news::Article;
use crate::models::settings::Settings;
use crate::providers::registry::ProviderRegistry;

/// Fetches the latest market news for the news tab.
pub struct NewsService;

impl NewsService {
    pub fn new() -> Self {
        Self
    }

    /// Newest articles for `settings.news_query`, at most
    /// `settings.news_max_articles` of them.
    ///
    /// Any failure comes back as `FeedUnavailable` so the page can show an
    /// error in the news section and keep rendering everything else.
    pub async fn fetch_latest(
        &self,
        registry: &ProviderRegistry,
        settings: &Settings,
    ) -> Result<Vec<Article>, CoreError> {
        let provider = registry.news_provider().ok_or_else(|| {
            CoreError::FeedUnavailable("no news provider configured (missing API key)".into())
        })?;

        let max = settings.news_max_articles.max(1);
        let result = provider
            .fetch_latest_articles(&settings.news_query, max)
            .await
            .map_err(|e| match e {
                CoreError::FeedUnavailable(_) => e,
                other => CoreError::FeedUnavailable(other.to_string()),
            });

        match result {
            Ok(mut articles) => {
                articles.truncate(max);
                debug!(
                    "event=news_fetch module=news status=ok provider={} articles={}",
                    provider.name(),
                    articles.len()
                );
                Ok(articles)
            }
            Err(e) => {
                warn!(
                    "event=news_fetch module=news status=error provider={} error={e}",
                    provider.name()
                );
                Err(e)
            }
        }
    }
}

impl Default for NewsService {
    fn default() -> Self {
        Self::new()
    }
}
