use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::chart::LookbackPeriod;

/// API key name for the NewsAPI feed.
pub const NEWSAPI_KEY: &str = "newsapi";

/// API key name for the Alpha Vantage chart fallback.
pub const ALPHAVANTAGE_KEY: &str = "alphavantage";

/// Environment variables read by [`Settings::from_env`], mapped to key names.
const ENV_API_KEYS: [(&str, &str); 2] = [
    ("NEWS_API_KEY", NEWSAPI_KEY),
    ("ALPHAVANTAGE_API_KEY", ALPHAVANTAGE_KEY),
];

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// API keys for providers that require them.
    /// Keys: provider name ("newsapi", "alphavantage").
    /// Values: the API key string.
    pub api_keys: HashMap<String, String>,

    /// Keyword the news feed searches for.
    pub news_query: String,

    /// Maximum number of articles shown in the news tab. At least 1.
    pub news_max_articles: usize,

    /// Window covered by stock charts.
    pub chart_lookback: LookbackPeriod,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            news_query: "stocks".to_string(),
            news_max_articles: 5,
            chart_lookback: LookbackPeriod::OneMonth,
        }
    }
}

impl Settings {
    /// Defaults, with API keys taken from `NEWS_API_KEY` and
    /// `ALPHAVANTAGE_API_KEY` when those are set and non-empty.
    pub fn from_env() -> Self {
        Self::default().with_env_keys(|name| std::env::var(name).ok())
    }

    /// Layer API keys from a variable lookup over these settings.
    pub fn with_env_keys(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for (var, key) in ENV_API_KEYS {
            if let Some(value) = lookup(var) {
                let value = value.trim();
                if !value.is_empty() {
                    self.api_keys.insert(key.to_string(), value.to_string());
                }
            }
        }
        self
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }
}
