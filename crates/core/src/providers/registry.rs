use crate::models::settings::{Settings, ALPHAVANTAGE_KEY, NEWSAPI_KEY};

use super::alphavantage::AlphaVantageProvider;
use super::newsapi::NewsApiProvider;
use super::traits::{ChartDataProvider, NewsProvider};
#[cfg(not(target_arch = "wasm32"))]
use super::yahoo_finance::YahooFinanceProvider;

/// Registry of the external data sources a session can reach.
///
/// Chart providers are kept in priority order: the chart service tries them
/// front to back. At most one news provider is active.
pub struct ProviderRegistry {
    chart_providers: Vec<Box<dyn ChartDataProvider>>,
    news_provider: Option<Box<dyn NewsProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            chart_providers: Vec::new(),
            news_provider: None,
        }
    }

    /// Create a registry with all default providers the settings allow.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        // Yahoo Finance: charts, no API key needed (primary)
        // Not available on WASM (uses native reqwest/tokio connectors)
        #[cfg(not(target_arch = "wasm32"))]
        {
            match YahooFinanceProvider::new() {
                Ok(yahoo) => registry.register_chart(Box::new(yahoo)),
                Err(e) => log::warn!(
                    "event=provider_init module=providers status=error provider=yahoo error={e}"
                ),
            }
        }

        // Alpha Vantage: charts, requires API key (fallback)
        if let Some(key) = settings.api_key(ALPHAVANTAGE_KEY) {
            registry.register_chart(Box::new(AlphaVantageProvider::new(key.to_string())));
        }

        // NewsAPI: news tab, requires API key
        if let Some(key) = settings.api_key(NEWSAPI_KEY) {
            registry.set_news(Box::new(NewsApiProvider::new(key.to_string())));
        }

        registry
    }

    /// Append a chart provider (lowest priority so far).
    pub fn register_chart(&mut self, provider: Box<dyn ChartDataProvider>) {
        self.chart_providers.push(provider);
    }

    /// Install the news provider, replacing any previous one.
    pub fn set_news(&mut self, provider: Box<dyn NewsProvider>) {
        self.news_provider = Some(provider);
    }

    /// All chart providers, ordered by registration priority.
    pub fn chart_providers(&self) -> Vec<&dyn ChartDataProvider> {
        self.chart_providers.iter().map(|p| p.as_ref()).collect()
    }

    pub fn news_provider(&self) -> Option<&dyn NewsProvider> {
        self.news_provider.as_deref()
    }

    pub fn chart_provider_names(&self) -> Vec<String> {
        self.chart_providers
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
