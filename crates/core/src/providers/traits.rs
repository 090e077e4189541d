use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chart::{ClosePoint, LookbackPeriod};
use crate::models::news::Article;

/// Source of daily closing prices for the inline stock chart.
///
/// Each backend (Yahoo Finance, Alpha Vantage) implements this trait, so a
/// backend that stops working is swapped out without touching the session
/// core.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChartDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Daily closes for `symbol` over the lookback window, sorted by date.
    ///
    /// An unknown symbol may come back as an error or as an empty Vec;
    /// callers treat both as "no data".
    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
    ) -> Result<Vec<ClosePoint>, CoreError>;
}

/// Keyword-search news feed for the news tab.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Newest articles matching `query`, at most `max_count` of them.
    async fn fetch_latest_articles(
        &self,
        query: &str,
        max_count: usize,
    ) -> Result<Vec<Article>, CoreError>;
}
