use async_trait::async_trait;
use chrono::NaiveDate;
use time::OffsetDateTime;

use super::traits::ChartDataProvider;
use crate::errors::CoreError;
use crate::models::chart::{ClosePoint, LookbackPeriod};

const PROVIDER_NAME: &str = "Yahoo Finance";

/// Yahoo Finance chart provider, the default source for stock charts.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, ETFs, indices.
/// - **Data**: daily OHLCV history; only the close is used.
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's public
/// endpoints. Prices come back in the stock's listing currency.
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio). On WASM the
/// registry falls back to Alpha Vantage when a key is configured.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    /// Midnight UTC of `date` as a `time::OffsetDateTime`.
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let ts = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Invalid date {date}"),
            })?;
        OffsetDateTime::from_unix_timestamp(ts).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Date {date} out of range: {e}"),
        })
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }
}

#[async_trait]
impl ChartDataProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
    ) -> Result<Vec<ClosePoint>, CoreError> {
        let today = chrono::Utc::now().date_naive();
        let from = lookback.start_date(today);
        let start = Self::to_offset_datetime(from)?;
        // inclusive end
        let end = Self::to_offset_datetime(today + chrono::Duration::days(1))?;

        let resp = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to fetch history for {symbol}: {e}"),
            })?;

        let quotes = resp.quotes().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse quotes for {symbol}: {e}"),
        })?;

        let mut points: Vec<ClosePoint> = quotes
            .iter()
            .filter(|q| q.close.is_finite())
            .filter_map(|q| {
                let date = Self::timestamp_to_naive_date(q.timestamp)?;
                (date >= from && date <= today).then_some(ClosePoint {
                    date,
                    close: q.close,
                })
            })
            .collect();

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}
